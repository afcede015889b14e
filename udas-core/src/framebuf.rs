//! Shared frame buffer transport
//!
//! A fixed-capacity, page-granular byte region that an external producer
//! fills with pixel data and the refresh scheduler reads for blits. The
//! backing memory is provided by the caller (the firmware reserves one
//! static region); the transport tracks the single open session over it.
//!
//! Access rules:
//! - Sequential read/write copy up to the capacity and silently truncate
//!   the rest; a short write leaves the remainder as previously written.
//! - Page views alias the one backing store directly. There is no
//!   copy-on-write; every view observes every write.
//! - Only one session can be open at a time, and all access while the
//!   session is closed reports absence rather than touching stale data.

/// Size of one page of the shared region
pub const PAGE_SIZE: usize = 4096;

/// Number of pages in the canonical region
pub const BUFFER_PAGES: usize = 64;

/// Canonical capacity of the shared region in bytes
pub const BUFFER_SIZE: usize = PAGE_SIZE * BUFFER_PAGES;

/// Transport-level errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// A session is already open; only one live buffer instance exists
    AlreadyOpen,
    /// No session is open
    NotOpen,
}

/// The shared frame buffer and its session state
pub struct FrameTransport<'a> {
    data: &'a mut [u8],
    open: bool,
}

impl<'a> FrameTransport<'a> {
    /// Wrap a backing region; the session starts closed
    pub fn new(backing: &'a mut [u8]) -> Self {
        Self {
            data: backing,
            open: false,
        }
    }

    /// Capacity in bytes
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of whole or partial pages in the region
    pub fn pages(&self) -> usize {
        self.data.len().div_ceil(PAGE_SIZE)
    }

    /// Whether a consumer session is currently open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the session, zero-filling the region
    pub fn open(&mut self) -> Result<(), TransportError> {
        if self.open {
            return Err(TransportError::AlreadyOpen);
        }
        self.data.fill(0);
        self.open = true;
        Ok(())
    }

    /// Close the session
    ///
    /// After release the scheduler observes an absent buffer and skips its
    /// tick; the backing memory itself stays reserved.
    pub fn release(&mut self) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        self.open = false;
        Ok(())
    }

    /// Copy up to `min(dst.len(), capacity)` bytes out of the region
    ///
    /// Returns the number of bytes copied. Requests beyond the capacity
    /// are truncated, never an error.
    pub fn read(&self, dst: &mut [u8]) -> Result<usize, TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        let len = dst.len().min(self.data.len());
        dst[..len].copy_from_slice(&self.data[..len]);
        Ok(len)
    }

    /// Copy up to `min(src.len(), capacity)` bytes into the region
    ///
    /// Returns the number of bytes copied. No zero-padding: bytes past the
    /// end of a short write keep their previous contents.
    pub fn write(&mut self, src: &[u8]) -> Result<usize, TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        let len = src.len().min(self.data.len());
        self.data[..len].copy_from_slice(&src[..len]);
        Ok(len)
    }

    /// Borrow one page of the region
    pub fn page(&self, index: usize) -> Option<&[u8]> {
        if !self.open {
            return None;
        }
        let start = index.checked_mul(PAGE_SIZE)?;
        if start >= self.data.len() {
            return None;
        }
        let end = (start + PAGE_SIZE).min(self.data.len());
        Some(&self.data[start..end])
    }

    /// Mutably borrow one page of the region
    ///
    /// All pages alias the same backing store, so a producer writing
    /// through a page view is immediately visible to sequential readers.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        if !self.open {
            return None;
        }
        let start = index.checked_mul(PAGE_SIZE)?;
        if start >= self.data.len() {
            return None;
        }
        let end = (start + PAGE_SIZE).min(self.data.len());
        Some(&mut self.data[start..end])
    }

    /// The whole region, for the scheduler's blit
    pub fn contents(&self) -> Option<&[u8]> {
        if self.open {
            Some(self.data)
        } else {
            None
        }
    }
}
