//! Inter-task communication
//!
//! Static cells shared between the refresh task and the frame RX task.
//! Scalar parameters live in atomics so the RX path never blocks the
//! refresh tick; the frame region itself sits behind an async mutex so a
//! producer write and a refresh blit can never interleave mid-frame.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use portable_atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicU8, Ordering};

use udas_core::framebuf::FrameTransport;
use udas_core::geometry::{Rect, RES_HOR, RES_VER};
use udas_core::selector::IDLE_CODE;

/// Refresh source selector, consumed and reset to idle every tick
pub static SOURCE_CODE: AtomicU8 = AtomicU8::new(IDLE_CODE);

/// Target rectangle for frame blits, written by the RX task
static TARGET_X: AtomicI32 = AtomicI32::new(0);
static TARGET_Y: AtomicI32 = AtomicI32::new(0);
static TARGET_WIDTH: AtomicI32 = AtomicI32::new(RES_HOR);
static TARGET_HEIGHT: AtomicI32 = AtomicI32::new(RES_VER);

/// Refresh ticks since boot, idle ticks included
pub static UPDATE_COUNT: AtomicU32 = AtomicU32::new(0);

/// Set once the controller bring-up sequence has completed
pub static DRIVER_READY: AtomicBool = AtomicBool::new(false);

/// The shared frame region and its session state
///
/// `None` until main installs the transport over the static backing
/// region. The session inside starts closed; the producer opens it over
/// the wire.
pub static FRAME: Mutex<CriticalSectionRawMutex, Option<FrameTransport<'static>>> =
    Mutex::new(None);

/// Snapshot the current frame blit target
pub fn target_rect() -> Rect {
    Rect::new(
        TARGET_X.load(Ordering::Relaxed),
        TARGET_Y.load(Ordering::Relaxed),
        TARGET_WIDTH.load(Ordering::Relaxed),
        TARGET_HEIGHT.load(Ordering::Relaxed),
    )
}

/// Replace the frame blit target
pub fn set_target_rect(rect: Rect) {
    TARGET_X.store(rect.x, Ordering::Relaxed);
    TARGET_Y.store(rect.y, Ordering::Relaxed);
    TARGET_WIDTH.store(rect.width, Ordering::Relaxed);
    TARGET_HEIGHT.store(rect.height, Ordering::Relaxed);
}
