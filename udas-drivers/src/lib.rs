//! Display controller drivers
//!
//! This crate provides concrete display controller drivers built on the
//! pin traits from udas-hal and the board-agnostic logic in udas-core:
//!
//! - SSD1963 parallel TFT controller (bit-banged 16-bit 8080 bus)

#![no_std]
#![deny(unsafe_code)]

pub mod ssd1963;
