//! Hardware abstraction traits for the UDAS display subsystem
//!
//! The display driver never touches registers directly; it talks to pins
//! through the traits in this crate, which chip- or board-specific code
//! implements.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

pub use gpio::{InputPin, IoPin, OutputPin};
