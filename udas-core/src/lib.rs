//! Board-agnostic core logic for the UDAS display subsystem
//!
//! This crate contains all display logic that does not depend on
//! specific hardware implementations:
//!
//! - Panel geometry and rectangle clipping
//! - RGB565 color constants
//! - Font metrics and glyph table lookup
//! - Display state (colors, active font)
//! - The shared frame buffer transport
//! - Refresh content selection and built-in test patterns

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod font;
pub mod framebuf;
pub mod geometry;
pub mod pattern;
pub mod selector;
pub mod state;
