//! Driver library for the LM15SGFNZ07 101x80 pixel, 12-bit color dot matrix LCD module found in
//! a number of Siemens handsets.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate embedded_hal as hal;

pub mod color;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod interface;

// Re-exports for primary API.
pub use color::Color;
pub use command::{consts, InverseMode, Window};
pub use config::Config;
pub use display::{Display, Lifecycle};
pub use error::Error;
pub use font::{Font, Glyph};
pub use interface::spi::{ControlPins, SpiInterface};
pub use interface::DisplayInterface;
