#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod asynch;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
mod module_timing;
pub mod payload;

#[cfg(test)]
mod test_helpers;

pub use asynch::uploader::{CellularUploader, Uploader};
pub use asynch::Modem;
