#![no_std]

#[cfg(test)]
extern crate std;

mod error;

pub mod config;
pub mod device;
pub mod interface;
mod log;
pub mod params;
pub mod registers;

pub use crate::device::Kx134;
pub use crate::error::{Error, Result};
