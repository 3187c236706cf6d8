#![cfg_attr(not(test), no_std)]

pub mod conversions;
pub mod dispatch;
pub mod drivers;
pub mod error;
pub mod poll;
pub mod transport;
pub mod types;

mod crc;

pub use dispatch::{Config, acquire};
pub use error::Error;
pub use types::{Capability, ChipKind, RawValue, Reading};
