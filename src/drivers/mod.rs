//! One driver per supported chip. Each drives its own acquisition protocol
//! through a [`Transport`](crate::transport::Transport) and returns a
//! chip-specific `Measurement` holding the raw values it read.

pub mod aht10;
pub mod mcp9801;
pub mod sht30;

pub use aht10::Aht10;
pub use mcp9801::Mcp9801;
pub use sht30::Sht30;
