//! CLI command handling

pub mod barcode;
pub mod output;
pub mod simulate;

pub use barcode::*;
pub use output::*;
pub use simulate::*;
