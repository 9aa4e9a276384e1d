//! Mathematical utilities: survival transforms and monotone search.

pub mod search;
pub mod survival;

pub use search::*;
pub use survival::*;
