//! Static reference data: point tables, reference factors, risk regions.
//!
//! Everything here is a compile-time constant, so it can be read from any
//! number of threads without synchronization.

pub mod points;
pub mod reference;
pub mod regions;

pub use points::*;
pub use reference::*;
pub use regions::*;
