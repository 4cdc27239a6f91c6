//! Domain types: the request payload, reference data, the rules themselves and
//! the result they produce. Nothing in here performs I/O.

pub mod payload;
pub mod ports;
pub mod reference;
pub mod result;
pub mod rule;
