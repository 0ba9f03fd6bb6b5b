//! Record table owned by a session.

pub mod table;

pub use table::*;
