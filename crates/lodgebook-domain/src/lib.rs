//! lodgebook-domain
//!
//! Pure domain models (Cottage, Tariff, Booking, Resort, report types).
//! No I/O, no services, no storage. Only data types and core enums.

pub mod booking;
pub mod common;
pub mod cottage;
pub mod report;
pub mod resort;
pub mod tariff;

pub use booking::*;
pub use common::*;
pub use cottage::*;
pub use report::*;
pub use resort::*;
pub use tariff::*;
