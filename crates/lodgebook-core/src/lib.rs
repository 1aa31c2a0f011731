//! lodgebook-core
//!
//! Business logic and services for the cottage-booking domain.
//! Depends on lodgebook-domain. No UI, no transport, no direct file I/O;
//! persistence goes through the [`storage::Storage`] gateway.

pub mod availability;
pub mod booking_service;
pub mod calendar;
pub mod cottage_service;
pub mod error;
pub mod memory;
pub mod report_service;
pub mod storage;
pub mod tariff_service;
pub mod utils;

pub use booking_service::BookingService;
pub use calendar::{calendar_days, CalendarDay, CalendarSlot};
pub use cottage_service::CottageService;
pub use error::{CoreError, CoreResult};
pub use memory::MemoryStorage;
pub use report_service::{MonthlyOccupancy, ReportService, YearlyFinancials};
pub use storage::{resort_warnings, Storage};
pub use tariff_service::TariffService;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("lodgebook core tracing initialized.");
    });
}
