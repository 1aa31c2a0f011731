use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use lodgebook_domain::{Booking, Cottage, DateRange, Resort, Tariff};

use crate::CoreError;

/// Abstraction over persistence backends holding cottages, tariffs and
/// bookings.
///
/// `put_*` methods carry full-record replacement semantics; there is no
/// partial update. `delete_*` methods succeed silently for absent ids — the
/// not-found contract for bookings lives in
/// [`BookingService`](crate::BookingService), which checks existence first.
/// Backend failures surface as the `Storage`/`Io`/`Serde` kinds of
/// [`CoreError`] and are never retried here.
pub trait Storage: Send + Sync {
    fn list_cottages(&self) -> Result<Vec<Cottage>, CoreError>;
    fn cottage(&self, id: Uuid) -> Result<Option<Cottage>, CoreError>;
    fn put_cottage(&self, cottage: Cottage) -> Result<(), CoreError>;
    fn delete_cottage(&self, id: Uuid) -> Result<(), CoreError>;

    fn list_tariffs(&self) -> Result<Vec<Tariff>, CoreError>;
    fn tariff(&self, id: Uuid) -> Result<Option<Tariff>, CoreError>;
    fn put_tariff(&self, tariff: Tariff) -> Result<(), CoreError>;
    fn delete_tariff(&self, id: Uuid) -> Result<(), CoreError>;

    /// Bookings for one cottage whose stay overlaps `range` under half-open
    /// interval semantics.
    fn bookings_overlapping(
        &self,
        cottage_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<Booking>, CoreError>;
    /// Bookings whose check-in date falls in `[start, end]`, all cottages,
    /// sorted by check-in date. Deliberately not an overlap query; the two
    /// semantics coexist under separate names.
    fn bookings_by_check_in(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, CoreError>;
    fn list_bookings(&self) -> Result<Vec<Booking>, CoreError>;
    fn booking(&self, id: Uuid) -> Result<Option<Booking>, CoreError>;
    fn put_booking(&self, booking: Booking) -> Result<(), CoreError>;
    fn delete_booking(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Detects dangling references and other anomalies within a resort snapshot.
pub fn resort_warnings(resort: &Resort) -> Vec<String> {
    let cottage_ids: HashSet<_> = resort.cottages.iter().map(|c| c.id).collect();
    let tariff_ids: HashSet<_> = resort.tariffs.iter().map(|t| t.id).collect();
    let mut warnings = Vec::new();

    for booking in &resort.bookings {
        if !cottage_ids.contains(&booking.cottage_id) {
            warnings.push(format!(
                "booking {} references unknown cottage {}",
                booking.id, booking.cottage_id
            ));
        }
        if !tariff_ids.contains(&booking.tariff_id) {
            warnings.push(format!(
                "booking {} references unknown tariff {}",
                booking.id, booking.tariff_id
            ));
        }
        if booking.check_out_date <= booking.check_in_date {
            warnings.push(format!(
                "booking {} has an inverted stay {}..{}",
                booking.id, booking.check_in_date, booking.check_out_date
            ));
        }
    }
    warnings
}
