//! Read-only availability checks over the storage gateway.
//!
//! Overlap is evaluated on half-open stays: `existing.check_in < new.check_out
//! && existing.check_out > new.check_in`. A checkout on day D never conflicts
//! with a check-in on day D.

use uuid::Uuid;

use lodgebook_domain::{Booking, Cottage, DateRange};

use crate::{storage::Storage, CoreResult};

/// Returns `true` when no booking for `cottage_id` overlaps `range`.
///
/// `excluding` skips one booking id, used when re-checking a booking being
/// updated against itself. Callers must have validated `range` already; see
/// [`BookingService`](crate::BookingService).
pub fn is_available<S: Storage>(
    storage: &S,
    cottage_id: Uuid,
    range: DateRange,
    excluding: Option<Uuid>,
) -> CoreResult<bool> {
    Ok(first_conflict(storage, cottage_id, range, excluding)?.is_none())
}

/// The earliest booking colliding with `range`, if any. Ordered by check-in
/// date, then id, so the reported conflict is stable across backends.
pub fn first_conflict<S: Storage>(
    storage: &S,
    cottage_id: Uuid,
    range: DateRange,
    excluding: Option<Uuid>,
) -> CoreResult<Option<Booking>> {
    let mut conflicts: Vec<Booking> = storage
        .bookings_overlapping(cottage_id, range)?
        .into_iter()
        .filter(|booking| excluding != Some(booking.id))
        .collect();
    conflicts.sort_by_key(|booking| (booking.check_in_date, booking.id));
    Ok(conflicts.into_iter().next())
}

/// Cottages with no booking overlapping `range`, in storage order.
pub fn available_cottages<S: Storage>(storage: &S, range: DateRange) -> CoreResult<Vec<Cottage>> {
    let mut available = Vec::new();
    for cottage in storage.list_cottages()? {
        if is_available(storage, cottage.id, range, None)? {
            available.push(cottage);
        }
    }
    Ok(available)
}
