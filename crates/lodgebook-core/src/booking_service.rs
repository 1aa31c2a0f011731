//! Validated CRUD for bookings, enforcing availability.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use uuid::Uuid;

use lodgebook_domain::{Booking, BookingDraft, DateRange};

use crate::{availability, storage::Storage, CoreError, CoreResult};

/// Booking lifecycle manager.
///
/// The availability check and the subsequent write are not one storage
/// transaction. An internal admission lock serializes create/update within
/// this service instance, which closes the check-then-act window for a
/// single process sharing one `BookingService`. Two processes (or two
/// service instances over one shared external store) can still race; callers
/// needing stronger guarantees must serialize at the storage layer.
pub struct BookingService<S> {
    storage: S,
    admission: Mutex<()>,
}

impl<S: Storage> BookingService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            admission: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Validates the draft, checks availability and persists a new booking.
    pub fn create(&self, draft: BookingDraft) -> CoreResult<Booking> {
        let _guard = self
            .admission
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let stay = self.validate(&draft)?;
        self.ensure_available(draft.cottage_id, stay, None)?;

        let booking = Booking::from_draft(draft);
        self.storage.put_booking(booking.clone())?;
        tracing::debug!(booking = %booking.id, cottage = %booking.cottage_id, "booking created");
        Ok(booking)
    }

    /// Replaces the booking identified by `id` with the validated draft. The
    /// availability check excludes the booking's own current record.
    pub fn update(&self, id: Uuid, draft: BookingDraft) -> CoreResult<Booking> {
        let _guard = self
            .admission
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.storage.booking(id)?.is_none() {
            return Err(CoreError::BookingNotFound(id));
        }
        let stay = self.validate(&draft)?;
        self.ensure_available(draft.cottage_id, stay, Some(id))?;

        let booking = Booking::from_draft_with_id(id, draft);
        self.storage.put_booking(booking.clone())?;
        tracing::debug!(booking = %booking.id, "booking updated");
        Ok(booking)
    }

    /// Removes the booking, returning the deleted record. Not idempotent: a
    /// second delete of the same id fails with `BookingNotFound`.
    pub fn delete(&self, id: Uuid) -> CoreResult<Booking> {
        let booking = self
            .storage
            .booking(id)?
            .ok_or(CoreError::BookingNotFound(id))?;
        self.storage.delete_booking(id)?;
        tracing::debug!(booking = %id, "booking deleted");
        Ok(booking)
    }

    pub fn booking(&self, id: Uuid) -> CoreResult<Booking> {
        self.storage
            .booking(id)?
            .ok_or(CoreError::BookingNotFound(id))
    }

    pub fn list(&self) -> CoreResult<Vec<Booking>> {
        self.storage.list_bookings()
    }

    /// Bookings whose check-in date falls within `[start, end]`, sorted by
    /// check-in. This is the listing the reports build on; it is not an
    /// overlap query and the two must not be interchanged.
    pub fn by_check_in_range(&self, start: NaiveDate, end: NaiveDate) -> CoreResult<Vec<Booking>> {
        self.storage.bookings_by_check_in(start, end)
    }

    /// Bookings checking in on or after `after`, soonest first.
    pub fn upcoming(&self, after: NaiveDate) -> CoreResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .storage
            .list_bookings()?
            .into_iter()
            .filter(|b| b.check_in_date >= after)
            .collect();
        bookings.sort_by_key(|b| (b.check_in_date, b.id));
        Ok(bookings)
    }

    fn ensure_available(
        &self,
        cottage_id: Uuid,
        stay: DateRange,
        excluding: Option<Uuid>,
    ) -> CoreResult<()> {
        match availability::first_conflict(&self.storage, cottage_id, stay, excluding)? {
            Some(conflict) => Err(CoreError::Conflict {
                cottage_id,
                booking_id: conflict.id,
            }),
            None => Ok(()),
        }
    }

    fn validate(&self, draft: &BookingDraft) -> CoreResult<DateRange> {
        if draft.full_name.trim().is_empty() {
            return Err(CoreError::validation("full_name", "must not be empty"));
        }
        if draft.email.trim().is_empty() {
            return Err(CoreError::validation("email", "must not be empty"));
        }
        if draft.phone.trim().is_empty() {
            return Err(CoreError::validation("phone", "must not be empty"));
        }
        let stay = DateRange::new(draft.check_in_date, draft.check_out_date).map_err(|_| {
            CoreError::validation(
                "check_in_date",
                format!(
                    "check-in {} must be before check-out {}",
                    draft.check_in_date, draft.check_out_date
                ),
            )
        })?;
        if self.storage.cottage(draft.cottage_id)?.is_none() {
            return Err(CoreError::validation(
                "cottage_id",
                format!("references unknown cottage {}", draft.cottage_id),
            ));
        }
        if self.storage.tariff(draft.tariff_id)?.is_none() {
            return Err(CoreError::validation(
                "tariff_id",
                format!("references unknown tariff {}", draft.tariff_id),
            ));
        }
        Ok(stay)
    }
}
