//! In-memory storage gateway used by tests and embedding callers.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use lodgebook_domain::{Booking, Cottage, DateRange, Resort, Tariff};

use crate::{storage::Storage, CoreError};

/// Keeps the whole [`Resort`] aggregate behind a lock. Clones share the
/// underlying data, so one handle can be cloned into several services.
#[derive(Clone)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Resort>>,
}

impl MemoryStorage {
    pub fn new(resort: Resort) -> Self {
        Self {
            inner: Arc::new(RwLock::new(resort)),
        }
    }

    /// Snapshot of the current aggregate state.
    pub fn snapshot(&self) -> Result<Resort, CoreError> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Resort>, CoreError> {
        self.inner
            .read()
            .map_err(|_| CoreError::Storage("storage lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Resort>, CoreError> {
        self.inner
            .write()
            .map_err(|_| CoreError::Storage("storage lock poisoned".into()))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(Resort::new("resort"))
    }
}

impl Storage for MemoryStorage {
    fn list_cottages(&self) -> Result<Vec<Cottage>, CoreError> {
        Ok(self.read()?.cottages.clone())
    }

    fn cottage(&self, id: Uuid) -> Result<Option<Cottage>, CoreError> {
        Ok(self.read()?.cottage(id).cloned())
    }

    fn put_cottage(&self, cottage: Cottage) -> Result<(), CoreError> {
        self.write()?.upsert_cottage(cottage);
        Ok(())
    }

    fn delete_cottage(&self, id: Uuid) -> Result<(), CoreError> {
        self.write()?.remove_cottage(id);
        Ok(())
    }

    fn list_tariffs(&self) -> Result<Vec<Tariff>, CoreError> {
        Ok(self.read()?.tariffs.clone())
    }

    fn tariff(&self, id: Uuid) -> Result<Option<Tariff>, CoreError> {
        Ok(self.read()?.tariff(id).cloned())
    }

    fn put_tariff(&self, tariff: Tariff) -> Result<(), CoreError> {
        self.write()?.upsert_tariff(tariff);
        Ok(())
    }

    fn delete_tariff(&self, id: Uuid) -> Result<(), CoreError> {
        self.write()?.remove_tariff(id);
        Ok(())
    }

    fn bookings_overlapping(
        &self,
        cottage_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<Booking>, CoreError> {
        Ok(self
            .read()?
            .bookings
            .iter()
            .filter(|b| b.cottage_id == cottage_id && b.overlaps(&range))
            .cloned()
            .collect())
    }

    fn bookings_by_check_in(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, CoreError> {
        let mut bookings: Vec<Booking> = self
            .read()?
            .bookings
            .iter()
            .filter(|b| b.check_in_date >= start && b.check_in_date <= end)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.check_in_date, b.id));
        Ok(bookings)
    }

    fn list_bookings(&self) -> Result<Vec<Booking>, CoreError> {
        Ok(self.read()?.bookings.clone())
    }

    fn booking(&self, id: Uuid) -> Result<Option<Booking>, CoreError> {
        Ok(self.read()?.booking(id).cloned())
    }

    fn put_booking(&self, booking: Booking) -> Result<(), CoreError> {
        self.write()?.upsert_booking(booking);
        Ok(())
    }

    fn delete_booking(&self, id: Uuid) -> Result<(), CoreError> {
        self.write()?.remove_booking(id);
        Ok(())
    }
}
