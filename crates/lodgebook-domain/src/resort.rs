//! The whole-site aggregate persisted by the bundled storage backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Booking, Cottage, Tariff};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resort {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub cottages: Vec<Cottage>,
    #[serde(default)]
    pub tariffs: Vec<Tariff>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Resort::schema_version_default")]
    pub schema_version: u8,
}

impl Resort {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            cottages: Vec::new(),
            tariffs: Vec::new(),
            bookings: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn cottage(&self, id: Uuid) -> Option<&Cottage> {
        self.cottages.iter().find(|c| c.id == id)
    }

    pub fn tariff(&self, id: Uuid) -> Option<&Tariff> {
        self.tariffs.iter().find(|t| t.id == id)
    }

    pub fn booking(&self, id: Uuid) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Inserts or replaces by id, full-record semantics.
    pub fn upsert_cottage(&mut self, cottage: Cottage) -> Uuid {
        let id = cottage.id;
        match self.cottages.iter_mut().find(|c| c.id == id) {
            Some(slot) => *slot = cottage,
            None => self.cottages.push(cottage),
        }
        self.touch();
        id
    }

    pub fn upsert_tariff(&mut self, tariff: Tariff) -> Uuid {
        let id = tariff.id;
        match self.tariffs.iter_mut().find(|t| t.id == id) {
            Some(slot) => *slot = tariff,
            None => self.tariffs.push(tariff),
        }
        self.touch();
        id
    }

    pub fn upsert_booking(&mut self, booking: Booking) -> Uuid {
        let id = booking.id;
        match self.bookings.iter_mut().find(|b| b.id == id) {
            Some(slot) => *slot = booking,
            None => self.bookings.push(booking),
        }
        self.touch();
        id
    }

    /// No cascade: bookings keep their cottage reference after removal.
    pub fn remove_cottage(&mut self, id: Uuid) -> Option<Cottage> {
        let index = self.cottages.iter().position(|c| c.id == id)?;
        self.touch();
        Some(self.cottages.remove(index))
    }

    pub fn remove_tariff(&mut self, id: Uuid) -> Option<Tariff> {
        let index = self.tariffs.iter().position(|t| t.id == id)?;
        self.touch();
        Some(self.tariffs.remove(index))
    }

    pub fn remove_booking(&mut self, id: Uuid) -> Option<Booking> {
        let index = self.bookings.iter().position(|b| b.id == id)?;
        self.touch();
        Some(self.bookings.remove(index))
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
