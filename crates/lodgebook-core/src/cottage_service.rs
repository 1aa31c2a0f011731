//! Business logic helpers for managing cottages.

use uuid::Uuid;

use lodgebook_domain::{Cottage, CottageStatus};

use crate::{storage::Storage, CoreError, CoreResult};

/// Provides validated CRUD helpers for cottages.
pub struct CottageService<S> {
    storage: S,
}

impl<S: Storage> CottageService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn create(&self, name: impl Into<String>) -> CoreResult<Cottage> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::validation("name", "must not be empty"));
        }
        let cottage = Cottage::new(name);
        self.storage.put_cottage(cottage.clone())?;
        Ok(cottage)
    }

    /// Full-record replacement of an existing cottage.
    pub fn update(&self, cottage: Cottage) -> CoreResult<Cottage> {
        if cottage.name.trim().is_empty() {
            return Err(CoreError::validation("name", "must not be empty"));
        }
        if self.storage.cottage(cottage.id)?.is_none() {
            return Err(CoreError::CottageNotFound(cottage.id));
        }
        self.storage.put_cottage(cottage.clone())?;
        Ok(cottage)
    }

    /// Removes the cottage. Historical bookings keep their reference; the
    /// dangling id is tolerated and surfaced by
    /// [`resort_warnings`](crate::resort_warnings).
    pub fn delete(&self, id: Uuid) -> CoreResult<Cottage> {
        let cottage = self
            .storage
            .cottage(id)?
            .ok_or(CoreError::CottageNotFound(id))?;
        self.storage.delete_cottage(id)?;
        Ok(cottage)
    }

    pub fn get(&self, id: Uuid) -> CoreResult<Cottage> {
        self.storage
            .cottage(id)?
            .ok_or(CoreError::CottageNotFound(id))
    }

    pub fn list(&self) -> CoreResult<Vec<Cottage>> {
        self.storage.list_cottages()
    }

    pub fn by_status(&self, status: CottageStatus) -> CoreResult<Vec<Cottage>> {
        Ok(self
            .storage
            .list_cottages()?
            .into_iter()
            .filter(|c| c.status == status)
            .collect())
    }

    /// Status transition driven by check-in/check-out flows.
    pub fn set_status(&self, id: Uuid, status: CottageStatus) -> CoreResult<Cottage> {
        let mut cottage = self.get(id)?;
        cottage.status = status;
        self.storage.put_cottage(cottage.clone())?;
        Ok(cottage)
    }
}
