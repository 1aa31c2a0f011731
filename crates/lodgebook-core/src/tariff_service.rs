//! Business logic helpers for managing tariffs.

use uuid::Uuid;

use lodgebook_domain::Tariff;

use crate::{storage::Storage, CoreError, CoreResult};

/// Provides validated CRUD helpers for daily price plans.
pub struct TariffService<S> {
    storage: S,
}

impl<S: Storage> TariffService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn create(&self, name: impl Into<String>, price_per_day: f64) -> CoreResult<Tariff> {
        let name = name.into();
        validate_name(&name)?;
        validate_price(price_per_day)?;
        let tariff = Tariff::new(name, price_per_day);
        self.storage.put_tariff(tariff.clone())?;
        Ok(tariff)
    }

    /// Full-record replacement of an existing tariff.
    pub fn update(&self, tariff: Tariff) -> CoreResult<Tariff> {
        validate_name(&tariff.name)?;
        validate_price(tariff.price_per_day)?;
        if self.storage.tariff(tariff.id)?.is_none() {
            return Err(CoreError::TariffNotFound(tariff.id));
        }
        self.storage.put_tariff(tariff.clone())?;
        Ok(tariff)
    }

    /// Removes the tariff. Bookings referencing it are untouched; revenue
    /// reporting excludes them from that point on.
    pub fn delete(&self, id: Uuid) -> CoreResult<Tariff> {
        let tariff = self
            .storage
            .tariff(id)?
            .ok_or(CoreError::TariffNotFound(id))?;
        self.storage.delete_tariff(id)?;
        Ok(tariff)
    }

    pub fn get(&self, id: Uuid) -> CoreResult<Tariff> {
        self.storage
            .tariff(id)?
            .ok_or(CoreError::TariffNotFound(id))
    }

    pub fn list(&self) -> CoreResult<Vec<Tariff>> {
        self.storage.list_tariffs()
    }

    pub fn by_price_range(&self, min: f64, max: f64) -> CoreResult<Vec<Tariff>> {
        Ok(self
            .storage
            .list_tariffs()?
            .into_iter()
            .filter(|t| t.price_per_day >= min && t.price_per_day <= max)
            .collect())
    }
}

fn validate_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("name", "must not be empty"));
    }
    Ok(())
}

fn validate_price(price_per_day: f64) -> CoreResult<()> {
    if !price_per_day.is_finite() || price_per_day < 0.0 {
        return Err(CoreError::validation(
            "price_per_day",
            format!("must be a non-negative amount, got {price_per_day}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn service() -> TariffService<MemoryStorage> {
        TariffService::new(MemoryStorage::default())
    }

    #[test]
    fn create_rejects_negative_price() {
        let err = service().create("Standard", -1.0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation {
                field: "price_per_day",
                ..
            }
        ));
    }

    #[test]
    fn zero_price_is_allowed() {
        let tariff = service().create("Promo", 0.0).unwrap();
        assert_eq!(tariff.price_per_day, 0.0);
    }

    #[test]
    fn by_price_range_is_inclusive() {
        let svc = service();
        svc.create("Budget", 50.0).unwrap();
        let standard = svc.create("Standard", 100.0).unwrap();
        svc.create("Premium", 250.0).unwrap();

        let mid = svc.by_price_range(100.0, 200.0).unwrap();
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].id, standard.id);
    }

    #[test]
    fn delete_twice_fails() {
        let svc = service();
        let tariff = svc.create("Standard", 100.0).unwrap();
        svc.delete(tariff.id).unwrap();
        assert!(matches!(
            svc.delete(tariff.id).unwrap_err(),
            CoreError::TariffNotFound(_)
        ));
    }
}
