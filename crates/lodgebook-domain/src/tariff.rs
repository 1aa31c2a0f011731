//! Domain model for daily price plans.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tariff {
    pub id: Uuid,
    pub name: String,
    pub price_per_day: f64,
}

impl Tariff {
    pub fn new(name: impl Into<String>, price_per_day: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price_per_day,
        }
    }
}

impl Identifiable for Tariff {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Tariff {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Tariff {
    fn display_label(&self) -> String {
        format!("{} ({:.2}/day)", self.name, self.price_per_day)
    }
}
