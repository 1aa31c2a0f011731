//! Domain model for rentable cottages.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cottage {
    pub id: Uuid,
    pub name: String,
    pub status: CottageStatus,
}

impl Cottage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: CottageStatus::Free,
        }
    }

    pub fn with_status(mut self, status: CottageStatus) -> Self {
        self.status = status;
        self
    }
}

impl Identifiable for Cottage {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Cottage {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Cottage {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.name, self.status)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Operator-visible availability state of a cottage.
#[derive(Default)]
pub enum CottageStatus {
    #[default]
    Free,
    Booked,
    Occupied,
}

impl fmt::Display for CottageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CottageStatus::Free => "Free",
            CottageStatus::Booked => "Booked",
            CottageStatus::Occupied => "Occupied",
        };
        f.write_str(label)
    }
}
