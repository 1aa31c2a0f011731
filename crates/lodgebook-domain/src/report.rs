//! Aggregated occupancy and financial report types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Booking;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Occupancy snapshot for a single day.
pub struct OccupancyReport {
    pub date: NaiveDate,
    pub total_cottages: usize,
    pub occupied_cottages: usize,
    /// Percentage in `[0, 100]`; `0.0` when the site has no cottages.
    pub occupancy_rate: f64,
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Revenue and popularity summary for a date window.
pub struct FinancialReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_bookings: usize,
    pub total_revenue: f64,
    /// `0.0` when the window holds no bookings.
    pub average_booking_value: f64,
    /// Empty when the window holds no bookings or the winning record was
    /// deleted.
    pub most_popular_tariff: String,
    pub most_booked_cottage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Tagged report variant handed to presentation layers, which pattern-match
/// on the kind instead of downcasting.
pub enum Report {
    Occupancy(OccupancyReport),
    Financial(FinancialReport),
}

impl Report {
    pub fn kind(&self) -> &'static str {
        match self {
            Report::Occupancy(_) => "occupancy",
            Report::Financial(_) => "financial",
        }
    }
}
