//! Domain models for cottage reservations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cottage_id: Uuid,
    pub tariff_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_scan_path: Option<String>,
}

impl Booking {
    pub fn from_draft(draft: BookingDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: draft.full_name,
            email: draft.email,
            phone: draft.phone,
            cottage_id: draft.cottage_id,
            tariff_id: draft.tariff_id,
            check_in_date: draft.check_in_date,
            check_out_date: draft.check_out_date,
            document_scan_path: draft.document_scan_path,
        }
    }

    /// Rebuilds the full record from a draft, keeping an existing id.
    pub fn from_draft_with_id(id: Uuid, draft: BookingDraft) -> Self {
        let mut booking = Self::from_draft(draft);
        booking.id = id;
        booking
    }

    /// The stay as a half-open interval. `None` when the stored dates are
    /// inverted; such rows are tolerated in storage but excluded from
    /// calendars and availability maths.
    pub fn stay(&self) -> Option<DateRange> {
        DateRange::new(self.check_in_date, self.check_out_date).ok()
    }

    /// Whole days between check-in and check-out.
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    pub fn overlaps(&self, range: &DateRange) -> bool {
        self.check_in_date < range.end && self.check_out_date > range.start
    }
}

impl Identifiable for Booking {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Booking {
    fn display_label(&self) -> String {
        format!(
            "{} {}..{}",
            self.full_name, self.check_in_date, self.check_out_date
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Input to booking creation and full-record update. Carries every
/// [`Booking`] field except the generated id.
pub struct BookingDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cottage_id: Uuid,
    pub tariff_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_scan_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(check_in: NaiveDate, check_out: NaiveDate) -> BookingDraft {
        BookingDraft {
            full_name: "Ivan Petrov".into(),
            email: "ivan@example.com".into(),
            phone: "+7 900 000-00-00".into(),
            cottage_id: Uuid::new_v4(),
            tariff_id: Uuid::new_v4(),
            check_in_date: check_in,
            check_out_date: check_out,
            document_scan_path: None,
        }
    }

    #[test]
    fn nights_counts_whole_days() {
        let booking = Booking::from_draft(draft(date(2024, 6, 1), date(2024, 6, 3)));
        assert_eq!(booking.nights(), 2);
    }

    #[test]
    fn stay_is_none_for_inverted_dates() {
        let booking = Booking::from_draft(draft(date(2024, 6, 3), date(2024, 6, 1)));
        assert!(booking.stay().is_none());
    }

    #[test]
    fn booking_round_trips_through_json() {
        let booking = Booking::from_draft(draft(date(2024, 6, 1), date(2024, 6, 3)));
        let json = serde_json::to_string(&booking).unwrap();
        let parsed: Booking = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, booking);
    }
}
