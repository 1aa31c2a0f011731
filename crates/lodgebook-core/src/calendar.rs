//! Per-day occupancy map for calendar views.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{storage::Storage, CoreResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One booked cottage on one calendar day.
pub struct CalendarSlot {
    pub booking_id: Uuid,
    pub guest_name: String,
    /// Check-in or checkout day, rendered as a split cell.
    pub is_part_day: bool,
    pub is_check_in: bool,
    pub is_check_out: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Occupancy of every cottage on a single day.
pub struct CalendarDay {
    pub date: NaiveDate,
    pub cottages: HashMap<Uuid, CalendarSlot>,
}

/// Builds the day-by-day occupancy map for the inclusive window
/// `[start, end]`. Bookings with inverted stored ranges are skipped, the
/// way legacy rows always were.
pub fn calendar_days<S: Storage>(
    storage: &S,
    start: NaiveDate,
    end: NaiveDate,
) -> CoreResult<Vec<CalendarDay>> {
    let mut days: Vec<CalendarDay> = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(CalendarDay {
            date: day,
            cottages: HashMap::new(),
        });
        day += Duration::days(1);
    }

    for booking in storage.list_bookings()? {
        let stay = match booking.stay() {
            Some(stay) => stay,
            None => continue,
        };
        let last_night = stay.end - Duration::days(1);

        for date in stay.days() {
            if let Some(entry) = day_entry(&mut days, start, end, date) {
                let is_check_in = date == stay.start;
                let is_check_out = date == last_night;
                entry.cottages.insert(
                    booking.cottage_id,
                    CalendarSlot {
                        booking_id: booking.id,
                        guest_name: booking.full_name.clone(),
                        is_part_day: is_check_in || is_check_out,
                        is_check_in,
                        is_check_out,
                    },
                );
            }
        }

        // The checkout day itself shows as a departing half-cell.
        if let Some(entry) = day_entry(&mut days, start, end, stay.end) {
            entry.cottages.insert(
                booking.cottage_id,
                CalendarSlot {
                    booking_id: booking.id,
                    guest_name: booking.full_name.clone(),
                    is_part_day: true,
                    is_check_in: false,
                    is_check_out: true,
                },
            );
        }
    }

    Ok(days)
}

fn day_entry<'a>(
    days: &'a mut [CalendarDay],
    start: NaiveDate,
    end: NaiveDate,
    date: NaiveDate,
) -> Option<&'a mut CalendarDay> {
    if date < start || date > end {
        return None;
    }
    let index = (date - start).num_days() as usize;
    days.get_mut(index)
}
