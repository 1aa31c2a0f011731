//! Occupancy and financial aggregation over the storage gateway.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use lodgebook_domain::{
    days_in_month, month_bounds, Booking, FinancialReport, OccupancyReport, Tariff,
};

use crate::{storage::Storage, CoreError, CoreResult};

/// Report aggregator. Reads the same gateway the lifecycle manager writes;
/// report windows select bookings by check-in date, matching the listing
/// semantics, not the availability overlap.
pub struct ReportService<S> {
    storage: S,
}

impl<S: Storage> ReportService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Occupancy snapshot for one day. Counts cottages with a booking
    /// checking in on `date`; the rate is `0.0` for a site with no cottages.
    pub fn occupancy(&self, date: NaiveDate) -> CoreResult<OccupancyReport> {
        let bookings = self.storage.bookings_by_check_in(date, date)?;
        let total_cottages = self.storage.list_cottages()?.len();
        let occupied_cottages = bookings
            .iter()
            .map(|b| b.cottage_id)
            .collect::<HashSet<_>>()
            .len();
        let occupancy_rate = if total_cottages == 0 {
            0.0
        } else {
            occupied_cottages as f64 / total_cottages as f64 * 100.0
        };
        Ok(OccupancyReport {
            date,
            total_cottages,
            occupied_cottages,
            occupancy_rate,
            bookings,
        })
    }

    /// Revenue and popularity summary for `[start, end]` (check-in window).
    pub fn financial(&self, start: NaiveDate, end: NaiveDate) -> CoreResult<FinancialReport> {
        let bookings = self.storage.bookings_by_check_in(start, end)?;
        let tariffs = self.storage.list_tariffs()?;
        let cottages = self.storage.list_cottages()?;

        let total_bookings = bookings.len();
        let total_revenue = revenue(&bookings, &tariffs);
        let average_booking_value = if total_bookings > 0 {
            total_revenue / total_bookings as f64
        } else {
            0.0
        };

        let most_popular_tariff = top_by_count(bookings.iter().map(|b| b.tariff_id))
            .and_then(|id| tariffs.iter().find(|t| t.id == id))
            .map(|t| t.name.clone())
            .unwrap_or_default();
        let most_booked_cottage = top_by_count(bookings.iter().map(|b| b.cottage_id))
            .and_then(|id| cottages.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_default();

        Ok(FinancialReport {
            start_date: start,
            end_date: end,
            total_bookings,
            total_revenue,
            average_booking_value,
            most_popular_tariff,
            most_booked_cottage,
        })
    }

    /// Lazily yields one occupancy report per calendar day of the month.
    /// Each call returns a fresh iterator, so the sequence is restartable.
    pub fn monthly(&self, year: i32, month: u32) -> CoreResult<MonthlyOccupancy<'_, S>> {
        if month_bounds(year, month).is_none() {
            return Err(CoreError::validation(
                "month",
                format!("{year}-{month} is not a calendar month"),
            ));
        }
        Ok(MonthlyOccupancy {
            service: self,
            year,
            month,
            day: 1,
            last_day: days_in_month(year, month),
        })
    }

    /// Lazily yields one financial report per calendar month of the year.
    pub fn yearly(&self, year: i32) -> YearlyFinancials<'_, S> {
        YearlyFinancials {
            service: self,
            year,
            month: 1,
        }
    }
}

/// Iterator behind [`ReportService::monthly`].
pub struct MonthlyOccupancy<'a, S> {
    service: &'a ReportService<S>,
    year: i32,
    month: u32,
    day: u32,
    last_day: u32,
}

impl<S> std::fmt::Debug for MonthlyOccupancy<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonthlyOccupancy")
            .field("year", &self.year)
            .field("month", &self.month)
            .field("day", &self.day)
            .field("last_day", &self.last_day)
            .finish()
    }
}

impl<S: Storage> Iterator for MonthlyOccupancy<'_, S> {
    type Item = CoreResult<OccupancyReport>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.day > self.last_day {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?;
        self.day += 1;
        Some(self.service.occupancy(date))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last_day + 1).saturating_sub(self.day) as usize;
        (remaining, Some(remaining))
    }
}

/// Iterator behind [`ReportService::yearly`].
pub struct YearlyFinancials<'a, S> {
    service: &'a ReportService<S>,
    year: i32,
    month: u32,
}

impl<S: Storage> Iterator for YearlyFinancials<'_, S> {
    type Item = CoreResult<FinancialReport>;

    fn next(&mut self) -> Option<Self::Item> {
        let (first, last) = month_bounds(self.year, self.month)?;
        self.month += 1;
        Some(self.service.financial(first, last))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = 13_u32.saturating_sub(self.month) as usize;
        (remaining, Some(remaining))
    }
}

fn revenue(bookings: &[Booking], tariffs: &[Tariff]) -> f64 {
    let mut total = 0.0;
    for booking in bookings {
        match tariffs.iter().find(|t| t.id == booking.tariff_id) {
            Some(tariff) => total += tariff.price_per_day * booking.nights() as f64,
            None => tracing::warn!(
                booking = %booking.id,
                tariff = %booking.tariff_id,
                "booking references a missing tariff; excluded from revenue"
            ),
        }
    }
    total
}

/// Most frequent id; ties are broken by the lowest id so the winner does not
/// depend on gateway iteration order.
fn top_by_count(ids: impl Iterator<Item = Uuid>) -> Option<Uuid> {
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for id in ids {
        *counts.entry(id).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(id, _)| id)
}
