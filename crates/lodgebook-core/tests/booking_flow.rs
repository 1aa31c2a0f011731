use chrono::NaiveDate;

use lodgebook_core::{
    calendar_days, resort_warnings, BookingService, CoreError, CottageService, MemoryStorage,
    ReportService, TariffService,
};
use lodgebook_domain::{BookingDraft, Report};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(
    cottage_id: uuid::Uuid,
    tariff_id: uuid::Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> BookingDraft {
    BookingDraft {
        full_name: "Ivan Petrov".into(),
        email: "ivan@example.com".into(),
        phone: "+7 900 000-00-00".into(),
        cottage_id,
        tariff_id,
        check_in_date: check_in,
        check_out_date: check_out,
        document_scan_path: Some("scans/ivan-passport.png".into()),
    }
}

#[test]
fn booking_season_end_to_end() {
    let storage = MemoryStorage::default();
    let cottages = CottageService::new(storage.clone());
    let tariffs = TariffService::new(storage.clone());
    let bookings = BookingService::new(storage.clone());
    let reports = ReportService::new(storage.clone());

    let cottage = cottages.create("C1").unwrap();
    let tariff = tariffs.create("T1", 100.0).unwrap();

    // June 1st to 3rd: two nights at 100/day.
    let first = bookings
        .create(draft(cottage.id, tariff.id, date(2024, 6, 1), date(2024, 6, 3)))
        .unwrap();

    // Overlapping request must name the colliding booking.
    let err = bookings
        .create(draft(cottage.id, tariff.id, date(2024, 6, 2), date(2024, 6, 4)))
        .unwrap_err();
    match err {
        CoreError::Conflict { booking_id, .. } => assert_eq!(booking_id, first.id),
        other => panic!("expected conflict, got {other:?}"),
    }

    // Back-to-back turnover on the checkout day is allowed.
    bookings
        .create(draft(cottage.id, tariff.id, date(2024, 6, 3), date(2024, 6, 5)))
        .unwrap();

    let june = reports.financial(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
    assert_eq!(june.total_bookings, 2);
    assert_eq!(june.total_revenue, 400.0);
    assert_eq!(june.average_booking_value, 200.0);
    assert_eq!(june.most_booked_cottage, "C1");

    // Callers receive reports as a tagged variant and match on the kind.
    let report = Report::Financial(june);
    match &report {
        Report::Financial(f) => assert_eq!(f.total_revenue, 400.0),
        Report::Occupancy(_) => panic!("wrong report kind"),
    }
    assert_eq!(report.kind(), "financial");

    let first_day = reports.occupancy(date(2024, 6, 1)).unwrap();
    assert_eq!(first_day.occupied_cottages, 1);
    assert_eq!(first_day.occupancy_rate, 100.0);

    let calendar = calendar_days(&storage, date(2024, 6, 1), date(2024, 6, 5)).unwrap();
    assert!(calendar[0].cottages[&cottage.id].is_check_in);
    // Turnover day: the second stay's check-in wins the cell for C1.
    assert!(calendar[2].cottages[&cottage.id].is_check_in);

    let snapshot = storage.snapshot().unwrap();
    assert!(resort_warnings(&snapshot).is_empty());
}

#[test]
fn deleting_references_leaves_history_with_warnings() {
    let storage = MemoryStorage::default();
    let cottages = CottageService::new(storage.clone());
    let tariffs = TariffService::new(storage.clone());
    let bookings = BookingService::new(storage.clone());

    let cottage = cottages.create("C1").unwrap();
    let tariff = tariffs.create("T1", 100.0).unwrap();
    bookings
        .create(draft(cottage.id, tariff.id, date(2024, 6, 1), date(2024, 6, 3)))
        .unwrap();

    // No cascade on either side.
    cottages.delete(cottage.id).unwrap();
    tariffs.delete(tariff.id).unwrap();
    assert_eq!(bookings.list().unwrap().len(), 1);

    let warnings = resort_warnings(&storage.snapshot().unwrap());
    assert_eq!(warnings.len(), 2);

    // New bookings against the deleted cottage are rejected as validation
    // failures, not conflicts.
    let err = bookings
        .create(draft(cottage.id, tariff.id, date(2024, 7, 1), date(2024, 7, 3)))
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation {
            field: "cottage_id",
            ..
        }
    ));
}
