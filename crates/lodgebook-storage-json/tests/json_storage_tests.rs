use chrono::NaiveDate;
use tempfile::tempdir;
use uuid::Uuid;

use lodgebook_core::storage::Storage;
use lodgebook_domain::{Booking, BookingDraft, Cottage, DateRange, Tariff};
use lodgebook_storage_json::{JsonStorage, StoragePaths};

fn paths(dir: &tempfile::TempDir) -> StoragePaths {
    StoragePaths {
        data_root: dir.path().join("data"),
        backup_root: dir.path().join("backups"),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_booking(cottage_id: Uuid, tariff_id: Uuid) -> Booking {
    Booking::from_draft(BookingDraft {
        full_name: "Ivan Petrov".into(),
        email: "ivan@example.com".into(),
        phone: "+7 900 000-00-00".into(),
        cottage_id,
        tariff_id,
        check_in_date: date(2024, 6, 1),
        check_out_date: date(2024, 6, 3),
        document_scan_path: None,
    })
}

#[test]
fn records_survive_a_reopen() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonStorage::open(paths(&dir), "Pine Shore").expect("create storage");

    let cottage = Cottage::new("Birch");
    let tariff = Tariff::new("Standard", 100.0);
    let booking = sample_booking(cottage.id, tariff.id);
    storage.put_cottage(cottage.clone()).expect("put cottage");
    storage.put_tariff(tariff.clone()).expect("put tariff");
    storage.put_booking(booking.clone()).expect("put booking");

    drop(storage);
    let reopened = JsonStorage::open(paths(&dir), "ignored").expect("reopen storage");

    assert_eq!(reopened.snapshot().unwrap().name, "Pine Shore");
    assert_eq!(reopened.cottage(cottage.id).unwrap(), Some(cottage));
    assert_eq!(reopened.tariff(tariff.id).unwrap(), Some(tariff));
    assert_eq!(reopened.booking(booking.id).unwrap(), Some(booking));
}

#[test]
fn overlap_query_matches_half_open_stays() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonStorage::open(paths(&dir), "Pine Shore").expect("create storage");
    let cottage_id = Uuid::new_v4();
    storage
        .put_booking(sample_booking(cottage_id, Uuid::new_v4()))
        .expect("put booking");

    let touching = DateRange::new(date(2024, 6, 3), date(2024, 6, 5)).unwrap();
    assert!(storage
        .bookings_overlapping(cottage_id, touching)
        .unwrap()
        .is_empty());

    let overlapping = DateRange::new(date(2024, 6, 2), date(2024, 6, 4)).unwrap();
    assert_eq!(
        storage
            .bookings_overlapping(cottage_id, overlapping)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn explicit_backup_can_be_restored() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonStorage::open(paths(&dir), "Pine Shore").expect("create storage");

    let cottage = Cottage::new("Birch");
    storage.put_cottage(cottage.clone()).expect("put cottage");

    let info = storage.backup(Some("before season")).expect("create backup");
    assert!(info.id.contains("before-season"));
    assert!(info.created_at.is_some());

    storage.delete_cottage(cottage.id).expect("delete cottage");
    assert!(storage.cottage(cottage.id).unwrap().is_none());

    storage.restore_backup(&info).expect("restore backup");
    assert_eq!(storage.cottage(cottage.id).unwrap(), Some(cottage));
}

#[test]
fn backups_are_pruned_to_retention() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonStorage::open_with_retention(paths(&dir), "Pine Shore", 2)
        .expect("create storage");

    for i in 0..6 {
        storage
            .put_cottage(Cottage::new(format!("Cottage {i}")))
            .expect("put cottage");
    }

    // Same-minute timestamps collide into one file name, so only an upper
    // bound is asserted.
    let backups = storage.list_backups().expect("list backups");
    assert!(
        backups.len() <= 2,
        "expected at most 2 retained backups, found {}",
        backups.len()
    );
}

#[test]
fn missing_backup_is_a_storage_error() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonStorage::open(paths(&dir), "Pine Shore").expect("create storage");
    let bogus = lodgebook_storage_json::BackupInfo {
        id: "missing.json".into(),
        created_at: None,
        path: dir.path().join("backups").join("missing.json"),
    };
    let err = storage.restore_backup(&bogus).expect_err("must fail");
    assert!(matches!(err, lodgebook_core::CoreError::Storage(_)));
}
