//! Filesystem-backed JSON persistence for the resort dataset.
//!
//! The whole [`Resort`] aggregate is stored as one pretty-printed document.
//! Every overwrite first copies the previous file into a timestamped backup,
//! pruned to a retention limit. Writes go through a temp file and rename.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use lodgebook_core::{storage::Storage, CoreError};
use lodgebook_domain::{Booking, Cottage, DateRange, Resort, Tariff};

const DATA_FILE: &str = "resort.json";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Root directories the backend writes under.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub data_root: PathBuf,
    pub backup_root: PathBuf,
}

/// Describes a persisted backup artifact for the dataset.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

/// JSON-file gateway. Clones share the cached dataset, so one handle can be
/// cloned into several services.
#[derive(Clone)]
pub struct JsonStorage {
    paths: StoragePaths,
    retention: usize,
    cache: Arc<RwLock<Resort>>,
}

impl JsonStorage {
    /// Opens the dataset under `paths`, creating directories and an empty
    /// document named `site_name` when nothing is stored yet.
    pub fn open(paths: StoragePaths, site_name: &str) -> Result<Self, CoreError> {
        Self::open_with_retention(paths, site_name, DEFAULT_RETENTION)
    }

    pub fn open_with_retention(
        paths: StoragePaths,
        site_name: &str,
        retention: usize,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.data_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        let data_path = paths.data_root.join(DATA_FILE);
        let resort = if data_path.exists() {
            load_resort_from_path(&data_path)?
        } else {
            Resort::new(site_name)
        };
        let storage = Self {
            paths,
            retention: retention.max(1),
            cache: Arc::new(RwLock::new(resort)),
        };
        if !storage.data_path().exists() {
            storage.persist(&*storage.read()?)?;
        }
        Ok(storage)
    }

    pub fn data_path(&self) -> PathBuf {
        self.paths.data_root.join(DATA_FILE)
    }

    /// Snapshot of the cached dataset.
    pub fn snapshot(&self) -> Result<Resort, CoreError> {
        Ok(self.read()?.clone())
    }

    /// Copies the current document into a timestamped backup file.
    pub fn backup(&self, note: Option<&str>) -> Result<BackupInfo, CoreError> {
        let resort = self.read()?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", canonical_name(&resort.name), timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let file_name = format!("{}.{}", stem, BACKUP_EXTENSION);
        let path = self.paths.backup_root.join(&file_name);
        write_atomic(&path, &serialize_resort(&resort)?)?;
        drop(resort);
        self.prune_backups()?;
        Ok(BackupInfo {
            id: file_name,
            created_at: parse_backup_timestamp_from_stem(&stem),
            path,
        })
    }

    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError> {
        if !self.paths.backup_root.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.paths.backup_root)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BackupInfo {
                    id: file_name.to_string(),
                    created_at: parse_backup_timestamp(file_name),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(info.created_at));
        Ok(entries)
    }

    /// Replaces the live document with the backup's contents.
    pub fn restore_backup(&self, backup: &BackupInfo) -> Result<(), CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let restored = load_resort_from_path(&backup.path)?;
        let mut guard = self.write()?;
        *guard = restored;
        self.persist(&guard)
    }

    fn mutate<F: FnOnce(&mut Resort)>(&self, apply: F) -> Result<(), CoreError> {
        let mut guard = self.write()?;
        apply(&mut guard);
        self.persist(&guard)
    }

    fn persist(&self, resort: &Resort) -> Result<(), CoreError> {
        let path = self.data_path();
        if path.exists() {
            self.backup_existing_file(&path, &resort.name)?;
        }
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &serialize_resort(resort)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn backup_existing_file(&self, path: &Path, site_name: &str) -> Result<(), CoreError> {
        fs::create_dir_all(&self.paths.backup_root)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!(
            "{}_{}.{}",
            canonical_name(site_name),
            timestamp,
            BACKUP_EXTENSION
        );
        let backup_path = self.paths.backup_root.join(&file_name);
        fs::copy(path, &backup_path)?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        let entries = self.list_backups()?;
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Resort>, CoreError> {
        self.cache
            .read()
            .map_err(|_| CoreError::Storage("storage lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Resort>, CoreError> {
        self.cache
            .write()
            .map_err(|_| CoreError::Storage("storage lock poisoned".into()))
    }
}

impl Storage for JsonStorage {
    fn list_cottages(&self) -> Result<Vec<Cottage>, CoreError> {
        Ok(self.read()?.cottages.clone())
    }

    fn cottage(&self, id: Uuid) -> Result<Option<Cottage>, CoreError> {
        Ok(self.read()?.cottage(id).cloned())
    }

    fn put_cottage(&self, cottage: Cottage) -> Result<(), CoreError> {
        self.mutate(|resort| {
            resort.upsert_cottage(cottage);
        })
    }

    fn delete_cottage(&self, id: Uuid) -> Result<(), CoreError> {
        self.mutate(|resort| {
            resort.remove_cottage(id);
        })
    }

    fn list_tariffs(&self) -> Result<Vec<Tariff>, CoreError> {
        Ok(self.read()?.tariffs.clone())
    }

    fn tariff(&self, id: Uuid) -> Result<Option<Tariff>, CoreError> {
        Ok(self.read()?.tariff(id).cloned())
    }

    fn put_tariff(&self, tariff: Tariff) -> Result<(), CoreError> {
        self.mutate(|resort| {
            resort.upsert_tariff(tariff);
        })
    }

    fn delete_tariff(&self, id: Uuid) -> Result<(), CoreError> {
        self.mutate(|resort| {
            resort.remove_tariff(id);
        })
    }

    fn bookings_overlapping(
        &self,
        cottage_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<Booking>, CoreError> {
        Ok(self
            .read()?
            .bookings
            .iter()
            .filter(|b| b.cottage_id == cottage_id && b.overlaps(&range))
            .cloned()
            .collect())
    }

    fn bookings_by_check_in(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, CoreError> {
        let mut bookings: Vec<Booking> = self
            .read()?
            .bookings
            .iter()
            .filter(|b| b.check_in_date >= start && b.check_in_date <= end)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.check_in_date, b.id));
        Ok(bookings)
    }

    fn list_bookings(&self) -> Result<Vec<Booking>, CoreError> {
        Ok(self.read()?.bookings.clone())
    }

    fn booking(&self, id: Uuid) -> Result<Option<Booking>, CoreError> {
        Ok(self.read()?.booking(id).cloned())
    }

    fn put_booking(&self, booking: Booking) -> Result<(), CoreError> {
        self.mutate(|resort| {
            resort.upsert_booking(booking);
        })
    }

    fn delete_booking(&self, id: Uuid) -> Result<(), CoreError> {
        self.mutate(|resort| {
            resort.remove_booking(id);
        })
    }
}

/// Saves a dataset to an arbitrary path on disk.
pub fn save_resort_to_path(resort: &Resort, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_resort(resort)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a dataset from the provided filesystem path.
pub fn load_resort_from_path(path: &Path) -> Result<Resort, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn serialize_resort(resort: &Resort) -> Result<String, CoreError> {
    serde_json::to_string_pretty(resort).map_err(|err| CoreError::Serde(err.to_string()))
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "resort".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    parse_backup_timestamp_from_stem(stem)
}

fn parse_backup_timestamp_from_stem(stem: &str) -> Option<DateTime<Utc>> {
    let segments: Vec<&str> = stem.split('_').collect();
    if segments.len() < 2 {
        return None;
    }
    // A trailing note shifts the timestamp segments off the end.
    for window in segments.windows(2) {
        let (date, time) = (window[0], window[1]);
        if is_digits(date, 8) && is_digits(time, 4) {
            let raw = format!("{}{}", date, time);
            return NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
                .ok()
                .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    None
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
