use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores operator-configurable preferences and storage locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_date_format_value")]
    pub date_format: String,
    #[serde(default)]
    pub backup_retention: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root for the dataset. Defaults to `~/Documents/Lodgebook`.
    pub default_data_root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root for dataset backups. Defaults to `~/Documents/Lodgebook/backups`.
    pub default_backup_root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Where guest document scans referenced by bookings are kept.
    pub document_scan_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            date_format: Self::default_date_format_value(),
            backup_retention: None,
            default_data_root: None,
            default_backup_root: None,
            document_scan_root: None,
        }
    }
}

impl Config {
    pub fn default_date_format_value() -> String {
        "%d.%m.%Y".into()
    }

    pub fn resolve_default_data_root(&self) -> PathBuf {
        if let Some(path) = &self.default_data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Lodgebook")
    }

    pub fn resolve_default_backup_root(&self) -> PathBuf {
        if let Some(path) = &self.default_backup_root {
            return path.clone();
        }

        self.resolve_default_data_root().join("backups")
    }

    pub fn resolve_document_scan_root(&self) -> PathBuf {
        if let Some(path) = &self.document_scan_root {
            return path.clone();
        }

        self.resolve_default_data_root().join("scans")
    }
}
