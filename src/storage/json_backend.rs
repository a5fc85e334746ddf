use chrono::{Duration, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    domain::ClassRecord,
    errors::{ClassBookError, Result},
};

use super::CollectionStore;

const DOCUMENT_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed store: one pretty-printed JSON document per key, with a
/// rolling set of timestamped copies of earlier versions.
#[derive(Clone)]
pub struct JsonStore {
    root: PathBuf,
    data_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        let data_dir = PathResolver::data_dir_in(&app_root);
        let backups_dir = PathResolver::backup_dir_in(&app_root);
        ensure_dir(&data_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            root: app_root,
            data_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, key: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", canonical_name(key), DOCUMENT_EXTENSION))
    }

    pub fn backup_path(&self, key: &str, backup_name: &str) -> PathBuf {
        self.backup_dir(key).join(backup_name)
    }

    /// Backup file names for `key`, newest first.
    pub fn list_backups(&self, key: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(key);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| {
            parse_backup_stamp(b)
                .cmp(&parse_backup_stamp(a))
                .then_with(|| b.cmp(a))
        });
        Ok(entries)
    }

    /// Replaces the live document with a backup and returns its contents.
    pub fn restore_backup(&self, key: &str, backup_name: &str) -> Result<Vec<ClassRecord>> {
        let backup_path = self.backup_path(key, backup_name);
        if !backup_path.exists() {
            return Err(ClassBookError::Storage(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        let classes = read_document(&backup_path)?;
        self.save(key, &classes)?;
        info!(key, backup = backup_name, "restored backup");
        Ok(classes)
    }

    fn backup_dir(&self, key: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(key))
    }

    fn backup_existing_file(&self, key: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(key);
        ensure_dir(&dir)?;
        let stem = format!(
            "{}_{}",
            canonical_name(key),
            Utc::now().format(BACKUP_TIMESTAMP_FORMAT)
        );
        // Saves within the same millisecond get a `-N` suffix.
        let mut target = dir.join(format!("{}.{}", stem, DOCUMENT_EXTENSION));
        let mut seq = 1u32;
        while target.exists() {
            target = dir.join(format!("{}-{}.{}", stem, seq, DOCUMENT_EXTENSION));
            seq += 1;
        }
        fs::copy(path, &target)?;
        self.prune_backups(key)?;
        Ok(())
    }

    fn prune_backups(&self, key: &str) -> Result<()> {
        let backups = self.list_backups(key)?;
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backup_path(key, entry));
        }
        Ok(())
    }
}

impl CollectionStore for JsonStore {
    fn load(&self, key: &str) -> Result<Vec<ClassRecord>> {
        let path = self.document_path(key);
        if !path.exists() {
            debug!(key, "no document yet, starting empty");
            return Ok(Vec::new());
        }
        read_document(&path)
    }

    fn save(&self, key: &str, classes: &[ClassRecord]) -> Result<()> {
        let path = self.document_path(key);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        self.backup_existing_file(key, &path)?;
        let json = serde_json::to_string_pretty(classes)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        debug!(key, classes = classes.len(), "saved collection");
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<Vec<ClassRecord>> {
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&data)?)
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
        "classes".into()
    } else {
        sanitized
    }
}

/// Sort key of a backup name: its timestamp, then its same-instant sequence.
/// Accepts second-resolution names written by earlier versions.
fn parse_backup_stamp(name: &str) -> Option<(NaiveDateTime, u32)> {
    let stem = name.strip_suffix(&format!(".{}", DOCUMENT_EXTENSION))?;
    let mut parts = stem.rsplitn(3, '_');
    let time_part = parts.next()?;
    let date_part = parts.next()?;
    let (clock, seq) = match time_part.split_once('-') {
        Some((clock, seq)) => (clock, seq.parse().ok()?),
        None => (time_part, 0),
    };
    if !is_digits(date_part, 8) || !(is_digits(clock, 6) || is_digits(clock, 9)) {
        return None;
    }
    let (seconds, millis) = clock.split_at(6);
    let at = NaiveDateTime::parse_from_str(&format!("{}{}", date_part, seconds), "%Y%m%d%H%M%S")
        .ok()?;
    let millis: i64 = if millis.is_empty() { 0 } else { millis.parse().ok()? };
    Some((at + Duration::milliseconds(millis), seq))
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

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
