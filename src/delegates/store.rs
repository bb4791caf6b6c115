//! Flat-file delegate store
//!
//! The whole table lives in one CSV file that is read in full and rewritten
//! in full. There is no locking: a single operator is assumed.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::delegates::models::{COLUMNS, DelegateRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("store is not valid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("delegate name is required")]
    MissingName,
    #[error("delegate '{0}' already exists")]
    DuplicateName(String),
}

impl StoreError {
    /// Errors caused by the submitted data rather than the backing file
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::MissingName | StoreError::DuplicateName(_))
    }
}

/// Result of adding a single delegate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// A record with the same name exists; nothing was written
    Duplicate,
}

/// One row submitted from the editing table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedRow {
    /// Name the row had when the table was rendered, `None` for new rows
    pub original: Option<String>,
    pub record: DelegateRecord,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditSummary {
    pub updated: usize,
    pub added: usize,
    pub deleted: usize,
}

/// CSV-backed delegate table
#[derive(Debug, Clone)]
pub struct DelegateStore {
    path: PathBuf,
}

impl DelegateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in file order.
    ///
    /// A missing file is created empty. Any read or parse failure is logged
    /// and yields an empty table.
    pub fn load(&self) -> Vec<DelegateRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to read delegate store");
                Vec::new()
            }
        }
    }

    /// Like [`load`](Self::load) but surfaces errors. Used before any write so
    /// that a corrupt file is never overwritten with an empty table.
    pub fn try_load(&self) -> Result<Vec<DelegateRecord>, StoreError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "Delegate store missing, creating an empty one");
            self.save(&[])?;
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;
        let records = reader
            .deserialize::<DelegateRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Replace the stored table. Writes a sibling temp file and renames it
    /// over the store.
    pub fn save(&self, records: &[DelegateRecord]) -> Result<(), StoreError> {
        let bytes = to_csv(records)?;
        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), rows = records.len(), "Saved delegate store");
        Ok(())
    }

    /// The full, unfiltered table in storage format
    pub fn export(&self) -> Result<Vec<u8>, StoreError> {
        to_csv(&self.try_load()?)
    }

    /// Append a record unless its name is already taken (exact match).
    pub fn add(&self, record: DelegateRecord) -> Result<AddOutcome, StoreError> {
        if record.name.trim().is_empty() {
            return Err(StoreError::MissingName);
        }
        let mut records = self.try_load()?;
        if records.iter().any(|existing| existing.name == record.name) {
            tracing::warn!(name = %record.name, "Delegate already exists, not adding");
            return Ok(AddOutcome::Duplicate);
        }
        tracing::info!(name = %record.name, "Adding delegate");
        records.push(record);
        self.save(&records)?;
        Ok(AddOutcome::Added)
    }

    /// Apply the edited rows of a table view.
    ///
    /// `view_names` are the names that were shown. Rows with an `original`
    /// name replace that record in place, rows without one are appended, and
    /// shown names no row refers to any more are deleted. Records outside the
    /// view are untouched. Nothing is written if any row is invalid.
    pub fn apply_edits(
        &self,
        view_names: &[String],
        rows: Vec<EditedRow>,
    ) -> Result<EditSummary, StoreError> {
        if rows.iter().any(|row| row.record.name.trim().is_empty()) {
            return Err(StoreError::MissingName);
        }

        let current = self.try_load()?;
        let existing: HashSet<&str> = current.iter().map(|r| r.name.as_str()).collect();

        let mut replacements: Vec<(String, DelegateRecord)> = Vec::new();
        let mut appended: Vec<DelegateRecord> = Vec::new();
        for row in rows {
            match row.original {
                Some(original)
                    if existing.contains(original.as_str())
                        && !replacements.iter().any(|(name, _)| *name == original) =>
                {
                    replacements.push((original, row.record));
                }
                _ => appended.push(row.record),
            }
        }

        let mut summary = EditSummary::default();
        let mut next = Vec::with_capacity(current.len() + appended.len());
        for record in &current {
            if let Some((_, edited)) = replacements.iter().find(|(name, _)| *name == record.name) {
                if edited != record {
                    summary.updated += 1;
                }
                next.push(edited.clone());
            } else if view_names.contains(&record.name) {
                summary.deleted += 1;
            } else {
                next.push(record.clone());
            }
        }
        summary.added = appended.len();
        next.extend(appended);

        let mut seen = HashSet::new();
        if let Some(duplicate) = next.iter().find(|r| !seen.insert(r.name.as_str())) {
            return Err(StoreError::DuplicateName(duplicate.name.clone()));
        }

        self.save(&next)?;
        tracing::info!(
            updated = summary.updated,
            added = summary.added,
            deleted = summary.deleted,
            "Applied delegate table edits"
        );
        Ok(summary)
    }
}

/// Records whose display fields contain `query`, ignoring case. Order is
/// preserved and only an empty query matches everything; whitespace is part
/// of the needle.
pub fn filter<'a>(records: &'a [DelegateRecord], query: &str) -> Vec<&'a DelegateRecord> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| {
            record
                .fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}

fn to_csv(records: &[DelegateRecord]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegates::models::ResponseStatus;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(name: &str, contact: &str, status: ResponseStatus, date: Option<(i32, u32, u32)>) -> DelegateRecord {
        DelegateRecord {
            name: name.to_string(),
            contact_info: contact.to_string(),
            response_status: status,
            follow_up_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    fn sample() -> Vec<DelegateRecord> {
        vec![
            record("Priya Sharma", "priya@du.ac.in", ResponseStatus::Interested, Some((2025, 6, 3))),
            record("Alex", "+91 98765 43210", ResponseStatus::NoResponse, Some((2025, 6, 10))),
            record("Rahul Verma", "rahul@example.com", ResponseStatus::Registered, None),
        ]
    }

    fn store_in(dir: &TempDir) -> DelegateStore {
        DelegateStore::new(dir.path().join("delegates.csv"))
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let records = sample();

        store.save(&records).unwrap();
        assert_eq!(store.load(), records);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("Name,Contact Info,Response Status,Follow-up Date\n"));
        assert!(raw.contains("Priya Sharma,priya@du.ac.in,Interested,03 June 2025"));
        assert!(raw.contains("Alex,+91 98765 43210,No Response,10 June 2025"));
    }

    #[test]
    fn test_missing_store_is_initialized_with_header() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.load().is_empty());
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "Name,Contact Info,Response Status,Follow-up Date\n");
    }

    #[test]
    fn test_empty_file_loads_as_empty_table() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "").unwrap();

        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_store_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "Name,Contact Info,Response Status,Follow-up Date\nAlex,a@b.c,Maybe,03 June 2025\n",
        )
        .unwrap();

        assert!(store.load().is_empty());
        assert!(store.try_load().is_err());
        // A failed read must not be turned into an empty file by a write
        assert!(store.add(record("Neha", "", ResponseStatus::Interested, None)).is_err());
        assert!(fs::read_to_string(store.path()).unwrap().contains("Maybe"));
    }

    #[test]
    fn test_unparseable_date_is_kept_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "Name,Contact Info,Response Status,Follow-up Date\nAlex,,Interested,someday\n",
        )
        .unwrap();

        let records = store.load();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].follow_up_date, None);
        assert_eq!(records[0].contact_info, "");
    }

    #[test]
    fn test_add_rejects_duplicate_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample()).unwrap();
        let before = fs::read(store.path()).unwrap();

        let outcome = store
            .add(record("Alex", "other@example.com", ResponseStatus::Interested, None))
            .unwrap();
        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(fs::read(store.path()).unwrap(), before);

        // Name matching is case-sensitive
        let outcome = store
            .add(record("alex", "", ResponseStatus::Interested, None))
            .unwrap();
        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(store.load().len(), 4);
    }

    #[test]
    fn test_add_requires_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let err = store
            .add(record("  ", "", ResponseStatus::Interested, None))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_filter_empty_query_returns_everything_in_order() {
        let records = sample();
        let all: Vec<_> = filter(&records, "").into_iter().cloned().collect();
        assert_eq!(all, records);
    }

    #[test]
    fn test_filter_matches_any_field_ignoring_case() {
        let records = sample();

        let names = |query: &str| -> Vec<String> {
            filter(&records, query).iter().map(|r| r.name.clone()).collect()
        };

        assert_eq!(names("PRIYA"), vec!["Priya Sharma"]);
        assert_eq!(names("example.COM"), vec!["Rahul Verma"]);
        assert_eq!(names("no response"), vec!["Alex"]);
        assert_eq!(names("june 2025"), vec!["Priya Sharma", "Alex"]);
        assert!(names("zzz").is_empty());
    }

    #[test]
    fn test_filter_keeps_whitespace_in_query() {
        let records = vec![
            record("Alex", "alex@du.ac.in", ResponseStatus::Interested, None),
            record("Priya Sharma", "priya@du.ac.in", ResponseStatus::Registered, None),
        ];
        let names = |query: &str| -> Vec<String> {
            filter(&records, query).iter().map(|r| r.name.clone()).collect()
        };

        assert_eq!(names(" "), vec!["Priya Sharma"]);
        assert!(names(" alex").is_empty());
        assert_eq!(names("priya "), vec!["Priya Sharma"]);
        assert_eq!(names("").len(), 2);
    }

    #[test]
    fn test_apply_edits_updates_adds_and_deletes_within_view() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample()).unwrap();

        // The view showed Priya and Alex only (e.g. filtered by "june")
        let view = vec!["Priya Sharma".to_string(), "Alex".to_string()];
        let rows = vec![
            EditedRow {
                original: Some("Priya Sharma".to_string()),
                record: record("Priya Sharma", "priya@du.ac.in", ResponseStatus::Registered, Some((2025, 6, 3))),
            },
            EditedRow {
                original: None,
                record: record("Neha Gupta", "neha@example.com", ResponseStatus::Interested, Some((2025, 7, 1))),
            },
        ];

        let summary = store.apply_edits(&view, rows).unwrap();
        assert_eq!(summary, EditSummary { updated: 1, added: 1, deleted: 1 });

        let names: Vec<_> = store.load().into_iter().map(|r| (r.name, r.response_status)).collect();
        assert_eq!(
            names,
            vec![
                ("Priya Sharma".to_string(), ResponseStatus::Registered),
                ("Rahul Verma".to_string(), ResponseStatus::Registered),
                ("Neha Gupta".to_string(), ResponseStatus::Interested),
            ]
        );
    }

    #[test]
    fn test_apply_edits_rejects_duplicates_without_writing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample()).unwrap();
        let before = fs::read(store.path()).unwrap();

        let view = vec!["Alex".to_string()];
        let rows = vec![EditedRow {
            original: Some("Alex".to_string()),
            record: record("Rahul Verma", "", ResponseStatus::NoResponse, None),
        }];

        let err = store.apply_edits(&view, rows).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(ref name) if name == "Rahul Verma"));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_apply_edits_allows_rename() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample()).unwrap();

        let view = vec!["Alex".to_string()];
        let rows = vec![EditedRow {
            original: Some("Alex".to_string()),
            record: record("Alex Kumar", "+91 98765 43210", ResponseStatus::NoResponse, Some((2025, 6, 10))),
        }];

        let summary = store.apply_edits(&view, rows).unwrap();
        assert_eq!(summary, EditSummary { updated: 1, added: 0, deleted: 0 });
        assert_eq!(store.load()[1].name, "Alex Kumar");
    }

    #[test]
    fn test_export_is_full_table() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample()).unwrap();

        let exported = String::from_utf8(store.export().unwrap()).unwrap();
        assert_eq!(exported, fs::read_to_string(store.path()).unwrap());
        assert_eq!(exported.lines().count(), 4);
    }
}
