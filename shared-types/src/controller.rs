//! Sync controller: the single owner of the dataset and its text views

use crate::parse::{parse, ValidationError};
use crate::record::{Field, Mode, Record};
use crate::serialize::{to_jsonl, to_pretty_json};
use crate::{DownloadFile, DOWNLOAD_FILE_NAME, DOWNLOAD_MIME};

/// Owns the mode and the ordered records of one editing session.
///
/// Every accepted mutation regenerates both the pretty JSON and the JSONL
/// view before returning, so readers never observe a stale view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncController {
    mode: Mode,
    records: Vec<Record>,
    pretty_json: String,
    jsonl: String,
}

impl SyncController {
    /// A session holding one blank record of `mode`
    pub fn new(mode: Mode) -> Self {
        let mut controller = Self {
            mode,
            records: vec![Record::blank(mode)],
            pretty_json: String::new(),
            jsonl: String::new(),
        };
        controller.refresh();
        controller
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn pretty_json(&self) -> &str {
        &self.pretty_json
    }

    pub fn jsonl(&self) -> &str {
        &self.jsonl
    }

    /// The current JSONL view packaged as `data.jsonl`
    pub fn download_file(&self) -> DownloadFile {
        DownloadFile {
            file_name: DOWNLOAD_FILE_NAME,
            mime: DOWNLOAD_MIME,
            contents: self.jsonl.clone(),
        }
    }

    /// Switch mode, reshaping every record. Fields the new shape lacks are lost.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.records = self.records.iter().map(|r| r.coerce(mode)).collect();
        self.refresh();
    }

    pub fn add_record(&mut self) {
        self.records.push(Record::blank(self.mode));
        self.refresh();
    }

    /// Returns `false` and leaves the dataset untouched when `index` is out of range.
    pub fn remove_record(&mut self, index: usize) -> bool {
        if index >= self.records.len() {
            return false;
        }
        self.records.remove(index);
        self.refresh();
        true
    }

    /// Returns `false` when `index` is out of range or `field` is not part of
    /// the active mode's shape.
    pub fn edit_field(&mut self, index: usize, field: Field, value: impl Into<String>) -> bool {
        if field.mode() != self.mode {
            return false;
        }
        let Some(record) = self.records.get_mut(index) else {
            return false;
        };
        if !record.set(field, value.into()) {
            return false;
        }
        self.refresh();
        true
    }

    /// Replace everything with a single blank record. Irreversible; callers
    /// must confirm with the user first.
    pub fn reset_all(&mut self) {
        self.records = vec![Record::blank(self.mode)];
        self.refresh();
    }

    /// Replace the dataset with a user-edited JSON array. On error nothing changes.
    pub fn apply_raw_json(&mut self, text: &str) -> Result<(), ValidationError> {
        let records = parse(text, self.mode)?;
        self.records = records;
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        self.pretty_json = to_pretty_json(&self.records);
        self.jsonl = to_jsonl(&self.records);
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
