//! In-memory dataset built from an uploaded CSV file.
//!
//! The first column of the file is a row identifier and is excluded
//! from analysis fields. All other columns are retained by name so
//! aggregations can check for the ones they need; cells that fail to
//! parse are counted and leave the field unset rather than aborting
//! the load.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::limits::PREVIEW_ROWS;
use crate::record::{
    columns, parse_fraud_flag, Gender, Transaction, DATE_FORMAT, TIMESTAMP_FORMAT,
};

/// A parsed record set plus the header metadata needed for column
/// presence checks and the dataset-information view.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Transaction>,
    preview: Vec<BTreeMap<String, String>>,
    skipped_cells: u64,
}

impl Dataset {
    /// Parse a delimited text file with a header row.
    ///
    /// Returns `Err` only for structural CSV problems (unreadable
    /// header, ragged records). Individual bad cells are tolerated
    /// and reported via [`Dataset::skipped_cells`].
    pub fn from_csv(data: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let headers = reader.headers()?.clone();

        // Everything after the leading row-identifier column.
        let column_names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let find = |name: &str| -> Option<usize> {
            headers
                .iter()
                .enumerate()
                .skip(1)
                .find(|(_, h)| *h == name)
                .map(|(i, _)| i)
        };
        let idx_timestamp = find(columns::TIMESTAMP);
        let idx_amount = find(columns::AMOUNT);
        let idx_gender = find(columns::GENDER);
        let idx_dob = find(columns::DOB);
        let idx_state = find(columns::STATE);
        let idx_city_pop = find(columns::CITY_POP);
        let idx_is_fraud = find(columns::IS_FRAUD);

        let mut rows = Vec::new();
        let mut preview = Vec::new();
        let mut skipped_cells = 0u64;

        for record in reader.records() {
            let record = record?;

            if preview.len() < PREVIEW_ROWS {
                let raw: BTreeMap<String, String> = headers
                    .iter()
                    .zip(record.iter())
                    .skip(1)
                    .map(|(h, v)| (h.to_string(), v.to_string()))
                    .collect();
                preview.push(raw);
            }

            let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i));

            rows.push(Transaction {
                timestamp: parse_cell(cell(idx_timestamp), &mut skipped_cells, |s| {
                    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
                }),
                amount: parse_cell(cell(idx_amount), &mut skipped_cells, |s| {
                    s.parse::<f64>().ok().filter(|v| v.is_finite())
                }),
                gender: parse_cell(cell(idx_gender), &mut skipped_cells, Gender::parse),
                dob: parse_cell(cell(idx_dob), &mut skipped_cells, |s| {
                    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
                }),
                state: parse_cell(cell(idx_state), &mut skipped_cells, |s| {
                    let s = s.trim();
                    (!s.is_empty()).then(|| s.to_string())
                }),
                city_pop: parse_cell(cell(idx_city_pop), &mut skipped_cells, |s| {
                    s.trim().parse::<u64>().ok()
                }),
                is_fraud: parse_cell(cell(idx_is_fraud), &mut skipped_cells, parse_fraud_flag),
            });
        }

        Ok(Self {
            columns: column_names,
            rows,
            preview,
            skipped_cells,
        })
    }

    /// Analysis column names (row identifier excluded).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Check that every named column exists, reporting the first one
    /// that does not.
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        for name in names {
            if !self.has_column(name) {
                return Err(Error::missing_column(*name));
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows carrying the ground-truth fraud label.
    pub fn fraud_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.fraud()).count()
    }

    /// First rows of the file, untyped, for the preview table.
    pub fn preview(&self) -> &[BTreeMap<String, String>] {
        &self.preview
    }

    /// Number of cells that were present but failed to parse.
    pub fn skipped_cells(&self) -> u64 {
        self.skipped_cells
    }
}

/// Parse one cell, counting present-but-unparsable values.
///
/// A missing column is not counted; only a cell that exists and could
/// not be understood increments the skip counter.
fn parse_cell<T>(
    raw: Option<&str>,
    skipped: &mut u64,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let raw = raw?;
    match parse(raw) {
        Some(v) => Some(v),
        None => {
            *skipped += 1;
            None
        }
    }
}

/// Description of one dataset column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnDescription {
    pub name: &'static str,
    pub description: &'static str,
}

/// The column glossary shown in the dataset-information section.
pub fn column_descriptions() -> Vec<ColumnDescription> {
    const DESCRIPTIONS: [(&str, &str); 22] = [
        ("trans_date_trans_time", "Transaction DateTime"),
        ("cc_num", "Credit Card Number of Customer"),
        ("merchant", "Merchant Name"),
        ("category", "Category of Merchant"),
        ("amt", "Amount of Transaction"),
        ("first", "First Name of Credit Card Holder"),
        ("last", "Last Name of Credit Card Holder"),
        ("gender", "Gender of Credit Card Holder"),
        ("street", "Street Address of Credit Card Holder"),
        ("city", "City of Credit Card Holder"),
        ("state", "State of Credit Card Holder"),
        ("zip", "Zip of Credit Card Holder"),
        ("lat", "Latitude Location of Credit Card Holder"),
        ("long", "Longitude Location of Credit Card Holder"),
        ("city_pop", "Credit Card Holder's City Population"),
        ("job", "Job of Credit Card Holder"),
        ("dob", "Date of Birth of Credit Card Holder"),
        ("trans_num", "Transaction Number"),
        ("unix_time", "UNIX Time of transaction"),
        ("merch_lat", "Latitude Location of Merchant"),
        ("merch_long", "Longitude Location of Merchant"),
        ("is_fraud", "Fraud Flag"),
    ];
    DESCRIPTIONS
        .iter()
        .map(|(name, description)| ColumnDescription { name, description })
        .collect()
}
