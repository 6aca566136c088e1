//! Transaction record model and derived-field computation.
//!
//! Rows are parsed leniently: a cell that fails to parse leaves its
//! field as `None` and the row is excluded from aggregates that need
//! that field. Derivations (hour, weekday, age bracket) are computed
//! on demand from the typed fields, never stored in the source row.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Timestamp format used by the source dataset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-of-birth format used by the source dataset.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed reference date for age computation (2020-12-31).
///
/// Ages are derived against this constant, never against wall-clock
/// time, so the same file always yields the same age brackets.
pub fn age_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 12, 31).expect("valid constant date")
}

/// Column names of the source dataset used by the pipeline.
pub mod columns {
    pub const TIMESTAMP: &str = "trans_date_trans_time";
    pub const AMOUNT: &str = "amt";
    pub const GENDER: &str = "gender";
    pub const DOB: &str = "dob";
    pub const STATE: &str = "state";
    pub const CITY_POP: &str = "city_pop";
    pub const IS_FRAUD: &str = "is_fraud";
}

/// Cardholder gender as recorded in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Both gender values, in the order summary tables list them.
    pub const ALL: [Gender; 2] = [Gender::M, Gender::F];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "M" | "m" => Some(Self::M),
            "F" | "f" => Some(Self::F),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
        }
    }
}

/// Age bracket derived from the cardholder's date of birth.
///
/// Bins are half-open: Teens [13,20), Adults [20,65), Seniors [65,150).
/// Ages outside [13,150) are unclassified and excluded from age-based
/// aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    Teens,
    Adults,
    Seniors,
}

impl AgeGroup {
    /// All brackets, in the order summary tables list them.
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Teens, AgeGroup::Adults, AgeGroup::Seniors];

    /// Bucket an age in whole years, or `None` if unclassified.
    pub fn from_age(age: i64) -> Option<Self> {
        match age {
            13..=19 => Some(Self::Teens),
            20..=64 => Some(Self::Adults),
            65..=149 => Some(Self::Seniors),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teens => "Teens",
            Self::Adults => "Adults",
            Self::Seniors => "Seniors",
        }
    }
}

/// Age in whole years at the fixed reference date: floor(days / 365).
pub fn age_at_reference(dob: NaiveDate) -> i64 {
    (age_reference_date() - dob).num_days() / 365
}

/// Full weekday name, Monday..Sunday.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One transaction row, leniently typed.
///
/// Every field is optional: `None` means the cell was absent or failed
/// to parse. Which fields matter depends on the aggregation being run.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    pub timestamp: Option<NaiveDateTime>,
    pub amount: Option<f64>,
    pub gender: Option<Gender>,
    pub dob: Option<NaiveDate>,
    pub state: Option<String>,
    pub city_pop: Option<u64>,
    pub is_fraud: Option<bool>,
}

impl Transaction {
    /// Hour of day in [0,23], if the timestamp parsed.
    pub fn hour_of_day(&self) -> Option<u32> {
        self.timestamp.map(|t| t.hour())
    }

    /// Calendar day of week, if the timestamp parsed.
    pub fn day_of_week(&self) -> Option<Weekday> {
        self.timestamp.map(|t| t.date().weekday())
    }

    /// Age in whole years at the reference date, if the dob parsed.
    pub fn age(&self) -> Option<i64> {
        self.dob.map(age_at_reference)
    }

    /// Age bracket, if the dob parsed and the age is classifiable.
    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age().and_then(AgeGroup::from_age)
    }

    /// Whether this row carries the ground-truth fraud label.
    pub fn fraud(&self) -> bool {
        self.is_fraud == Some(true)
    }
}

/// Parse an `is_fraud` cell. Accepts the dataset's 0/1 encoding and
/// textual booleans.
pub fn parse_fraud_flag(s: &str) -> Option<bool> {
    match s.trim() {
        "0" => Some(false),
        "1" => Some(true),
        "true" | "True" => Some(true),
        "false" | "False" => Some(false),
        _ => None,
    }
}
