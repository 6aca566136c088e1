//! The aggregation pipeline.
//!
//! Pure functions from a record set to one summary table, selected by
//! a dimension parameter. Every operation checks the columns it needs,
//! filters and groups in a single pass, and reports how many rows were
//! excluded because a needed cell did not parse. Nothing here mutates
//! shared state, so independent sessions can aggregate concurrently.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::limits::{DAYS_PER_WEEK, HOURS_PER_DAY};
use crate::record::{columns, day_name, AgeGroup, Gender};

/// Aggregation dimensions, one per navigation entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    /// Fraud counts per hour of day, dense 0..23 series.
    Hourly,
    /// Fraud counts per day of week, Monday..Sunday.
    Daily,
    /// Fraud counts or fraud/legit split per gender.
    Gender,
    /// Fraud counts or fraud/legit split per age bracket.
    AgeGroup,
    /// Per-state fraud ratio table, sorted by ratio.
    State,
    /// City population vs amount scatter pairs, fraud rows only.
    CityPopulation,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Hourly,
        Dimension::Daily,
        Dimension::Gender,
        Dimension::AgeGroup,
        Dimension::State,
        Dimension::CityPopulation,
    ];

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "gender" => Ok(Self::Gender),
            "age-group" => Ok(Self::AgeGroup),
            "state" => Ok(Self::State),
            "city-population" => Ok(Self::CityPopulation),
            other => Err(Error::unknown_dimension(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Gender => "gender",
            Self::AgeGroup => "age-group",
            Self::State => "state",
            Self::CityPopulation => "city-population",
        }
    }

    /// Columns the dimension cannot be computed without.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Hourly | Self::Daily => &[columns::TIMESTAMP, columns::IS_FRAUD],
            Self::Gender => &[columns::GENDER, columns::IS_FRAUD],
            Self::AgeGroup => &[columns::DOB, columns::IS_FRAUD],
            Self::State => &[columns::STATE, columns::IS_FRAUD],
            Self::CityPopulation => &[columns::CITY_POP, columns::AMOUNT, columns::IS_FRAUD],
        }
    }

    /// Chart type the rendering layer should use for this dimension.
    pub fn chart(&self, mode: SplitMode) -> ChartKind {
        match self {
            Self::Hourly | Self::Daily => ChartKind::Line,
            Self::Gender | Self::AgeGroup => match mode {
                SplitMode::Count => ChartKind::Bar,
                SplitMode::Ratio => ChartKind::Split,
            },
            Self::State => ChartKind::Table,
            Self::CityPopulation => ChartKind::Scatter,
        }
    }
}

/// Hint for the external rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    /// Two-way fraud/legit split, rendered as a pie or stacked chart.
    Split,
    Table,
    Scatter,
}

/// Count-vs-ratio switch for the gender and age-group dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    #[default]
    Count,
    Ratio,
}

/// One point of the hourly fraud series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourCount {
    pub hour: u32,
    pub count: u64,
}

/// One point of the day-of-week fraud series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCount {
    pub day: &'static str,
    pub count: u64,
}

/// Fraud-only count for one category value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: &'static str,
    pub count: u64,
}

/// Fraud/non-fraud pair for one category value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySplit {
    pub label: &'static str,
    pub fraud: u64,
    pub legit: u64,
}

/// One row of the state ratio table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateRow {
    pub state: String,
    pub fraud: u64,
    pub legit: u64,
    pub ratio: f64,
}

/// One fraud transaction for the population/amount scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub city_pop: u64,
    pub amount: f64,
}

/// Dense 24-entry hour series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySeries {
    pub points: Vec<HourCount>,
    pub excluded_rows: u64,
}

/// Fixed Monday..Sunday series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeries {
    pub points: Vec<DayCount>,
    pub excluded_rows: u64,
}

/// Per-category summary in either mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CategorySummary {
    Count {
        entries: Vec<CategoryCount>,
        excluded_rows: u64,
    },
    Ratio {
        entries: Vec<CategorySplit>,
        excluded_rows: u64,
    },
}

/// State ratio table, sorted non-increasing by ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateTable {
    pub entries: Vec<StateRow>,
    pub excluded_rows: u64,
}

/// Raw scatter pairs, fraud rows only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub points: Vec<ScatterPoint>,
    pub excluded_rows: u64,
}

/// Any summary table, for dimension-dispatched callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    Hourly(HourlySeries),
    Daily(DailySeries),
    Category(CategorySummary),
    State(StateTable),
    Scatter(ScatterSeries),
}

impl Summary {
    /// Rows excluded from this summary because a needed cell did not
    /// parse. Surfaced for diagnostics alongside the table itself.
    pub fn excluded_rows(&self) -> u64 {
        match self {
            Self::Hourly(s) => s.excluded_rows,
            Self::Daily(s) => s.excluded_rows,
            Self::Category(CategorySummary::Count { excluded_rows, .. })
            | Self::Category(CategorySummary::Ratio { excluded_rows, .. }) => *excluded_rows,
            Self::State(s) => s.excluded_rows,
            Self::Scatter(s) => s.excluded_rows,
        }
    }
}

/// Compute the summary table for one dimension.
///
/// `mode` only affects the gender and age-group dimensions.
pub fn aggregate(dataset: &Dataset, dimension: Dimension, mode: SplitMode) -> Result<Summary> {
    match dimension {
        Dimension::Hourly => aggregate_hourly(dataset).map(Summary::Hourly),
        Dimension::Daily => aggregate_daily(dataset).map(Summary::Daily),
        Dimension::Gender => aggregate_gender(dataset, mode).map(Summary::Category),
        Dimension::AgeGroup => aggregate_age_group(dataset, mode).map(Summary::Category),
        Dimension::State => aggregate_state(dataset).map(Summary::State),
        Dimension::CityPopulation => aggregate_city_population(dataset).map(Summary::Scatter),
    }
}

/// The summary a zero-row record set would produce: dense series stay
/// dense with zero counts, tables and scatters are empty.
///
/// Lets callers render "no data" instead of treating `EmptyInput` as a
/// hard failure.
pub fn empty_summary(dimension: Dimension, mode: SplitMode) -> Summary {
    match dimension {
        Dimension::Hourly => Summary::Hourly(HourlySeries {
            points: (0..HOURS_PER_DAY as u32)
                .map(|hour| HourCount { hour, count: 0 })
                .collect(),
            excluded_rows: 0,
        }),
        Dimension::Daily => Summary::Daily(DailySeries {
            points: [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ]
            .iter()
            .map(|&day| DayCount {
                day: day_name(day),
                count: 0,
            })
            .collect(),
            excluded_rows: 0,
        }),
        Dimension::Gender => Summary::Category(category_summary(
            mode,
            Gender::ALL.iter().map(|g| g.as_str()),
            &[0; 2],
            &[0; 2],
            0,
        )),
        Dimension::AgeGroup => Summary::Category(category_summary(
            mode,
            AgeGroup::ALL.iter().map(|g| g.as_str()),
            &[0; 3],
            &[0; 3],
            0,
        )),
        Dimension::State => Summary::State(StateTable {
            entries: Vec::new(),
            excluded_rows: 0,
        }),
        Dimension::CityPopulation => Summary::Scatter(ScatterSeries {
            points: Vec::new(),
            excluded_rows: 0,
        }),
    }
}

fn check_input(dataset: &Dataset, dimension: Dimension) -> Result<()> {
    dataset.require_columns(dimension.required_columns())?;
    if dataset.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(())
}

/// Fraud counts per hour of day, zeros filled for charting continuity.
pub fn aggregate_hourly(dataset: &Dataset) -> Result<HourlySeries> {
    check_input(dataset, Dimension::Hourly)?;

    let mut counts = [0u64; HOURS_PER_DAY];
    let mut excluded = 0u64;
    for row in dataset.rows() {
        match (row.is_fraud, row.hour_of_day()) {
            (Some(true), Some(hour)) => counts[hour as usize] += 1,
            (Some(false), _) => {}
            _ => excluded += 1,
        }
    }

    Ok(HourlySeries {
        points: counts
            .iter()
            .enumerate()
            .map(|(hour, &count)| HourCount {
                hour: hour as u32,
                count,
            })
            .collect(),
        excluded_rows: excluded,
    })
}

/// Fraud counts per day of week, reindexed onto Monday..Sunday.
pub fn aggregate_daily(dataset: &Dataset) -> Result<DailySeries> {
    check_input(dataset, Dimension::Daily)?;

    let mut counts = [0u64; DAYS_PER_WEEK];
    let mut excluded = 0u64;
    for row in dataset.rows() {
        match (row.is_fraud, row.day_of_week()) {
            (Some(true), Some(day)) => counts[day.num_days_from_monday() as usize] += 1,
            (Some(false), _) => {}
            _ => excluded += 1,
        }
    }

    const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    Ok(DailySeries {
        points: WEEK
            .iter()
            .zip(counts.iter())
            .map(|(&day, &count)| DayCount {
                day: day_name(day),
                count,
            })
            .collect(),
        excluded_rows: excluded,
    })
}

/// Per-gender fraud counts or fraud/legit split.
///
/// Both gender values appear in the output even when absent from the
/// data, defaulting to zero.
pub fn aggregate_gender(dataset: &Dataset, mode: SplitMode) -> Result<CategorySummary> {
    check_input(dataset, Dimension::Gender)?;

    let mut fraud = [0u64; 2];
    let mut legit = [0u64; 2];
    let mut excluded = 0u64;
    for row in dataset.rows() {
        match (row.is_fraud, row.gender) {
            (Some(is_fraud), Some(gender)) => {
                let idx = Gender::ALL
                    .iter()
                    .position(|&g| g == gender)
                    .unwrap_or_default();
                if is_fraud {
                    fraud[idx] += 1;
                } else {
                    legit[idx] += 1;
                }
            }
            _ => excluded += 1,
        }
    }

    Ok(category_summary(
        mode,
        Gender::ALL.iter().map(|g| g.as_str()),
        &fraud,
        &legit,
        excluded,
    ))
}

/// Per-age-bracket fraud counts or fraud/legit split.
///
/// Rows with an unclassifiable age are excluded from both numerator
/// and denominator.
pub fn aggregate_age_group(dataset: &Dataset, mode: SplitMode) -> Result<CategorySummary> {
    check_input(dataset, Dimension::AgeGroup)?;

    let mut fraud = [0u64; 3];
    let mut legit = [0u64; 3];
    let mut excluded = 0u64;
    for row in dataset.rows() {
        let is_fraud = match row.is_fraud {
            Some(v) => v,
            None => {
                excluded += 1;
                continue;
            }
        };
        if row.dob.is_none() {
            excluded += 1;
            continue;
        }
        // Parsed dob outside the bins: unclassified, dropped entirely.
        let Some(group) = row.age_group() else {
            continue;
        };
        let idx = AgeGroup::ALL
            .iter()
            .position(|&g| g == group)
            .unwrap_or_default();
        if is_fraud {
            fraud[idx] += 1;
        } else {
            legit[idx] += 1;
        }
    }

    Ok(category_summary(
        mode,
        AgeGroup::ALL.iter().map(|g| g.as_str()),
        &fraud,
        &legit,
        excluded,
    ))
}

fn category_summary(
    mode: SplitMode,
    labels: impl Iterator<Item = &'static str>,
    fraud: &[u64],
    legit: &[u64],
    excluded_rows: u64,
) -> CategorySummary {
    match mode {
        SplitMode::Count => CategorySummary::Count {
            entries: labels
                .zip(fraud.iter())
                .map(|(label, &count)| CategoryCount { label, count })
                .collect(),
            excluded_rows,
        },
        SplitMode::Ratio => CategorySummary::Ratio {
            entries: labels
                .zip(fraud.iter().zip(legit.iter()))
                .map(|(label, (&fraud, &legit))| CategorySplit {
                    label,
                    fraud,
                    legit,
                })
                .collect(),
            excluded_rows,
        },
    }
}

/// Per-state fraud ratio table, sorted non-increasing by ratio.
///
/// States are accumulated in name order, and the descending sort is
/// stable, so equal ratios stay in state-name order. A state with zero
/// total transactions gets ratio 0.0 rather than an arithmetic fault.
pub fn aggregate_state(dataset: &Dataset) -> Result<StateTable> {
    check_input(dataset, Dimension::State)?;

    let mut table: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    let mut excluded = 0u64;
    for row in dataset.rows() {
        match (row.is_fraud, row.state.as_deref()) {
            (Some(is_fraud), Some(state)) => {
                let entry = table.entry(state.to_string()).or_default();
                if is_fraud {
                    entry.0 += 1;
                } else {
                    entry.1 += 1;
                }
            }
            _ => excluded += 1,
        }
    }

    let mut entries: Vec<StateRow> = table
        .into_iter()
        .map(|(state, (fraud, legit))| {
            let total = fraud + legit;
            let ratio = if total == 0 {
                0.0
            } else {
                fraud as f64 / total as f64
            };
            StateRow {
                state,
                fraud,
                legit,
                ratio,
            }
        })
        .collect();
    entries.sort_by(|a, b| {
        b.ratio
            .partial_cmp(&a.ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(StateTable {
        entries,
        excluded_rows: excluded,
    })
}

/// Raw (city population, amount) pairs for fraud rows. No aggregation.
pub fn aggregate_city_population(dataset: &Dataset) -> Result<ScatterSeries> {
    check_input(dataset, Dimension::CityPopulation)?;

    let mut points = Vec::new();
    let mut excluded = 0u64;
    for row in dataset.rows() {
        match row.is_fraud {
            Some(true) => match (row.city_pop, row.amount) {
                (Some(city_pop), Some(amount)) => points.push(ScatterPoint { city_pop, amount }),
                _ => excluded += 1,
            },
            Some(false) => {}
            None => excluded += 1,
        }
    }

    Ok(ScatterSeries {
        points,
        excluded_rows: excluded,
    })
}
