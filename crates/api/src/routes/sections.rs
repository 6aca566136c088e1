//! The navigation surface: menu sections and the aggregation entry
//! points each one exposes.

use axum::Json;
use dashboard_core::Dimension;
use serde::Serialize;

/// One menu section.
#[derive(Debug, Serialize)]
pub struct SectionInfo {
    pub name: &'static str,
    pub dimensions: Vec<DimensionInfo>,
}

/// One aggregation entry point within a section.
#[derive(Debug, Serialize)]
pub struct DimensionInfo {
    pub dimension: &'static str,
    pub modes: &'static [&'static str],
}

impl DimensionInfo {
    fn new(dimension: Dimension) -> Self {
        let modes: &'static [&'static str] = match dimension {
            Dimension::Gender | Dimension::AgeGroup => &["count", "ratio"],
            _ => &[],
        };
        Self {
            dimension: dimension.as_str(),
            modes,
        }
    }
}

/// GET /sections - the fixed top-level menu.
pub async fn sections_handler() -> Json<Vec<SectionInfo>> {
    Json(vec![
        SectionInfo {
            name: "Dataset Information",
            dimensions: Vec::new(),
        },
        SectionInfo {
            name: "Time-Based Analysis",
            dimensions: vec![
                DimensionInfo::new(Dimension::Hourly),
                DimensionInfo::new(Dimension::Daily),
            ],
        },
        SectionInfo {
            name: "Demographic and Geographic Analysis",
            dimensions: vec![
                DimensionInfo::new(Dimension::Gender),
                DimensionInfo::new(Dimension::AgeGroup),
                DimensionInfo::new(Dimension::State),
            ],
        },
        SectionInfo {
            name: "Contextual Analysis",
            dimensions: vec![DimensionInfo::new(Dimension::CityPopulation)],
        },
    ])
}
