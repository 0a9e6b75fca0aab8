use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Record classification
// ---------------------------------------------------------------------------

/// Organic / conventional split derived from the raw organic-claim text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Organic,
    Conventional,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Organic => "Organic",
            Classification::Conventional => "Conventional",
        }
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Inclusive period range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Filter selection owned by one explorer session.
///
/// An empty set selects nothing; it never means "everything".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub date_range: DateRange,
    pub selected_segments: BTreeSet<String>,
    pub selected_sub_categories: BTreeSet<String>,
}

impl FilterState {
    pub fn matches(&self, period: NaiveDate, segment: &str, sub_category: &str) -> bool {
        self.date_range.contains(period)
            && self.selected_segments.contains(segment)
            && self.selected_sub_categories.contains(sub_category)
    }
}

/// Quick range buttons, all anchored on the latest period in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangePreset {
    RecentWeeks { weeks: u32 },
    YearToDate,
    All,
}

impl RangePreset {
    pub fn label(&self) -> String {
        match self {
            RangePreset::RecentWeeks { weeks } => format!("Last {} weeks", weeks),
            RangePreset::YearToDate => "Year to date".to_string(),
            RangePreset::All => "All periods".to_string(),
        }
    }
}

/// A preset together with the range it resolves to for the loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetRange {
    pub preset: RangePreset,
    pub label: String,
    pub range: DateRange,
}

/// Single UI event replayed against a caller-held `FilterState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FilterAction {
    SetDateRange { start: NaiveDate, end: NaiveDate },
    ApplyPreset { preset: RangePreset },
    SetSegments { segments: BTreeSet<String> },
    SetSubCategories { sub_categories: BTreeSet<String> },
    ToggleSegment { segment: String },
    ToggleSubCategory { sub_category: String },
    SelectAllSegments,
    ClearAllSegments,
    SelectAllSubCategories,
    ClearAllSubCategories,
}

// ---------------------------------------------------------------------------
// Computed outputs
// ---------------------------------------------------------------------------

/// Scalar totals of a filtered view.
///
/// `pct_*` fields are ratios (`1.0` = +100%) against the year-ago measure,
/// `0.0` when the year-ago total is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub dollars: f64,
    pub dollars_ya: f64,
    pub units: f64,
    pub units_ya: f64,
    pub pounds: f64,
    pub pounds_ya: f64,
    pub pct_dollars: f64,
    pub pct_units: f64,
    pub pct_pounds: f64,
}

/// One row of the segment table. Field order is the column order consumers render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummaryRow {
    pub segment: String,
    pub dollars: f64,
    pub dollars_pct_change: f64,
    pub pounds: f64,
    pub pounds_pct_change: f64,
    pub units: f64,
    pub units_pct_change: f64,
}

/// Dimension used by the generic group summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Segment,
    SubCategory,
    Classification,
}

/// Summed measures for one group, with year-ago values kept alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummaryRow {
    pub group: String,
    pub dollars: f64,
    pub dollars_ya: f64,
    pub dollars_pct_change: f64,
    pub pounds: f64,
    pub pounds_ya: f64,
    pub pounds_pct_change: f64,
    pub units: f64,
    pub units_ya: f64,
    pub units_pct_change: f64,
}

/// Dollars per period for the line chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub period: NaiveDate,
    pub dollars: f64,
    pub dollars_ya: f64,
}

/// All six measures for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurePoint {
    pub period: NaiveDate,
    pub dollars: f64,
    pub dollars_ya: f64,
    pub units: f64,
    pub units_ya: f64,
    pub pounds: f64,
    pub pounds_ya: f64,
}

/// Record counts per classification.
///
/// Percents always sum to 100 for a non-empty view; both are 0 for an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassificationMix {
    pub organic_count: usize,
    pub conventional_count: usize,
    pub organic_percent: u32,
    pub conventional_percent: u32,
}

// ---------------------------------------------------------------------------
// API request / response
// ---------------------------------------------------------------------------

/// Everything the rendering layer needs to draw its filter widgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerInitResponse {
    /// Full selection over the whole period range
    pub state: FilterState,
    pub min_period: NaiveDate,
    pub max_period: NaiveDate,
    pub segments: Vec<String>,
    pub sub_categories: Vec<String>,
    pub presets: Vec<PresetRange>,
    pub record_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterActionRequest {
    pub state: FilterState,
    pub action: FilterAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Number of records in the filtered view
    pub record_count: usize,
    pub metrics: AggregateMetrics,
    pub segment_summary: Vec<SegmentSummaryRow>,
    pub sub_category_summary: Vec<GroupSummaryRow>,
    pub time_series: Vec<TimeSeriesPoint>,
    pub classification_mix: ClassificationMix,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
        assert!(!range.contains(date(2023, 12, 31)));
    }

    #[test]
    fn test_empty_selection_matches_nothing() {
        let state = FilterState {
            date_range: DateRange::new(date(2024, 1, 1), date(2024, 12, 31)),
            selected_segments: BTreeSet::new(),
            selected_sub_categories: ["Fuji".to_string()].into_iter().collect(),
        };
        assert!(!state.matches(date(2024, 6, 1), "Apples", "Fuji"));
    }

    #[test]
    fn test_filter_action_wire_format() {
        let action: FilterAction = serde_json::from_str(
            r#"{"action":"apply_preset","preset":{"kind":"recent_weeks","weeks":13}}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            FilterAction::ApplyPreset {
                preset: RangePreset::RecentWeeks { weeks: 13 }
            }
        );

        let json = serde_json::to_string(&FilterAction::ClearAllSegments).unwrap();
        assert_eq!(json, r#"{"action":"clear_all_segments"}"#);
    }

    #[test]
    fn test_classification_serializes_uppercase() {
        let json = serde_json::to_string(&Classification::Conventional).unwrap();
        assert_eq!(json, r#""CONVENTIONAL""#);
    }
}
