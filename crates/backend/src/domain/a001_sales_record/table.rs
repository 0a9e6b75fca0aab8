use chrono::{Datelike, Days, NaiveDate};
use contracts::dashboards::d400_sales_explorer::{DateRange, FilterState, PresetRange, RangePreset};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::record::SalesRecord;
use super::error::IngestError;
use super::normalizer;

/// Week counts offered as quick range buttons.
pub const RECENT_WEEK_PRESETS: [u32; 4] = [4, 13, 26, 52];

/// Immutable, fully normalized sales table.
///
/// Segment / sub-category universes, period bounds and preset ranges are
/// computed once here from the complete record set.
#[derive(Debug, Clone)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
    segments: BTreeSet<String>,
    sub_categories: BTreeSet<String>,
    min_period: NaiveDate,
    max_period: NaiveDate,
    presets: Vec<PresetRange>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Result<Self, IngestError> {
        let (min_period, max_period) = records
            .iter()
            .map(|r| r.period)
            .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, p| match acc {
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
                None => Some((p, p)),
            })
            .ok_or(IngestError::EmptyTable)?;

        let segments = records.iter().map(|r| r.segment.clone()).collect();
        let sub_categories = records.iter().map(|r| r.sub_category.clone()).collect();

        let mut table = Self {
            records,
            segments,
            sub_categories,
            min_period,
            max_period,
            presets: Vec::new(),
        };

        let mut presets: Vec<RangePreset> = RECENT_WEEK_PRESETS
            .iter()
            .map(|&weeks| RangePreset::RecentWeeks { weeks })
            .collect();
        presets.push(RangePreset::YearToDate);
        presets.push(RangePreset::All);
        table.presets = presets
            .into_iter()
            .map(|preset| PresetRange {
                preset,
                label: preset.label(),
                range: table.preset_range(preset),
            })
            .collect();

        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        Self::new(normalizer::read_csv(reader)?)
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, IngestError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn segments(&self) -> &BTreeSet<String> {
        &self.segments
    }

    pub fn sub_categories(&self) -> &BTreeSet<String> {
        &self.sub_categories
    }

    pub fn min_period(&self) -> NaiveDate {
        self.min_period
    }

    pub fn max_period(&self) -> NaiveDate {
        self.max_period
    }

    pub fn full_range(&self) -> DateRange {
        DateRange::new(self.min_period, self.max_period)
    }

    pub fn presets(&self) -> &[PresetRange] {
        &self.presets
    }

    /// Everything selected over the whole period range.
    pub fn full_selection(&self) -> FilterState {
        FilterState {
            date_range: self.full_range(),
            selected_segments: self.segments.clone(),
            selected_sub_categories: self.sub_categories.clone(),
        }
    }

    /// `n` weeks back from the latest period. Not clamped to the first period.
    pub fn recent_weeks(&self, weeks: u32) -> DateRange {
        let start = self
            .max_period
            .checked_sub_days(Days::new(u64::from(weeks) * 7))
            .unwrap_or(NaiveDate::MIN);
        DateRange::new(start, self.max_period)
    }

    /// January 1st of the latest period's year through the latest period.
    pub fn year_to_date(&self) -> DateRange {
        let start = NaiveDate::from_ymd_opt(self.max_period.year(), 1, 1).unwrap_or(self.max_period);
        DateRange::new(start, self.max_period)
    }

    pub fn preset_range(&self, preset: RangePreset) -> DateRange {
        match preset {
            RangePreset::RecentWeeks { weeks } => self.recent_weeks(weeks),
            RangePreset::YearToDate => self.year_to_date(),
            RangePreset::All => self.full_range(),
        }
    }
}
