use chrono::NaiveDate;
use contracts::dashboards::d400_sales_explorer::{DateRange, FilterAction, FilterState, RangePreset};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::domain::a001_sales_record::{SalesRecord, SalesTable};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// Records of the table that satisfy a filter state, in table order.
#[derive(Debug, Clone)]
pub struct FilteredView<'t> {
    records: Vec<&'t SalesRecord>,
}

impl<'t> FilteredView<'t> {
    pub fn new(records: Vec<&'t SalesRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'t SalesRecord> + '_ {
        self.records.iter().copied()
    }
}

/// Select the records matching `state`. Pure; nothing is cached.
pub fn filter_view<'t>(table: &'t SalesTable, state: &FilterState) -> FilteredView<'t> {
    FilteredView::new(
        table
            .records()
            .iter()
            .filter(|r| state.matches(r.period, &r.segment, &r.sub_category))
            .collect(),
    )
}

/// Applies UI mutations to one session's filter state.
///
/// The table is shared read-only; every engine owns its own state.
#[derive(Debug, Clone)]
pub struct FilterEngine<'t> {
    table: &'t SalesTable,
    state: FilterState,
}

impl<'t> FilterEngine<'t> {
    /// Start with everything selected over the full period range.
    pub fn new(table: &'t SalesTable) -> Self {
        Self {
            table,
            state: table.full_selection(),
        }
    }

    /// Continue from a state held by the caller. The range is validated and clamped.
    pub fn resume(table: &'t SalesTable, state: FilterState) -> Result<Self, FilterError> {
        let date_range = clamp_range(table, state.date_range)?;
        Ok(Self {
            table,
            state: FilterState { date_range, ..state },
        })
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn into_state(self) -> FilterState {
        self.state
    }

    /// Rejects `start > end` and keeps the previous range in that case.
    pub fn apply_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), FilterError> {
        let range = clamp_range(self.table, DateRange::new(start, end))?;
        tracing::debug!("Filter: date range {} .. {}", range.start, range.end);
        self.state.date_range = range;
        Ok(())
    }

    pub fn apply_preset(&mut self, preset: RangePreset) -> Result<(), FilterError> {
        let range = self.table.preset_range(preset);
        self.apply_date_range(range.start, range.end)
    }

    pub fn set_selected_segments(&mut self, segments: BTreeSet<String>) {
        self.state.selected_segments = segments;
    }

    pub fn set_selected_sub_categories(&mut self, sub_categories: BTreeSet<String>) {
        self.state.selected_sub_categories = sub_categories;
    }

    pub fn toggle_segment(&mut self, segment: &str) {
        toggle(&mut self.state.selected_segments, segment);
    }

    pub fn toggle_sub_category(&mut self, sub_category: &str) {
        toggle(&mut self.state.selected_sub_categories, sub_category);
    }

    /// Universe of the unfiltered table, whatever the current date range.
    pub fn select_all_segments(&mut self) {
        self.state.selected_segments = self.table.segments().clone();
    }

    pub fn clear_all_segments(&mut self) {
        self.state.selected_segments.clear();
    }

    pub fn select_all_sub_categories(&mut self) {
        self.state.selected_sub_categories = self.table.sub_categories().clone();
    }

    pub fn clear_all_sub_categories(&mut self) {
        self.state.selected_sub_categories.clear();
    }

    pub fn apply(&mut self, action: FilterAction) -> Result<(), FilterError> {
        match action {
            FilterAction::SetDateRange { start, end } => self.apply_date_range(start, end)?,
            FilterAction::ApplyPreset { preset } => self.apply_preset(preset)?,
            FilterAction::SetSegments { segments } => self.set_selected_segments(segments),
            FilterAction::SetSubCategories { sub_categories } => {
                self.set_selected_sub_categories(sub_categories)
            }
            FilterAction::ToggleSegment { segment } => self.toggle_segment(&segment),
            FilterAction::ToggleSubCategory { sub_category } => self.toggle_sub_category(&sub_category),
            FilterAction::SelectAllSegments => self.select_all_segments(),
            FilterAction::ClearAllSegments => self.clear_all_segments(),
            FilterAction::SelectAllSubCategories => self.select_all_sub_categories(),
            FilterAction::ClearAllSubCategories => self.clear_all_sub_categories(),
        }
        Ok(())
    }

    pub fn current_view(&self) -> FilteredView<'t> {
        filter_view(self.table, &self.state)
    }
}

/// Reject inverted ranges, then clamp each bound into the table's period bounds.
///
/// A range that misses the data entirely is kept as given so it selects nothing.
fn clamp_range(table: &SalesTable, range: DateRange) -> Result<DateRange, FilterError> {
    if range.start > range.end {
        return Err(FilterError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }
    let (lo, hi) = (table.min_period(), table.max_period());
    if range.end < lo || range.start > hi {
        return Ok(range);
    }
    Ok(DateRange::new(range.start.max(lo), range.end.min(hi)))
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
