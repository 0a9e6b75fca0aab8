use contracts::dashboards::d400_sales_explorer::{
    AggregateMetrics, GroupBy, GroupSummaryRow, SegmentSummaryRow,
};
use std::collections::HashMap;

use super::filter::FilteredView;
use crate::domain::a001_sales_record::SalesRecord;

/// Change against the year-ago value as a ratio; `0.0` when there is no year-ago value.
pub fn pct_change(current: f64, prior: f64) -> f64 {
    if prior == 0.0 {
        0.0
    } else {
        (current - prior) / prior
    }
}

/// Running sums of the six measures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasureTotals {
    pub dollars: f64,
    pub dollars_ya: f64,
    pub units: f64,
    pub units_ya: f64,
    pub pounds: f64,
    pub pounds_ya: f64,
}

impl MeasureTotals {
    pub fn add(&mut self, record: &SalesRecord) {
        self.dollars += record.dollars;
        self.dollars_ya += record.dollars_ya;
        self.units += record.units;
        self.units_ya += record.units_ya;
        self.pounds += record.pounds;
        self.pounds_ya += record.pounds_ya;
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let mut totals = Self::default();
        for record in records {
            totals.add(record);
        }
        totals
    }
}

/// Scalar totals and year-over-year ratios for the whole view.
pub fn aggregate(view: &FilteredView<'_>) -> AggregateMetrics {
    let t = MeasureTotals::from_records(view.iter());
    AggregateMetrics {
        dollars: t.dollars,
        dollars_ya: t.dollars_ya,
        units: t.units,
        units_ya: t.units_ya,
        pounds: t.pounds,
        pounds_ya: t.pounds_ya,
        pct_dollars: pct_change(t.dollars, t.dollars_ya),
        pct_units: pct_change(t.units, t.units_ya),
        pct_pounds: pct_change(t.pounds, t.pounds_ya),
    }
}

fn group_key(record: &SalesRecord, group_by: GroupBy) -> &str {
    match group_by {
        GroupBy::Segment => &record.segment,
        GroupBy::SubCategory => &record.sub_category,
        GroupBy::Classification => record.classification.as_str(),
    }
}

/// Per-group sums, sorted by current dollars descending.
///
/// Groups with equal dollars keep the order in which they first appear in the view.
pub fn group_summary(view: &FilteredView<'_>, group_by: GroupBy) -> Vec<GroupSummaryRow> {
    let mut order: Vec<(String, MeasureTotals)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in view.iter() {
        let key = group_key(record, group_by);
        let slot = *index.entry(key).or_insert_with(|| {
            order.push((key.to_string(), MeasureTotals::default()));
            order.len() - 1
        });
        order[slot].1.add(record);
    }

    // sort_by is stable, ties stay in first-seen order
    order.sort_by(|a, b| b.1.dollars.total_cmp(&a.1.dollars));

    order
        .into_iter()
        .map(|(group, t)| GroupSummaryRow {
            group,
            dollars: t.dollars,
            dollars_ya: t.dollars_ya,
            dollars_pct_change: pct_change(t.dollars, t.dollars_ya),
            pounds: t.pounds,
            pounds_ya: t.pounds_ya,
            pounds_pct_change: pct_change(t.pounds, t.pounds_ya),
            units: t.units,
            units_ya: t.units_ya,
            units_pct_change: pct_change(t.units, t.units_ya),
        })
        .collect()
}

pub fn segment_summary(view: &FilteredView<'_>) -> Vec<SegmentSummaryRow> {
    group_summary(view, GroupBy::Segment)
        .into_iter()
        .map(|row| SegmentSummaryRow {
            segment: row.group,
            dollars: row.dollars,
            dollars_pct_change: row.dollars_pct_change,
            pounds: row.pounds,
            pounds_pct_change: row.pounds_pct_change,
            units: row.units,
            units_pct_change: row.units_pct_change,
        })
        .collect()
}
