use chrono::NaiveDate;
use contracts::dashboards::d400_sales_explorer::{
    Classification, ClassificationMix, MeasurePoint, TimeSeriesPoint,
};
use std::collections::BTreeMap;

use super::aggregator::MeasureTotals;
use super::filter::FilteredView;

fn totals_by_period(view: &FilteredView<'_>) -> BTreeMap<NaiveDate, MeasureTotals> {
    let mut periods: BTreeMap<NaiveDate, MeasureTotals> = BTreeMap::new();
    for record in view.iter() {
        periods.entry(record.period).or_default().add(record);
    }
    periods
}

/// Dollars and year-ago dollars per period, ascending, one point per period.
pub fn time_series(view: &FilteredView<'_>) -> Vec<TimeSeriesPoint> {
    totals_by_period(view)
        .into_iter()
        .map(|(period, t)| TimeSeriesPoint {
            period,
            dollars: t.dollars,
            dollars_ya: t.dollars_ya,
        })
        .collect()
}

pub fn measure_series(view: &FilteredView<'_>) -> Vec<MeasurePoint> {
    totals_by_period(view)
        .into_iter()
        .map(|(period, t)| MeasurePoint {
            period,
            dollars: t.dollars,
            dollars_ya: t.dollars_ya,
            units: t.units,
            units_ya: t.units_ya,
            pounds: t.pounds,
            pounds_ya: t.pounds_ya,
        })
        .collect()
}

/// Organic share is rounded half away from zero and conventional takes the
/// remainder, so the two percents add up to exactly 100.
pub fn classification_mix(view: &FilteredView<'_>) -> ClassificationMix {
    let organic_count = view
        .iter()
        .filter(|r| r.classification == Classification::Organic)
        .count();
    let conventional_count = view.len() - organic_count;
    let total = view.len();

    if total == 0 {
        return ClassificationMix::default();
    }

    let organic_percent = (organic_count as f64 * 100.0 / total as f64).round() as u32;
    ClassificationMix {
        organic_count,
        conventional_count,
        organic_percent,
        conventional_percent: 100 - organic_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_sales_explorer::filter::filter_view;
    use crate::domain::a001_sales_record::table::tests::{date, record, sample_table};
    use crate::domain::a001_sales_record::SalesRecord;

    fn with_class(mut r: SalesRecord, classification: Classification) -> SalesRecord {
        r.classification = classification;
        r
    }

    #[test]
    fn test_time_series_sums_and_orders_periods() {
        let table = sample_table();
        let view = filter_view(&table, &table.full_selection());
        let series = time_series(&view);

        let periods: Vec<NaiveDate> = series.iter().map(|p| p.period).collect();
        assert_eq!(
            periods,
            vec![date(2023, 11, 4), date(2023, 12, 30), date(2024, 1, 6), date(2024, 2, 3)]
        );
        assert!(periods.windows(2).all(|w| w[0] < w[1]));

        let last = series.last().unwrap();
        assert_eq!(last.dollars, 375.0);
        assert_eq!(last.dollars_ya, 225.0);
    }

    #[test]
    fn test_measure_series_carries_all_measures() {
        let table = sample_table();
        let view = filter_view(&table, &table.full_selection());
        let series = measure_series(&view);
        assert_eq!(series.len(), 4);
        assert_eq!(series[3].units, 187.5);
        assert_eq!(series[3].pounds_ya, 56.25);
    }

    #[test]
    fn test_time_series_empty_view() {
        assert!(time_series(&FilteredView::new(vec![])).is_empty());
    }

    #[test]
    fn test_classification_mix_rounding_sums_to_100() {
        let p = date(2024, 1, 5);
        // 1 of 8 organic: 12.5% rounds to 13, independent rounding would give 13 + 88
        let mut records = vec![with_class(record(p, "A", "X", 1.0, 1.0), Classification::Organic)];
        for _ in 0..7 {
            records.push(with_class(record(p, "A", "X", 1.0, 1.0), Classification::Conventional));
        }
        let view = FilteredView::new(records.iter().collect());

        let mix = classification_mix(&view);
        assert_eq!(mix.organic_count, 1);
        assert_eq!(mix.conventional_count, 7);
        assert_eq!(mix.organic_percent, 13);
        assert_eq!(mix.conventional_percent, 87);
    }

    #[test]
    fn test_classification_mix_thirds() {
        let p = date(2024, 1, 5);
        let records = vec![
            with_class(record(p, "A", "X", 1.0, 1.0), Classification::Organic),
            with_class(record(p, "A", "X", 1.0, 1.0), Classification::Conventional),
            with_class(record(p, "A", "X", 1.0, 1.0), Classification::Conventional),
        ];
        let view = FilteredView::new(records.iter().collect());

        let mix = classification_mix(&view);
        assert_eq!((mix.organic_percent, mix.conventional_percent), (33, 67));
    }

    #[test]
    fn test_classification_mix_empty_view() {
        let mix = classification_mix(&FilteredView::new(vec![]));
        assert_eq!(mix, ClassificationMix::default());
        assert_eq!(mix.organic_percent + mix.conventional_percent, 0);
    }
}
