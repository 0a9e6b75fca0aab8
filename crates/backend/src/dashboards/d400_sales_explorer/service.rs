use contracts::dashboards::d400_sales_explorer::{
    DashboardResponse, ExplorerInitResponse, FilterActionRequest, FilterState, GroupBy,
};

use super::aggregator::{aggregate, group_summary, segment_summary};
use super::filter::{FilterEngine, FilterError};
use super::rollup::{classification_mix, time_series};
use crate::domain::a001_sales_record::SalesTable;

/// Initial widget data: universes, period bounds, presets and a full selection.
pub fn init_explorer(table: &SalesTable) -> ExplorerInitResponse {
    ExplorerInitResponse {
        state: table.full_selection(),
        min_period: table.min_period(),
        max_period: table.max_period(),
        segments: table.segments().iter().cloned().collect(),
        sub_categories: table.sub_categories().iter().cloned().collect(),
        presets: table.presets().to_vec(),
        record_count: table.len(),
    }
}

/// Replay one UI action against the caller's state and hand the new state back.
///
/// On error the caller keeps its previous state untouched.
pub fn apply_filter_action(
    table: &SalesTable,
    request: FilterActionRequest,
) -> Result<FilterState, FilterError> {
    let mut engine = FilterEngine::resume(table, request.state)?;
    engine.apply(request.action)?;
    Ok(engine.into_state())
}

/// Recompute every dashboard output from scratch for the given state.
pub fn build_dashboard(table: &SalesTable, state: FilterState) -> Result<DashboardResponse, FilterError> {
    let engine = FilterEngine::resume(table, state)?;
    let view = engine.current_view();

    tracing::debug!(
        "D400 Explorer: {} of {} records selected",
        view.len(),
        table.len()
    );

    Ok(DashboardResponse {
        record_count: view.len(),
        metrics: aggregate(&view),
        segment_summary: segment_summary(&view),
        sub_category_summary: group_summary(&view, GroupBy::SubCategory),
        time_series: time_series(&view),
        classification_mix: classification_mix(&view),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_sales_record::normalizer::{normalize_rows, RawRow};
    use crate::domain::a001_sales_record::table::tests::{date, sample_table};
    use contracts::dashboards::d400_sales_explorer::{
        ClassificationMix, DateRange, FilterAction, RangePreset,
    };

    fn raw(period: &str, dollars: &str, dollars_ya: &str, claim: &str) -> RawRow {
        [
            ("Periods", period),
            ("$", dollars),
            ("$ Year Ago", dollars_ya),
            ("Units", "0"),
            ("Units Year Ago", "0"),
            ("Pounds", "0"),
            ("Pounds Year Ago", "0"),
            ("Segment", "A"),
            ("Sub Category", "X"),
            ("Organic Claim", claim),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_two_record_end_to_end() {
        let records = normalize_rows(vec![
            raw("w/e 01/05/24", "100", "50", "Organic"),
            raw("w/e 01/05/24", "0", "0", "Not Organic"),
        ])
        .unwrap();
        let table = SalesTable::new(records).unwrap();

        let dashboard = build_dashboard(&table, table.full_selection()).unwrap();
        assert_eq!(dashboard.record_count, 2);
        assert_eq!(dashboard.metrics.dollars, 100.0);
        assert_eq!(dashboard.metrics.pct_dollars, 1.0);
        assert_eq!(
            dashboard.classification_mix,
            ClassificationMix {
                organic_count: 1,
                conventional_count: 1,
                organic_percent: 50,
                conventional_percent: 50,
            }
        );
        assert_eq!(dashboard.time_series.len(), 1);
        assert_eq!(dashboard.time_series[0].period, date(2024, 1, 5));
        assert_eq!(dashboard.segment_summary.len(), 1);
        assert_eq!(dashboard.segment_summary[0].segment, "A");
    }

    #[test]
    fn test_segment_summary_wire_column_order() {
        let table = sample_table();
        let dashboard = build_dashboard(&table, table.full_selection()).unwrap();
        let json = serde_json::to_string(&dashboard.segment_summary[0]).unwrap();

        let columns = [
            "\"segment\"",
            "\"dollars\"",
            "\"dollars_pct_change\"",
            "\"pounds\"",
            "\"pounds_pct_change\"",
            "\"units\"",
            "\"units_pct_change\"",
        ];
        let positions: Vec<usize> = columns.iter().map(|c| json.find(c).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_init_explorer() {
        let table = sample_table();
        let init = init_explorer(&table);
        assert_eq!(init.record_count, 5);
        assert_eq!(init.segments, vec!["Apples", "Citrus", "Pears"]);
        assert_eq!(init.state, table.full_selection());
        assert_eq!(init.presets.len(), table.presets().len());
    }

    #[test]
    fn test_apply_filter_action_round_trips_state() {
        let table = sample_table();
        let state = apply_filter_action(
            &table,
            FilterActionRequest {
                state: table.full_selection(),
                action: FilterAction::ApplyPreset {
                    preset: RangePreset::YearToDate,
                },
            },
        )
        .unwrap();
        assert_eq!(state.date_range, DateRange::new(date(2024, 1, 1), date(2024, 2, 3)));

        let state = apply_filter_action(
            &table,
            FilterActionRequest {
                state,
                action: FilterAction::ClearAllSegments,
            },
        )
        .unwrap();
        let dashboard = build_dashboard(&table, state).unwrap();
        assert_eq!(dashboard.record_count, 0);
        assert_eq!(dashboard.metrics.dollars, 0.0);
        assert!(dashboard.segment_summary.is_empty());
        assert_eq!(dashboard.classification_mix, ClassificationMix::default());
    }

    #[test]
    fn test_apply_filter_action_rejects_inverted_range() {
        let table = sample_table();
        let result = apply_filter_action(
            &table,
            FilterActionRequest {
                state: table.full_selection(),
                action: FilterAction::SetDateRange {
                    start: date(2024, 2, 1),
                    end: date(2024, 1, 1),
                },
            },
        );
        assert!(matches!(result, Err(FilterError::InvalidRange { .. })));
    }
}
