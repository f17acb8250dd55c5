use wxchart::ForecastSeries;
use wxchart::viz::datasets::{AxisSlot, DatasetPlan, build_datasets, gap_segments};

fn days(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

#[test]
fn split_series_selects_split_and_keeps_gaps() {
    let series = ForecastSeries {
        times: days(&["Mon", "Tue", "Wed"]),
        actual_temps: vec![Some(21.5), None, Some(22.0)],
        pred_temps: vec![Some(22.0), Some(21.0), None],
        ..Default::default()
    };
    let plan = DatasetPlan::select(&series);
    assert_eq!(plan, DatasetPlan::Split);

    let ds = build_datasets(&series, plan);
    assert_eq!(ds.len(), 2);
    assert_eq!(ds[0].label, "Actual Temp (°C)");
    assert_eq!(ds[1].label, "Predicted Temp (°C)");
    // Gaps stay gaps at their original index, never zero.
    assert_eq!(ds[0].values[1], None);
    assert_eq!(ds[1].values[2], None);
    assert!(ds.iter().all(|d| d.values.len() == 3));
    assert!(ds.iter().all(|d| d.axis == AxisSlot::Primary));
}

#[test]
fn split_with_one_populated_series_emits_one_dataset() {
    let series = ForecastSeries {
        times: days(&["Mon", "Tue"]),
        actual_temps: vec![Some(18.0), Some(19.0)],
        ..Default::default()
    };
    let ds = build_datasets(&series, DatasetPlan::select(&series));
    assert_eq!(ds.len(), 1);
    assert_eq!(ds[0].label, "Actual Temp (°C)");
}

#[test]
fn combined_series_without_humidity_is_legacy() {
    let series = ForecastSeries {
        times: days(&["Mon", "Tue"]),
        temps: vec![Some(20.0), Some(21.0)],
        ..Default::default()
    };
    let plan = DatasetPlan::select(&series);
    assert_eq!(plan, DatasetPlan::Legacy);

    let ds = build_datasets(&series, plan);
    assert_eq!(ds.len(), 1);
    assert_eq!(ds[0].label, "Temperature (°C)");
    assert_eq!(ds[0].values, series.temps);
}

#[test]
fn humidity_overlay_rides_the_secondary_axis() {
    let series = ForecastSeries {
        times: days(&["Mon", "Tue"]),
        temps: vec![Some(20.0), Some(21.0)],
        hums: vec![Some(60.0), None],
        ..Default::default()
    };
    let plan = DatasetPlan::select(&series);
    assert_eq!(plan, DatasetPlan::Humidity);

    let ds = build_datasets(&series, plan);
    assert_eq!(ds.len(), 2);
    assert_eq!(ds[0].axis, AxisSlot::Primary);
    assert_eq!(ds[1].label, "Humidity (%)");
    assert_eq!(ds[1].axis, AxisSlot::Secondary);
    assert_eq!(ds[1].values, vec![Some(60.0), None]);
}

#[test]
fn misaligned_humidity_is_dropped_not_truncated() {
    let series = ForecastSeries {
        times: days(&["Mon", "Tue", "Wed"]),
        temps: vec![Some(20.0), Some(21.0), Some(19.0)],
        hums: vec![Some(60.0), Some(55.0)],
        ..Default::default()
    };
    let ds = build_datasets(&series, DatasetPlan::select(&series));
    assert_eq!(ds.len(), 1);
    assert_eq!(ds[0].label, "Temperature (°C)");
}

#[test]
fn all_null_series_never_drives_plan_selection() {
    let series = ForecastSeries {
        times: days(&["Mon", "Tue"]),
        temps: vec![Some(20.0), Some(21.0)],
        actual_temps: vec![None, None],
        pred_temps: vec![None, None],
        ..Default::default()
    };
    assert_eq!(DatasetPlan::select(&series), DatasetPlan::Legacy);
}

#[test]
fn segments_break_or_bridge_but_never_fill_with_zero() {
    let values = vec![Some(10.0), None, Some(12.0), Some(13.0)];

    let broken = gap_segments(&values, false);
    assert_eq!(broken, vec![vec![(0.0, 10.0)], vec![(2.0, 12.0), (3.0, 13.0)]]);

    let bridged = gap_segments(&values, true);
    assert_eq!(bridged, vec![vec![(0.0, 10.0), (2.0, 12.0), (3.0, 13.0)]]);
}
