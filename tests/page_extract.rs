use wxchart::page::extract_series;

/// A rendered forecast page with the given attributes on the chart surface.
fn page_with(attrs: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head><title>Weekly Forecast</title></head>
<body>
  <h1>Weekly Forecast</h1>
  <canvas id="chart" width="1000" height="600"
          {attrs}></canvas>
  <ul class="forecast-week">
    <li><span class="forecast-day">Friday</span>
        <span class="forecast-temp">18.5°C</span>
        <span class="forecast-hum">72%</span></li>
    <li><span class="forecast-day">Saturday</span>
        <span class="forecast-temp">20°C</span></li>
  </ul>
</body>
</html>"#
    )
}

#[test]
fn split_page_decodes_all_attribute_series() {
    let page = page_with(
        r#"data-times="[&quot;Mon&quot;,&quot;Tue&quot;,&quot;Wed&quot;]"
           data-actual-temps="[21.5, null, 22.0]"
           data-pred-temps="[22.0, 21.0, null]"
           data-hums="[60, null, 55]""#,
    );
    let s = extract_series(&page, "chart").unwrap();
    assert_eq!(s.times, vec!["Mon", "Tue", "Wed"]);
    assert!(s.temps.is_empty());
    assert_eq!(s.actual_temps, vec![Some(21.5), None, Some(22.0)]);
    assert_eq!(s.pred_temps, vec![Some(22.0), Some(21.0), None]);
    assert_eq!(s.hums, vec![Some(60.0), None, Some(55.0)]);
}

#[test]
fn legacy_page_decodes_combined_series() {
    let page = page_with(
        r#"data-times="[&quot;Mon&quot;,&quot;Tue&quot;]" data-temps="[20.5, 21.0]""#,
    );
    let s = extract_series(&page, "chart").unwrap();
    assert_eq!(s.times, vec!["Mon", "Tue"]);
    assert_eq!(s.temps, vec![Some(20.5), Some(21.0)]);
    assert!(s.actual_temps.is_empty());
    assert!(s.pred_temps.is_empty());
}

#[test]
fn length_mismatch_discards_attribute_data_entirely() {
    // Three labels but only two predicted values: nothing from the
    // attributes may survive, the visible list is used instead.
    let page = page_with(
        r#"data-times="[&quot;Mon&quot;,&quot;Tue&quot;,&quot;Wed&quot;]"
           data-temps="[20, 21, 22]"
           data-pred-temps="[22.0, 21.0]""#,
    );
    let s = extract_series(&page, "chart").unwrap();
    assert_eq!(s.times, vec!["Friday", "Saturday"]);
    assert_eq!(s.temps, vec![Some(18.5), Some(20.0)]);
    assert!(s.pred_temps.is_empty());
}

#[test]
fn broken_json_falls_back_to_the_visible_list() {
    let page = page_with(r#"data-times="{oops" data-temps="[20]""#);
    let s = extract_series(&page, "chart").unwrap();
    assert_eq!(s.times, vec!["Friday", "Saturday"]);
    assert_eq!(s.temps, vec![Some(18.5), Some(20.0)]);
    // Saturday's missing reading stays a gap.
    assert_eq!(s.hums, vec![Some(72.0), None]);
}

#[test]
fn surface_without_data_and_without_list_extracts_empty() {
    let page = r#"<html><body><canvas id="chart"></canvas></body></html>"#;
    let s = extract_series(page, "chart").unwrap();
    assert!(s.is_empty());
    assert!(!s.is_chartable());
}

#[test]
fn page_without_surface_yields_none() {
    let page = page_with(r#"data-times="[&quot;Mon&quot;]" data-temps="[20]""#);
    assert!(extract_series(&page, "not-the-chart").is_none());
}

#[test]
fn surface_id_lookup_honors_custom_ids() {
    let page = r#"
        <div id="sidebar"></div>
        <canvas id="weather-panel" data-times="[&quot;Mon&quot;]" data-temps="[19.5]"></canvas>
    "#;
    let s = extract_series(page, "weather-panel").unwrap();
    assert_eq!(s.times, vec!["Mon"]);
    assert_eq!(s.temps, vec![Some(19.5)]);
}
