//! Forecast data extraction from page markup.
//!
//! The forecast page embeds its data twice: as serialized JSON in `data-*`
//! attributes on the chart surface element, and as a visible list of forecast
//! entries. Extraction prefers the structured attributes and falls back to
//! scraping the list when the attributes are missing or broken.
//!
//! Markup handling is tolerant, case-insensitive scanning of the structures
//! the page is known to emit. There is deliberately no full HTML parser and
//! no DOM: the few blocks this module cares about are located by local
//! string scanning, tags are stripped, entities unescaped, and whitespace
//! normalized.

use crate::models::ForecastSeries;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use thiserror::Error;

/// `key="value"` or `key='value'` pairs inside an opening tag.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_.:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid attribute regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Everything that is not part of a signed decimal number.
static NON_NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]+").expect("valid numeric-strip regex"));

static FIRST_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("valid number regex"));

/// Why the structured attribute decode was rejected.
///
/// Callers branch on this explicitly: a decode error is a warning, not a
/// failure, and sends extraction down the fallback path with an empty series
/// so attribute-sourced labels can never mix with scraped values.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A `data-*` attribute did not hold valid JSON of the expected shape.
    #[error("data attribute `data-{attr}` is not valid JSON: {source}")]
    Json {
        attr: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// A populated value series does not line up with the label series.
    #[error("data attribute `data-{attr}` has {got} entries, expected {expected}")]
    LengthMismatch {
        attr: &'static str,
        expected: usize,
        got: usize,
    },
}

/// The chart surface: the opening tag of the element that marks the page as
/// chart-enabled and carries the serialized forecast data.
#[derive(Debug, Clone, Copy)]
pub struct Surface<'a> {
    tag: &'a str,
}

impl<'a> Surface<'a> {
    /// Value of an attribute on the surface element, entity-unescaped.
    /// Attribute names match case-insensitively.
    pub fn attr(&self, name: &str) -> Option<String> {
        tag_attr(self.tag, name)
    }

    /// Value of a `data-*` attribute, e.g. `data_attr("times")`.
    pub fn data_attr(&self, name: &str) -> Option<String> {
        self.attr(&format!("data-{name}"))
    }

    /// Typed decode of the serialized forecast data attributes.
    ///
    /// Missing attributes decode to empty series. Numeric entries may be
    /// `null` (a gap). A populated temperature series whose length differs
    /// from `times` is rejected; humidity length mismatches are carried
    /// through and resolved at dataset assembly.
    pub fn decode_series(&self) -> Result<ForecastSeries, DecodeError> {
        let times: Vec<String> = self.decode_attr("times")?;
        let temps: Vec<Option<f64>> = self.decode_attr("temps")?;
        let actual_temps: Vec<Option<f64>> = self.decode_attr("actual-temps")?;
        let pred_temps: Vec<Option<f64>> = self.decode_attr("pred-temps")?;
        let hums: Vec<Option<f64>> = self.decode_attr("hums")?;

        check_len("temps", times.len(), &temps)?;
        check_len("actual-temps", times.len(), &actual_temps)?;
        check_len("pred-temps", times.len(), &pred_temps)?;

        Ok(ForecastSeries {
            times,
            temps,
            actual_temps,
            pred_temps,
            hums,
        })
    }

    fn decode_attr<T>(&self, attr: &'static str) -> Result<T, DecodeError>
    where
        T: DeserializeOwned + Default,
    {
        match self.data_attr(attr) {
            None => Ok(T::default()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| DecodeError::Json { attr, source })
            }
        }
    }
}

fn check_len(
    attr: &'static str,
    expected: usize,
    series: &[Option<f64>],
) -> Result<(), DecodeError> {
    if series.is_empty() || series.len() == expected {
        Ok(())
    } else {
        Err(DecodeError::LengthMismatch {
            attr,
            expected,
            got: series.len(),
        })
    }
}

/// Locate the first element whose `id` attribute equals `id`.
///
/// Any tag name qualifies; attribute order, quoting style, and name case do
/// not matter. `None` means the page did not opt into a chart.
pub fn find_surface<'a>(page: &'a str, id: &str) -> Option<Surface<'a>> {
    opening_tags(page)
        .find(|tag| tag_attr(tag, "id").as_deref() == Some(id))
        .map(|tag| Surface { tag })
}

/// Two-tier extraction: structured attributes first, list scrape second.
///
/// Returns `None` when the page has no surface element with the given id.
/// A failed attribute decode is logged as a warning and treated as empty;
/// the fallback scrape runs whenever the attribute step yields nothing
/// chartable. The returned series may still be empty, validation is the
/// caller's concern.
pub fn extract_series(page: &str, surface_id: &str) -> Option<ForecastSeries> {
    let surface = find_surface(page, surface_id)?;
    let mut series = match surface.decode_series() {
        Ok(s) => s,
        Err(e) => {
            log::warn!("failed to decode forecast data attributes, falling back to page scrape: {e}");
            ForecastSeries::default()
        }
    };
    if !series.is_chartable() {
        series = scrape_series(page);
    }
    Some(series)
}

/// Scrape the visible forecast list: the `<ul class="forecast-week">` block's
/// `<li>` items with their `forecast-day`, `forecast-temp` and `forecast-hum`
/// elements.
///
/// An entry is accepted only when its day label is non-empty and its
/// temperature parses to a finite number. Every accepted entry appends
/// exactly one slot to each output series; a missing or unparsable humidity
/// becomes an explicit gap so `hums` stays aligned with `times`.
pub fn scrape_series(page: &str) -> ForecastSeries {
    let mut series = ForecastSeries::default();
    let Some(list) = block_inner(page, "ul", "forecast-week") else {
        return series;
    };
    for item in item_blocks(list, "li") {
        let day = class_text(item, "forecast-day").unwrap_or_default();
        let temp = class_text(item, "forecast-temp").and_then(|t| parse_temperature(&t));
        let (day, temp) = match (day.is_empty(), temp) {
            (false, Some(t)) => (day, t),
            _ => continue, // no usable label/temperature pair, skip the entry
        };
        let hum = class_text(item, "forecast-hum").and_then(|t| parse_humidity(&t));
        series.times.push(day);
        series.temps.push(Some(temp));
        series.hums.push(hum);
    }
    // A list without any humidity readings has no humidity series at all.
    if series.hums.iter().all(|h| h.is_none()) {
        series.hums.clear();
    }
    series
}

/// Parse a temperature out of display text like `"23.5°C"` or `"-3 °C"`.
///
/// Every character that is not a digit, minus sign, or decimal point is
/// stripped before parsing. Text that does not reduce to a single finite
/// number (including `"N/A"` and ranges like `"23-25"`) yields `None`.
pub fn parse_temperature(text: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC_RE.replace_all(text, "");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Parse a humidity percentage: the first numeric substring of the text,
/// e.g. `68.0` from `"68%"` or `"Humidity: 68 %"`.
pub fn parse_humidity(text: &str) -> Option<f64> {
    let m = FIRST_NUMBER_RE.find(text)?;
    match m.as_str().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Markup scanning helpers
// ---------------------------------------------------------------------------

/// Opening tags of the page, without the angle brackets. Closing tags,
/// comments, and processing instructions are skipped.
fn opening_tags(page: &str) -> impl Iterator<Item = &str> {
    page.match_indices('<').filter_map(move |(i, _)| {
        let rest = &page[i + 1..];
        let end = rest.find('>')?;
        let tag = &rest[..end];
        if tag.starts_with(['/', '!', '?']) {
            None
        } else {
            Some(tag)
        }
    })
}

/// Value of `name` inside an opening tag's source, entity-unescaped.
fn tag_attr(tag: &str, name: &str) -> Option<String> {
    ATTR_RE.captures_iter(tag).find_map(|cap| {
        let key = cap.get(1)?.as_str();
        if !key.eq_ignore_ascii_case(name) {
            return None;
        }
        let value = cap.get(2).or_else(|| cap.get(3))?.as_str();
        Some(unescape_entities(value))
    })
}

fn class_list_contains(tag: &str, class: &str) -> bool {
    tag_attr(tag, "class")
        .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// True when `b` can directly follow a tag name (`<ul>` but not `<ulx>`).
fn ends_tag_name(b: Option<u8>) -> bool {
    matches!(b, Some(b' ' | b'\t' | b'\n' | b'\r' | b'/' | b'>'))
}

/// Inner content of the first `tag` block whose class list contains `class`.
/// The block ends at its first closing tag, or at the end of the page.
fn block_inner<'a>(page: &'a str, tag: &str, class: &str) -> Option<&'a str> {
    let lower = page.to_ascii_lowercase();
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut at = 0usize;
    while let Some(rel) = lower[at..].find(&open) {
        let start = at + rel;
        at = start + open.len();
        if !ends_tag_name(lower.as_bytes().get(start + open.len()).copied()) {
            continue;
        }
        let tag_end = start + lower[start..].find('>')?;
        if class_list_contains(&page[start + 1..tag_end], class) {
            let inner_start = tag_end + 1;
            let inner_end = lower[inner_start..]
                .find(&close)
                .map(|k| inner_start + k)
                .unwrap_or(page.len());
            return Some(&page[inner_start..inner_end]);
        }
        at = tag_end + 1;
    }
    None
}

/// Item blocks (`<li>…`) inside a list's inner content, in order. Tolerates
/// unclosed items: an item ends at its closing tag, at the next item, or at
/// the end of the content.
fn item_blocks<'a>(list: &'a str, tag: &str) -> Vec<&'a str> {
    let lower = list.to_ascii_lowercase();
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut opens: Vec<(usize, usize)> = Vec::new(); // (tag start, content start)
    let mut at = 0usize;
    while let Some(rel) = lower[at..].find(&open) {
        let start = at + rel;
        at = start + open.len();
        if !ends_tag_name(lower.as_bytes().get(start + open.len()).copied()) {
            continue;
        }
        let Some(j) = lower[start..].find('>') else {
            break;
        };
        opens.push((start, start + j + 1));
        at = start + j + 1;
    }
    opens
        .iter()
        .enumerate()
        .map(|(i, &(_, content))| {
            let next_open = opens.get(i + 1).map(|&(s, _)| s).unwrap_or(list.len());
            let end = lower[content..next_open]
                .find(&close)
                .map(|k| content + k)
                .unwrap_or(next_open);
            &list[content..end]
        })
        .collect()
}

/// Normalized text of the first element inside `item` whose class list
/// contains `class`: tags stripped, entities unescaped, whitespace collapsed.
fn class_text(item: &str, class: &str) -> Option<String> {
    let lower = item.to_ascii_lowercase();
    let mut at = 0usize;
    while let Some(rel) = lower[at..].find('<') {
        let start = at + rel;
        let Some(j) = lower[start..].find('>') else {
            return None;
        };
        let tag_end = start + j;
        at = tag_end + 1;
        let tag_src = &item[start + 1..tag_end];
        if tag_src.starts_with(['/', '!', '?']) || !class_list_contains(tag_src, class) {
            continue;
        }
        let name: String = tag_src
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let close = format!("</{name}");
        let content_start = tag_end + 1;
        let content_end = lower[content_start..]
            .find(&close)
            .map(|k| content_start + k)
            .unwrap_or(item.len());
        return Some(normalize_text(&item[content_start..content_end]));
    }
    None
}

fn normalize_text(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, " ");
    let unescaped = unescape_entities(&stripped);
    unescaped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Undo the entity escaping server-side templating applies to attribute
/// values and text. Only the handful of entities such templates emit.
fn unescape_entities(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
