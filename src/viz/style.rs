//! Series style types and the fixed styles of the forecast chart.
//!
//! Style types are backend-free; the plotters conversion happens in the
//! drawing code. Colors come from the deployed page design (temperature blue,
//! prediction amber) plus the Office-palette green for humidity.

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase hex form, e.g. `"#4A90E2"`.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Line dash pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineDash {
    Solid,
    Dashed,
}

/// Dash geometry for [`LineDash::Dashed`]: pixels on, pixels off.
pub const DASH_PATTERN: (i32, i32) = (6, 6);

/// Complete visual style of one dataset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    pub color: Rgb8,
    /// Opacity of the area fill under the line; `0.0` disables the fill.
    pub fill_alpha: f64,
    pub dash: LineDash,
    pub stroke_width: u32,
    pub point_radius: i32,
}

/// Observed temperatures: solid blue, light fill.
pub const ACTUAL_TEMP: SeriesStyle = SeriesStyle {
    color: Rgb8::new(0x4A, 0x90, 0xE2),
    fill_alpha: 0.12,
    dash: LineDash::Solid,
    stroke_width: 2,
    point_radius: 3,
};

/// Predicted temperatures: dashed amber, light fill.
pub const PRED_TEMP: SeriesStyle = SeriesStyle {
    color: Rgb8::new(0xF5, 0xC5, 0x42),
    fill_alpha: 0.10,
    dash: LineDash::Dashed,
    stroke_width: 2,
    point_radius: 3,
};

/// Combined temperature series: solid blue with a stronger fill.
pub const LEGACY_TEMP: SeriesStyle = SeriesStyle {
    color: Rgb8::new(0x4A, 0x90, 0xE2),
    fill_alpha: 0.18,
    dash: LineDash::Solid,
    stroke_width: 2,
    point_radius: 3,
};

/// Humidity overlay: solid green, no fill.
pub const HUMIDITY: SeriesStyle = SeriesStyle {
    color: Rgb8::new(112, 173, 71),
    fill_alpha: 0.0,
    dash: LineDash::Solid,
    stroke_width: 2,
    point_radius: 3,
};

/// Chart background (the page's dark theme).
pub const CHART_BG: Rgb8 = Rgb8::new(22, 27, 34);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_with_leading_hash() {
        assert_eq!(ACTUAL_TEMP.color.hex(), "#4A90E2");
        assert_eq!(PRED_TEMP.color.hex(), "#F5C542");
        assert_eq!(Rgb8::new(0, 1, 255).hex(), "#0001FF");
    }
}
