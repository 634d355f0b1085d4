use std::fmt;
use std::str::FromStr;

use heatsheet_core::HeatError;
use serde::{Deserialize, Serialize};

/// Where the colorbar sits relative to the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorbarPosition {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

impl FromStr for ColorbarPosition {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(ColorbarPosition::Left),
            "right" => Ok(ColorbarPosition::Right),
            "top" => Ok(ColorbarPosition::Top),
            "bottom" => Ok(ColorbarPosition::Bottom),
            other => Err(HeatError::invalid_option(
                "colorbarPosition",
                other,
                "left|right|top|bottom",
            )),
        }
    }
}

impl fmt::Display for ColorbarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColorbarPosition::Left => "left",
            ColorbarPosition::Right => "right",
            ColorbarPosition::Top => "top",
            ColorbarPosition::Bottom => "bottom",
        };
        write!(f, "{s}")
    }
}

/// Plot theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(HeatError::invalid_option("theme", other, "light|dark")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Flat display configuration for the rendered heatmap.
///
/// `Default` is the canonical reset state: every control restores exactly
/// these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_row_labels: bool,
    pub show_col_labels: bool,
    pub colorscale: String,
    pub reverse_scale: bool,
    pub opacity: f64,
    pub show_colorbar: bool,
    pub colorbar_position: ColorbarPosition,
    pub colorbar_title: String,
    pub title: String,
    pub font_size: u16,
    pub show_grid: bool,
    pub theme: Theme,
    pub show_cell_values: bool,
    pub decimal_precision: u8,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            show_row_labels: true,
            show_col_labels: true,
            colorscale: "Viridis".to_string(),
            reverse_scale: false,
            opacity: 1.0,
            show_colorbar: true,
            colorbar_position: ColorbarPosition::Right,
            colorbar_title: "Value".to_string(),
            title: "Heatmap".to_string(),
            font_size: 12,
            show_grid: false,
            theme: Theme::Light,
            show_cell_values: false,
            decimal_precision: 2,
        }
    }
}

impl DisplayOptions {
    /// The colorscale name the renderer should use; reversed scales get the
    /// conventional `_r` suffix.
    #[must_use]
    pub fn resolved_colorscale(&self) -> String {
        if self.reverse_scale {
            format!("{}_r", self.colorscale)
        } else {
            self.colorscale.clone()
        }
    }

    /// Apply one change, mutating exactly that field.
    ///
    /// Opacity is clamped to [0, 1]. Enum-valued fields are already
    /// validated at parse time, so application itself cannot fail.
    pub fn apply(&mut self, change: OptionChange) {
        match change {
            OptionChange::ShowRowLabels(v) => self.show_row_labels = v,
            OptionChange::ShowColLabels(v) => self.show_col_labels = v,
            OptionChange::Colorscale(v) => self.colorscale = v,
            OptionChange::ReverseScale(v) => self.reverse_scale = v,
            OptionChange::Opacity(v) => self.opacity = v.clamp(0.0, 1.0),
            OptionChange::ShowColorbar(v) => self.show_colorbar = v,
            OptionChange::ColorbarPosition(v) => self.colorbar_position = v,
            OptionChange::ColorbarTitle(v) => self.colorbar_title = v,
            OptionChange::Title(v) => self.title = v,
            OptionChange::FontSize(v) => self.font_size = v,
            OptionChange::ShowGrid(v) => self.show_grid = v,
            OptionChange::Theme(v) => self.theme = v,
            OptionChange::ShowCellValues(v) => self.show_cell_values = v,
            OptionChange::DecimalPrecision(v) => self.decimal_precision = v,
        }
    }
}

/// A single typed change to one display option.
///
/// String-keyed control surfaces go through [`OptionChange::parse`], which
/// is where out-of-domain values (an unknown key, `"diagonal"` for a
/// position) are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "option", content = "value", rename_all = "snake_case")]
pub enum OptionChange {
    ShowRowLabels(bool),
    ShowColLabels(bool),
    Colorscale(String),
    ReverseScale(bool),
    Opacity(f64),
    ShowColorbar(bool),
    ColorbarPosition(ColorbarPosition),
    ColorbarTitle(String),
    Title(String),
    FontSize(u16),
    ShowGrid(bool),
    Theme(Theme),
    ShowCellValues(bool),
    DecimalPrecision(u8),
}

impl OptionChange {
    /// Parse a `(key, value)` pair as delivered by a string-keyed control.
    ///
    /// Keys are matched case-insensitively with underscores ignored, so
    /// `colorbar_position` and `colorbarPosition` both work.
    pub fn parse(key: &str, value: &str) -> Result<OptionChange, HeatError> {
        let normalized = key
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        let bool_value = |key: &str| {
            value
                .parse::<bool>()
                .map_err(|_| HeatError::invalid_option(key, value, "true|false"))
        };

        match normalized.as_str() {
            "showrowlabels" => Ok(OptionChange::ShowRowLabels(bool_value(key)?)),
            "showcollabels" => Ok(OptionChange::ShowColLabels(bool_value(key)?)),
            "colorscale" => Ok(OptionChange::Colorscale(value.to_string())),
            "reversescale" => Ok(OptionChange::ReverseScale(bool_value(key)?)),
            "opacity" => value
                .parse::<f64>()
                .map(OptionChange::Opacity)
                .map_err(|_| HeatError::invalid_option(key, value, "a number in [0, 1]")),
            "showcolorbar" => Ok(OptionChange::ShowColorbar(bool_value(key)?)),
            "colorbarposition" => value.parse().map(OptionChange::ColorbarPosition),
            "colorbartitle" => Ok(OptionChange::ColorbarTitle(value.to_string())),
            "title" => Ok(OptionChange::Title(value.to_string())),
            "fontsize" => value
                .parse::<u16>()
                .map(OptionChange::FontSize)
                .map_err(|_| HeatError::invalid_option(key, value, "a positive integer")),
            "showgrid" => Ok(OptionChange::ShowGrid(bool_value(key)?)),
            "theme" => value.parse().map(OptionChange::Theme),
            "showcellvalues" => Ok(OptionChange::ShowCellValues(bool_value(key)?)),
            "decimalprecision" => value
                .parse::<u8>()
                .map(OptionChange::DecimalPrecision)
                .map_err(|_| HeatError::invalid_option(key, value, "a non-negative integer")),
            _ => Err(HeatError::invalid_option(
                key,
                value,
                "a known display option",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reset_state() {
        let opts = DisplayOptions::default();
        assert!(opts.show_row_labels);
        assert!(opts.show_col_labels);
        assert_eq!(opts.colorscale, "Viridis");
        assert!(!opts.reverse_scale);
        assert!((opts.opacity - 1.0).abs() < f64::EPSILON);
        assert!(opts.show_colorbar);
        assert_eq!(opts.colorbar_position, ColorbarPosition::Right);
        assert_eq!(opts.colorbar_title, "Value");
        assert_eq!(opts.title, "Heatmap");
        assert_eq!(opts.font_size, 12);
        assert_eq!(opts.theme, Theme::Light);
        assert!(!opts.show_cell_values);
        assert_eq!(opts.decimal_precision, 2);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut opts = DisplayOptions::default();
        opts.apply(OptionChange::Opacity(1.7));
        assert!((opts.opacity - 1.0).abs() < f64::EPSILON);
        opts.apply(OptionChange::Opacity(-0.5));
        assert!(opts.opacity.abs() < f64::EPSILON);
        opts.apply(OptionChange::Opacity(0.4));
        assert!((opts.opacity - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_enum_value_rejected() {
        let err = OptionChange::parse("colorbarPosition", "diagonal").unwrap_err();
        assert!(err.to_string().contains("diagonal"));

        // and the option stays untouched when the caller applies nothing
        let opts = DisplayOptions::default();
        assert_eq!(opts.colorbar_position, ColorbarPosition::Right);
    }

    #[test]
    fn test_parse_accepts_both_key_spellings() {
        assert_eq!(
            OptionChange::parse("colorbar_position", "top").unwrap(),
            OptionChange::ColorbarPosition(ColorbarPosition::Top)
        );
        assert_eq!(
            OptionChange::parse("colorbarPosition", "top").unwrap(),
            OptionChange::ColorbarPosition(ColorbarPosition::Top)
        );
    }

    #[test]
    fn test_parse_rejects_negative_precision() {
        assert!(OptionChange::parse("decimalPrecision", "-1").is_err());
        assert_eq!(
            OptionChange::parse("decimalPrecision", "3").unwrap(),
            OptionChange::DecimalPrecision(3)
        );
    }

    #[test]
    fn test_parse_unknown_key() {
        assert!(OptionChange::parse("sparkle", "on").is_err());
    }

    #[test]
    fn test_resolved_colorscale_suffix() {
        let mut opts = DisplayOptions::default();
        assert_eq!(opts.resolved_colorscale(), "Viridis");
        opts.apply(OptionChange::ReverseScale(true));
        assert_eq!(opts.resolved_colorscale(), "Viridis_r");
    }
}
