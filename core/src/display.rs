//! Display configuration and number formatting for the rendering layer.
//!
//! RULE: the aggregation modules never import this one. Theme and
//! formatting are immutable values handed to whoever renders.

use serde::{Deserialize, Serialize};

/// Churn below this renders as healthy.
pub const HEALTHY_CHURN_RATE: f64 = 0.2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Palette {
    pub primary: String,
    pub success: String,
    pub danger: String,
    pub background: String,
    pub card_background: String,
    pub text: String,
    pub light_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    pub theme: Theme,
    pub currency_symbol: String,
    pub thousands_sep: char,
    pub decimal_sep: char,
    pub palette: Palette,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::light()
    }
}

impl DisplayConfig {
    pub fn light() -> Self {
        Self {
            theme: Theme::Light,
            currency_symbol: "R$".into(),
            thousands_sep: '.',
            decimal_sep: ',',
            palette: Palette {
                primary: "#2E5BFF".into(),
                success: "#10B981".into(),
                danger: "#EF4444".into(),
                background: "#F9FAFB".into(),
                card_background: "#FFFFFF".into(),
                text: "#1E293B".into(),
                light_text: "#64748B".into(),
            },
        }
    }

    pub fn dark() -> Self {
        let light = Self::light();
        Self {
            theme: Theme::Dark,
            palette: Palette {
                background: "#1A202C".into(),
                card_background: "#2D3748".into(),
                text: "#F7FAFC".into(),
                light_text: "#A0AEC0".into(),
                ..light.palette
            },
            ..light
        }
    }

    /// The same config with the other theme's palette.
    pub fn toggled(&self) -> Self {
        let base = match self.theme {
            Theme::Light => Self::dark(),
            Theme::Dark => Self::light(),
        };
        Self {
            currency_symbol: self.currency_symbol.clone(),
            thousands_sep: self.thousands_sep,
            decimal_sep: self.decimal_sep,
            ..base
        }
    }

    /// `R$ 1.234,56`
    pub fn format_currency(&self, value: f64) -> String {
        let cents = (value.abs() * 100.0).round() as u64;
        let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
        format!(
            "{sign}{} {}{}{:02}",
            self.currency_symbol,
            self.group(cents / 100),
            self.decimal_sep,
            cents % 100
        )
    }

    /// `12.345`
    pub fn format_number(&self, value: u64) -> String {
        self.group(value)
    }

    /// `23,4%`
    pub fn format_percent(&self, fraction: f64) -> String {
        let tenths = (fraction.abs() * 1000.0).round() as u64;
        let sign = if fraction < 0.0 && tenths > 0 { "-" } else { "" };
        format!("{sign}{}{}{}%", tenths / 10, self.decimal_sep, tenths % 10)
    }

    pub fn churn_color(&self, churn_rate: f64) -> &str {
        if churn_rate < HEALTHY_CHURN_RATE {
            &self.palette.success
        } else {
            &self.palette.danger
        }
    }

    fn group(&self, value: u64) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.thousands_sep);
            }
            out.push(ch);
        }
        out
    }
}

/// Five-glyph rating. A half star rounds up to a full glyph.
pub fn star_rating(rating: f64) -> String {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = usize::from(rating.fract() >= 0.5);
    let filled = (full + half).min(5);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_ptbr_separators() {
        let cfg = DisplayConfig::default();
        assert_eq!(cfg.format_currency(1234.567), "R$ 1.234,57");
        assert_eq!(cfg.format_currency(0.0), "R$ 0,00");
        assert_eq!(cfg.format_currency(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(cfg.format_currency(-12.5), "-R$ 12,50");
    }

    #[test]
    fn numbers_and_percents() {
        let cfg = DisplayConfig::default();
        assert_eq!(cfg.format_number(999), "999");
        assert_eq!(cfg.format_number(12345), "12.345");
        assert_eq!(cfg.format_percent(0.234), "23,4%");
        assert_eq!(cfg.format_percent(0.0), "0,0%");
    }

    #[test]
    fn toggle_swaps_palette_and_keeps_locale() {
        let light = DisplayConfig::light();
        let dark = light.toggled();
        assert_eq!(dark.theme, Theme::Dark);
        assert_eq!(dark.palette.background, "#1A202C");
        assert_eq!(dark.toggled(), light);
        assert_eq!(light.theme, Theme::Light, "toggling must not mutate the original");
    }

    #[test]
    fn star_rating_rounds_half_up() {
        assert_eq!(star_rating(3.0), "★★★☆☆");
        assert_eq!(star_rating(3.5), "★★★★☆");
        assert_eq!(star_rating(0.0), "☆☆☆☆☆");
        assert_eq!(star_rating(7.0), "★★★★★");
    }

    #[test]
    fn churn_color_thresholds() {
        let cfg = DisplayConfig::default();
        assert_eq!(cfg.churn_color(0.1), "#10B981");
        assert_eq!(cfg.churn_color(0.2), "#EF4444");
    }
}
