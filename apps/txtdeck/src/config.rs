use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::deck::DeckStyle;
use crate::layout::geometry::SlideGeometry;
use crate::layout::{FitParams, MAX_FONT_PT};

/// Run configuration loaded from environment variables (and `.env`).
/// Command-line flags are applied on top in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub font: String,
    pub min_font_pt: u32,
    pub max_font_pt: u32,
    pub line_spacing: f64,
    pub padding_px: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = FitParams::default();
        let config = Config {
            input_dir: lookup("TXTDECK_INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            output: lookup("TXTDECK_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("output.pptx")),
            report: lookup("TXTDECK_REPORT").map(PathBuf::from),
            font: lookup("TXTDECK_FONT").unwrap_or_else(|| DeckStyle::default().font),
            min_font_pt: parse_or(&lookup, "TXTDECK_MIN_FONT_PT", defaults.min_size)?,
            max_font_pt: parse_or(&lookup, "TXTDECK_MAX_FONT_PT", defaults.max_size)?,
            line_spacing: parse_or(&lookup, "TXTDECK_LINE_SPACING", defaults.line_spacing)?,
            padding_px: parse_or(
                &lookup,
                "TXTDECK_PADDING_PX",
                SlideGeometry::default().padding_px,
            )?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_font_pt == 0 {
            bail!("TXTDECK_MIN_FONT_PT must be at least 1");
        }
        if self.min_font_pt > self.max_font_pt {
            bail!(
                "TXTDECK_MIN_FONT_PT ({}) must not exceed TXTDECK_MAX_FONT_PT ({})",
                self.min_font_pt,
                self.max_font_pt
            );
        }
        if self.max_font_pt > MAX_FONT_PT {
            bail!(
                "TXTDECK_MAX_FONT_PT ({}) must not exceed {MAX_FONT_PT}",
                self.max_font_pt
            );
        }
        if !(self.line_spacing.is_finite() && self.line_spacing > 0.0) {
            bail!("TXTDECK_LINE_SPACING must be a positive number");
        }
        Ok(())
    }

    pub fn fit_params(&self) -> FitParams {
        FitParams {
            min_size: self.min_font_pt,
            max_size: self.max_font_pt,
            line_spacing: self.line_spacing,
            ..FitParams::default()
        }
    }

    pub fn geometry(&self) -> SlideGeometry {
        SlideGeometry::with_padding(self.padding_px)
    }

    pub fn deck_style(&self) -> DeckStyle {
        DeckStyle {
            font: self.font.clone(),
            ..DeckStyle::default()
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("."));
        assert_eq!(config.output, PathBuf::from("output.pptx"));
        assert_eq!(config.report, None);
        assert_eq!(config.font, "a시네마m");
        assert_eq!(config.fit_params(), FitParams::default());
        assert_eq!(config.geometry(), SlideGeometry::default());
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TXTDECK_INPUT_DIR", "lyrics"),
            ("TXTDECK_OUTPUT", "deck.pptx"),
            ("TXTDECK_FONT", "Noto Sans KR"),
            ("TXTDECK_MIN_FONT_PT", "40"),
            ("TXTDECK_MAX_FONT_PT", " 80 "),
            ("TXTDECK_LINE_SPACING", "1.2"),
            ("TXTDECK_PADDING_PX", "0"),
        ])
        .unwrap();
        assert_eq!(config.input_dir, PathBuf::from("lyrics"));
        assert_eq!(config.deck_style().font, "Noto Sans KR");
        let fit = config.fit_params();
        assert_eq!((fit.min_size, fit.max_size), (40, 80));
        assert!((fit.line_spacing - 1.2).abs() < 1e-9);
        assert_eq!(config.geometry().text_box().x, 0);
    }

    #[test]
    fn test_invalid_number_names_variable() {
        let err = config_from(&[("TXTDECK_MAX_FONT_PT", "big")]).unwrap_err();
        assert!(err.to_string().contains("TXTDECK_MAX_FONT_PT"), "{err}");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = config_from(&[("TXTDECK_MIN_FONT_PT", "90"), ("TXTDECK_MAX_FONT_PT", "50")])
            .unwrap_err();
        assert!(err.to_string().contains("must not exceed"), "{err}");
    }

    #[test]
    fn test_oversized_font_rejected() {
        let err = config_from(&[
            ("TXTDECK_MIN_FONT_PT", "50000000"),
            ("TXTDECK_MAX_FONT_PT", "50000000"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("TXTDECK_MAX_FONT_PT"), "{err}");

        let over = config_from(&[("TXTDECK_MIN_FONT_PT", "5000"), ("TXTDECK_MAX_FONT_PT", "5000")]);
        assert!(over.is_err());
        let edge = config_from(&[("TXTDECK_MAX_FONT_PT", "4000")]).unwrap();
        assert_eq!(edge.fit_params().max_size, MAX_FONT_PT);
    }

    #[test]
    fn test_non_positive_spacing_rejected() {
        assert!(config_from(&[("TXTDECK_LINE_SPACING", "0")]).is_err());
        assert!(config_from(&[("TXTDECK_LINE_SPACING", "NaN")]).is_err());
    }
}
