//! Runtime configuration, read from the environment (and `.env`).

use std::path::PathBuf;

use anyhow::Context;
use wariflex_core::constants::STORE_NAME;
use wariflex_core::settings::SplitSettings;

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON store holding every expense.
    pub data_file: PathBuf,
    /// `text` or `json`.
    pub log_format: String,
    pub settings: SplitSettings,
}

impl Config {
    /// Reads `WARIFLEX_*` variables, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let data_file = std::env::var("WARIFLEX_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(format!("{}.json", STORE_NAME)));
        let log_format =
            std::env::var("WARIFLEX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let mut settings = SplitSettings::default();
        if let Ok(policy) = std::env::var("WARIFLEX_DRIFT_POLICY") {
            settings.drift_policy = policy
                .parse()
                .context("WARIFLEX_DRIFT_POLICY must be 'preserve' or 'renormalize'")?;
        }
        if let Ok(bom) = std::env::var("WARIFLEX_CSV_BOM") {
            settings.csv_bom = parse_flag(&bom)
                .with_context(|| format!("WARIFLEX_CSV_BOM: '{}' is not a boolean", bom))?;
        }

        Ok(Self {
            data_file,
            log_format,
            settings,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
