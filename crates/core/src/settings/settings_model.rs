//! Settings that tune how shares are edited and exported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::PERCENTAGE_PRECISION;
use crate::errors::{Error, ValidationError};

/// What `set_share` does when clamped participants could not absorb their
/// part of an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DriftPolicy {
    /// Keep the equal-absorption result as is; the total may leave 100.
    #[default]
    Preserve,
    /// Re-spread the unabsorbed part over unlocked shares that still have room.
    Renormalize,
}

impl DriftPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftPolicy::Preserve => "preserve",
            DriftPolicy::Renormalize => "renormalize",
        }
    }
}

impl fmt::Display for DriftPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriftPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(DriftPolicy::Preserve),
            "renormalize" => Ok(DriftPolicy::Renormalize),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown drift policy '{}'",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SplitSettings {
    pub drift_policy: DriftPolicy,
    /// Decimal places for persisted and converted percentages.
    pub percentage_precision: u32,
    /// Prefix exported CSV with a UTF-8 BOM.
    pub csv_bom: bool,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            drift_policy: DriftPolicy::Preserve,
            percentage_precision: PERCENTAGE_PRECISION,
            csv_bom: true,
        }
    }
}
