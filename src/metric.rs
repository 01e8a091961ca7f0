//! Recognized metrics and their display labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A metric that can be graphed against bitrate.
///
/// `Score` lives directly on a detail record; the others are read from the
/// record's nested encoding result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Optimizer score in decibels.
    Score,
    /// Peak signal-to-noise ratio.
    Psnr,
    /// CPU seconds spent encoding.
    EncodeCputime,
}

impl Metric {
    /// All recognized metrics.
    pub const ALL: [Self; 3] = [Self::Score, Self::Psnr, Self::EncodeCputime];

    /// Key used in result documents.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Psnr => "psnr",
            Self::EncodeCputime => "encode_cputime",
        }
    }

    /// Axis label for this metric.
    #[must_use]
    pub fn units(self) -> &'static str {
        match self {
            Self::Score => "Score - decibels",
            Self::Psnr => "Quality in decibels PSNR",
            Self::EncodeCputime => "Encode CPU time in seconds",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("unknown metric {s:?} (expected score, psnr or encode_cputime)"))
    }
}

/// Axis label for a free-form metric name, if it is a recognized one.
#[must_use]
pub fn units_for(name: &str) -> Option<&'static str> {
    name.parse::<Metric>().ok().map(Metric::units)
}
