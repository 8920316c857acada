use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The questionnaire a respondent selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InstrumentKind {
    /// Self-Compassion Scale, 26 items rated 1–5.
    SelfCompassion,
    /// Depression Anxiety Stress Scales, 21-item short form rated 0–3.
    Dass21,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 2] = [InstrumentKind::SelfCompassion, InstrumentKind::Dass21];

    /// Stable identifier used in URLs and serialized results.
    pub fn id(self) -> &'static str {
        match self {
            InstrumentKind::SelfCompassion => "self_compassion",
            InstrumentKind::Dass21 => "dass21",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for InstrumentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the hyphenated spellings the web front end historically used.
        match s.trim().to_ascii_lowercase().as_str() {
            "self_compassion" | "self-compassion" => Ok(InstrumentKind::SelfCompassion),
            "dass21" | "dass-21" | "dass_21" => Ok(InstrumentKind::Dass21),
            _ => Err(CoreError::UnknownInstrument(s.to_string())),
        }
    }
}
