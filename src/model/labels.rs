//! Fixed ordinal → label table. Changing it means changing the model's output contract.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcgClass {
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Risky")]
    Risky,
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Future Risk Detected")]
    FutureRisk,
}

impl EcgClass {
    pub const COUNT: usize = 4;

    pub const ALL: [EcgClass; Self::COUNT] = [
        EcgClass::Normal,
        EcgClass::Risky,
        EcgClass::Low,
        EcgClass::FutureRisk,
    ];

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            EcgClass::Normal => "Normal",
            EcgClass::Risky => "Risky",
            EcgClass::Low => "Low",
            EcgClass::FutureRisk => "Future Risk Detected",
        }
    }

    pub fn is_abnormal(self) -> bool {
        self != EcgClass::Normal
    }
}

impl fmt::Display for EcgClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
