//! Method - The closed vocabulary of ranking methods the dispatcher accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Direction in which scores are preferred when ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankDirection {
    /// Higher scores rank first.
    Descending,
    /// Lower scores rank first.
    Ascending,
}

/// Multi-criteria decision analysis method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Saw,
    Wp,
    Topsis,
    Ahp,
    Electre,
    Promethee,
    Moora,
    Vikor,
}

impl Method {
    /// Every supported method, in display order.
    pub const ALL: [Method; 8] = [
        Method::Saw,
        Method::Wp,
        Method::Topsis,
        Method::Ahp,
        Method::Electre,
        Method::Promethee,
        Method::Moora,
        Method::Vikor,
    ];

    /// Returns the short identifier.
    pub fn code(&self) -> &'static str {
        match self {
            Method::Saw => "SAW",
            Method::Wp => "WP",
            Method::Topsis => "TOPSIS",
            Method::Ahp => "AHP",
            Method::Electre => "ELECTRE",
            Method::Promethee => "PROMETHEE",
            Method::Moora => "MOORA",
            Method::Vikor => "VIKOR",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Method::Saw => "Simple Additive Weighting (SAW)",
            Method::Wp => "Weighted Product (WP)",
            Method::Topsis => "TOPSIS",
            Method::Ahp => "Analytical Hierarchy Process (AHP)",
            Method::Electre => "ELECTRE",
            Method::Promethee => "PROMETHEE",
            Method::Moora => "MOORA",
            Method::Vikor => "VIKOR",
        }
    }

    /// Returns the direction in which this method's final scores are preferred.
    ///
    /// VIKOR ranks by compromise index, where lower is better.
    pub fn rank_direction(&self) -> RankDirection {
        match self {
            Method::Vikor => RankDirection::Ascending,
            _ => RankDirection::Descending,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Method {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid_format("method", format!("unknown method '{}'", wanted))
            })
    }
}
