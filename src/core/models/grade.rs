//! Letter grades and grade-point scales

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A letter grade recorded against a completed enrollment.
///
/// Letters outside the known set are kept verbatim in [`Grade::Unrecognized`]
/// so that rosters carrying legacy letters (e.g. `E`) still load; they resolve
/// to zero grade points under every scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Grade {
    /// `A+`
    APlus,
    /// `A`
    A,
    /// `A-`
    AMinus,
    /// `B+`
    BPlus,
    /// `B`
    B,
    /// `B-`
    BMinus,
    /// `C+`
    CPlus,
    /// `C`
    C,
    /// `C-`
    CMinus,
    /// `D+`
    DPlus,
    /// `D`
    D,
    /// `F`
    F,
    /// Any letter the scales do not know about
    Unrecognized(String),
}

impl Grade {
    /// Every recognized letter, best to worst
    pub const ALL: [Self; 12] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::F,
    ];

    /// Letter as written on a transcript
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
            Self::Unrecognized(letter) => letter,
        }
    }

    /// Returns `true` for letters outside the known set
    #[must_use]
    pub const fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }

    /// Returns `true` for an empty or whitespace-only letter
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Unrecognized(letter) if letter.trim().is_empty())
    }

    /// Parse user input; blank input means "no grade"
    #[must_use]
    pub fn parse_input(value: &str) -> Option<Self> {
        if value.trim().is_empty() {
            None
        } else {
            Some(Self::from(value))
        }
    }
}

impl From<&str> for Grade {
    fn from(value: &str) -> Self {
        match value.trim() {
            "A+" => Self::APlus,
            "A" => Self::A,
            "A-" => Self::AMinus,
            "B+" => Self::BPlus,
            "B" => Self::B,
            "B-" => Self::BMinus,
            "C+" => Self::CPlus,
            "C" => Self::C,
            "C-" => Self::CMinus,
            "D+" => Self::DPlus,
            "D" => Self::D,
            "F" => Self::F,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Grade {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.as_str().to_string()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named grade-point tables.
///
/// Two different tables are in use for the same concept. Both are kept and
/// selected explicitly; reconciling them is a product decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeScale {
    /// Twelve-letter table with thirds (`A-` = 3.7, `B+` = 3.3, ...)
    #[default]
    Full,
    /// Eight-letter table with halves (`B+` = 3.5, `C+` = 2.5, `D+` = 1.5)
    Compact,
}

impl GradeScale {
    /// Point value of a letter under this scale, or `None` if the scale has no entry for it
    #[must_use]
    pub fn points(self, grade: &Grade) -> Option<f64> {
        match self {
            Self::Full => match grade {
                Grade::APlus | Grade::A => Some(4.0),
                Grade::AMinus => Some(3.7),
                Grade::BPlus => Some(3.3),
                Grade::B => Some(3.0),
                Grade::BMinus => Some(2.7),
                Grade::CPlus => Some(2.3),
                Grade::C => Some(2.0),
                Grade::CMinus => Some(1.7),
                Grade::DPlus => Some(1.3),
                Grade::D => Some(1.0),
                Grade::F => Some(0.0),
                Grade::Unrecognized(_) => None,
            },
            Self::Compact => match grade {
                Grade::A => Some(4.0),
                Grade::BPlus => Some(3.5),
                Grade::B => Some(3.0),
                Grade::CPlus => Some(2.5),
                Grade::C => Some(2.0),
                Grade::DPlus => Some(1.5),
                Grade::D => Some(1.0),
                Grade::F => Some(0.0),
                _ => None,
            },
        }
    }

    /// Config/CLI name of the scale
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Compact => "compact",
        }
    }
}

impl FromStr for GradeScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown grade scale: {s}")),
        }
    }
}

impl fmt::Display for GradeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a grade to its point value under `scale`.
///
/// Absent grades and letters the scale does not list resolve to `0.0`.
#[must_use]
pub fn grade_point(grade: Option<&Grade>, scale: GradeScale) -> f64 {
    let Some(grade) = grade else {
        return 0.0;
    };
    scale.points(grade).unwrap_or_else(|| {
        tracing::debug!(grade = %grade, scale = %scale, "grade has no point value, using 0.0");
        0.0
    })
}

/// Resolve a raw grade string; empty input resolves to `0.0`.
#[must_use]
pub fn grade_point_str(grade: &str, scale: GradeScale) -> f64 {
    grade_point(Grade::parse_input(grade).as_ref(), scale)
}
