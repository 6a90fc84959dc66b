//! Region-month keys shared by both datasets.
//!
//! A key renders as `<state>-<year>-<month>` (e.g. `RS-2015-01`). Components
//! never contain `-`, so the rendered form always splits back into exactly
//! three parts.

use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// Year and month components taken from a date field, kept as source text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: String,
    pub month: String,
}

impl YearMonth {
    pub fn new(year: impl Into<String>, month: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

/// Composite join key. Ordered by state, then year, then month.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionMonthKey {
    pub state: String,
    pub year: String,
    pub month: String,
}

impl RegionMonthKey {
    pub fn new(state: impl Into<String>, year_month: YearMonth) -> Self {
        Self {
            state: state.into(),
            year: year_month.year,
            month: year_month.month,
        }
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::new(self.year.clone(), self.month.clone())
    }
}

impl fmt::Display for RegionMonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.state, self.year, self.month)
    }
}

impl FromStr for RegionMonthKey {
    type Err = RecordError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = key.split('-').collect();
        let [state, year, month] = parts.as_slice() else {
            return Err(RecordError::KeyParts {
                key: key.to_string(),
            });
        };
        Ok(Self {
            state: (*state).to_string(),
            year: (*year).to_string(),
            month: (*month).to_string(),
        })
    }
}
