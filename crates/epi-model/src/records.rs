use std::fmt;

/// Which input a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dataset {
    Cases,
    Rainfall,
}

impl Dataset {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Rainfall => "rainfall",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the `|`-delimited case dataset.
///
/// Fields missing from a short line are empty. Only `report_date`,
/// `case_count` and `state` take part in the join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCaseRecord {
    pub id: String,
    pub report_date: String,
    pub case_count: String,
    pub region_code: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub latitude: String,
    pub longitude: String,
}

/// One line of the `,`-delimited rainfall dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRainfallRecord {
    pub date: String,
    pub millimeters: String,
    pub state: String,
}

/// A parsed record together with its 1-based line number in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord<T> {
    pub line: usize,
    pub record: T,
}

impl<T> SourceRecord<T> {
    pub fn new(line: usize, record: T) -> Self {
        Self { line, record }
    }
}

/// A region-month present in both datasets, values already rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRecord {
    pub state: String,
    pub year: String,
    pub month: String,
    pub rainfall: String,
    pub case_count: String,
}

impl JoinedRecord {
    /// Fields in output column order.
    pub fn fields(&self) -> [&str; 5] {
        [
            self.state.as_str(),
            self.year.as_str(),
            self.month.as_str(),
            self.rainfall.as_str(),
            self.case_count.as_str(),
        ]
    }
}
