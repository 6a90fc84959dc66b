pub mod error;
pub mod key;
pub mod options;
pub mod records;

pub use error::{PipelineError, RecordError, Result};
pub use key::{RegionMonthKey, YearMonth};
pub use options::{KeyValidation, MalformedRecordPolicy, PipelineOptions};
pub use records::{Dataset, JoinedRecord, RawCaseRecord, RawRainfallRecord, SourceRecord};
