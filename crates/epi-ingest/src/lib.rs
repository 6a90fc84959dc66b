pub mod error;
pub mod parser;
pub mod reader;

pub use error::IngestError;
pub use parser::{
    CASE_DELIMITER, CASE_FIELDS, RAINFALL_DELIMITER, RAINFALL_FIELDS, parse_case_line,
    parse_rainfall_line, split, zip_to_fields,
};
pub use reader::{HEADER_LINES, SourceLine, read_case_records, read_lines, read_rainfall_records};
