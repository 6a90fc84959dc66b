//! Output rendering for joined records.
//!
//! [`format`] turns records into `;`-delimited lines; [`writer`] writes those
//! lines to one or more header-prefixed files and reads them back.

pub mod error;
pub mod format;
pub mod writer;

pub use error::OutputError;
pub use format::{HEADER, RECORD_DELIMITER, format_fields, format_record};
pub use writer::{OutputFile, OutputSpec, read_output, shard_path, write_output};
