//! Region-month keying, aggregation and join for the case and rainfall datasets.
//!
//! The crate is split by stage:
//!
//! - [`keys`]: per-record key derivation and value normalization
//! - [`operators`]: group-by-key, combine-per-key and co-group over `BTreeMap`s
//! - [`aggregate`]: the two per-dataset reduction policies
//! - [`join`]: co-grouping the totals, the completeness filter, decomposition

pub mod aggregate;
pub mod join;
pub mod keys;
pub mod operators;

pub use aggregate::{AggregateOutcome, aggregate_cases, aggregate_rainfall, round_to_one_decimal};
pub use join::{CoGrouped, JoinOutcome, co_group_totals, decompose, format_decimal, join};
pub use keys::{
    case_contribution, clamp_rainfall, derive_case_key, derive_case_key_and_value,
    derive_rainfall_key_and_value, derive_rainfall_record, derive_year_month, is_numeric,
};
pub use operators::{co_group, combine_per_key, group_by_key, sum_values};
