pub mod coverage;
pub mod personal;
pub mod quote;
pub mod vehicle;

use thiserror::Error;

pub use coverage::{AddOns, CoverageDraft, CoverageInfo, CoverageType, DurationMonths};
pub use personal::{PersonalDraft, PersonalInfo};
pub use quote::{Quote, QuoteId};
pub use vehicle::{EngineType, VehicleDraft, VehicleInfo};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognized {field} `{value}` (expected {expected})")]
pub struct UnknownTokenError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}
