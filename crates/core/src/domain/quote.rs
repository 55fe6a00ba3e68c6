use serde::{Deserialize, Serialize};

use crate::domain::coverage::CoverageInfo;
use crate::domain::personal::PersonalInfo;
use crate::domain::vehicle::VehicleInfo;
use crate::pricing::PricingBreakdown;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub personal_info: PersonalInfo,
    pub vehicle_info: VehicleInfo,
    pub coverage_info: CoverageInfo,
    pub pricing: PricingBreakdown,
}
