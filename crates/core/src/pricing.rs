use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::coverage::{CoverageDraft, CoverageType, DurationMonths};
use crate::domain::vehicle::VehicleDraft;

/// Model year assumed when the collected year field is missing or not numeric.
pub const FALLBACK_VEHICLE_YEAR: i32 = 2020;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub base_premium: Decimal,
    pub age_factor: Decimal,
    pub roadside_assistance: Decimal,
    pub theft_cover: Decimal,
    pub windscreen_cover: Decimal,
    pub monthly_total: Decimal,
    pub total_amount: Decimal,
}

pub fn price_quote(vehicle: &VehicleDraft, coverage: &CoverageDraft) -> PricingBreakdown {
    price_quote_for_year(vehicle, coverage, Utc::now().year())
}

pub fn price_quote_for_year(
    vehicle: &VehicleDraft,
    coverage: &CoverageDraft,
    current_year: i32,
) -> PricingBreakdown {
    let base_premium =
        coverage_base_premium(coverage.coverage_type) * make_multiplier(vehicle.make.as_deref());

    let vehicle_year = vehicle
        .year
        .as_deref()
        .and_then(|year| year.trim().parse::<i32>().ok())
        .unwrap_or(FALLBACK_VEHICLE_YEAR);
    let age_factor = Decimal::from((current_year - vehicle_year).max(0) * 10);

    let add_ons = coverage.add_ons.unwrap_or_default();
    let roadside_assistance = if add_ons.roadside_assistance { dec!(50) } else { Decimal::ZERO };
    let theft_cover = if add_ons.theft_cover { dec!(80) } else { Decimal::ZERO };
    let windscreen_cover = if add_ons.windscreen_cover { dec!(30) } else { Decimal::ZERO };

    let monthly_total =
        base_premium + age_factor + roadside_assistance + theft_cover + windscreen_cover;
    let months = coverage.duration.map(DurationMonths::months).unwrap_or(1);
    let total_amount = monthly_total * Decimal::from(months);

    PricingBreakdown {
        base_premium,
        age_factor,
        roadside_assistance,
        theft_cover,
        windscreen_cover,
        monthly_total,
        total_amount,
    }
}

fn coverage_base_premium(coverage_type: Option<CoverageType>) -> Decimal {
    match coverage_type {
        Some(CoverageType::Comprehensive) => dec!(350),
        Some(CoverageType::ThirdParty) | None => dec!(150),
    }
}

fn make_multiplier(make: Option<&str>) -> Decimal {
    match make.map(str::to_ascii_lowercase).as_deref() {
        Some("ford") => dec!(1.1),
        Some("bmw") => dec!(1.3),
        Some("mercedes") => dec!(1.4),
        _ => dec!(1.0),
    }
}
