use serde::{Deserialize, Serialize};

use crate::domain::coverage::{CoverageDraft, CoverageInfo};
use crate::domain::personal::{PersonalDraft, PersonalInfo};
use crate::domain::vehicle::{VehicleDraft, VehicleInfo};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self { field: field.to_string(), message: message.to_string() }
    }
}

pub fn validate_personal(draft: &PersonalDraft) -> Result<PersonalInfo, Vec<FieldError>> {
    let mut errors = Vec::new();

    let full_name = draft.full_name.clone().unwrap_or_default();
    if full_name.chars().count() < 2 {
        errors.push(FieldError::new("full_name", "Full name must be at least 2 characters"));
    }

    let nrc_passport = draft.nrc_passport.clone().unwrap_or_default();
    if nrc_passport.chars().count() < 5 {
        errors.push(FieldError::new("nrc_passport", "NRC/Passport number is required"));
    }

    let phone_number = draft.phone_number.clone().unwrap_or_default();
    if phone_number.chars().count() < 10 {
        errors.push(FieldError::new("phone_number", "Valid phone number is required"));
    }

    let email = draft.email.clone().unwrap_or_default();
    if !is_valid_email(&email) {
        errors.push(FieldError::new("email", "Valid email address is required"));
    }

    if errors.is_empty() {
        Ok(PersonalInfo { full_name, nrc_passport, phone_number, email })
    } else {
        Err(errors)
    }
}

pub fn validate_vehicle(draft: &VehicleDraft) -> Result<VehicleInfo, Vec<FieldError>> {
    let mut errors = Vec::new();

    let make = draft.make.clone().unwrap_or_default();
    if make.is_empty() {
        errors.push(FieldError::new("make", "Vehicle make is required"));
    }

    let model = draft.model.clone().unwrap_or_default();
    if model.is_empty() {
        errors.push(FieldError::new("model", "Vehicle model is required"));
    }

    let year = draft.year.clone().unwrap_or_default();
    if year.chars().count() < 4 {
        errors.push(FieldError::new("year", "Vehicle year is required"));
    }

    let registration_number = draft.registration_number.clone().unwrap_or_default();
    if registration_number.chars().count() < 3 {
        errors.push(FieldError::new("registration_number", "Registration number is required"));
    }

    if draft.engine_type.is_none() {
        errors.push(FieldError::new("engine_type", "Engine type is required"));
    }

    match (errors.is_empty(), draft.engine_type) {
        (true, Some(engine_type)) => {
            Ok(VehicleInfo { make, model, year, registration_number, engine_type })
        }
        _ => Err(errors),
    }
}

pub fn validate_coverage(draft: &CoverageDraft) -> Result<CoverageInfo, Vec<FieldError>> {
    let mut errors = Vec::new();

    if draft.coverage_type.is_none() {
        errors.push(FieldError::new("coverage_type", "Coverage type is required"));
    }
    if draft.duration.is_none() {
        errors.push(FieldError::new("duration", "Duration is required"));
    }

    match (draft.coverage_type, draft.duration) {
        (Some(coverage_type), Some(duration)) => Ok(CoverageInfo {
            coverage_type,
            duration,
            add_ons: draft.add_ons.unwrap_or_default(),
        }),
        _ => Err(errors),
    }
}

pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
