use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::domain::coverage::{AddOns, CoverageDraft};
use crate::domain::personal::PersonalDraft;
use crate::domain::quote::Quote;
use crate::domain::vehicle::VehicleDraft;
use crate::errors::DomainError;
use crate::pricing::PricingBreakdown;
use crate::validation::{validate_coverage, validate_personal, validate_vehicle};
use crate::wizard::steps::WizardStep;

/// Fixed key under which in-progress wizard state is persisted.
pub const PROGRESS_KEY: &str = "motoquote-progress";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteState {
    pub current_step: WizardStep,
    pub personal_info: PersonalDraft,
    pub vehicle_info: VehicleDraft,
    pub coverage_info: CoverageDraft,
    pub pricing: Option<PricingBreakdown>,
}

impl Default for QuoteState {
    fn default() -> Self {
        Self::initial()
    }
}

impl QuoteState {
    pub fn initial() -> Self {
        Self {
            current_step: WizardStep::PersonalDetails,
            personal_info: PersonalDraft::default(),
            vehicle_info: VehicleDraft::default(),
            coverage_info: CoverageDraft {
                add_ons: Some(AddOns::default()),
                ..CoverageDraft::default()
            },
            pricing: None,
        }
    }

    pub fn set_step(&mut self, step: WizardStep) {
        self.current_step = step;
    }

    pub fn merge_personal_info(&mut self, update: PersonalDraft) {
        self.personal_info.merge(update);
    }

    pub fn merge_vehicle_info(&mut self, update: VehicleDraft) {
        self.vehicle_info.merge(update);
    }

    pub fn merge_coverage_info(&mut self, update: CoverageDraft) {
        self.coverage_info.merge(update);
    }

    pub fn set_pricing(&mut self, pricing: PricingBreakdown) {
        self.pricing = Some(pricing);
    }

    pub fn reset(&mut self) {
        *self = Self::initial();
    }

    pub fn load_snapshot(&mut self, snapshot: QuoteState) {
        *self = snapshot;
    }

    /// True once the vehicle and coverage drafts both validate, which is the
    /// gate for computing a price breakdown.
    pub fn pricing_inputs_complete(&self) -> bool {
        validate_vehicle(&self.vehicle_info).is_ok()
            && validate_coverage(&self.coverage_info).is_ok()
    }

    pub fn to_quote(&self) -> Result<Quote, DomainError> {
        let mut missing_sections = Vec::new();

        let personal_info = validate_personal(&self.personal_info).ok();
        if personal_info.is_none() {
            missing_sections.push("personal_info".to_string());
        }
        let vehicle_info = validate_vehicle(&self.vehicle_info).ok();
        if vehicle_info.is_none() {
            missing_sections.push("vehicle_info".to_string());
        }
        let coverage_info = validate_coverage(&self.coverage_info).ok();
        if coverage_info.is_none() {
            missing_sections.push("coverage_info".to_string());
        }
        let pricing = self.pricing.clone();
        if pricing.is_none() {
            missing_sections.push("pricing".to_string());
        }

        match (personal_info, vehicle_info, coverage_info, pricing) {
            (Some(personal_info), Some(vehicle_info), Some(coverage_info), Some(pricing)) => {
                Ok(Quote { personal_info, vehicle_info, coverage_info, pricing })
            }
            _ => Err(DomainError::IncompleteQuote { missing_sections }),
        }
    }
}

/// Durable slot for in-progress wizard state. Saves are fire-and-forget and
/// loads recover from any failure by reporting no saved progress.
pub trait ProgressStore: Send + Sync {
    fn load(&self) -> Option<QuoteState>;
    fn save(&self, state: &QuoteState);
}

#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    slot: Arc<Mutex<Option<QuoteState>>>,
}

impl InMemoryProgressStore {
    pub fn saved(&self) -> Option<QuoteState> {
        match self.slot.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProgressStore for InMemoryProgressStore {
    fn load(&self) -> Option<QuoteState> {
        self.saved()
    }

    fn save(&self, state: &QuoteState) {
        match self.slot.lock() {
            Ok(mut slot) => *slot = Some(state.clone()),
            Err(poisoned) => *poisoned.into_inner() = Some(state.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::domain::coverage::{AddOns, CoverageDraft, CoverageInfo, CoverageType, DurationMonths};
    use crate::domain::personal::{PersonalDraft, PersonalInfo};
    use crate::domain::vehicle::{EngineType, VehicleDraft, VehicleInfo};
    use crate::errors::DomainError;
    use crate::pricing::price_quote_for_year;
    use crate::wizard::steps::WizardStep;

    use super::{InMemoryProgressStore, ProgressStore, QuoteState};

    fn personal_info() -> PersonalInfo {
        PersonalInfo {
            full_name: "John Banda".to_string(),
            nrc_passport: "123456/78/9".to_string(),
            phone_number: "0977123456".to_string(),
            email: "john.banda@example.com".to_string(),
        }
    }

    fn vehicle_info() -> VehicleInfo {
        VehicleInfo {
            make: "bmw".to_string(),
            model: "X5".to_string(),
            year: "2026".to_string(),
            registration_number: "ALZ 905".to_string(),
            engine_type: EngineType::Petrol,
        }
    }

    fn coverage_info() -> CoverageInfo {
        CoverageInfo {
            coverage_type: CoverageType::Comprehensive,
            duration: DurationMonths::Six,
            add_ons: AddOns::default(),
        }
    }

    fn complete_state() -> QuoteState {
        let mut state = QuoteState::initial();
        state.merge_personal_info(PersonalDraft::from(personal_info()));
        state.merge_vehicle_info(VehicleDraft::from(vehicle_info()));
        state.merge_coverage_info(CoverageDraft::from(coverage_info()));
        state.set_pricing(price_quote_for_year(&state.vehicle_info, &state.coverage_info, 2026));
        state.set_step(WizardStep::Summary);
        state
    }

    #[test]
    fn initial_state_matches_documented_shape() {
        let state = QuoteState::initial();

        assert_eq!(state.current_step, WizardStep::PersonalDetails);
        assert_eq!(state.personal_info, PersonalDraft::default());
        assert_eq!(state.vehicle_info, VehicleDraft::default());
        assert_eq!(state.coverage_info.coverage_type, None);
        assert_eq!(state.coverage_info.add_ons, Some(AddOns::default()));
        assert_eq!(state.pricing, None);
    }

    #[test]
    fn reset_restores_the_initial_state_exactly() {
        let mut state = complete_state();
        state.reset();

        assert_eq!(state, QuoteState::initial());
    }

    #[test]
    fn load_snapshot_replaces_state_verbatim() {
        let snapshot = complete_state();
        let mut state = QuoteState::initial();
        state.load_snapshot(snapshot.clone());

        assert_eq!(state, snapshot);
    }

    #[test]
    fn pricing_inputs_complete_requires_vehicle_and_coverage() {
        let mut state = QuoteState::initial();
        assert!(!state.pricing_inputs_complete());

        state.merge_vehicle_info(VehicleDraft::from(vehicle_info()));
        assert!(!state.pricing_inputs_complete());

        state.merge_coverage_info(CoverageDraft::from(coverage_info()));
        assert!(state.pricing_inputs_complete());
    }

    #[test]
    fn complete_state_converts_into_a_quote() {
        let quote = complete_state().to_quote().expect("state is complete");

        assert_eq!(quote.personal_info, personal_info());
        assert_eq!(quote.vehicle_info, vehicle_info());
        assert_eq!(quote.coverage_info, coverage_info());
        assert_eq!(quote.pricing.monthly_total, dec!(455));
        assert_eq!(quote.pricing.total_amount, dec!(2730));
    }

    #[test]
    fn to_quote_lists_every_missing_section() {
        let error = QuoteState::initial().to_quote().expect_err("initial state is incomplete");

        assert_eq!(
            error,
            DomainError::IncompleteQuote {
                missing_sections: vec![
                    "personal_info".to_string(),
                    "vehicle_info".to_string(),
                    "coverage_info".to_string(),
                    "pricing".to_string(),
                ],
            }
        );
    }

    #[test]
    fn in_memory_store_round_trips_state() {
        let store = InMemoryProgressStore::default();
        assert_eq!(store.load(), None);

        let state = complete_state();
        store.save(&state);

        assert_eq!(store.load(), Some(state));
    }

    #[test]
    fn in_memory_store_clones_share_one_slot() {
        let store = InMemoryProgressStore::default();
        let handle = store.clone();

        store.save(&QuoteState::initial());

        assert_eq!(handle.saved(), Some(QuoteState::initial()));
    }
}
