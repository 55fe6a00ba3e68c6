use thiserror::Error;

use crate::domain::coverage::CoverageDraft;
use crate::domain::personal::PersonalDraft;
use crate::domain::quote::Quote;
use crate::domain::vehicle::VehicleDraft;
use crate::errors::DomainError;
use crate::pricing::price_quote;
use crate::state::{ProgressStore, QuoteState};
use crate::validation::{validate_coverage, validate_personal, validate_vehicle, FieldError};
use crate::wizard::steps::WizardStep;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("validation failed at step {step:?}: {errors:?}")]
    ValidationFailed { step: WizardStep, errors: Vec<FieldError> },
}

impl WizardError {
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::ValidationFailed { errors, .. } => errors,
        }
    }
}

/// Drives the four wizard steps over a [`QuoteState`], persisting after every
/// accepted mutation. A rejected submission leaves both the state and the
/// stored snapshot untouched.
pub struct WizardSession<P> {
    state: QuoteState,
    store: P,
}

impl<P> WizardSession<P>
where
    P: ProgressStore,
{
    pub fn resume_or_start(store: P) -> Self {
        let state = store.load().unwrap_or_else(QuoteState::initial);
        store.save(&state);
        Self { state, store }
    }

    pub fn state(&self) -> &QuoteState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn submit_personal(&mut self, update: PersonalDraft) -> Result<WizardStep, WizardError> {
        let mut merged = self.state.personal_info.clone();
        merged.merge(update.clone());
        if let Err(errors) = validate_personal(&merged) {
            return Err(WizardError::ValidationFailed {
                step: WizardStep::PersonalDetails,
                errors,
            });
        }

        self.state.merge_personal_info(update);
        Ok(self.complete_step(WizardStep::PersonalDetails))
    }

    pub fn submit_vehicle(&mut self, update: VehicleDraft) -> Result<WizardStep, WizardError> {
        let mut merged = self.state.vehicle_info.clone();
        merged.merge(update.clone());
        if let Err(errors) = validate_vehicle(&merged) {
            return Err(WizardError::ValidationFailed { step: WizardStep::VehicleDetails, errors });
        }

        self.state.merge_vehicle_info(update);
        Ok(self.complete_step(WizardStep::VehicleDetails))
    }

    pub fn submit_coverage(&mut self, update: CoverageDraft) -> Result<WizardStep, WizardError> {
        let mut merged = self.state.coverage_info.clone();
        merged.merge(update.clone());
        if let Err(errors) = validate_coverage(&merged) {
            return Err(WizardError::ValidationFailed { step: WizardStep::Coverage, errors });
        }

        self.state.merge_coverage_info(update);
        Ok(self.complete_step(WizardStep::Coverage))
    }

    pub fn back(&mut self) -> WizardStep {
        let previous = self.state.current_step.previous();
        self.state.set_step(previous);
        self.store.save(&self.state);
        previous
    }

    pub fn restart(&mut self) {
        self.state.reset();
        self.store.save(&self.state);
    }

    pub fn finalized_quote(&self) -> Result<Quote, DomainError> {
        self.state.to_quote()
    }

    fn complete_step(&mut self, step: WizardStep) -> WizardStep {
        if self.state.pricing_inputs_complete() {
            let pricing = price_quote(&self.state.vehicle_info, &self.state.coverage_info);
            self.state.set_pricing(pricing);
        }

        let next = step.next();
        self.state.set_step(next);
        self.store.save(&self.state);
        next
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::coverage::{AddOns, CoverageDraft, CoverageType, DurationMonths};
    use crate::domain::personal::PersonalDraft;
    use crate::domain::vehicle::{EngineType, VehicleDraft};
    use crate::errors::DomainError;
    use crate::pricing::price_quote;
    use crate::state::{InMemoryProgressStore, ProgressStore, QuoteState};
    use crate::wizard::steps::WizardStep;

    use super::{WizardError, WizardSession};

    fn personal_update() -> PersonalDraft {
        PersonalDraft {
            full_name: Some("John Banda".to_string()),
            nrc_passport: Some("123456/78/9".to_string()),
            phone_number: Some("0977123456".to_string()),
            email: Some("john.banda@example.com".to_string()),
        }
    }

    fn vehicle_update(make: &str) -> VehicleDraft {
        VehicleDraft {
            make: Some(make.to_string()),
            model: Some("X5".to_string()),
            year: Some("2024".to_string()),
            registration_number: Some("ALZ 905".to_string()),
            engine_type: Some(EngineType::Petrol),
        }
    }

    fn coverage_update() -> CoverageDraft {
        CoverageDraft {
            coverage_type: Some(CoverageType::Comprehensive),
            duration: Some(DurationMonths::Six),
            add_ons: Some(AddOns { roadside_assistance: true, ..AddOns::default() }),
        }
    }

    #[test]
    fn happy_path_walks_all_four_steps_and_prices_the_quote() {
        let store = InMemoryProgressStore::default();
        let mut session = WizardSession::resume_or_start(store.clone());

        let step = session.submit_personal(personal_update()).expect("personal step");
        assert_eq!(step, WizardStep::VehicleDetails);
        assert_eq!(session.state().pricing, None);

        let step = session.submit_vehicle(vehicle_update("bmw")).expect("vehicle step");
        assert_eq!(step, WizardStep::Coverage);
        assert_eq!(session.state().pricing, None);

        let step = session.submit_coverage(coverage_update()).expect("coverage step");
        assert_eq!(step, WizardStep::Summary);

        let expected =
            price_quote(&session.state().vehicle_info, &session.state().coverage_info);
        assert_eq!(session.state().pricing, Some(expected));

        let quote = session.finalized_quote().expect("complete quote");
        assert_eq!(quote.personal_info.full_name, "John Banda");
        assert_eq!(store.saved(), Some(session.state().clone()));
    }

    #[test]
    fn rejected_submission_leaves_state_and_snapshot_untouched() {
        let store = InMemoryProgressStore::default();
        let mut session = WizardSession::resume_or_start(store.clone());
        let before = session.state().clone();

        let update = PersonalDraft {
            phone_number: Some("too-short".to_string()),
            ..personal_update()
        };
        let error = session.submit_personal(update).expect_err("phone number is invalid");

        match &error {
            WizardError::ValidationFailed { step, errors } => {
                assert_eq!(*step, WizardStep::PersonalDetails);
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "phone_number");
            }
        }
        assert_eq!(error.field_errors().len(), 1);
        assert_eq!(session.state(), &before);
        assert_eq!(store.saved(), Some(before));
    }

    #[test]
    fn revisiting_the_vehicle_step_reprices_the_quote() {
        let store = InMemoryProgressStore::default();
        let mut session = WizardSession::resume_or_start(store);
        session.submit_personal(personal_update()).expect("personal step");
        session.submit_vehicle(vehicle_update("bmw")).expect("vehicle step");
        session.submit_coverage(coverage_update()).expect("coverage step");
        let priced_as_bmw = session.state().pricing.clone().expect("priced at summary");

        assert_eq!(session.back(), WizardStep::Coverage);
        assert_eq!(session.back(), WizardStep::VehicleDetails);

        let step = session
            .submit_vehicle(VehicleDraft {
                make: Some("toyota".to_string()),
                ..VehicleDraft::default()
            })
            .expect("make-only update over a complete draft");
        assert_eq!(step, WizardStep::Coverage);

        let repriced = session.state().pricing.clone().expect("still priced");
        assert!(repriced.base_premium < priced_as_bmw.base_premium);
        assert_eq!(session.state().vehicle_info.model.as_deref(), Some("X5"));
    }

    #[test]
    fn back_stops_at_the_first_step() {
        let store = InMemoryProgressStore::default();
        let mut session = WizardSession::resume_or_start(store);

        assert_eq!(session.back(), WizardStep::PersonalDetails);
        assert_eq!(session.current_step(), WizardStep::PersonalDetails);
    }

    #[test]
    fn restart_resets_and_persists_the_initial_state() {
        let store = InMemoryProgressStore::default();
        let mut session = WizardSession::resume_or_start(store.clone());
        session.submit_personal(personal_update()).expect("personal step");

        session.restart();

        assert_eq!(session.state(), &QuoteState::initial());
        assert_eq!(store.saved(), Some(QuoteState::initial()));
    }

    #[test]
    fn resume_or_start_picks_up_saved_progress() {
        let store = InMemoryProgressStore::default();
        let mut seeded = QuoteState::initial();
        seeded.merge_personal_info(personal_update());
        seeded.set_step(WizardStep::VehicleDetails);
        store.save(&seeded);

        let session = WizardSession::resume_or_start(store);

        assert_eq!(session.current_step(), WizardStep::VehicleDetails);
        assert_eq!(session.state().personal_info.full_name.as_deref(), Some("John Banda"));
    }

    #[test]
    fn finalized_quote_requires_pricing() {
        let store = InMemoryProgressStore::default();
        let mut session = WizardSession::resume_or_start(store);
        session.submit_personal(personal_update()).expect("personal step");

        let error = session.finalized_quote().expect_err("vehicle and coverage are missing");
        assert!(matches!(error, DomainError::IncompleteQuote { .. }));
    }
}
