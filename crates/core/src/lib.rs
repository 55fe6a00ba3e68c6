pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;
pub mod state;
pub mod validation;
pub mod wizard;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::coverage::{AddOns, CoverageDraft, CoverageInfo, CoverageType, DurationMonths};
pub use domain::personal::{PersonalDraft, PersonalInfo};
pub use domain::quote::{Quote, QuoteId};
pub use domain::vehicle::{EngineType, VehicleDraft, VehicleInfo};
pub use errors::DomainError;
pub use pricing::{price_quote, price_quote_for_year, PricingBreakdown, FALLBACK_VEHICLE_YEAR};
pub use state::{InMemoryProgressStore, ProgressStore, QuoteState, PROGRESS_KEY};
pub use validation::{validate_coverage, validate_personal, validate_vehicle, FieldError};
pub use wizard::{WizardError, WizardSession, WizardStep, STEP_COUNT};
