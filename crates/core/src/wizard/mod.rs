pub mod session;
pub mod steps;

pub use session::{WizardError, WizardSession};
pub use steps::{WizardStep, STEP_COUNT};
