use serde::{Deserialize, Serialize};

pub const STEP_COUNT: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalDetails,
    VehicleDetails,
    Coverage,
    Summary,
}

impl WizardStep {
    pub fn index(self) -> u8 {
        match self {
            Self::PersonalDetails => 1,
            Self::VehicleDetails => 2,
            Self::Coverage => 3,
            Self::Summary => 4,
        }
    }

    /// Maps a raw step number to a step, clamping out-of-range values to the
    /// nearest end of the wizard.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 | 1 => Self::PersonalDetails,
            2 => Self::VehicleDetails,
            3 => Self::Coverage,
            _ => Self::Summary,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::PersonalDetails => Self::VehicleDetails,
            Self::VehicleDetails => Self::Coverage,
            Self::Coverage | Self::Summary => Self::Summary,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::PersonalDetails | Self::VehicleDetails => Self::PersonalDetails,
            Self::Coverage => Self::VehicleDetails,
            Self::Summary => Self::Coverage,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::PersonalDetails => "Personal Details",
            Self::VehicleDetails => "Vehicle Details",
            Self::Coverage => "Coverage",
            Self::Summary => "Summary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{WizardStep, STEP_COUNT};

    #[test]
    fn indexes_run_from_one_to_step_count() {
        let steps = [
            WizardStep::PersonalDetails,
            WizardStep::VehicleDetails,
            WizardStep::Coverage,
            WizardStep::Summary,
        ];

        for (position, step) in steps.iter().enumerate() {
            assert_eq!(step.index(), position as u8 + 1);
            assert_eq!(WizardStep::from_index(step.index()), *step);
        }
        assert_eq!(steps.len() as u8, STEP_COUNT);
    }

    #[test]
    fn from_index_clamps_out_of_range_values() {
        assert_eq!(WizardStep::from_index(0), WizardStep::PersonalDetails);
        assert_eq!(WizardStep::from_index(5), WizardStep::Summary);
        assert_eq!(WizardStep::from_index(u8::MAX), WizardStep::Summary);
    }

    #[test]
    fn next_saturates_at_summary() {
        assert_eq!(WizardStep::PersonalDetails.next(), WizardStep::VehicleDetails);
        assert_eq!(WizardStep::Coverage.next(), WizardStep::Summary);
        assert_eq!(WizardStep::Summary.next(), WizardStep::Summary);
    }

    #[test]
    fn previous_saturates_at_personal_details() {
        assert_eq!(WizardStep::Summary.previous(), WizardStep::Coverage);
        assert_eq!(WizardStep::VehicleDetails.previous(), WizardStep::PersonalDetails);
        assert_eq!(WizardStep::PersonalDetails.previous(), WizardStep::PersonalDetails);
    }
}
