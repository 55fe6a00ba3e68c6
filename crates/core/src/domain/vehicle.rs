use serde::{Deserialize, Serialize};

use crate::domain::UnknownTokenError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    Petrol,
    Diesel,
}

impl EngineType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Petrol => "Petrol",
            Self::Diesel => "Diesel",
        }
    }
}

impl std::str::FromStr for EngineType {
    type Err = UnknownTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "petrol" => Ok(Self::Petrol),
            "diesel" => Ok(Self::Diesel),
            other => Err(UnknownTokenError {
                field: "engine type",
                value: other.to_string(),
                expected: "petrol|diesel",
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub make: String,
    pub model: String,
    pub year: String,
    pub registration_number: String,
    pub engine_type: EngineType,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDraft {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub registration_number: Option<String>,
    pub engine_type: Option<EngineType>,
}

impl VehicleDraft {
    pub fn merge(&mut self, update: VehicleDraft) {
        if let Some(make) = update.make {
            self.make = Some(make);
        }
        if let Some(model) = update.model {
            self.model = Some(model);
        }
        if let Some(year) = update.year {
            self.year = Some(year);
        }
        if let Some(registration_number) = update.registration_number {
            self.registration_number = Some(registration_number);
        }
        if let Some(engine_type) = update.engine_type {
            self.engine_type = Some(engine_type);
        }
    }
}

impl From<VehicleInfo> for VehicleDraft {
    fn from(info: VehicleInfo) -> Self {
        Self {
            make: Some(info.make),
            model: Some(info.model),
            year: Some(info.year),
            registration_number: Some(info.registration_number),
            engine_type: Some(info.engine_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineType, VehicleDraft};

    #[test]
    fn engine_type_parses_case_insensitively() {
        assert_eq!("Petrol".parse::<EngineType>(), Ok(EngineType::Petrol));
        assert_eq!(" DIESEL ".parse::<EngineType>(), Ok(EngineType::Diesel));
    }

    #[test]
    fn engine_type_rejects_unknown_token() {
        let error = "electric".parse::<EngineType>().expect_err("electric is not supported");
        assert_eq!(error.field, "engine type");
        assert_eq!(error.value, "electric");
    }

    #[test]
    fn merge_keeps_existing_engine_type_when_update_is_empty() {
        let mut draft = VehicleDraft {
            make: Some("toyota".to_string()),
            engine_type: Some(EngineType::Petrol),
            ..VehicleDraft::default()
        };

        draft.merge(VehicleDraft {
            model: Some("Corolla".to_string()),
            ..VehicleDraft::default()
        });

        assert_eq!(draft.engine_type, Some(EngineType::Petrol));
        assert_eq!(draft.model.as_deref(), Some("Corolla"));
    }
}
