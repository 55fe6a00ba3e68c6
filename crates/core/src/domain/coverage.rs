use serde::{Deserialize, Serialize};

use crate::domain::UnknownTokenError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageType {
    ThirdParty,
    Comprehensive,
}

impl CoverageType {
    pub fn label(self) -> &'static str {
        match self {
            Self::ThirdParty => "Third Party",
            Self::Comprehensive => "Comprehensive",
        }
    }
}

impl std::str::FromStr for CoverageType {
    type Err = UnknownTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "third-party" => Ok(Self::ThirdParty),
            "comprehensive" => Ok(Self::Comprehensive),
            other => Err(UnknownTokenError {
                field: "coverage type",
                value: other.to_string(),
                expected: "third-party|comprehensive",
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationMonths {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "12")]
    Twelve,
}

impl DurationMonths {
    pub fn months(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Three => 3,
            Self::Six => 6,
            Self::Twelve => 12,
        }
    }
}

impl std::str::FromStr for DurationMonths {
    type Err = UnknownTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1" => Ok(Self::One),
            "3" => Ok(Self::Three),
            "6" => Ok(Self::Six),
            "12" => Ok(Self::Twelve),
            other => Err(UnknownTokenError {
                field: "duration",
                value: other.to_string(),
                expected: "1|3|6|12",
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOns {
    pub roadside_assistance: bool,
    pub theft_cover: bool,
    pub windscreen_cover: bool,
}

impl AddOns {
    pub fn selected_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.roadside_assistance {
            labels.push("Roadside Assistance");
        }
        if self.theft_cover {
            labels.push("Theft Cover");
        }
        if self.windscreen_cover {
            labels.push("Windscreen Cover");
        }
        labels
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageInfo {
    pub coverage_type: CoverageType,
    pub duration: DurationMonths,
    pub add_ons: AddOns,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageDraft {
    pub coverage_type: Option<CoverageType>,
    pub duration: Option<DurationMonths>,
    pub add_ons: Option<AddOns>,
}

impl CoverageDraft {
    pub fn merge(&mut self, update: CoverageDraft) {
        if let Some(coverage_type) = update.coverage_type {
            self.coverage_type = Some(coverage_type);
        }
        if let Some(duration) = update.duration {
            self.duration = Some(duration);
        }
        if let Some(add_ons) = update.add_ons {
            self.add_ons = Some(add_ons);
        }
    }
}

impl From<CoverageInfo> for CoverageDraft {
    fn from(info: CoverageInfo) -> Self {
        Self {
            coverage_type: Some(info.coverage_type),
            duration: Some(info.duration),
            add_ons: Some(info.add_ons),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AddOns, CoverageDraft, CoverageType, DurationMonths};

    #[test]
    fn coverage_type_parses_kebab_tokens() {
        assert_eq!("third-party".parse::<CoverageType>(), Ok(CoverageType::ThirdParty));
        assert_eq!("Comprehensive".parse::<CoverageType>(), Ok(CoverageType::Comprehensive));
        assert!("full".parse::<CoverageType>().is_err());
    }

    #[test]
    fn duration_tokens_map_to_month_counts() {
        for (token, months) in [("1", 1), ("3", 3), ("6", 6), ("12", 12)] {
            let duration = token.parse::<DurationMonths>().expect("valid duration token");
            assert_eq!(duration.months(), months);
        }
        assert!("2".parse::<DurationMonths>().is_err());
    }

    #[test]
    fn add_ons_default_to_disabled() {
        let add_ons = AddOns::default();
        assert!(!add_ons.roadside_assistance);
        assert!(!add_ons.theft_cover);
        assert!(!add_ons.windscreen_cover);
        assert!(add_ons.selected_labels().is_empty());
    }

    #[test]
    fn selected_labels_follow_fixed_order() {
        let add_ons =
            AddOns { roadside_assistance: true, theft_cover: false, windscreen_cover: true };
        assert_eq!(add_ons.selected_labels(), vec!["Roadside Assistance", "Windscreen Cover"]);
    }

    #[test]
    fn merge_replaces_add_ons_as_a_block() {
        let mut draft = CoverageDraft {
            coverage_type: Some(CoverageType::Comprehensive),
            add_ons: Some(AddOns { roadside_assistance: true, ..AddOns::default() }),
            ..CoverageDraft::default()
        };

        draft.merge(CoverageDraft {
            duration: Some(DurationMonths::Six),
            add_ons: Some(AddOns { theft_cover: true, ..AddOns::default() }),
            ..CoverageDraft::default()
        });

        assert_eq!(draft.coverage_type, Some(CoverageType::Comprehensive));
        assert_eq!(draft.duration, Some(DurationMonths::Six));
        let add_ons = draft.add_ons.expect("add-ons present");
        assert!(add_ons.theft_cover);
        assert!(!add_ons.roadside_assistance);
    }
}
