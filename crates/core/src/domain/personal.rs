use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub nrc_passport: String,
    pub phone_number: String,
    pub email: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDraft {
    pub full_name: Option<String>,
    pub nrc_passport: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

impl PersonalDraft {
    pub fn merge(&mut self, update: PersonalDraft) {
        if let Some(full_name) = update.full_name {
            self.full_name = Some(full_name);
        }
        if let Some(nrc_passport) = update.nrc_passport {
            self.nrc_passport = Some(nrc_passport);
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = Some(phone_number);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
    }
}

impl From<PersonalInfo> for PersonalDraft {
    fn from(info: PersonalInfo) -> Self {
        Self {
            full_name: Some(info.full_name),
            nrc_passport: Some(info.nrc_passport),
            phone_number: Some(info.phone_number),
            email: Some(info.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PersonalDraft;

    #[test]
    fn merge_leaves_unspecified_fields_untouched() {
        let mut draft = PersonalDraft {
            full_name: Some("John Banda".to_string()),
            email: Some("john@example.com".to_string()),
            ..PersonalDraft::default()
        };

        draft.merge(PersonalDraft {
            phone_number: Some("0977123456".to_string()),
            ..PersonalDraft::default()
        });

        assert_eq!(draft.full_name.as_deref(), Some("John Banda"));
        assert_eq!(draft.email.as_deref(), Some("john@example.com"));
        assert_eq!(draft.phone_number.as_deref(), Some("0977123456"));
        assert_eq!(draft.nrc_passport, None);
    }

    #[test]
    fn merge_replaces_fields_supplied_in_update() {
        let mut draft = PersonalDraft {
            full_name: Some("John Banda".to_string()),
            ..PersonalDraft::default()
        };

        draft.merge(PersonalDraft {
            full_name: Some("Jane Mwale".to_string()),
            ..PersonalDraft::default()
        });

        assert_eq!(draft.full_name.as_deref(), Some("Jane Mwale"));
    }
}
