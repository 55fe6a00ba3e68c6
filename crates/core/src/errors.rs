use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("quote is incomplete: missing {missing_sections:?}")]
    IncompleteQuote { missing_sections: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::DomainError;

    #[test]
    fn incomplete_quote_names_missing_sections() {
        let error = DomainError::IncompleteQuote {
            missing_sections: vec!["coverage_info".to_string(), "pricing".to_string()],
        };

        let message = error.to_string();
        assert!(message.contains("coverage_info"));
        assert!(message.contains("pricing"));
    }
}
