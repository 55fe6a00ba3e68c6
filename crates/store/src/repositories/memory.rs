use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use motoquote_core::domain::{Quote, QuoteId};

use super::{QuoteRepository, RepositoryError, StoredQuote};

#[derive(Default)]
pub struct InMemoryQuoteRepository {
    records: RwLock<Vec<StoredQuote>>,
}

/// Millisecond timestamp plus a short random suffix, unique even for
/// quotes saved within the same millisecond.
fn next_record_id(at: DateTime<Utc>) -> QuoteId {
    let suffix = Uuid::new_v4().simple().to_string();
    QuoteId(format!("{}{}", at.timestamp_millis(), &suffix[..9]))
}

#[async_trait::async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<StoredQuote>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<StoredQuote>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn save(&self, quote: Quote) -> Result<StoredQuote, RepositoryError> {
        let saved_at = Utc::now();
        let record = StoredQuote { id: next_record_id(saved_at), quote, saved_at };

        let mut records = self.records.write().await;
        records.push(record.clone());

        Ok(record)
    }
}
