pub mod progress;
pub mod repositories;

pub use progress::FileProgressStore;
pub use repositories::{InMemoryQuoteRepository, QuoteRepository, RepositoryError, StoredQuote};
