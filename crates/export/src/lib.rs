pub mod document;
pub mod email;

pub use document::{
    document_file_name, quote_number, DocumentArtifact, DocumentRenderer, ExportError,
    QuoteDocument,
};
pub use email::{compose_quote_email, EmailDraft};
