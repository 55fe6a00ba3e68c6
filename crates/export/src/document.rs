//! Quote document generation.
//!
//! Quotes are rendered from an embedded HTML template and converted to PDF
//! via wkhtmltopdf when it is installed, falling back to the HTML itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tera::{Context, Tera};
use tokio::process::Command;
use tracing::{error, info, warn};
use uuid::Uuid;

use motoquote_core::config::BrandingConfig;
use motoquote_core::domain::Quote;
use motoquote_core::pricing::PricingBreakdown;

const QUOTE_TEMPLATE: &str = "quote.html.tera";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("template error: {0}")]
    Template(String),
    #[error("conversion error: {0}")]
    Conversion(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders quote documents from the embedded template.
#[derive(Clone, Debug)]
pub struct DocumentRenderer {
    tera: Tera,
    wkhtmltopdf_path: Option<PathBuf>,
}

/// A rendered quote document ready to be written to disk.
pub struct QuoteDocument {
    pub file_name: String,
    pub quote_number: String,
    pub artifact: DocumentArtifact,
}

pub enum DocumentArtifact {
    Pdf(Vec<u8>),
    Html(String),
}

impl DocumentRenderer {
    /// Create a renderer, discovering wkhtmltopdf on the PATH.
    pub fn new() -> Result<Self, ExportError> {
        Self::with_wkhtmltopdf(discover_wkhtmltopdf())
    }

    /// Create a renderer with an explicit wkhtmltopdf binary, or none to
    /// always produce HTML.
    pub fn with_wkhtmltopdf(wkhtmltopdf_path: Option<PathBuf>) -> Result<Self, ExportError> {
        let mut tera = Tera::default();
        tera.register_filter("money", tera_money_filter);
        tera.add_raw_template(
            QUOTE_TEMPLATE,
            include_str!("../../../templates/quote.html.tera"),
        )
        .map_err(|error| ExportError::Template(error.to_string()))?;

        Ok(Self { tera, wkhtmltopdf_path })
    }

    /// Render the quote document issued at the given instant.
    ///
    /// The timestamp drives the quote number, the printed issue date and the
    /// date embedded in the suggested file name.
    pub async fn generate_quote_document(
        &self,
        quote: &Quote,
        branding: &BrandingConfig,
        issued_at: DateTime<Utc>,
    ) -> Result<QuoteDocument, ExportError> {
        let context = build_context(quote, branding, issued_at);
        let html = self
            .tera
            .render(QUOTE_TEMPLATE, &context)
            .map_err(|error| ExportError::Template(error.to_string()))?;

        let artifact = if let Some(ref wkhtmltopdf) = self.wkhtmltopdf_path {
            match self.convert_html_to_pdf(&html, wkhtmltopdf).await {
                Ok(pdf_bytes) => DocumentArtifact::Pdf(pdf_bytes),
                Err(error) => {
                    warn!(%error, "PDF conversion failed, falling back to HTML");
                    DocumentArtifact::Html(html)
                }
            }
        } else {
            DocumentArtifact::Html(html)
        };

        Ok(QuoteDocument {
            file_name: document_file_name(
                &quote.personal_info.full_name,
                issued_at,
                artifact.extension(),
            ),
            quote_number: quote_number(issued_at),
            artifact,
        })
    }

    async fn convert_html_to_pdf(
        &self,
        html: &str,
        wkhtmltopdf_path: &Path,
    ) -> Result<Vec<u8>, ExportError> {
        let temp_dir = std::env::temp_dir();
        let html_path = temp_dir.join(format!("motoquote_{}.html", Uuid::new_v4()));
        let pdf_path = temp_dir.join(format!("motoquote_{}.pdf", Uuid::new_v4()));

        tokio::fs::write(&html_path, html).await?;

        let output = Command::new(wkhtmltopdf_path)
            .arg("--page-size")
            .arg("A4")
            .arg("--margin-top")
            .arg("10mm")
            .arg("--margin-bottom")
            .arg("10mm")
            .arg("--margin-left")
            .arg("10mm")
            .arg("--margin-right")
            .arg("10mm")
            .arg("--encoding")
            .arg("utf-8")
            .arg("--enable-local-file-access")
            .arg(&html_path)
            .arg(&pdf_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(stderr = %stderr, "wkhtmltopdf failed");
            return Err(ExportError::Conversion(stderr.to_string()));
        }

        let pdf_bytes = tokio::fs::read(&pdf_path).await?;

        let _ = tokio::fs::remove_file(&html_path).await;
        let _ = tokio::fs::remove_file(&pdf_path).await;

        info!(size = pdf_bytes.len(), "PDF generated");

        Ok(pdf_bytes)
    }
}

impl QuoteDocument {
    /// Write the artifact under `dir` using the suggested file name.
    pub async fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, self.artifact.bytes()).await?;
        Ok(path)
    }
}

impl DocumentArtifact {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf(_) => "pdf",
            Self::Html(_) => "html",
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Pdf(bytes) => bytes,
            Self::Html(html) => html.as_bytes(),
        }
    }
}

/// Quote reference derived from the last six digits of the issue timestamp.
pub fn quote_number(issued_at: DateTime<Utc>) -> String {
    let millis = issued_at.timestamp_millis().to_string();
    let tail_start = millis.len().saturating_sub(6);
    format!("MQ-{}", &millis[tail_start..])
}

/// Suggested file name: `MotoQuote_<customer>_<dd-mm-yyyy>.<ext>`, with
/// whitespace runs in the customer name collapsed to underscores.
pub fn document_file_name(full_name: &str, issued_at: DateTime<Utc>, extension: &str) -> String {
    let sanitized = full_name.split_whitespace().collect::<Vec<_>>().join("_");
    let customer = if sanitized.is_empty() { "Quote".to_string() } else { sanitized };
    format!("MotoQuote_{}_{}.{}", customer, issued_at.format("%d-%m-%Y"), extension)
}

fn build_context(quote: &Quote, branding: &BrandingConfig, issued_at: DateTime<Utc>) -> Context {
    let mut context = Context::new();
    context.insert("company_name", &branding.company_name);
    context.insert("tagline", &branding.tagline);
    context.insert("contact_phone", &branding.contact_phone);
    context.insert("contact_email", &branding.contact_email);
    context.insert("currency", &branding.currency_prefix);
    context.insert("validity_days", &branding.quote_validity_days);
    context.insert("quote_number", &quote_number(issued_at));
    context.insert("issue_date", &issued_at.format("%d/%m/%Y").to_string());

    context.insert("personal", &quote.personal_info);
    context.insert(
        "vehicle",
        &serde_json::json!({
            "make": quote.vehicle_info.make,
            "model": quote.vehicle_info.model,
            "year": quote.vehicle_info.year,
            "registration_number": quote.vehicle_info.registration_number,
            "engine_type": quote.vehicle_info.engine_type.label(),
        }),
    );
    context.insert(
        "coverage",
        &serde_json::json!({
            "coverage_type": quote.coverage_info.coverage_type.label(),
            "duration_months": quote.coverage_info.duration.months(),
            "add_ons": quote.coverage_info.add_ons.selected_labels(),
        }),
    );
    context.insert("pricing", &pricing_context(&quote.pricing));

    context
}

// Tera number comparisons need plain floats, so amounts go into the
// template context as f64 rather than serialized decimals.
fn pricing_context(pricing: &PricingBreakdown) -> serde_json::Value {
    serde_json::json!({
        "base_premium": display_number(pricing.base_premium),
        "age_factor": display_number(pricing.age_factor),
        "roadside_assistance": display_number(pricing.roadside_assistance),
        "theft_cover": display_number(pricing.theft_cover),
        "windscreen_cover": display_number(pricing.windscreen_cover),
        "monthly_total": display_number(pricing.monthly_total),
        "total_amount": display_number(pricing.total_amount),
    })
}

fn display_number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Simple money filter: formats a number to 2 decimal places.
/// Usage: `amount | money`
fn tera_money_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let num = match value {
        tera::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        tera::Value::Null => 0.0,
        _ => 0.0,
    };
    Ok(tera::Value::String(format!("{:.2}", num)))
}

fn discover_wkhtmltopdf() -> Option<PathBuf> {
    match which::which("wkhtmltopdf") {
        Ok(path) => {
            info!(path = %path.display(), "wkhtmltopdf found");
            Some(path)
        }
        Err(_) => {
            warn!("wkhtmltopdf not found in PATH, quotes will be exported as HTML");
            None
        }
    }
}
