use motoquote_core::config::BrandingConfig;
use motoquote_core::domain::Quote;

/// A quote summary email addressed to the customer, ready to hand to a
/// mail client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    /// `mailto:` URL with the subject and body percent-encoded.
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.to,
            percent_encode(&self.subject),
            percent_encode(&self.body),
        )
    }
}

pub fn compose_quote_email(quote: &Quote, branding: &BrandingConfig) -> EmailDraft {
    let subject = format!("Your {} Insurance Quote", branding.company_name);
    let body = format!(
        "Dear {name},\n\
         \n\
         Thank you for using {company} to get your motor insurance quote.\n\
         \n\
         Here are your quote details:\n\
         \n\
         Vehicle: {make} {model} ({year})\n\
         Registration: {registration}\n\
         Coverage: {coverage}\n\
         Duration: {duration} months\n\
         \n\
         Total Premium: {currency}{total:.2}\n\
         Monthly Premium: {currency}{monthly:.2}\n\
         \n\
         This quote is valid for {validity_days} days. To proceed with purchasing this \
         insurance policy, please contact us at:\n\
         Phone: {phone}\n\
         Email: {email}\n\
         \n\
         Best regards,\n\
         The {company} Team",
        name = quote.personal_info.full_name,
        company = branding.company_name,
        make = quote.vehicle_info.make,
        model = quote.vehicle_info.model,
        year = quote.vehicle_info.year,
        registration = quote.vehicle_info.registration_number,
        coverage = quote.coverage_info.coverage_type.label(),
        duration = quote.coverage_info.duration.months(),
        currency = branding.currency_prefix,
        total = quote.pricing.total_amount,
        monthly = quote.pricing.monthly_total,
        validity_days = branding.quote_validity_days,
        phone = branding.contact_phone,
        email = branding.contact_email,
    );

    EmailDraft { to: quote.personal_info.email.clone(), subject, body }
}

/// Percent-encode for `mailto:` query values. Keeps the characters that
/// `encodeURIComponent` leaves alone and encodes everything else byte-wise.
fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            other => {
                encoded.push('%');
                encoded.push_str(&format!("{other:02X}"));
            }
        }
    }
    encoded
}
