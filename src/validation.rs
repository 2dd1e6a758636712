/// Contact-field validation and sanitization
///
/// Leads arrive from scrapers and enrichment vendors, so emails and phone
/// numbers are checked before the completeness/quality scorers ever see
/// them. A field that fails validation is treated as absent rather than
/// rejecting the lead.
use crate::models::Contact;
use phonenumber::country::Id as CountryId;
use phonenumber::Mode;
use regex::Regex;

/// Validate an email address.
///
/// Checks for:
/// - Basic email format (contains @ and .)
/// - Fake/placeholder patterns (repeated digits like 9999, 1111)
/// - Minimum length requirements
/// - Valid domain structure
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }

    // Placeholder addresses scrapers invent when no real email is found.
    let fake_patterns = ["999999", "111111", "000000", "123456789"];

    for pattern in &fake_patterns {
        if email.contains(pattern) {
            tracing::warn!("Rejecting email (fake pattern '{}'): {}", pattern, email);
            return false;
        }
    }

    // RFC 5322 simplified email regex: local@domain.tld
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    if !email_regex.is_match(email) {
        tracing::warn!("Rejecting email (invalid format): {}", email);
        return false;
    }

    true
}

/// Validate and normalize a UAE phone number.
///
/// Uses the phonenumber library (port of Google's libphonenumber) to parse
/// with the AE region, validate, and normalize to E.164 (+9715xxxxxxxx).
///
/// Returns: (is_valid, normalized_phone_or_error_msg)
pub fn validate_uae_phone(raw: &str) -> (bool, String) {
    if raw.trim().is_empty() || raw.len() < 7 {
        return (false, "Phone too short".to_string());
    }

    match phonenumber::parse(Some(CountryId::AE), raw) {
        Ok(number) => {
            if phonenumber::is_valid(&number) {
                let formatted = number.format().mode(Mode::E164).to_string();
                tracing::debug!("Valid AE phone: {} -> {}", raw, formatted);
                (true, formatted)
            } else {
                tracing::warn!("Invalid AE phone number: {}", raw);
                (false, "Invalid UAE phone number".to_string())
            }
        }
        Err(e) => {
            tracing::warn!("Failed to parse AE phone '{}': {:?}", raw, e);
            (false, format!("Parse error: {:?}", e))
        }
    }
}

/// Sanitizes a contact before scoring.
///
/// An invalid or placeholder email is dropped along with its verification
/// status; an invalid phone is dropped; a valid phone is normalized to
/// E.164. Everything else passes through untouched, so completeness points
/// are only ever awarded for data we would actually dial or mail.
pub fn sanitize_contact(contact: &Contact) -> Contact {
    let mut clean = contact.clone();

    if let Some(email) = clean.email.as_deref() {
        if !is_valid_email(email) {
            clean.email = None;
            clean.email_status = None;
        }
    }

    if let Some(phone) = clean.phone.as_deref() {
        let (valid, normalized) = validate_uae_phone(phone);
        clean.phone = if valid { Some(normalized) } else { None };
    }

    clean
}
