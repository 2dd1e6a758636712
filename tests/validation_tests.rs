/// Unit tests for contact validation and sanitization
/// Tests email validation, UAE phone validation, and the pre-scoring
/// sanitization pass.
use rust_leadscore_api::models::{Contact, EmailStatus};
use rust_leadscore_api::validation::{is_valid_email, sanitize_contact, validate_uae_phone};

#[cfg(test)]
mod email_validation_tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("hr.team@acme.ae"));
        assert!(is_valid_email("user+tag@example.co.uk"));
        assert!(is_valid_email("user_name@example-domain.com"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn test_invalid_emails_basic() {
        // Missing @ or .
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@examplecom"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));

        // Too short
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_invalid_emails_fake_patterns() {
        // Repeated digits (common scraper placeholders)
        assert!(!is_valid_email("user999999@example.com"));
        assert!(!is_valid_email("1111111111@gmail.com"));
        assert!(!is_valid_email("000000@example.com"));
        assert!(!is_valid_email("test123456789@example.com"));
    }

    #[test]
    fn test_invalid_emails_malformed() {
        assert!(!is_valid_email("user @example.com")); // space
        assert!(!is_valid_email("user@exam ple.com")); // space in domain
    }
}

#[cfg(test)]
mod phone_validation_tests {
    use super::*;

    #[test]
    fn test_valid_uae_mobiles() {
        let (valid, normalized) = validate_uae_phone("0501234567");
        assert!(valid);
        assert_eq!(normalized, "+971501234567");

        // With formatting
        let (valid, normalized) = validate_uae_phone("050 123 4567");
        assert!(valid);
        assert_eq!(normalized, "+971501234567");

        // With country code
        let (valid, normalized) = validate_uae_phone("+971 50 123 4567");
        assert!(valid);
        assert_eq!(normalized, "+971501234567");

        let (valid, normalized) = validate_uae_phone("+971501234567");
        assert!(valid);
        assert_eq!(normalized, "+971501234567");
    }

    #[test]
    fn test_valid_uae_landlines() {
        // Dubai landline
        let (valid, normalized) = validate_uae_phone("043316666");
        assert!(valid);
        assert_eq!(normalized, "+97143316666");

        let (valid, normalized) = validate_uae_phone("04 331 6666");
        assert!(valid);
        assert_eq!(normalized, "+97143316666");
    }

    #[test]
    fn test_invalid_phones() {
        // Too short
        let (valid, _) = validate_uae_phone("1234");
        assert!(!valid);

        let (valid, _) = validate_uae_phone("050123");
        assert!(!valid);

        // Empty
        let (valid, _) = validate_uae_phone("");
        assert!(!valid);

        // Only spaces
        let (valid, _) = validate_uae_phone("   ");
        assert!(!valid);
    }

    #[test]
    fn test_phone_normalization() {
        // All of these should normalize to the same E.164 number.
        let formats = vec![
            "0501234567",
            "050 123 4567",
            "050-123-4567",
            "+971 50 123 4567",
            "+971501234567",
        ];

        for format in formats {
            let (valid, normalized) = validate_uae_phone(format);
            if valid {
                assert_eq!(
                    normalized, "+971501234567",
                    "Failed for format: {}",
                    format
                );
            }
        }
    }
}

#[cfg(test)]
mod sanitization_tests {
    use super::*;

    #[test]
    fn test_invalid_email_dropped_with_status() {
        let contact = Contact {
            email: Some("user999999@example.com".to_string()),
            email_status: Some(EmailStatus::Verified),
            ..Contact::default()
        };

        let clean = sanitize_contact(&contact);
        assert_eq!(clean.email, None);
        assert_eq!(clean.email_status, None);
    }

    #[test]
    fn test_valid_email_kept() {
        let contact = Contact {
            email: Some("sara@acme.ae".to_string()),
            email_status: Some(EmailStatus::Verified),
            ..Contact::default()
        };

        let clean = sanitize_contact(&contact);
        assert_eq!(clean.email.as_deref(), Some("sara@acme.ae"));
        assert_eq!(clean.email_status, Some(EmailStatus::Verified));
    }

    #[test]
    fn test_phone_normalized_or_dropped() {
        let valid = Contact {
            phone: Some("050 123 4567".to_string()),
            ..Contact::default()
        };
        assert_eq!(
            sanitize_contact(&valid).phone.as_deref(),
            Some("+971501234567")
        );

        let junk = Contact {
            phone: Some("1234".to_string()),
            ..Contact::default()
        };
        assert_eq!(sanitize_contact(&junk).phone, None);
    }

    #[test]
    fn test_untouched_fields_pass_through() {
        let contact = Contact {
            name: Some("Sara K".to_string()),
            title: Some("HR Manager".to_string()),
            role_bucket: Some("hr".to_string()),
            linkedin_url: Some("https://linkedin.com/in/sarak".to_string()),
            ..Contact::default()
        };

        let clean = sanitize_contact(&contact);
        assert_eq!(clean, contact);
    }
}
