use wellcheck_core::error::CoreError;
use wellcheck_core::models::respondent::{validate_email, RespondentForm};

#[test]
fn trims_name_and_email() {
    let respondent = RespondentForm::new("  Ana Pérez ", " ana@gmail.com\n")
        .validate()
        .unwrap();

    assert_eq!(respondent.name(), "Ana Pérez");
    assert_eq!(respondent.email(), "ana@gmail.com");
}

#[test]
fn blank_name_is_rejected() {
    let err = RespondentForm::new("   ", "ana@gmail.com").validate().unwrap_err();
    assert_eq!(err, CoreError::EmptyName);
}

#[test]
fn malformed_addresses_are_rejected() {
    for email in ["", "ana", "ana@", "ana@gmail", "a na@gmail.com", "ana@@gmail.com"] {
        assert!(
            matches!(validate_email(email), Err(CoreError::MalformedEmail(_))),
            "{email:?} should be malformed"
        );
    }
}

#[test]
fn known_providers_and_subdomains_are_accepted() {
    for email in [
        "ana@gmail.com",
        "ana@Outlook.com",
        "ana@alumnos.unam.mx",
        "ana@cs.ox.ac.uk",
        "ana@salud.gob.mx",
    ] {
        assert_eq!(validate_email(email), Ok(()), "{email:?} should be accepted");
    }
}

#[test]
fn institutional_suffixes_are_accepted() {
    for email in [
        "ana@clinic.org",
        "ana@research.net",
        "ana@empresa.com.mx",
        "ana@firm.co.uk",
        "ana@ministry.gov.br",
    ] {
        assert_eq!(validate_email(email), Ok(()), "{email:?} should be accepted");
    }
}

#[test]
fn unrecognised_domain_is_reported_lowercased() {
    assert_eq!(
        validate_email("ana@Example.XYZ"),
        Err(CoreError::UnrecognisedDomain("example.xyz".to_string()))
    );
}

#[test]
fn disposable_domains_are_rejected_even_when_suffix_matches() {
    assert_eq!(
        validate_email("ana@mailinator.com"),
        Err(CoreError::DisposableDomain("mailinator.com".to_string()))
    );
    assert_eq!(
        validate_email("ana@tempmail.org"),
        Err(CoreError::DisposableDomain("tempmail.org".to_string()))
    );
}

#[test]
fn accepted_respondent_serializes_both_fields() {
    let respondent = RespondentForm::new("Ana", "ana@gmail.com").validate().unwrap();
    let json = serde_json::to_value(&respondent).unwrap();
    assert_eq!(json["name"], "Ana");
    assert_eq!(json["email"], "ana@gmail.com");
}
