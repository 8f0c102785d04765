use super::*;
use std::time::Duration;

#[test]
fn validate_login_input_trims_email() {
    let credentials = validate_login_input("  ana@example.com ", "pw").unwrap();
    assert_eq!(credentials.email, "ana@example.com");
    assert_eq!(credentials.password, "pw");
}

#[test]
fn validate_login_input_keeps_password_verbatim() {
    let credentials = validate_login_input("ana@example.com", " spaced ").unwrap();
    assert_eq!(credentials.password, " spaced ");
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("", "pw").unwrap_err(), "Enter your email and password.");
    assert_eq!(validate_login_input("ana@example.com", "").unwrap_err(), "Enter your email and password.");
}

#[test]
fn validate_login_input_rejects_non_email() {
    assert_eq!(validate_login_input("ana", "pw").unwrap_err(), "Enter a valid email address.");
}

#[test]
fn login_error_message_distinguishes_failures() {
    let rejected = login_error_message(&SessionError::AuthenticationFailed);
    let offline = login_error_message(&SessionError::NetworkFailure("refused".to_owned()));
    let slow = login_error_message(&SessionError::Timeout(Duration::from_secs(8)));
    assert_eq!(rejected, "Invalid email or password.");
    assert_ne!(rejected, offline);
    assert_ne!(offline, slow);
}

#[test]
fn login_error_message_does_not_leak_transport_detail() {
    let message = login_error_message(&SessionError::NetworkFailure("tls handshake eof".to_owned()));
    assert!(!message.contains("tls"));
}
