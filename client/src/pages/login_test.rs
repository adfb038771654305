use super::*;

#[test]
fn validate_login_input_trims_email_but_not_password() {
    assert_eq!(
        validate_login_input("  a@b.com  ", " pw "),
        Ok(("a@b.com".to_owned(), " pw ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("", "pw"), Err("Enter both email and password."));
    assert_eq!(validate_login_input("a@b.com", ""), Err("Enter both email and password."));
    assert_eq!(validate_login_input("   ", "pw"), Err("Enter both email and password."));
}

#[test]
fn validate_login_input_rejects_address_without_at() {
    assert_eq!(validate_login_input("alice", "pw"), Err("Enter a valid email address."));
}
