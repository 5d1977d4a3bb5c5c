use super::*;

#[test]
fn password_field_type_follows_visibility() {
    assert_eq!(password_input_type(false), "password");
    assert_eq!(password_input_type(true), "text");
}

#[test]
fn form_errors_surface_both_messages() {
    let errors = validate_sign_in("not-an-email", "123").unwrap_err();
    assert_eq!(errors.email, Some("Enter your email."));
    assert_eq!(errors.password, Some("Enter your password."));
}
