use super::*;

#[test]
fn welcome_uses_display_name() {
    let user = User {
        id: "123".to_owned(),
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        email: "test@test.com".to_owned(),
        role: "admin".to_owned(),
    };
    assert_eq!(welcome_message(Some(&user)), "Welcome back, Test User.");
}

#[test]
fn welcome_without_user_is_generic() {
    assert_eq!(welcome_message(None), "Welcome back.");
}
