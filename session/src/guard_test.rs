use super::*;
use crate::test_support::{sample_tokens, sample_user};
use crate::types::User;

fn session_with_role(role: &str) -> Session {
    Session::logged_in(User { role: role.to_owned(), ..sample_user() }, sample_tokens())
}

// =============================================================
// role_permitted
// =============================================================

#[test]
fn no_restriction_admits_any_role() {
    assert!(role_permitted(None, "viewer"));
    assert!(role_permitted(None, ""));
}

#[test]
fn restriction_requires_membership() {
    let roles = vec!["admin".to_owned(), "vet".to_owned()];
    assert!(role_permitted(Some(roles.as_slice()), "vet"));
    assert!(!role_permitted(Some(roles.as_slice()), "viewer"));
}

#[test]
fn empty_restriction_admits_nobody() {
    assert!(!role_permitted(Some(&[][..]), "admin"));
}

// =============================================================
// evaluate
// =============================================================

#[test]
fn public_routes_always_render() {
    assert_eq!(evaluate(&RouteAccess::Public, &Session::empty(), "/sign-in"), GuardDecision::Render);
}

#[test]
fn unauthenticated_goes_to_sign_in_remembering_destination() {
    let decision = evaluate(&RouteAccess::protected(), &Session::empty(), "/dashboard");
    assert_eq!(decision, GuardDecision::Redirect(NavigationRequest::replace("/sign-in?from=%2Fdashboard")));
}

#[test]
fn unauthenticated_role_route_still_goes_to_sign_in() {
    let decision = evaluate(&RouteAccess::for_roles(["admin"]), &Session::empty(), "/admin");
    let GuardDecision::Redirect(request) = decision else {
        panic!("expected redirect");
    };
    assert!(request.path.starts_with(paths::SIGN_IN));
}

#[test]
fn wrong_role_goes_to_dashboard_not_sign_in() {
    let decision = evaluate(&RouteAccess::for_roles(["admin"]), &session_with_role("viewer"), "/admin");
    assert_eq!(decision, GuardDecision::Redirect(NavigationRequest::replace(paths::DASHBOARD)));
}

#[test]
fn allowed_role_renders() {
    let decision = evaluate(&RouteAccess::for_roles(["admin", "vet"]), &session_with_role("vet"), "/admin");
    assert_eq!(decision, GuardDecision::Render);
}

#[test]
fn protected_without_roles_renders_for_any_user() {
    assert_eq!(evaluate(&RouteAccess::protected(), &session_with_role("viewer"), "/dashboard"), GuardDecision::Render);
}
