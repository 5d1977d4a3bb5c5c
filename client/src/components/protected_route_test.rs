use super::*;

#[test]
fn requested_path_without_query() {
    assert_eq!(requested_path("/dashboard", ""), "/dashboard");
}

#[test]
fn requested_path_normalizes_leading_question_mark() {
    assert_eq!(requested_path("/reports", "page=2"), "/reports?page=2");
    assert_eq!(requested_path("/reports", "?page=2"), "/reports?page=2");
}

#[test]
fn requested_path_feeds_sign_in_redirect() {
    let decision = evaluate(&RouteAccess::protected(), &session::Session::empty(), &requested_path("/dashboard", ""));
    assert_eq!(
        decision,
        GuardDecision::Redirect(session::NavigationRequest::replace("/sign-in?from=%2Fdashboard"))
    );
}
