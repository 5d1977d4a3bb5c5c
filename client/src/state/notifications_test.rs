use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push(Notification::error("one"));
    let b = state.push(Notification::error("two"));
    assert!(b > a);
    assert_eq!(state.toasts.len(), 2);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(Notification::error("one"));
    state.push(Notification::error("two"));
    state.dismiss(a);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].notification.description, "two");
}

#[test]
fn oldest_toasts_are_dropped_past_limit() {
    let mut state = ToastState::default();
    for i in 0..5 {
        state.push(Notification::error(format!("n{i}")));
    }
    let texts: Vec<_> = state.toasts.iter().map(|t| t.notification.description.as_str()).collect();
    assert_eq!(texts, vec!["n2", "n3", "n4"]);
}

#[test]
fn notifier_records_through_signal() {
    Owner::new().with(|| {
        let notifier = SignalNotifier::new();
        notifier.notify(Notification::error("Forbidden"));
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].notification.title, "Error");
        notifier.dismiss(toasts[0].id);
        assert!(notifier.toasts().is_empty());
    });
}
