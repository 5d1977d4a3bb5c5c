use super::*;

#[test]
fn destructive_toasts_get_modifier_class() {
    assert_eq!(toast_class(NotificationVariant::Destructive), "toast toast--destructive");
    assert_eq!(toast_class(NotificationVariant::Default), "toast");
}
