//! Toast stack for transport error notifications.

#[cfg(test)]
#[path = "toaster_test.rs"]
mod toaster_test;

use leptos::prelude::*;
use session::notify::NotificationVariant;

use crate::state::notifications::{Toast, use_notifier};

fn toast_class(variant: NotificationVariant) -> &'static str {
    match variant {
        NotificationVariant::Default => "toast",
        NotificationVariant::Destructive => "toast toast--destructive",
    }
}

#[component]
pub fn Toaster() -> impl IntoView {
    let notifier = use_notifier();

    let render_toast = move |toast: Toast| {
        let Toast { id, notification } = toast;
        let description = (!notification.description.is_empty())
            .then(|| view! { <p class="toast__description">{notification.description}</p> });
        view! {
            <li class=toast_class(notification.variant)>
                <div class="toast__body">
                    <p class="toast__title">{notification.title}</p>
                    {description}
                </div>
                <button class="toast__close" type="button" aria-label="Dismiss" on:click=move |_| notifier.dismiss(id)>
                    "×"
                </button>
            </li>
        }
    };

    view! {
        <ol class="toaster" role="status" aria-live="polite">
            <For each=move || notifier.toasts() key=|toast| toast.id children=render_toast/>
        </ol>
    }
}
