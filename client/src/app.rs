//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Redirect, Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::components::toaster::Toaster;
use crate::config::{app_config, describe_config_error};
use crate::layouts::{app::AppLayout, auth::AuthLayout};
use crate::net::api::provide_transports;
use crate::pages::{dashboard::DashboardPage, sign_in::SignInPage};
use crate::state::auth::provide_auth_store;
use crate::state::notifications::provide_notifier;
use crate::util::navigation::{NavigationDriver, provide_navigator};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session, navigation, notification and transport contexts and
/// sets up client-side routing. A bundle built without a valid configuration
/// renders the reason instead.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = match app_config() {
        Ok(config) => config,
        Err(e) => {
            leptos::logging::error!("invalid configuration: {e}");
            let reason = describe_config_error(&e);
            return view! {
                <Title text="Configuration error"/>
                <main class="config-error">
                    <h1>"Configuration error"</h1>
                    <p>{reason}</p>
                </main>
            }
            .into_any();
        }
    };

    provide_auth_store();
    provide_navigator();
    provide_notifier();
    provide_transports(&config);

    view! {
        <Stylesheet id="leptos" href="/pkg/admin-console.css"/>
        <Title formatter=|text: String| format!("{text} | Admin Console")/>

        <Router>
            <NavigationDriver/>
            <Routes fallback=|| "Page not found.".into_view()>
                <ParentRoute path=StaticSegment("") view=AppLayout>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path="/dashboard"/> }/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                    />
                </ParentRoute>
                <ParentRoute path=StaticSegment("") view=AuthLayout>
                    <Route path=StaticSegment("sign-in") view=SignInPage/>
                </ParentRoute>
            </Routes>
        </Router>
        <Toaster/>
    }
    .into_any()
}
