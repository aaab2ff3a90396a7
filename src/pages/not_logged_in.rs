use patternfly_yew::prelude::*;
use vulntracker_ui_navigation::AppRoute;
use yew::prelude::*;
use yew_nested_router::prelude::use_router;
use yew_oauth2::{openid::*, prelude::*};

/// Landing page after logout, and the place to start a new session. Account
/// registration is handled by the identity provider, the login flow offers it.
#[function_component(NotLoggedIn)]
pub fn not_logged_in() -> Html {
    let router = use_router::<AppRoute>();
    let agent = use_auth_agent().expect("Requires OAuth2Context component in parent hierarchy");

    let onlogin = Callback::from(move |_| {
        if let Err(err) = agent.start_login() {
            log::warn!("Failed to start login: {err}");
        }
    });

    let onhome = Callback::from(move |_| {
        if let Some(router) = &router {
            router.push(AppRoute::Index);
        }
    });

    html!(
        <Bullseye>
            <EmptyState
                title="You are not logged in"
                size={Size::XXXLarge}
                primary={Action::new("Sign in", onlogin)}
                secondaries={vec![Action::new("Continue browsing", onhome)]}
            >
                { "Browsing is public. Sign in to create, link, or delete records." }
            </EmptyState>
        </Bullseye>
    )
}
