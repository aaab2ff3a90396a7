use crate::console::Console;
use patternfly_yew::prelude::*;
use vulntracker_ui_backend::use_backend;
use vulntracker_ui_common::error::components::Error;
use vulntracker_ui_components::backend::Backend;
use vulntracker_ui_navigation::AppRoute;
use yew::prelude::*;
use yew_nested_router::prelude::*;
use yew_oauth2::{openid::*, prelude::*};

const DEFAULT_BACKEND_URL: &str = "/endpoints/backend.json";

#[function_component(Application)]
pub fn app() -> Html {
    html!(
        <ToastViewer>
            <Backend
                bootstrap_url={DEFAULT_BACKEND_URL}
            >
                <ApplicationWithBackend />
            </Backend>
        </ToastViewer>
    )
}

#[function_component(ApplicationWithBackend)]
fn application_with_backend() -> Html {
    let backend = use_backend();

    /*
    The after logout URL must be a public page. Otherwise, the SSO server redirects
    back to the current page, which is detected as a new session, and would trigger
    a new login right away.
    */
    let config = Config::new(&backend.endpoints.oidc.client_id, &backend.endpoints.oidc.issuer)
        .with_after_logout_url(&backend.endpoints.oidc.after_logout);

    html!(
        // as the backdrop viewer might host content which makes use of the router, the
        // router must also wrap the backdrop viewer
        <Router<AppRoute>>
            // as the backdrop viewer might actually make use of the access token, the
            // oauth2 context must also wrap the backdrop viewer
            <OAuth2
                {config}
                scopes={backend.endpoints.oidc.scopes()}
            >
                <BackdropViewer>
                    <ToastViewer>
                        <OAuth2Configured>
                            <Console />
                        </OAuth2Configured>
                    </ToastViewer>
                </BackdropViewer>
            </OAuth2>
        </Router<AppRoute>>
    )
}

#[function_component(OAuth2Configured)]
pub fn oauth_configured(props: &ChildrenProperties) -> Html {
    let auth = use_context::<OAuth2Context>();

    match auth {
        None => html!(<Error err="Missing OAuth2 context"/>),
        Some(OAuth2Context::Failed(err)) => {
            html!(<Error err={err.to_string()}/>)
        }
        Some(_) => html!({ props.children.clone() }),
    }
}
