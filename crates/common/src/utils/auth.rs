use patternfly_yew::prelude::*;
use yew::prelude::*;
use yew_oauth2::prelude::*;

/// What the masthead toolbar needs to know about the current session.
pub struct FromAuth {
    pub avatar: Html,
    pub account_url: Option<String>,
    pub name: String,
    pub username: String,
}

/// The account management page of the identity provider, derived from the
/// issuer URL the way Keycloak lays it out.
fn account_url(claims: &Claims) -> String {
    let mut url = claims.issuer().url().clone();
    if let Ok(mut paths) = url.path_segments_mut() {
        paths.push("account");
    }
    url.to_string()
}

fn username(claims: &Claims) -> String {
    claims
        .preferred_username()
        .map(|s| s.as_ref())
        .unwrap_or_else(|| claims.subject().as_str())
        .to_string()
}

fn display_name(claims: &Claims, username: &str) -> String {
    claims
        .name()
        .and_then(|name| name.get(None))
        .map(|s| s.to_string())
        .unwrap_or_else(|| username.to_string())
}

/// Extract the fields the masthead toolbar renders from the OIDC claims.
pub fn from_auth(auth: &Option<OAuth2Context>) -> FromAuth {
    let claims = auth.as_ref().and_then(|auth| auth.claims());

    let (account_url, username, name) = match claims {
        Some(claims) => {
            let username = username(claims);
            let name = display_name(claims, &username);
            (Some(account_url(claims)), username, name)
        }
        None => (None, String::default(), String::default()),
    };

    let src = "assets/images/avatar.svg".to_string();

    FromAuth {
        avatar: html!(<Avatar {src} alt="avatar" size={AvatarSize::Small} />),
        account_url,
        name,
        username,
    }
}

/// Whether the current session may perform mutating operations. List pages
/// are public; create/delete/link affordances are only rendered when this
/// returns `true`.
#[hook]
pub fn use_can_edit() -> bool {
    let auth = use_auth_state();
    matches!(auth, Some(OAuth2Context::Authenticated(..)))
}
