use yew_oauth2::context::LatestAccessToken;

/// Attach a bearer token to an outgoing request, if one is available.
///
/// List calls go out anonymously, so a missing token is not an error here.
/// The backend rejects unauthenticated mutations on its own.
pub trait ApplyAccessToken: Sized {
    fn latest_access_token(self, access_token: &Option<LatestAccessToken>) -> Self {
        if let Some(access_token) = access_token.as_ref().and_then(|l| l.access_token()) {
            self.apply_access_token(&access_token)
        } else {
            self
        }
    }

    fn apply_access_token(self, access_token: &str) -> Self;
}

impl ApplyAccessToken for reqwest::RequestBuilder {
    fn apply_access_token(self, access_token: &str) -> Self {
        self.bearer_auth(access_token)
    }
}
