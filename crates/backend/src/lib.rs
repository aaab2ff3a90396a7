pub mod data {
    pub use vulntracker_model::prelude::*;
}

mod access_token;
mod chat;
mod hooks;
mod patch;
mod software;
mod threat;
mod vendor;
mod vuln;

pub use access_token::*;
pub use chat::*;
pub use hooks::*;
pub use patch::*;
pub use software::*;
pub use threat::*;
pub use vendor::*;
pub use vuln::*;

use url::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backend {
    pub endpoints: Endpoints,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct OpenIdConnect {
    pub issuer: String,
    #[serde(default = "default::client_id")]
    pub client_id: String,
    #[serde(default = "default::scopes")]
    pub scopes: String,
    #[serde(default = "default::after_logout")]
    pub after_logout: String,
}

impl OpenIdConnect {
    pub fn scopes(&self) -> Vec<String> {
        self.scopes.split(' ').map(|s| s.to_string()).collect()
    }
}

mod default {
    pub fn client_id() -> String {
        "frontend".to_string()
    }

    pub fn scopes() -> String {
        "openid".to_string()
    }

    pub fn after_logout() -> String {
        "/notloggedin".to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Endpoints {
    pub url: Url,

    pub oidc: OpenIdConnect,
}

impl Endpoints {
    pub fn get(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::Api => &self.url,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Endpoint {
    Api,
}

impl Backend {
    pub fn join(&self, endpoint: Endpoint, input: &str) -> Result<Url, url::ParseError> {
        self.endpoints.get(endpoint).join(input)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn oidc_defaults_apply() {
        let endpoints: Endpoints = serde_json::from_value(json!({
            "url": "https://vulntracker.example.com/",
            "oidc": {
                "issuer": "https://sso.example.com/realms/vulntracker"
            }
        }))
        .unwrap();

        assert_eq!(endpoints.oidc.client_id, "frontend");
        assert_eq!(endpoints.oidc.scopes(), vec!["openid"]);
        assert_eq!(endpoints.oidc.after_logout, "/notloggedin");
    }

    #[test]
    fn join_resolves_relative_to_base() {
        let backend = Backend {
            endpoints: serde_json::from_value(json!({
                "url": "https://vulntracker.example.com/",
                "oidc": { "issuer": "https://sso.example.com/realms/vulntracker" }
            }))
            .unwrap(),
        };

        let url = backend.join(Endpoint::Api, "/api/vendors").unwrap();
        assert_eq!(url.as_str(), "https://vulntracker.example.com/api/vendors");
    }
}
