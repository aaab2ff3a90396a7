use crate::{ApplyAccessToken, Backend, Endpoint};
use std::rc::Rc;
use vulntracker_model::prelude::*;
use vulntracker_ui_common::error::*;
use yew_oauth2::prelude::*;

pub struct ThreatService {
    backend: Rc<Backend>,
    access_token: Option<LatestAccessToken>,
    client: reqwest::Client,
}

impl ThreatService {
    pub fn new(backend: Rc<Backend>, access_token: Option<LatestAccessToken>) -> Self {
        Self {
            backend,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Threat>, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/threats")?;

        let response = self.client.get(url).send().await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }

    /// The threat-type lookup list for the create form.
    pub async fn types(&self) -> Result<Vec<ThreatType>, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/threat-types")?;

        let response = self.client.get(url).send().await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }

    pub async fn create(&self, threat: &CreateThreat) -> Result<Threat, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/threats")?;

        let response = self
            .client
            .post(url)
            .latest_access_token(&self.access_token)
            .json(threat)
            .send()
            .await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let url = self.backend.join(Endpoint::Api, &format!("/api/threats/{id}"))?;

        self.client
            .delete(url)
            .latest_access_token(&self.access_token)
            .send()
            .await?
            .api_error_for_status()
            .await?;

        Ok(())
    }
}
