use crate::{ApplyAccessToken, Backend, Endpoint};
use std::rc::Rc;
use vulntracker_model::prelude::*;
use vulntracker_ui_common::error::*;
use yew_oauth2::prelude::*;

pub struct VulnerabilityService {
    backend: Rc<Backend>,
    access_token: Option<LatestAccessToken>,
    client: reqwest::Client,
}

impl VulnerabilityService {
    pub fn new(backend: Rc<Backend>, access_token: Option<LatestAccessToken>) -> Self {
        Self {
            backend,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Vulnerability>, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/vulnerabilities")?;

        let response = self.client.get(url).send().await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }

    pub async fn create(&self, vuln: &CreateVulnerability) -> Result<Vulnerability, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/vulnerabilities")?;

        let response = self
            .client
            .post(url)
            .latest_access_token(&self.access_token)
            .json(vuln)
            .send()
            .await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let url = self.backend.join(Endpoint::Api, &format!("/api/vulnerabilities/{id}"))?;

        self.client
            .delete(url)
            .latest_access_token(&self.access_token)
            .send()
            .await?
            .api_error_for_status()
            .await?;

        Ok(())
    }

    /// Associate an existing threat with a vulnerability.
    pub async fn link_threat(&self, id: i64, threat_id: i64) -> Result<(), ApiError> {
        let url = self
            .backend
            .join(Endpoint::Api, &format!("/api/vulnerabilities/{id}/threats"))?;

        self.client
            .post(url)
            .latest_access_token(&self.access_token)
            .json(&LinkThreat { threat_id })
            .send()
            .await?
            .api_error_for_status()
            .await?;

        Ok(())
    }

    /// Associate an existing patch with a vulnerability.
    pub async fn link_patch(&self, id: i64, patch_id: i64) -> Result<(), ApiError> {
        let url = self
            .backend
            .join(Endpoint::Api, &format!("/api/vulnerabilities/{id}/patches"))?;

        self.client
            .post(url)
            .latest_access_token(&self.access_token)
            .json(&LinkPatch { patch_id })
            .send()
            .await?
            .api_error_for_status()
            .await?;

        Ok(())
    }
}
