use crate::{ApplyAccessToken, Backend, Endpoint};
use std::rc::Rc;
use vulntracker_model::prelude::*;
use vulntracker_ui_common::error::*;
use yew_oauth2::prelude::*;

pub struct SoftwareService {
    backend: Rc<Backend>,
    access_token: Option<LatestAccessToken>,
    client: reqwest::Client,
}

impl SoftwareService {
    pub fn new(backend: Rc<Backend>, access_token: Option<LatestAccessToken>) -> Self {
        Self {
            backend,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Software>, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/software")?;

        let response = self.client.get(url).send().await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }

    pub async fn create(&self, software: &CreateSoftware) -> Result<Software, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/software")?;

        let response = self
            .client
            .post(url)
            .latest_access_token(&self.access_token)
            .json(software)
            .send()
            .await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }

    /// Delete a software record. The backend rejects this with a conflict
    /// while vulnerabilities still reference it.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let url = self.backend.join(Endpoint::Api, &format!("/api/software/{id}"))?;

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
