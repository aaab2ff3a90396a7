use crate::{ApplyAccessToken, Backend, Endpoint};
use std::rc::Rc;
use vulntracker_model::prelude::*;
use vulntracker_ui_common::error::*;
use yew_oauth2::prelude::*;

pub struct PatchService {
    backend: Rc<Backend>,
    access_token: Option<LatestAccessToken>,
    client: reqwest::Client,
}

impl PatchService {
    pub fn new(backend: Rc<Backend>, access_token: Option<LatestAccessToken>) -> Self {
        Self {
            backend,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Patch>, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/patches")?;

        let response = self.client.get(url).send().await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }

    pub async fn create(&self, patch: &CreatePatch) -> Result<Patch, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/patches")?;

        let response = self
            .client
            .post(url)
            .latest_access_token(&self.access_token)
            .json(patch)
            .send()
            .await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let url = self.backend.join(Endpoint::Api, &format!("/api/patches/{id}"))?;

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
