use crate::{ApplyAccessToken, Backend, Endpoint};
use std::rc::Rc;
use vulntracker_model::prelude::*;
use vulntracker_ui_common::error::*;
use yew_oauth2::prelude::*;

pub struct VendorService {
    backend: Rc<Backend>,
    access_token: Option<LatestAccessToken>,
    client: reqwest::Client,
}

impl VendorService {
    pub fn new(backend: Rc<Backend>, access_token: Option<LatestAccessToken>) -> Self {
        Self {
            backend,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Vendor>, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/vendors")?;

        let response = self.client.get(url).send().await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }

    pub async fn create(&self, vendor: &CreateVendor) -> Result<Vendor, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/vendors")?;

        let response = self
            .client
            .post(url)
            .latest_access_token(&self.access_token)
            .json(vendor)
            .send()
            .await?;

        Ok(response.api_error_for_status().await?.json().await?)
    }
}
