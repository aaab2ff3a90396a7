use crate::{ApplyAccessToken, Backend, Endpoint};
use futures::{future::FutureExt, pin_mut, select};
use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;
use vulntracker_model::prelude::*;
use vulntracker_ui_common::error::*;
use yew_oauth2::prelude::*;

/// Client-side budget for a chat completion. The assistant backend proxies a
/// generative model and can stall well beyond ordinary API latencies.
const CHAT_TIMEOUT_MS: u32 = 60_000;

pub struct ChatService {
    backend: Rc<Backend>,
    access_token: Option<LatestAccessToken>,
    client: reqwest::Client,
}

impl ChatService {
    pub fn new(backend: Rc<Backend>, access_token: Option<LatestAccessToken>) -> Self {
        Self {
            backend,
            access_token,
            client: reqwest::Client::new(),
        }
    }

    /// Send a message to the assistant. This is the only request in the
    /// application which gets cancelled client-side.
    pub async fn send(&self, message: &str) -> Result<ChatResponse, ApiError> {
        let url = self.backend.join(Endpoint::Api, "/api/chat")?;

        let request = self
            .client
            .post(url)
            .latest_access_token(&self.access_token)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .fuse();
        let timeout = TimeoutFuture::new(CHAT_TIMEOUT_MS).fuse();

        pin_mut!(request, timeout);

        let response = select! {
            response = request => response?,
            _ = timeout => return Err(ApiErrorKind::Timeout.into()),
        };

        Ok(response.api_error_for_status().await?.json().await?)
    }
}
