use std::rc::Rc;
use vulntracker_ui_backend::Endpoints;
use vulntracker_ui_common::error::components::Error;
use web_sys::RequestCache;
use yew::prelude::*;
use yew_more_hooks::hooks::r#async::*;

#[derive(Clone, Debug, PartialEq, Properties)]
pub struct BackendProperties {
    #[prop_or_default]
    pub children: Children,
    /// Where to fetch the endpoint configuration from, relative to the
    /// current page.
    pub bootstrap_url: String,
}

/// Discover the backend endpoints and provide them as context.
///
/// Children render only once discovery succeeded, so components below may
/// rely on [`vulntracker_ui_backend::use_backend`].
#[function_component(Backend)]
pub fn backend(props: &BackendProperties) -> Html {
    let backend = use_async_with_options(
        discover(props.bootstrap_url.clone()),
        UseAsyncOptions::enable_auto(),
    );

    match &*backend {
        UseAsyncState::Ready(Ok(backend)) => html!(
            <ContextProvider<Rc<vulntracker_ui_backend::Backend>> context={Rc::new(backend.clone())}>
                { for props.children.iter() }
            </ContextProvider<Rc<vulntracker_ui_backend::Backend>>>
        ),
        UseAsyncState::Ready(Err(err)) => html!(
            <Error title="Backend discovery failed" err={err.clone()}/>
        ),
        _ => html!(),
    }
}

async fn discover(bootstrap_url: String) -> Result<vulntracker_ui_backend::Backend, String> {
    // reqwest cannot resolve URLs relative to the current page, gloo_net can
    let response = gloo_net::http::Request::get(&bootstrap_url)
        .cache(RequestCache::NoStore)
        .send()
        .await
        .map_err(|err| format!("Failed to load backend information: {err}"))?;

    let endpoints: Endpoints = response
        .json()
        .await
        .map_err(|err| format!("Failed to decode backend information: {err}"))?;

    log::info!("Backend endpoints: {endpoints:?}");

    Ok(vulntracker_ui_backend::Backend { endpoints })
}
