use patternfly_yew::prelude::*;
use vulntracker_ui_backend::use_backend;
use yew::prelude::*;

#[function_component(About)]
pub fn about() -> Html {
    let backend = use_backend();

    html!(
        <Bullseye plain=true>
            <patternfly_yew::prelude::AboutModal
                brand_image_src="assets/images/logo.svg"
                brand_image_alt="Vulnerability tracker logo"
                product_name="Vulnerability Tracker"
                trademark="Copyright © 2026 the Vulnerability Tracker contributors"
            >
                <Content>
                    <p>{ env!("CARGO_PKG_DESCRIPTION") }</p>
                    <dl style="width: 100%">
                        <dt>{ "Version" }</dt>
                        <dd>{ env!("CARGO_PKG_VERSION") }</dd>
                        if let Some(commit) = option_env!("BUILD_COMMIT") {
                            <dt>{ "Commit" }</dt>
                            <dd>{ commit }</dd>
                        }
                        <dt>{ "Backend" }</dt>
                        <dd>{ backend.endpoints.url.to_string() }</dd>
                    </dl>
                </Content>
            </patternfly_yew::prelude::AboutModal>
        </Bullseye>
    )
}
