use crate::{about, pages};
use patternfly_yew::prelude::*;
use vulntracker_ui_common::utils::auth::from_auth;
use vulntracker_ui_components::{chat::ChatPanel, common::ExternalLinkMarker};
use vulntracker_ui_navigation::AppRoute;
use yew::prelude::*;
use yew_nested_router::prelude::Switch as RouterSwitch;
use yew_oauth2::{openid::*, prelude::*};

/// The main console component
#[function_component(Console)]
pub fn console() -> Html {
    html!(<RouterSwitch<AppRoute> {render} default={html!(<pages::NotFound />)}/>)
}

#[function_component(Brand)]
fn brand() -> Html {
    html! (
        <MastheadBrand>
            <patternfly_yew::prelude::Brand
                src="assets/images/logo.svg"
                alt="Vulnerability tracker logo"
                style={r#"
                    --pf-v5-c-brand--Height: var(--pf-v5-c-page__header-brand-link--c-brand--MaxHeight);
                "#}
            />
        </MastheadBrand>
    )
}

#[function_component(AppPage)]
fn app_page(props: &ChildrenProperties) -> Html {
    let brand = html!(<Brand/>);

    let sidebar = html_nested!(
        <PageSidebar>
            <Nav>
                <NavList>
                    <NavRouterItem<AppRoute> to={AppRoute::Index}>{ "Dashboard" }</NavRouterItem<AppRoute>>
                    <NavRouterItem<AppRoute> to={AppRoute::Vulnerabilities}>{ "Vulnerabilities" }</NavRouterItem<AppRoute>>
                    <NavRouterItem<AppRoute> to={AppRoute::Software}>{ "Software" }</NavRouterItem<AppRoute>>
                    <NavRouterItem<AppRoute> to={AppRoute::Threats}>{ "Threats" }</NavRouterItem<AppRoute>>
                    <NavRouterItem<AppRoute> to={AppRoute::Patches}>{ "Patches" }</NavRouterItem<AppRoute>>
                </NavList>
            </Nav>
        </PageSidebar>
    );

    let backdrop = use_backdrop();

    let callback_about = use_callback((), move |_, ()| {
        if let Some(backdrop) = &backdrop {
            backdrop.open(html!(<about::About/>));
        }
    });

    let auth_state = use_auth_state();
    let authenticated = matches!(auth_state, Some(OAuth2Context::Authenticated(..)));
    let auth = use_memo(auth_state, from_auth);

    let agent = use_auth_agent().expect("Requires OAuth2Context component in parent hierarchy");

    let onlogin = {
        let agent = agent.clone();
        use_callback((), move |_, _| {
            if let Err(err) = agent.start_login() {
                log::warn!("Failed to start login: {err}");
            }
        })
    };

    let onlogout = use_callback((), move |_, _| {
        if let Err(err) = agent.logout() {
            log::warn!("Failed to logout: {err}");
        }
    });

    let tools = html!(
        <Toolbar>
            <ToolbarContent>
                <ToolbarItem modifiers={[ToolbarElementModifier::Right]}>
                    <Dropdown
                        position={Position::Right}
                        variant={MenuToggleVariant::Plain}
                        icon={Icon::QuestionCircle}
                    >
                        <MenuAction onclick={callback_about}>
                            { "About" }
                        </MenuAction>
                    </Dropdown>
                </ToolbarItem>
                <ToolbarItem>
                    if authenticated {
                        <Dropdown
                            position={Position::Right}
                            variant={MenuToggleVariant::Plain}
                            icon={auth.avatar.clone()}
                            text={auth.name.clone()}
                            disabled={auth.username.is_empty()}
                        >
                            { for auth.account_url.as_ref().map(|url| { html_nested!(
                                <MenuLink href={url.to_string()} target="_blank">
                                    {"Account "} <ExternalLinkMarker/>
                                </MenuLink>)
                            }) }
                            <ListDivider/>
                            <MenuAction onclick={onlogout}>
                                { "Logout" }
                            </MenuAction>
                        </Dropdown>
                    } else {
                        <Button variant={ButtonVariant::Link} onclick={onlogin}>
                            { "Sign in" }
                        </Button>
                    }
                </ToolbarItem>
            </ToolbarContent>
        </Toolbar>
    );

    html!(
        <Page {brand} {sidebar} {tools}>
            { props.children.clone() }
            <ChatPanel/>
        </Page>
    )
}

fn render(route: AppRoute) -> Html {
    let content = match route {
        AppRoute::NotLoggedIn => {
            return html!(
                <Page brand={html!(<Brand/>)}>
                    <pages::NotLoggedIn/>
                </Page>
            )
        }

        AppRoute::Index => html!(<pages::Index/>),
        AppRoute::Vulnerabilities => html!(<pages::Vulnerabilities/>),
        AppRoute::Software => html!(<pages::Software/>),
        AppRoute::Threats => html!(<pages::Threats/>),
        AppRoute::Patches => html!(<pages::Patches/>),
    };

    html!(
        <AppPage>
            {content}
        </AppPage>
    )
}
