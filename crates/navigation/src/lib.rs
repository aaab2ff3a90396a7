use yew_nested_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, Target)]
pub enum AppRoute {
    #[target(index)]
    Index,
    NotLoggedIn,
    Vulnerabilities,
    Software,
    Threats,
    Patches,
}
