pub mod auth;
pub mod time;

use yew::prelude::*;

/// Marker shown in table cells for values the record doesn't carry.
const NOT_AVAILABLE: &str = "N/A";

/// Display-time null-guard: render the value, or an "N/A" marker.
pub struct OrNone<T>(pub Option<T>);

fn not_available() -> Html {
    html!(<i>{ NOT_AVAILABLE }</i>)
}

impl<T> From<OrNone<T>> for Html
where
    T: Into<Html>,
{
    fn from(value: OrNone<T>) -> Self {
        value.0.map(Into::into).unwrap_or_else(not_available)
    }
}

impl<T> ToHtml for OrNone<T>
where
    T: Into<Html> + Clone,
{
    fn to_html(&self) -> Html {
        self.0.clone().map(Into::into).unwrap_or_else(not_available)
    }

    fn into_html(self) -> Html
    where
        Self: Sized,
    {
        self.into()
    }
}
