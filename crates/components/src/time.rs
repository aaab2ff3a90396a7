use time::OffsetDateTime;
use vulntracker_ui_common::utils::time::date;
use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct DateProperties {
    pub timestamp: OffsetDateTime,
}

#[function_component(Date)]
pub fn date_cell(props: &DateProperties) -> Html {
    date(props.timestamp)
}
