use patternfly_yew::prelude::*;
use vulntracker_model::prelude::Severity;
use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct SeverityLabelProperties {
    pub severity: Severity,
}

#[function_component(SeverityLabel)]
pub fn severity_label(props: &SeverityLabelProperties) -> Html {
    let (color, outline) = match props.severity {
        Severity::Low => (Color::Blue, true),
        Severity::Medium => (Color::Orange, true),
        Severity::High => (Color::Orange, false),
        Severity::Critical => (Color::Red, false),
    };

    html!(
        <Label label={props.severity.to_string()} {color} {outline} compact=true />
    )
}
