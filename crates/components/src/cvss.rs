use patternfly_yew::prelude::*;
use vulntracker_model::prelude::Severity;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Properties)]
pub struct CvssScoreProperties {
    pub score: f64,
}

/// Render a CVSS base score as a label tinted by its severity band.
#[function_component(CvssScore)]
pub fn cvss_score(props: &CvssScoreProperties) -> Html {
    let label = format!("{:.1}", props.score);

    let (color, outline) = match Severity::from_score(props.score) {
        Severity::Low => (Color::Grey, true),
        Severity::Medium => (Color::Orange, true),
        Severity::High => (Color::Red, false),
        Severity::Critical => (Color::Purple, false),
    };

    html!(
        <Label {label} {color} {outline}/>
    )
}
