use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct ErrorProperties {
    #[prop_or("Failure".into())]
    pub title: AttrValue,

    #[prop_or_default]
    pub message: Option<String>,

    #[prop_or_default]
    pub err: String,
}

#[function_component(Error)]
pub fn error(props: &ErrorProperties) -> Html {
    html!(
        <Bullseye>
            <EmptyState
                title={props.title.to_string()}
                icon={Icon::ExclamationCircle}
                size={Size::Small}
            >
                <Content>
                    if let Some(message) = &props.message {
                        <p>{ &message }</p>
                        <ExpandableSection>
                            <p>{ &props.err }</p>
                        </ExpandableSection>
                    } else {
                        <p>{ &props.err }</p>
                    }
                </Content>
            </EmptyState>
        </Bullseye>
    )
}
