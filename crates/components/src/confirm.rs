use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct ConfirmationModalProperties {
    pub title: AttrValue,
    pub message: AttrValue,

    #[prop_or("Delete".into())]
    pub action: AttrValue,

    pub onconfirm: Callback<()>,
}

/// A modal asking the user to confirm a destructive action before it runs.
///
/// Open it through the backdrop, it closes itself on either outcome.
#[function_component(ConfirmationModal)]
pub fn confirmation_modal(props: &ConfirmationModalProperties) -> Html {
    let backdrop = use_backdrop();

    let onconfirm = {
        let backdrop = backdrop.clone();
        let onconfirm = props.onconfirm.clone();
        Callback::from(move |_| {
            if let Some(backdrop) = &backdrop {
                backdrop.close();
            }
            onconfirm.emit(());
        })
    };

    let oncancel = Callback::from(move |_| {
        if let Some(backdrop) = &backdrop {
            backdrop.close();
        }
    });

    let footer = html!(
        <>
            <Button
                variant={ButtonVariant::Danger}
                r#type={ButtonType::Button}
                onclick={onconfirm}
            >
                { &props.action }
            </Button>
            <Button
                variant={ButtonVariant::Link}
                r#type={ButtonType::Button}
                onclick={oncancel}
            >
                { "Cancel" }
            </Button>
        </>
    );

    html!(
        <Bullseye plain=true>
            <Modal
                title={props.title.to_string()}
                variant={ModalVariant::Small}
                {footer}
            >
                { &*props.message }
            </Modal>
        </Bullseye>
    )
}
