use patternfly_yew::prelude::*;
use vulntracker_ui_common::error::components::Error;
use yew::prelude::*;
use yew_more_hooks::hooks::UseAsyncState;

/// Render the ready value of an asynchronous fetch, a spinner while it is
/// still running, or the error it ended with.
pub fn async_content<T, E, F>(state: &UseAsyncState<T, E>, f: F) -> Html
where
    E: ToString,
    F: FnOnce(&T) -> Html,
{
    match state {
        UseAsyncState::Ready(Ok(value)) => f(value),
        UseAsyncState::Ready(Err(err)) => {
            html!(<Error title="Failed to load" err={err.to_string()}/>)
        }
        _ => html!(<Bullseye><Spinner/></Bullseye>),
    }
}
