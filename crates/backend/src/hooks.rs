use crate::Backend;
use std::rc::Rc;
use yew::prelude::*;

#[hook]
pub fn use_backend() -> Rc<Backend> {
    use_context::<Rc<Backend>>().expect("Must be called from a component wrapped in a 'Backend' component")
}
