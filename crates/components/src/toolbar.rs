use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct ListToolbarProperties {
    /// Current filter text.
    pub filter: String,
    pub onsetfilter: Callback<String>,
    pub onclearfilter: Callback<()>,

    pub pagination: UsePagination,
    pub total: usize,

    /// Extra toolbar items, placed between the filter and the pagination.
    #[prop_or_default]
    pub children: ChildrenWithProps<ToolbarItem>,

    #[prop_or("Filter".into())]
    pub placeholder: AttrValue,
}

/// Toolbar for the list pages: free text filter, page specific items, pagination.
#[function_component(ListToolbar)]
pub fn list_toolbar(props: &ListToolbarProperties) -> Html {
    let onclearfilter = {
        let onclearfilter = props.onclearfilter.clone();
        Callback::from(move |_| onclearfilter.emit(()))
    };

    html!(
        <Toolbar>
            <ToolbarContent>
                <ToolbarItem r#type={ToolbarItemType::SearchFilter}>
                    <TextInputGroup>
                        <TextInputGroupMain
                            placeholder={props.placeholder.clone()}
                            icon={Icon::Search}
                            value={props.filter.clone()}
                            onchange={props.onsetfilter.clone()}
                        />
                        if !props.filter.is_empty() {
                            <TextInputGroupUtilities>
                                <Button icon={Icon::Times} variant={ButtonVariant::Plain} onclick={onclearfilter}/>
                            </TextInputGroupUtilities>
                        }
                    </TextInputGroup>
                </ToolbarItem>

                { for props.children.iter() }

                <ToolbarItem r#type={ToolbarItemType::Pagination}>
                    <SimplePagination pagination={props.pagination.clone()} total={props.total} />
                </ToolbarItem>
            </ToolbarContent>
        </Toolbar>
    )
}
