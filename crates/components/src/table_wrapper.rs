use patternfly_yew::prelude::*;
use std::rc::Rc;
use vulntracker_ui_common::error::components::Error;
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
struct SkeletonEntry;

impl<C> TableEntryRenderer<C> for SkeletonEntry
where
    C: Clone + Eq + 'static,
{
    fn render_cell(&self, _: CellContext<'_, C>) -> Cell {
        html!(<Skeleton />).into()
    }
}

#[derive(Clone, PartialEq, Properties)]
pub struct TableWrapperProperties<C, M>
where
    C: Clone + Eq + 'static,
    M: PartialEq + TableModel<C> + 'static,
{
    #[prop_or_default]
    pub loading: bool,

    #[prop_or_default]
    pub error: Option<String>,

    #[prop_or_default]
    pub header: Vec<TableColumnProperties<C>>,

    #[prop_or_default]
    pub empty: bool,

    #[prop_or("No results".into())]
    pub empty_title: AttrValue,

    #[prop_or_default]
    pub children: ChildrenWithProps<Table<C, M>>,
}

/// Wraps the list page tables, taking over while the fetch is still running
/// or has failed. Loading shows skeleton rows under the real header, so the
/// layout doesn't jump once data arrives.
#[function_component(TableWrapper)]
pub fn table_wrapper<C, M>(props: &TableWrapperProperties<C, M>) -> Html
where
    C: Clone + Eq + 'static,
    M: Clone + PartialEq + TableModel<C> + 'static,
{
    let header = |props: &TableWrapperProperties<C, M>| {
        html_nested!(
            <TableHeader<C>>
                { for props.header.iter().map(|column| html_nested!(<TableColumn<C> ..column.clone() />)) }
            </TableHeader<C>>
        )
    };

    let placeholder_rows = if props.loading { 5 } else { 0 };
    let (placeholder, _) = use_table_data(MemoizedTableModel::new(Rc::new(
        (0..placeholder_rows).map(|_| SkeletonEntry).collect(),
    )));

    if props.loading || props.error.is_some() || props.empty {
        return html!(
            <>
                <Table<C, UseTableData<C, MemoizedTableModel<SkeletonEntry>>>
                    header={header(props)}
                    entries={placeholder}
                />
                if let Some(error) = &props.error {
                    <Error title="Error" err={error.clone()} />
                } else if props.empty {
                    <div style="background-color: var(--pf-v5-global--BackgroundColor--100);">
                        <EmptyState
                            title={props.empty_title.to_string()}
                            icon={Icon::Search}
                            size={Size::Small}
                        >
                            { "Try a different filter." }
                        </EmptyState>
                    </div>
                }
            </>
        );
    }

    html!(
        <>
            {
                for props.children.iter().map(|mut item| {
                    let item_props = Rc::make_mut(&mut item.props);
                    item_props.header = Some(header(props));
                    item
                })
            }
        </>
    )
}
