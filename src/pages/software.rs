use patternfly_yew::prelude::*;
use std::rc::Rc;
use std::time::Duration;
use vulntracker_ui_backend::{data, use_backend, SoftwareService, VendorService};
use vulntracker_ui_common::{
    use_apply_pagination,
    utils::{auth::use_can_edit, OrNone},
};
use vulntracker_ui_components::{
    common::PageHeading, confirm::ConfirmationModal, table_wrapper::TableWrapper,
    toolbar::ListToolbar,
};
use yew::prelude::*;
use yew_more_hooks::prelude::*;
use yew_oauth2::prelude::*;

/// Free text match over the software name, version, and vendor name.
fn matches(software: &data::Software, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }

    let filter = filter.to_lowercase();
    software.name.to_lowercase().contains(&filter)
        || software
            .version
            .as_deref()
            .map_or(false, |version| version.to_lowercase().contains(&filter))
        || software
            .vendor
            .as_ref()
            .map_or(false, |vendor| vendor.name.to_lowercase().contains(&filter))
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Column {
    Name,
    Version,
    Vendor,
    Actions,
}

#[derive(PartialEq, Properties, Clone)]
struct SoftwareEntry {
    software: data::Software,
    can_edit: bool,
    ondelete: Callback<()>,
}

impl TableEntryRenderer<Column> for SoftwareEntry {
    fn render_cell(&self, context: CellContext<'_, Column>) -> Cell {
        match context.column {
            Column::Name => html!({ &self.software.name }),
            Column::Version => OrNone(self.software.version.clone()).into(),
            Column::Vendor => OrNone(self.software.vendor.as_ref().map(|vendor| {
                match &vendor.website {
                    Some(website) => html!(
                        <a href={website.clone()} target="_blank">{ &vendor.name }</a>
                    ),
                    None => html!({ &vendor.name }),
                }
            }))
            .into(),
            Column::Actions => html!(
                if self.can_edit {
                    <Button
                        variant={ButtonVariant::Danger}
                        label="Delete"
                        onclick={self.ondelete.reform(|_|())}
                    />
                }
            ),
        }
        .into()
    }
}

#[function_component(Software)]
pub fn software() -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let can_edit = use_can_edit();
    let toaster = use_toaster().expect("Must be nested inside a ToastViewer");
    let backdrop = use_backdrop();

    let refresh = use_state_eq(|| 0usize);
    let created = use_state(Vec::<data::Software>::new);

    let fetch = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        use_async_with_cloned_deps(
            move |_| async move {
                SoftwareService::new(backend, access_token)
                    .list()
                    .await
                    .map(Rc::new)
                    .map_err(|err| err.to_string())
            },
            *refresh,
        )
    };

    let filter = use_state_eq(String::new);
    let onsetfilter = use_callback(filter.clone(), |value: String, filter| {
        filter.set(value.trim().to_string())
    });
    let onclearfilter = use_callback(filter.clone(), |(), filter| filter.set(String::new()));

    let fetched = match &*fetch {
        UseAsyncState::Ready(Ok(entries)) => Some(entries.clone()),
        _ => None,
    };

    let filtered = use_memo(
        (fetched, (*created).clone(), (*filter).clone()),
        |(fetched, created, filter)| {
            let mut entries = created.clone();
            if let Some(fetched) = fetched {
                entries.extend(fetched.iter().cloned());
            }
            entries.retain(|software| matches(software, filter));
            entries
        },
    );

    let onchanged = use_callback(
        (refresh.clone(), created.clone()),
        |(), (refresh, created)| {
            created.set(vec![]);
            refresh.set(**refresh + 1);
        },
    );

    let pending_delete = use_state_eq(|| Option::<i64>::None);

    let _delete = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        let toaster = toaster.clone();
        let onchanged = onchanged.clone();
        let pending_delete = pending_delete.clone();
        let deps = (*pending_delete).clone();
        use_async_with_cloned_deps(
            move |id: Option<i64>| async move {
                let Some(id) = id else {
                    return Ok::<_, String>(());
                };
                let result = SoftwareService::new(backend, access_token).delete(id).await;
                pending_delete.set(None);
                match result {
                    Ok(()) => {
                        toaster.toast(Toast {
                            r#type: AlertType::Success,
                            title: "Software deleted".into(),
                            timeout: Some(Duration::from_secs(5)),
                            ..Default::default()
                        });
                        onchanged.emit(());
                    }
                    Err(err) => {
                        // the backend refuses while vulnerabilities still reference it
                        toaster.toast(Toast {
                            r#type: AlertType::Danger,
                            title: "Failed to delete software".into(),
                            body: html!({ err.to_string() }),
                            ..Default::default()
                        });
                    }
                }
                Ok(())
            },
            deps,
        )
    };

    let ondelete = {
        let backdrop = backdrop.clone();
        use_callback(pending_delete.clone(), move |id: i64, pending_delete| {
            let pending_delete = pending_delete.clone();
            if let Some(backdrop) = &backdrop {
                backdrop.open(html!(
                    <ConfirmationModal
                        title="Delete software"
                        message="Software with recorded vulnerabilities cannot be deleted."
                        onconfirm={Callback::from(move |()| pending_delete.set(Some(id)))}
                    />
                ));
            }
        })
    };

    let oncreated = use_callback(
        (created.clone(), toaster.clone()),
        |software: data::Software, (created, toaster)| {
            toaster.toast(Toast {
                r#type: AlertType::Success,
                title: format!("Created {}", software.name),
                timeout: Some(Duration::from_secs(5)),
                ..Default::default()
            });
            let mut entries = (**created).clone();
            entries.insert(0, software);
            created.set(entries);
        },
    );

    let oncreate = {
        let backdrop = backdrop.clone();
        use_callback(oncreated, move |(), oncreated| {
            let oncreated = oncreated.clone();
            if let Some(backdrop) = &backdrop {
                backdrop.open(html!(<CreateSoftwareModal {oncreated} />));
            }
        })
    };

    let rows = use_memo(
        (filtered, ondelete, can_edit),
        |(filtered, ondelete, can_edit)| {
            filtered
                .iter()
                .map(|software| {
                    let id = software.id;
                    SoftwareEntry {
                        software: software.clone(),
                        can_edit: *can_edit,
                        ondelete: ondelete.reform(move |()| id),
                    }
                })
                .collect::<Vec<_>>()
        },
    );

    let total = rows.len();
    let pagination = use_pagination(Some(total), Default::default);
    let page_rows = use_apply_pagination(rows, pagination.control.clone());
    let (entries, _) = use_table_data(MemoizedTableModel::new(page_rows));

    let header = vec![
        yew::props!(TableColumnProperties<Column> {
            index: Column::Name,
            label: "Name",
            width: ColumnWidth::Percent(35)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Version,
            label: "Version",
            width: ColumnWidth::Percent(20)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Vendor,
            label: "Vendor",
            width: ColumnWidth::Percent(35)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Actions,
            label: "",
            width: ColumnWidth::FitContent
        }),
    ];

    html!(
        <>
            <PageHeading subtitle="Tracked software and the vendors behind it">
                { "Software" }
            </PageHeading>
            <PageSection variant={PageSectionVariant::Default} fill=true>
                <ListToolbar
                    filter={(*filter).clone()}
                    {onsetfilter}
                    {onclearfilter}
                    pagination={pagination.clone()}
                    {total}
                    placeholder="Filter by name, version or vendor"
                >
                    { for can_edit.then(|| html_nested!(
                        <ToolbarItem>
                            <Button
                                variant={ButtonVariant::Primary}
                                label="Add software"
                                onclick={oncreate.reform(|_|())}
                            />
                        </ToolbarItem>
                    ))}
                </ListToolbar>

                <TableWrapper<Column, UseTableData<Column, MemoizedTableModel<SoftwareEntry>>>
                    loading={fetch.is_processing()}
                    error={fetch.error().cloned()}
                    empty={entries.is_empty()}
                    {header}
                >
                    <Table<Column, UseTableData<Column, MemoizedTableModel<SoftwareEntry>>>
                        {entries}
                        mode={TableMode::Compact}
                    />
                </TableWrapper<Column, UseTableData<Column, MemoizedTableModel<SoftwareEntry>>>>

                <SimplePagination
                    {pagination}
                    {total}
                    position={PaginationPosition::Bottom}
                />
            </PageSection>
        </>
    )
}

#[derive(PartialEq, Properties)]
struct CreateSoftwareModalProperties {
    oncreated: Callback<data::Software>,
}

/// Create form for software. Vendors are managed from here as well: the
/// vendor choice offers creating a new vendor inline.
#[function_component(CreateSoftwareModal)]
fn create_software_modal(props: &CreateSoftwareModalProperties) -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let backdrop = use_backdrop();

    // vendor refetch counter, bumped after an inline vendor create
    let vendor_refresh = use_state_eq(|| 0usize);

    let vendors = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        use_async_with_cloned_deps(
            move |_| async move {
                VendorService::new(backend, access_token)
                    .list()
                    .await
                    .map(Rc::new)
                    .map_err(|err| err.to_string())
            },
            *vendor_refresh,
        )
    };

    let name = use_state_eq(String::new);
    let version = use_state_eq(String::new);
    let selected_vendor = use_state_eq(|| Option::<(i64, String)>::None);

    // inline vendor form state
    let new_vendor_open = use_state_eq(|| false);
    let vendor_name = use_state_eq(String::new);
    let vendor_website = use_state_eq(String::new);
    let pending_vendor = use_state_eq(|| Option::<data::CreateVendor>::None);

    let vendor_submit = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        let selected_vendor = selected_vendor.clone();
        let vendor_refresh = vendor_refresh.clone();
        let new_vendor_open = new_vendor_open.clone();
        let pending_vendor = pending_vendor.clone();
        let deps = (*pending_vendor).clone();
        use_async_with_cloned_deps(
            move |payload: Option<data::CreateVendor>| async move {
                let Some(payload) = payload else {
                    return Ok(());
                };
                let result = VendorService::new(backend, access_token).create(&payload).await;
                pending_vendor.set(None);
                match result {
                    Ok(vendor) => {
                        selected_vendor.set(Some((vendor.id, vendor.name)));
                        new_vendor_open.set(false);
                        vendor_refresh.set(*vendor_refresh + 1);
                        Ok(())
                    }
                    Err(err) => Err(err.to_string()),
                }
            },
            deps,
        )
    };

    let oncreatevendor = use_callback(
        (pending_vendor.clone(), vendor_name.clone(), vendor_website.clone()),
        |(), (pending_vendor, vendor_name, vendor_website)| {
            if vendor_name.trim().is_empty() {
                return;
            }
            pending_vendor.set(Some(data::CreateVendor {
                name: vendor_name.trim().to_string(),
                website: match vendor_website.trim() {
                    "" => None,
                    value => Some(value.to_string()),
                },
            }));
        },
    );

    let pending = use_state_eq(|| Option::<data::CreateSoftware>::None);

    let submit = {
        let oncreated = props.oncreated.clone();
        let backdrop = backdrop.clone();
        let pending = pending.clone();
        let deps = (*pending).clone();
        use_async_with_cloned_deps(
            move |payload: Option<data::CreateSoftware>| async move {
                let Some(payload) = payload else {
                    return Ok(());
                };
                let result = SoftwareService::new(backend, access_token).create(&payload).await;
                pending.set(None);
                match result {
                    Ok(software) => {
                        oncreated.emit(software);
                        if let Some(backdrop) = &backdrop {
                            backdrop.close();
                        }
                        Ok(())
                    }
                    Err(err) => Err(err.to_string()),
                }
            },
            deps,
        )
    };

    let valid = !name.trim().is_empty() && selected_vendor.is_some();

    let onsubmit = use_callback(
        (pending.clone(), name.clone(), version.clone(), selected_vendor.clone()),
        |(), (pending, name, version, selected_vendor)| {
            let Some((vendor_id, _)) = &**selected_vendor else {
                return;
            };
            pending.set(Some(data::CreateSoftware {
                name: name.trim().to_string(),
                vendor_id: *vendor_id,
                version: match version.trim() {
                    "" => None,
                    value => Some(value.to_string()),
                },
            }));
        },
    );

    let oncancel = {
        let backdrop = backdrop.clone();
        Callback::from(move |_| {
            if let Some(backdrop) = &backdrop {
                backdrop.close();
            }
        })
    };

    let footer = html!(
        <>
            <Button
                variant={ButtonVariant::Primary}
                r#type={ButtonType::Submit}
                disabled={!valid || pending.is_some()}
                onclick={onsubmit.reform(|_|())}
                form="create-software-form"
            >
                { "Create" }
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

    let vendor_text = match &*selected_vendor {
        Some((_, name)) => name.clone(),
        None => "Select a vendor".to_string(),
    };

    let ontogglevendor = use_callback(new_vendor_open.clone(), |(), new_vendor_open| {
        new_vendor_open.set(!**new_vendor_open)
    });

    html!(
        <Bullseye plain=true>
            <Modal
                title="Add software"
                variant={ModalVariant::Medium}
                {footer}
            >
                if let UseAsyncState::Ready(Err(err)) = &*submit {
                    <Alert inline=true title="Failed to create software" r#type={AlertType::Danger}>
                        { err.clone() }
                    </Alert>
                }
                <Form id="create-software-form" method="dialog">
                    <FormGroup label="Name" required=true>
                        <TextInput
                            value={(*name).clone()}
                            onchange={{ let name = name.clone(); Callback::from(move |value: String| name.set(value)) }}
                            autofocus=true
                        />
                    </FormGroup>
                    <FormGroup label="Version">
                        <TextInput
                            value={(*version).clone()}
                            onchange={{ let version = version.clone(); Callback::from(move |value: String| version.set(value)) }}
                        />
                    </FormGroup>
                    <FormGroup label="Vendor" required=true>
                        <Split gutter=true>
                            <SplitItem>
                                {
                                    match &*vendors {
                                        UseAsyncState::Ready(Ok(vendors)) => html!(
                                            <Dropdown text={vendor_text}>
                                                { for vendors.iter().map(|vendor| {
                                                    let id = vendor.id;
                                                    let name = vendor.name.clone();
                                                    let label = name.clone();
                                                    let selected_vendor = selected_vendor.clone();
                                                    html_nested!(
                                                        <MenuAction onclick={Callback::from(move |()| selected_vendor.set(Some((id, name.clone()))))}>
                                                            { label }
                                                        </MenuAction>
                                                    )
                                                })}
                                            </Dropdown>
                                        ),
                                        UseAsyncState::Ready(Err(err)) => html!({ err.clone() }),
                                        _ => html!(<Spinner/>),
                                    }
                                }
                            </SplitItem>
                            <SplitItem>
                                <Button
                                    variant={ButtonVariant::Link}
                                    label="New vendor"
                                    onclick={ontogglevendor.reform(|_|())}
                                />
                            </SplitItem>
                        </Split>
                    </FormGroup>
                    if *new_vendor_open {
                        if let UseAsyncState::Ready(Err(err)) = &*vendor_submit {
                            <Alert inline=true title="Failed to create vendor" r#type={AlertType::Danger}>
                                { err.clone() }
                            </Alert>
                        }
                        <FormGroup label="Vendor name" required=true>
                            <TextInput
                                value={(*vendor_name).clone()}
                                onchange={{ let vendor_name = vendor_name.clone(); Callback::from(move |value: String| vendor_name.set(value)) }}
                            />
                        </FormGroup>
                        <FormGroup label="Vendor website">
                            <TextInput
                                placeholder="https://"
                                value={(*vendor_website).clone()}
                                onchange={{ let vendor_website = vendor_website.clone(); Callback::from(move |value: String| vendor_website.set(value)) }}
                            />
                        </FormGroup>
                        <Button
                            variant={ButtonVariant::Secondary}
                            label="Create vendor"
                            disabled={vendor_name.trim().is_empty() || pending_vendor.is_some()}
                            onclick={oncreatevendor.reform(|_|())}
                        />
                    }
                </Form>
            </Modal>
        </Bullseye>
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn software(name: &str, version: Option<&str>, vendor: Option<&str>) -> data::Software {
        data::Software {
            id: 1,
            name: name.to_string(),
            version: version.map(|s| s.to_string()),
            vendor_id: 1,
            vendor: vendor.map(|name| data::Vendor {
                id: 1,
                name: name.to_string(),
                website: None,
            }),
        }
    }

    #[test]
    fn empty_filter_passes() {
        assert!(matches(&software("AcmeOS", None, None), ""));
    }

    #[test]
    fn matches_vendor_name() {
        let s = software("AcmeOS", Some("2.1"), Some("Acme Corp"));
        assert!(matches(&s, "acme corp"));
        assert!(matches(&s, "2.1"));
        assert!(!matches(&s, "globex"));
    }
}
