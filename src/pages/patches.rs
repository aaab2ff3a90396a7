use patternfly_yew::prelude::*;
use std::rc::Rc;
use std::time::Duration;
use vulntracker_ui_backend::{data, use_backend, PatchService, VulnerabilityService};
use vulntracker_ui_common::{
    use_apply_pagination,
    utils::{auth::use_can_edit, time::parse_date, OrNone},
};
use vulntracker_ui_components::{
    common::PageHeading, confirm::ConfirmationModal, table_wrapper::TableWrapper, time::Date,
    toolbar::ListToolbar,
};
use yew::prelude::*;
use yew_more_hooks::prelude::*;
use yew_oauth2::prelude::*;

/// Free text match over the patch URL, description, and the CVE it fixes.
fn matches(patch: &data::Patch, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }

    let filter = filter.to_lowercase();
    patch.url.to_lowercase().contains(&filter)
        || patch
            .description
            .as_deref()
            .map_or(false, |description| description.to_lowercase().contains(&filter))
        || patch
            .vulnerability
            .as_ref()
            .map_or(false, |vuln| vuln.cve_id.to_lowercase().contains(&filter))
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Column {
    Url,
    Released,
    Vulnerability,
    Actions,
}

#[derive(PartialEq, Properties, Clone)]
struct PatchEntry {
    patch: data::Patch,
    can_edit: bool,
    ondelete: Callback<()>,
}

impl TableEntryRenderer<Column> for PatchEntry {
    fn render_cell(&self, context: CellContext<'_, Column>) -> Cell {
        match context.column {
            Column::Url => html!(
                <a href={self.patch.url.clone()} target="_blank">{ &self.patch.url }</a>
            ),
            Column::Released => OrNone(
                self.patch
                    .released
                    .map(|timestamp| html!(<Date {timestamp}/>)),
            )
            .into(),
            Column::Vulnerability => OrNone(
                self.patch
                    .vulnerability
                    .as_ref()
                    .map(|vuln| html!({ &vuln.cve_id })),
            )
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

    fn is_full_width_details(&self) -> Option<bool> {
        Some(true)
    }

    fn render_details(&self) -> Vec<Span> {
        let html = html!(
            <Content>
                if let Some(description) = &self.patch.description {
                    <p>{ description }</p>
                } else {
                    <p>{ "No description." }</p>
                }
            </Content>
        );
        vec![Span::max(html)]
    }
}

#[function_component(Patches)]
pub fn patches() -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let can_edit = use_can_edit();
    let toaster = use_toaster().expect("Must be nested inside a ToastViewer");
    let backdrop = use_backdrop();

    let refresh = use_state_eq(|| 0usize);
    let created = use_state(Vec::<data::Patch>::new);

    let fetch = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        use_async_with_cloned_deps(
            move |_| async move {
                PatchService::new(backend, access_token)
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
            entries.retain(|patch| matches(patch, filter));
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
        use_async_with_cloned_deps(
            {
                let pending_delete = pending_delete.clone();
                move |id: Option<i64>| async move {
                    let Some(id) = id else {
                        return Ok::<_, String>(());
                    };
                    let result = PatchService::new(backend, access_token).delete(id).await;
                    pending_delete.set(None);
                    match result {
                        Ok(()) => {
                            toaster.toast(Toast {
                                r#type: AlertType::Success,
                                title: "Patch deleted".into(),
                                timeout: Some(Duration::from_secs(5)),
                                ..Default::default()
                            });
                            onchanged.emit(());
                        }
                        Err(err) => {
                            toaster.toast(Toast {
                                r#type: AlertType::Danger,
                                title: "Failed to delete patch".into(),
                                body: html!({ err.to_string() }),
                                ..Default::default()
                            });
                        }
                    }
                    Ok(())
                }
            },
            (*pending_delete).clone(),
        )
    };

    let ondelete = {
        let backdrop = backdrop.clone();
        use_callback(pending_delete.clone(), move |id: i64, pending_delete| {
            let pending_delete = pending_delete.clone();
            if let Some(backdrop) = &backdrop {
                backdrop.open(html!(
                    <ConfirmationModal
                        title="Delete patch"
                        message="This removes the patch record and its vulnerability link."
                        onconfirm={Callback::from(move |()| pending_delete.set(Some(id)))}
                    />
                ));
            }
        })
    };

    let oncreated = use_callback(
        (created.clone(), toaster.clone()),
        |patch: data::Patch, (created, toaster)| {
            toaster.toast(Toast {
                r#type: AlertType::Success,
                title: "Patch recorded".into(),
                timeout: Some(Duration::from_secs(5)),
                ..Default::default()
            });
            let mut entries = (**created).clone();
            entries.insert(0, patch);
            created.set(entries);
        },
    );

    let oncreate = {
        let backdrop = backdrop.clone();
        use_callback(oncreated, move |(), oncreated| {
            let oncreated = oncreated.clone();
            if let Some(backdrop) = &backdrop {
                backdrop.open(html!(<CreatePatchModal {oncreated} />));
            }
        })
    };

    let rows = use_memo(
        (filtered, ondelete, can_edit),
        |(filtered, ondelete, can_edit)| {
            filtered
                .iter()
                .map(|patch| {
                    let id = patch.id;
                    PatchEntry {
                        patch: patch.clone(),
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
    let (entries, onexpand) = use_table_data(MemoizedTableModel::new(page_rows));

    let header = vec![
        yew::props!(TableColumnProperties<Column> {
            index: Column::Url,
            label: "URL",
            width: ColumnWidth::Percent(45)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Released,
            label: "Released",
            width: ColumnWidth::Percent(20)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Vulnerability,
            label: "Fixes",
            width: ColumnWidth::Percent(25)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Actions,
            label: "",
            width: ColumnWidth::FitContent
        }),
    ];

    html!(
        <>
            <PageHeading subtitle="Published fixes for tracked vulnerabilities">
                { "Patches" }
            </PageHeading>
            <PageSection variant={PageSectionVariant::Default} fill=true>
                <ListToolbar
                    filter={(*filter).clone()}
                    {onsetfilter}
                    {onclearfilter}
                    pagination={pagination.clone()}
                    {total}
                    placeholder="Filter by URL, description or CVE"
                >
                    { for can_edit.then(|| html_nested!(
                        <ToolbarItem>
                            <Button
                                variant={ButtonVariant::Primary}
                                label="Add patch"
                                onclick={oncreate.reform(|_|())}
                            />
                        </ToolbarItem>
                    ))}
                </ListToolbar>

                <TableWrapper<Column, UseTableData<Column, MemoizedTableModel<PatchEntry>>>
                    loading={fetch.is_processing()}
                    error={fetch.error().cloned()}
                    empty={entries.is_empty()}
                    {header}
                >
                    <Table<Column, UseTableData<Column, MemoizedTableModel<PatchEntry>>>
                        {entries}
                        mode={TableMode::Expandable}
                        {onexpand}
                    />
                </TableWrapper<Column, UseTableData<Column, MemoizedTableModel<PatchEntry>>>>

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
struct CreatePatchModalProperties {
    oncreated: Callback<data::Patch>,
}

#[function_component(CreatePatchModal)]
fn create_patch_modal(props: &CreatePatchModalProperties) -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let backdrop = use_backdrop();

    // lookup list for the vulnerability choice
    let vulnerabilities = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        use_async_with_options(
            async move {
                VulnerabilityService::new(backend, access_token)
                    .list()
                    .await
                    .map(Rc::new)
                    .map_err(|err| err.to_string())
            },
            UseAsyncOptions::enable_auto(),
        )
    };

    let url = use_state_eq(String::new);
    let description = use_state_eq(String::new);
    let released = use_state_eq(String::new);
    let selected_vuln = use_state_eq(|| Option::<(i64, String)>::None);

    let pending = use_state_eq(|| Option::<data::CreatePatch>::None);

    let submit = {
        let oncreated = props.oncreated.clone();
        let backdrop = backdrop.clone();
        let pending = pending.clone();
        let deps = (*pending).clone();
        use_async_with_cloned_deps(
            move |payload: Option<data::CreatePatch>| async move {
                let Some(payload) = payload else {
                    return Ok(());
                };
                let result = PatchService::new(backend, access_token).create(&payload).await;
                pending.set(None);
                match result {
                    Ok(patch) => {
                        oncreated.emit(patch);
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

    let parsed_released = parse_date(&released);

    let valid = !url.trim().is_empty() && selected_vuln.is_some() && parsed_released.is_ok();

    let onsubmit = use_callback(
        (
            pending.clone(),
            url.clone(),
            description.clone(),
            released.clone(),
            selected_vuln.clone(),
        ),
        |(), (pending, url, description, released, selected_vuln)| {
            let Some((vulnerability_id, _)) = &**selected_vuln else {
                return;
            };
            let Ok(released) = parse_date(released) else {
                return;
            };
            pending.set(Some(data::CreatePatch {
                vulnerability_id: *vulnerability_id,
                url: url.trim().to_string(),
                released,
                description: match description.trim() {
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
                form="create-patch-form"
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

    let vuln_text = match &*selected_vuln {
        Some((_, cve_id)) => cve_id.clone(),
        None => "Select a vulnerability".to_string(),
    };

    html!(
        <Bullseye plain=true>
            <Modal
                title="Add patch"
                variant={ModalVariant::Medium}
                {footer}
            >
                if let UseAsyncState::Ready(Err(err)) = &*submit {
                    <Alert inline=true title="Failed to create patch" r#type={AlertType::Danger}>
                        { err.clone() }
                    </Alert>
                }
                <Form id="create-patch-form" method="dialog">
                    <FormGroup label="URL" required=true>
                        <TextInput
                            placeholder="https://"
                            value={(*url).clone()}
                            onchange={{ let url = url.clone(); Callback::from(move |value: String| url.set(value)) }}
                            autofocus=true
                        />
                    </FormGroup>
                    <FormGroup label="Fixes" required=true>
                        {
                            match &*vulnerabilities {
                                UseAsyncState::Ready(Ok(vulnerabilities)) => html!(
                                    <Dropdown text={vuln_text}>
                                        { for vulnerabilities.iter().map(|vuln| {
                                            let id = vuln.id;
                                            let cve_id = vuln.cve_id.clone();
                                            let label = cve_id.clone();
                                            let selected_vuln = selected_vuln.clone();
                                            html_nested!(
                                                <MenuAction onclick={Callback::from(move |()| selected_vuln.set(Some((id, cve_id.clone()))))}>
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
                    </FormGroup>
                    <FormGroup label="Released">
                        <TextInput
                            placeholder="YYYY-MM-DD"
                            value={(*released).clone()}
                            onchange={{ let released = released.clone(); Callback::from(move |value: String| released.set(value)) }}
                            state={if parsed_released.is_ok() { InputState::Default } else { InputState::Error }}
                        />
                    </FormGroup>
                    <FormGroup label="Description">
                        <TextArea
                            value={(*description).clone()}
                            onchange={{ let description = description.clone(); Callback::from(move |value: String| description.set(value)) }}
                            rows={3}
                            resize={ResizeOrientation::Vertical}
                        />
                    </FormGroup>
                </Form>
            </Modal>
        </Bullseye>
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn patch(url: &str, description: Option<&str>, cve: Option<&str>) -> data::Patch {
        data::Patch {
            id: 1,
            url: url.to_string(),
            released: None,
            description: description.map(|s| s.to_string()),
            vulnerability_id: 1,
            vulnerability: cve.map(|cve_id| data::VulnerabilityRef {
                id: 1,
                cve_id: cve_id.to_string(),
            }),
        }
    }

    #[test]
    fn empty_filter_passes() {
        assert!(matches(&patch("https://acme.example.com/fix", None, None), ""));
    }

    #[test]
    fn matches_linked_cve() {
        let p = patch(
            "https://acme.example.com/fix",
            Some("Fixes the parser overflow"),
            Some("CVE-2024-0001"),
        );
        assert!(matches(&p, "cve-2024-0001"));
        assert!(matches(&p, "parser"));
        assert!(matches(&p, "acme.example.com"));
        assert!(!matches(&p, "CVE-2023"));
    }
}
