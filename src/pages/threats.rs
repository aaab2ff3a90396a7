use patternfly_yew::prelude::*;
use std::rc::Rc;
use std::time::Duration;
use vulntracker_ui_backend::{data, use_backend, ThreatService};
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

/// Free text match over the threat name and description, with an exact
/// threat-type filter on top.
fn matches(threat: &data::Threat, filter: &str, threat_type: Option<i64>) -> bool {
    if let Some(threat_type) = threat_type {
        if threat.threat_type_id != threat_type {
            return false;
        }
    }

    if filter.is_empty() {
        return true;
    }

    let filter = filter.to_lowercase();
    threat.name.to_lowercase().contains(&filter)
        || threat
            .description
            .as_deref()
            .map_or(false, |description| description.to_lowercase().contains(&filter))
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Column {
    Name,
    Type,
    Vulnerabilities,
    Actions,
}

#[derive(PartialEq, Properties, Clone)]
struct ThreatEntry {
    threat: data::Threat,
    can_edit: bool,
    ondelete: Callback<()>,
}

impl TableEntryRenderer<Column> for ThreatEntry {
    fn render_cell(&self, context: CellContext<'_, Column>) -> Cell {
        match context.column {
            Column::Name => html!({ &self.threat.name }),
            Column::Type => OrNone(
                self.threat
                    .threat_type_name
                    .as_ref()
                    .map(|kind| html!(<Label label={kind.clone()} compact=true color={Color::Blue} />)),
            )
            .into(),
            Column::Vulnerabilities => html!({ self.threat.vulnerabilities.len() }),
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
                if let Some(description) = &self.threat.description {
                    <p>{ description }</p>
                }
                if self.threat.vulnerabilities.is_empty() {
                    <p>{ "Not linked to any vulnerability." }</p>
                } else {
                    <List r#type={ListType::Basic}>
                        { for self.threat.vulnerabilities.iter().map(|vuln| html_nested!(<ListItem>{ &vuln.cve_id }</ListItem>)) }
                    </List>
                }
            </Content>
        );
        vec![Span::max(html)]
    }
}

#[function_component(Threats)]
pub fn threats() -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let can_edit = use_can_edit();
    let toaster = use_toaster().expect("Must be nested inside a ToastViewer");
    let backdrop = use_backdrop();

    let refresh = use_state_eq(|| 0usize);
    let created = use_state(Vec::<data::Threat>::new);

    let fetch = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        use_async_with_cloned_deps(
            move |_| async move {
                ThreatService::new(backend, access_token)
                    .list()
                    .await
                    .map(Rc::new)
                    .map_err(|err| err.to_string())
            },
            *refresh,
        )
    };

    // the threat-type lookup backs both the filter and the create form
    let types = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        use_async_with_options(
            async move {
                ThreatService::new(backend, access_token)
                    .types()
                    .await
                    .map(Rc::new)
                    .map_err(|err| err.to_string())
            },
            UseAsyncOptions::enable_auto(),
        )
    };

    let types_list: Rc<Vec<data::ThreatType>> = match &*types {
        UseAsyncState::Ready(Ok(types)) => types.clone(),
        _ => Rc::new(vec![]),
    };

    let filter = use_state_eq(String::new);
    let threat_type = use_state_eq(|| Option::<i64>::None);

    let onsetfilter = use_callback(filter.clone(), |value: String, filter| {
        filter.set(value.trim().to_string())
    });
    let onclearfilter = use_callback(filter.clone(), |(), filter| filter.set(String::new()));

    let fetched = match &*fetch {
        UseAsyncState::Ready(Ok(entries)) => Some(entries.clone()),
        _ => None,
    };

    let filtered = use_memo(
        (fetched, (*created).clone(), (*filter).clone(), *threat_type),
        |(fetched, created, filter, threat_type)| {
            let mut entries = created.clone();
            if let Some(fetched) = fetched {
                entries.extend(fetched.iter().cloned());
            }
            entries.retain(|threat| matches(threat, filter, *threat_type));
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
                let result = ThreatService::new(backend, access_token).delete(id).await;
                pending_delete.set(None);
                match result {
                    Ok(()) => {
                        toaster.toast(Toast {
                            r#type: AlertType::Success,
                            title: "Threat deleted".into(),
                            timeout: Some(Duration::from_secs(5)),
                            ..Default::default()
                        });
                        onchanged.emit(());
                    }
                    Err(err) => {
                        toaster.toast(Toast {
                            r#type: AlertType::Danger,
                            title: "Failed to delete threat".into(),
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
                        title="Delete threat"
                        message="This removes the threat and its vulnerability links."
                        onconfirm={Callback::from(move |()| pending_delete.set(Some(id)))}
                    />
                ));
            }
        })
    };

    let oncreated = use_callback(
        (created.clone(), toaster.clone()),
        |threat: data::Threat, (created, toaster)| {
            toaster.toast(Toast {
                r#type: AlertType::Success,
                title: format!("Created {}", threat.name),
                timeout: Some(Duration::from_secs(5)),
                ..Default::default()
            });
            let mut entries = (**created).clone();
            entries.insert(0, threat);
            created.set(entries);
        },
    );

    let oncreate = {
        let backdrop = backdrop.clone();
        use_callback(
            (oncreated, types_list.clone()),
            move |(), (oncreated, types_list)| {
                let oncreated = oncreated.clone();
                let types = types_list.clone();
                if let Some(backdrop) = &backdrop {
                    backdrop.open(html!(<CreateThreatModal {oncreated} {types} />));
                }
            },
        )
    };

    let rows = use_memo(
        (filtered, ondelete, can_edit),
        |(filtered, ondelete, can_edit)| {
            filtered
                .iter()
                .map(|threat| {
                    let id = threat.id;
                    ThreatEntry {
                        threat: threat.clone(),
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
            index: Column::Name,
            label: "Name",
            width: ColumnWidth::Percent(40)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Type,
            label: "Type",
            width: ColumnWidth::Percent(25)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Vulnerabilities,
            label: "Vulnerabilities",
            width: ColumnWidth::Percent(25)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Actions,
            label: "",
            width: ColumnWidth::FitContent
        }),
    ];

    let onsettype = use_callback(threat_type.clone(), |value, threat_type| {
        threat_type.set(value)
    });

    let type_text = (*threat_type)
        .and_then(|selected| {
            types_list
                .iter()
                .find(|kind| kind.id == selected)
                .map(|kind| kind.name.clone())
        })
        .unwrap_or_else(|| "Any type".to_string());

    html!(
        <>
            <PageHeading subtitle="Threat actors and techniques linked to vulnerabilities">
                { "Threats" }
            </PageHeading>
            <PageSection variant={PageSectionVariant::Default} fill=true>
                <ListToolbar
                    filter={(*filter).clone()}
                    {onsetfilter}
                    {onclearfilter}
                    pagination={pagination.clone()}
                    {total}
                    placeholder="Filter by name or description"
                >
                    <ToolbarItem>
                        <Dropdown text={type_text}>
                            <MenuAction onclick={onsettype.reform(|_| None)}>
                                { "Any type" }
                            </MenuAction>
                            <ListDivider/>
                            { for types_list.iter().map(|kind| {
                                let id = kind.id;
                                html_nested!(
                                    <MenuAction onclick={onsettype.reform(move |_| Some(id))}>
                                        { kind.name.clone() }
                                    </MenuAction>
                                )
                            })}
                        </Dropdown>
                    </ToolbarItem>
                    { for can_edit.then(|| html_nested!(
                        <ToolbarItem>
                            <Button
                                variant={ButtonVariant::Primary}
                                label="Add threat"
                                onclick={oncreate.reform(|_|())}
                            />
                        </ToolbarItem>
                    ))}
                </ListToolbar>

                <TableWrapper<Column, UseTableData<Column, MemoizedTableModel<ThreatEntry>>>
                    loading={fetch.is_processing()}
                    error={fetch.error().cloned()}
                    empty={entries.is_empty()}
                    {header}
                >
                    <Table<Column, UseTableData<Column, MemoizedTableModel<ThreatEntry>>>
                        {entries}
                        mode={TableMode::Expandable}
                        {onexpand}
                    />
                </TableWrapper<Column, UseTableData<Column, MemoizedTableModel<ThreatEntry>>>>

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
struct CreateThreatModalProperties {
    oncreated: Callback<data::Threat>,
    types: Rc<Vec<data::ThreatType>>,
}

#[function_component(CreateThreatModal)]
fn create_threat_modal(props: &CreateThreatModalProperties) -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let backdrop = use_backdrop();

    let name = use_state_eq(String::new);
    let description = use_state_eq(String::new);
    let selected_type = use_state_eq(|| Option::<(i64, String)>::None);

    let pending = use_state_eq(|| Option::<data::CreateThreat>::None);

    let submit = {
        let oncreated = props.oncreated.clone();
        let backdrop = backdrop.clone();
        let pending = pending.clone();
        let deps = (*pending).clone();
        use_async_with_cloned_deps(
            move |payload: Option<data::CreateThreat>| async move {
                let Some(payload) = payload else {
                    return Ok(());
                };
                let result = ThreatService::new(backend, access_token).create(&payload).await;
                pending.set(None);
                match result {
                    Ok(threat) => {
                        oncreated.emit(threat);
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

    let valid = !name.trim().is_empty() && selected_type.is_some();

    let onsubmit = use_callback(
        (pending.clone(), name.clone(), description.clone(), selected_type.clone()),
        |(), (pending, name, description, selected_type)| {
            let Some((threat_type_id, _)) = &**selected_type else {
                return;
            };
            pending.set(Some(data::CreateThreat {
                name: name.trim().to_string(),
                description: match description.trim() {
                    "" => None,
                    value => Some(value.to_string()),
                },
                threat_type_id: *threat_type_id,
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
                form="create-threat-form"
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

    let type_text = match &*selected_type {
        Some((_, name)) => name.clone(),
        None => "Select a type".to_string(),
    };

    html!(
        <Bullseye plain=true>
            <Modal
                title="Add threat"
                variant={ModalVariant::Medium}
                {footer}
            >
                if let UseAsyncState::Ready(Err(err)) = &*submit {
                    <Alert inline=true title="Failed to create threat" r#type={AlertType::Danger}>
                        { err.clone() }
                    </Alert>
                }
                <Form id="create-threat-form" method="dialog">
                    <FormGroup label="Name" required=true>
                        <TextInput
                            value={(*name).clone()}
                            onchange={{ let name = name.clone(); Callback::from(move |value: String| name.set(value)) }}
                            autofocus=true
                        />
                    </FormGroup>
                    <FormGroup label="Type" required=true>
                        <Dropdown text={type_text}>
                            { for props.types.iter().map(|kind| {
                                let id = kind.id;
                                let name = kind.name.clone();
                                let label = name.clone();
                                let selected_type = selected_type.clone();
                                html_nested!(
                                    <MenuAction onclick={Callback::from(move |()| selected_type.set(Some((id, name.clone()))))}>
                                        { label }
                                    </MenuAction>
                                )
                            })}
                        </Dropdown>
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

    fn threat(name: &str, description: Option<&str>, threat_type_id: i64) -> data::Threat {
        data::Threat {
            id: 1,
            name: name.to_string(),
            description: description.map(|s| s.to_string()),
            threat_type_id,
            threat_type_name: None,
            vulnerabilities: vec![],
        }
    }

    #[test]
    fn empty_filter_passes() {
        assert!(matches(&threat("Ransomware", None, 1), "", None));
    }

    #[test]
    fn type_filter_is_exact() {
        let t = threat("Ransomware", None, 2);
        assert!(matches(&t, "", Some(2)));
        assert!(!matches(&t, "", Some(3)));
    }

    #[test]
    fn text_and_type_combine() {
        let t = threat("Ransomware", Some("Encrypts data for extortion"), 2);
        assert!(matches(&t, "extortion", Some(2)));
        assert!(!matches(&t, "extortion", Some(3)));
        assert!(!matches(&t, "phishing", Some(2)));
    }
}
