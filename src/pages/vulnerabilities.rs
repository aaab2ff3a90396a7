use patternfly_yew::prelude::*;
use std::rc::Rc;
use std::time::Duration;
use strum::IntoEnumIterator;
use vulntracker_ui_backend::{
    data, use_backend, PatchService, SoftwareService, ThreatService, VulnerabilityService,
};
use vulntracker_ui_common::{
    use_apply_pagination,
    utils::{auth::use_can_edit, time::parse_date, OrNone},
};
use vulntracker_ui_components::{
    common::PageHeading, confirm::ConfirmationModal, cvss::CvssScore, severity::SeverityLabel,
    table_wrapper::TableWrapper, time::Date, toolbar::ListToolbar,
};
use yew::prelude::*;
use yew_more_hooks::prelude::*;
use yew_oauth2::prelude::*;

/// Client-side filter. Free text matches the CVE id, the summary, and the
/// affected software name. The severity filter is an exact match.
fn matches(vuln: &data::Vulnerability, filter: &str, severity: Option<data::Severity>) -> bool {
    if let Some(severity) = severity {
        if vuln.severity != Some(severity) {
            return false;
        }
    }

    if filter.is_empty() {
        return true;
    }

    let filter = filter.to_lowercase();
    vuln.cve_id.to_lowercase().contains(&filter)
        || vuln
            .summary
            .as_deref()
            .map_or(false, |summary| summary.to_lowercase().contains(&filter))
        || vuln
            .software
            .as_ref()
            .map_or(false, |software| software.name.to_lowercase().contains(&filter))
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Column {
    CveId,
    Severity,
    Score,
    Published,
    Software,
    Threats,
    Patches,
    Actions,
}

#[derive(PartialEq, Properties, Clone)]
struct VulnerabilityEntry {
    vuln: Rc<data::Vulnerability>,
    can_edit: bool,
    ondelete: Callback<()>,
    onchanged: Callback<()>,
}

impl TableEntryRenderer<Column> for VulnerabilityEntry {
    fn render_cell(&self, context: CellContext<'_, Column>) -> Cell {
        match context.column {
            Column::CveId => html!({ &self.vuln.cve_id }),
            Column::Severity => OrNone(
                self.vuln
                    .severity
                    .map(|severity| html!(<SeverityLabel {severity}/>)),
            )
            .into(),
            Column::Score => OrNone(self.vuln.cvss_score.map(|score| html!(<CvssScore {score}/>))).into(),
            Column::Published => OrNone(
                self.vuln
                    .published
                    .map(|timestamp| html!(<Date {timestamp}/>)),
            )
            .into(),
            Column::Software => OrNone(
                self.vuln
                    .software
                    .as_ref()
                    .map(|software| html!({ software.label() })),
            )
            .into(),
            Column::Threats => html!({ self.vuln.threats.len() }),
            Column::Patches => html!({ self.vuln.patches.len() }),
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
            <VulnerabilityDetails
                vuln={self.vuln.clone()}
                onchanged={self.onchanged.clone()}
            />
        );
        vec![Span::max(html)]
    }
}

#[function_component(Vulnerabilities)]
pub fn vulnerabilities() -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let can_edit = use_can_edit();
    let toaster = use_toaster().expect("Must be nested inside a ToastViewer");
    let backdrop = use_backdrop();

    let refresh = use_state_eq(|| 0usize);
    // records created since the last fetch, shown on top of the list
    let created = use_state(Vec::<data::Vulnerability>::new);

    let fetch = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        use_async_with_cloned_deps(
            move |_| async move {
                VulnerabilityService::new(backend, access_token)
                    .list()
                    .await
                    .map(Rc::new)
                    .map_err(|err| err.to_string())
            },
            *refresh,
        )
    };

    let filter = use_state_eq(String::new);
    let severity = use_state_eq(|| Option::<data::Severity>::None);

    let onsetfilter = use_callback(filter.clone(), |value: String, filter| {
        filter.set(value.trim().to_string())
    });
    let onclearfilter = use_callback(filter.clone(), |(), filter| filter.set(String::new()));

    let fetched = match &*fetch {
        UseAsyncState::Ready(Ok(entries)) => Some(entries.clone()),
        _ => None,
    };

    let filtered = use_memo(
        (fetched, (*created).clone(), (*filter).clone(), *severity),
        |(fetched, created, filter, severity)| {
            let mut entries = created.clone();
            if let Some(fetched) = fetched {
                entries.extend(fetched.iter().cloned());
            }
            entries.retain(|vuln| matches(vuln, filter, *severity));
            entries
        },
    );

    // bump the refresh counter, dropping optimistic entries with it
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
                let result = VulnerabilityService::new(backend, access_token).delete(id).await;
                pending_delete.set(None);
                match result {
                    Ok(()) => {
                        toaster.toast(Toast {
                            r#type: AlertType::Success,
                            title: "Vulnerability deleted".into(),
                            timeout: Some(Duration::from_secs(5)),
                            ..Default::default()
                        });
                        onchanged.emit(());
                    }
                    Err(err) => {
                        toaster.toast(Toast {
                            r#type: AlertType::Danger,
                            title: "Failed to delete vulnerability".into(),
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
                        title="Delete vulnerability"
                        message="This removes the vulnerability and its threat and patch links."
                        onconfirm={Callback::from(move |()| pending_delete.set(Some(id)))}
                    />
                ));
            }
        })
    };

    let oncreated = use_callback(
        (created.clone(), toaster.clone()),
        |vuln: data::Vulnerability, (created, toaster)| {
            toaster.toast(Toast {
                r#type: AlertType::Success,
                title: format!("Created {}", vuln.cve_id),
                timeout: Some(Duration::from_secs(5)),
                ..Default::default()
            });
            let mut entries = (**created).clone();
            entries.insert(0, vuln);
            created.set(entries);
        },
    );

    let oncreate = {
        let backdrop = backdrop.clone();
        use_callback(oncreated, move |(), oncreated| {
            let oncreated = oncreated.clone();
            if let Some(backdrop) = &backdrop {
                backdrop.open(html!(<CreateVulnerabilityModal {oncreated} />));
            }
        })
    };

    let rows = {
        let onchanged = onchanged.clone();
        use_memo(
            (filtered, ondelete, can_edit),
            move |(filtered, ondelete, can_edit)| {
                filtered
                    .iter()
                    .map(|vuln| {
                        let id = vuln.id;
                        VulnerabilityEntry {
                            vuln: Rc::new(vuln.clone()),
                            can_edit: *can_edit,
                            ondelete: ondelete.reform(move |()| id),
                            onchanged: onchanged.clone(),
                        }
                    })
                    .collect::<Vec<_>>()
            },
        )
    };

    let total = rows.len();
    let pagination = use_pagination(Some(total), Default::default);
    let page_rows = use_apply_pagination(rows, pagination.control.clone());
    let (entries, onexpand) = use_table_data(MemoizedTableModel::new(page_rows));

    let header = vec![
        yew::props!(TableColumnProperties<Column> {
            index: Column::CveId,
            label: "CVE",
            width: ColumnWidth::Percent(15)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Severity,
            label: "Severity",
            width: ColumnWidth::Percent(10)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Score,
            label: "CVSS",
            width: ColumnWidth::Percent(10)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Published,
            label: "Published",
            width: ColumnWidth::Percent(15)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Software,
            label: "Software",
            width: ColumnWidth::Percent(25)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Threats,
            label: "Threats",
            width: ColumnWidth::Percent(10)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Patches,
            label: "Patches",
            width: ColumnWidth::Percent(10)
        }),
        yew::props!(TableColumnProperties<Column> {
            index: Column::Actions,
            label: "",
            width: ColumnWidth::FitContent
        }),
    ];

    let onsetseverity = use_callback(severity.clone(), |value, severity| severity.set(value));

    html!(
        <>
            <PageHeading subtitle="Known vulnerabilities in tracked software">
                { "Vulnerabilities" }
            </PageHeading>
            <PageSection variant={PageSectionVariant::Default} fill=true>
                <ListToolbar
                    filter={(*filter).clone()}
                    {onsetfilter}
                    {onclearfilter}
                    pagination={pagination.clone()}
                    {total}
                    placeholder="Filter by CVE, summary or software"
                >
                    <ToolbarItem>
                        <SeverityFilter selected={*severity} onselect={onsetseverity} />
                    </ToolbarItem>
                    { for can_edit.then(|| html_nested!(
                        <ToolbarItem>
                            <Button
                                variant={ButtonVariant::Primary}
                                label="Add vulnerability"
                                onclick={oncreate.reform(|_|())}
                            />
                        </ToolbarItem>
                    ))}
                </ListToolbar>

                <TableWrapper<Column, UseTableData<Column, MemoizedTableModel<VulnerabilityEntry>>>
                    loading={fetch.is_processing()}
                    error={fetch.error().cloned()}
                    empty={entries.is_empty()}
                    {header}
                >
                    <Table<Column, UseTableData<Column, MemoizedTableModel<VulnerabilityEntry>>>
                        {entries}
                        mode={TableMode::Expandable}
                        {onexpand}
                    />
                </TableWrapper<Column, UseTableData<Column, MemoizedTableModel<VulnerabilityEntry>>>>

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
struct SeverityFilterProperties {
    selected: Option<data::Severity>,
    onselect: Callback<Option<data::Severity>>,
}

#[function_component(SeverityFilter)]
fn severity_filter(props: &SeverityFilterProperties) -> Html {
    let text = match props.selected {
        Some(severity) => severity.to_string(),
        None => "Any severity".to_string(),
    };

    html!(
        <Dropdown {text}>
            <MenuAction onclick={props.onselect.reform(|_| None)}>
                { "Any severity" }
            </MenuAction>
            <ListDivider/>
            { for data::Severity::iter().map(|severity| html_nested!(
                <MenuAction onclick={props.onselect.reform(move |_| Some(severity))}>
                    { severity.to_string() }
                </MenuAction>
            ))}
        </Dropdown>
    )
}

#[derive(PartialEq, Properties)]
struct VulnerabilityDetailsProperties {
    vuln: Rc<data::Vulnerability>,
    onchanged: Callback<()>,
}

#[function_component(VulnerabilityDetails)]
fn vulnerability_details(props: &VulnerabilityDetailsProperties) -> Html {
    let can_edit = use_can_edit();

    html!(
        <Grid gutter=true>
            if let Some(summary) = &props.vuln.summary {
                <GridItem cols={[12]}>
                    <Content>
                        <p>{ summary }</p>
                    </Content>
                </GridItem>
            }
            <GridItem cols={[6]}>
                <Card>
                    <CardTitle>{ "Threats" }</CardTitle>
                    <CardBody>
                        if props.vuln.threats.is_empty() {
                            { "No linked threats." }
                        } else {
                            <List r#type={ListType::Basic}>
                                { for props.vuln.threats.iter().map(|threat| html_nested!(
                                    <ListItem>
                                        { &threat.name }
                                        if let Some(kind) = &threat.threat_type_name {
                                            {" "}
                                            <Label label={kind.clone()} compact=true color={Color::Blue} />
                                        }
                                    </ListItem>
                                ))}
                            </List>
                        }
                        if can_edit {
                            <LinkThreatForm
                                vuln={props.vuln.clone()}
                                onchanged={props.onchanged.clone()}
                            />
                        }
                    </CardBody>
                </Card>
            </GridItem>
            <GridItem cols={[6]}>
                <Card>
                    <CardTitle>{ "Patches" }</CardTitle>
                    <CardBody>
                        if props.vuln.patches.is_empty() {
                            { "No linked patches." }
                        } else {
                            <List r#type={ListType::Basic}>
                                { for props.vuln.patches.iter().map(|patch| html_nested!(
                                    <ListItem>
                                        <a href={patch.url.clone()} target="_blank">{ &patch.url }</a>
                                        if let Some(released) = patch.released {
                                            {" "}
                                            <Date timestamp={released} />
                                        }
                                    </ListItem>
                                ))}
                            </List>
                        }
                        if can_edit {
                            <LinkPatchForm
                                vuln={props.vuln.clone()}
                                onchanged={props.onchanged.clone()}
                            />
                        }
                    </CardBody>
                </Card>
            </GridItem>
        </Grid>
    )
}

#[derive(PartialEq, Properties)]
struct LinkPatchFormProperties {
    vuln: Rc<data::Vulnerability>,
    onchanged: Callback<()>,
}

/// Inline control to associate an existing patch with this vulnerability.
#[function_component(LinkPatchForm)]
fn link_patch_form(props: &LinkPatchFormProperties) -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let toaster = use_toaster().expect("Must be nested inside a ToastViewer");

    let patches = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        use_async_with_options(
            async move {
                PatchService::new(backend, access_token)
                    .list()
                    .await
                    .map(Rc::new)
                    .map_err(|err| err.to_string())
            },
            UseAsyncOptions::enable_auto(),
        )
    };

    let selected = use_state_eq(|| Option::<(i64, String)>::None);
    let pending = use_state_eq(|| Option::<i64>::None);

    let _submit = {
        let vuln_id = props.vuln.id;
        let onchanged = props.onchanged.clone();
        let selected = selected.clone();
        let pending = pending.clone();
        let deps = (*pending).clone();
        use_async_with_cloned_deps(
            move |patch_id: Option<i64>| async move {
                let Some(patch_id) = patch_id else {
                    return Ok::<_, String>(());
                };
                let result = VulnerabilityService::new(backend, access_token)
                    .link_patch(vuln_id, patch_id)
                    .await;
                pending.set(None);
                match result {
                    Ok(()) => {
                        toaster.toast(Toast {
                            r#type: AlertType::Success,
                            title: "Patch linked".into(),
                            timeout: Some(Duration::from_secs(5)),
                            ..Default::default()
                        });
                        selected.set(None);
                        onchanged.emit(());
                    }
                    Err(err) => {
                        toaster.toast(Toast {
                            r#type: AlertType::Danger,
                            title: "Failed to link patch".into(),
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

    let linked: Vec<i64> = props.vuln.patches.iter().map(|patch| patch.id).collect();
    let choices: Vec<(i64, String)> = match &*patches {
        UseAsyncState::Ready(Ok(patches)) => patches
            .iter()
            .filter(|patch| !linked.contains(&patch.id))
            .map(|patch| (patch.id, patch.url.clone()))
            .collect(),
        _ => vec![],
    };

    let text = match &*selected {
        Some((_, url)) => url.clone(),
        None => "Select a patch".to_string(),
    };

    let onlink = use_callback(
        (selected.clone(), pending.clone()),
        |(), (selected, pending)| {
            if let Some((id, _)) = &**selected {
                pending.set(Some(*id));
            }
        },
    );

    html!(
        <Split gutter=true>
            <SplitItem>
                <Dropdown {text} disabled={choices.is_empty()}>
                    { for choices.into_iter().map(|(id, url)| {
                        let label = url.clone();
                        let selected = selected.clone();
                        html_nested!(
                            <MenuAction onclick={Callback::from(move |()| selected.set(Some((id, url.clone()))))}>
                                { label }
                            </MenuAction>
                        )
                    })}
                </Dropdown>
            </SplitItem>
            <SplitItem>
                <Button
                    variant={ButtonVariant::Secondary}
                    label="Link patch"
                    disabled={selected.is_none() || pending.is_some()}
                    onclick={onlink.reform(|_|())}
                />
            </SplitItem>
        </Split>
    )
}

#[derive(PartialEq, Properties)]
struct LinkThreatFormProperties {
    vuln: Rc<data::Vulnerability>,
    onchanged: Callback<()>,
}

/// Inline control to associate an existing threat with this vulnerability.
/// Threats already linked are left out of the choices.
#[function_component(LinkThreatForm)]
fn link_threat_form(props: &LinkThreatFormProperties) -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let toaster = use_toaster().expect("Must be nested inside a ToastViewer");

    let threats = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        use_async_with_options(
            async move {
                ThreatService::new(backend, access_token)
                    .list()
                    .await
                    .map(Rc::new)
                    .map_err(|err| err.to_string())
            },
            UseAsyncOptions::enable_auto(),
        )
    };

    let selected = use_state_eq(|| Option::<(i64, String)>::None);
    let pending = use_state_eq(|| Option::<i64>::None);

    let _submit = {
        let vuln_id = props.vuln.id;
        let onchanged = props.onchanged.clone();
        let selected = selected.clone();
        let pending = pending.clone();
        let deps = (*pending).clone();
        use_async_with_cloned_deps(
            move |threat_id: Option<i64>| async move {
                let Some(threat_id) = threat_id else {
                    return Ok::<_, String>(());
                };
                let result = VulnerabilityService::new(backend, access_token)
                    .link_threat(vuln_id, threat_id)
                    .await;
                pending.set(None);
                match result {
                    Ok(()) => {
                        toaster.toast(Toast {
                            r#type: AlertType::Success,
                            title: "Threat linked".into(),
                            timeout: Some(Duration::from_secs(5)),
                            ..Default::default()
                        });
                        selected.set(None);
                        onchanged.emit(());
                    }
                    Err(err) => {
                        toaster.toast(Toast {
                            r#type: AlertType::Danger,
                            title: "Failed to link threat".into(),
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

    let linked: Vec<i64> = props.vuln.threats.iter().map(|threat| threat.id).collect();
    let choices: Vec<(i64, String)> = match &*threats {
        UseAsyncState::Ready(Ok(threats)) => threats
            .iter()
            .filter(|threat| !linked.contains(&threat.id))
            .map(|threat| (threat.id, threat.name.clone()))
            .collect(),
        _ => vec![],
    };

    let text = match &*selected {
        Some((_, name)) => name.clone(),
        None => "Select a threat".to_string(),
    };

    let onlink = use_callback(
        (selected.clone(), pending.clone()),
        |(), (selected, pending)| {
            if let Some((id, _)) = &**selected {
                pending.set(Some(*id));
            }
        },
    );

    html!(
        <Split gutter=true>
            <SplitItem>
                <Dropdown {text} disabled={choices.is_empty()}>
                    { for choices.into_iter().map(|(id, name)| {
                        let label = name.clone();
                        let selected = selected.clone();
                        html_nested!(
                            <MenuAction onclick={Callback::from(move |()| selected.set(Some((id, name.clone()))))}>
                                { label }
                            </MenuAction>
                        )
                    })}
                </Dropdown>
            </SplitItem>
            <SplitItem>
                <Button
                    variant={ButtonVariant::Secondary}
                    label="Link threat"
                    disabled={selected.is_none() || pending.is_some()}
                    onclick={onlink.reform(|_|())}
                />
            </SplitItem>
        </Split>
    )
}

#[derive(PartialEq, Properties)]
struct CreateVulnerabilityModalProperties {
    oncreated: Callback<data::Vulnerability>,
}

#[function_component(CreateVulnerabilityModal)]
fn create_vulnerability_modal(props: &CreateVulnerabilityModalProperties) -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();
    let backdrop = use_backdrop();

    // lookup list for the software choice
    let software = {
        let backend = backend.clone();
        let access_token = access_token.clone();
        use_async_with_options(
            async move {
                SoftwareService::new(backend, access_token)
                    .list()
                    .await
                    .map(Rc::new)
                    .map_err(|err| err.to_string())
            },
            UseAsyncOptions::enable_auto(),
        )
    };

    let cve_id = use_state_eq(String::new);
    let summary = use_state_eq(String::new);
    let score = use_state_eq(String::new);
    let published = use_state_eq(String::new);
    let severity = use_state_eq(|| Option::<data::Severity>::None);
    let selected_software = use_state_eq(|| Option::<(i64, String)>::None);

    let pending = use_state_eq(|| Option::<data::CreateVulnerability>::None);

    let submit = {
        let oncreated = props.oncreated.clone();
        let backdrop = backdrop.clone();
        let pending = pending.clone();
        let deps = (*pending).clone();
        use_async_with_cloned_deps(
            move |payload: Option<data::CreateVulnerability>| async move {
                let Some(payload) = payload else {
                    return Ok(());
                };
                let result = VulnerabilityService::new(backend, access_token)
                    .create(&payload)
                    .await;
                pending.set(None);
                match result {
                    Ok(vuln) => {
                        oncreated.emit(vuln);
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

    // form validation, recomputed every render
    let parsed_score = match score.trim() {
        "" => Ok(None),
        value => value
            .parse::<f64>()
            .map(Some)
            .map_err(|err| err.to_string()),
    };
    let parsed_published = parse_date(&published);

    let valid = !cve_id.trim().is_empty()
        && selected_software.is_some()
        && parsed_score.is_ok()
        && parsed_published.is_ok();

    let onsubmit = use_callback(
        (
            pending.clone(),
            cve_id.clone(),
            summary.clone(),
            score.clone(),
            published.clone(),
            severity.clone(),
            selected_software.clone(),
        ),
        |(), (pending, cve_id, summary, score, published, severity, selected_software)| {
            let Some((software_id, _)) = &**selected_software else {
                return;
            };
            let Ok(cvss_score) = (match score.trim() {
                "" => Ok(None),
                value => value.parse::<f64>().map(Some),
            }) else {
                return;
            };
            let Ok(published) = parse_date(published) else {
                return;
            };

            // an explicit severity wins, otherwise derive the band from the score
            let severity = (**severity).or_else(|| cvss_score.map(data::Severity::from_score));

            pending.set(Some(data::CreateVulnerability {
                software_id: *software_id,
                cve_id: cve_id.trim().to_string(),
                cvss_score,
                summary: match summary.trim() {
                    "" => None,
                    value => Some(value.to_string()),
                },
                severity,
                published,
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
                form="create-vulnerability-form"
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

    let software_text = match &*selected_software {
        Some((_, name)) => name.clone(),
        None => "Select software".to_string(),
    };

    html!(
        <Bullseye plain=true>
            <Modal
                title="Add vulnerability"
                variant={ModalVariant::Medium}
                {footer}
            >
                if let UseAsyncState::Ready(Err(err)) = &*submit {
                    <Alert inline=true title="Failed to create vulnerability" r#type={AlertType::Danger}>
                        { err.clone() }
                    </Alert>
                }
                <Form id="create-vulnerability-form" method="dialog">
                    <FormGroup label="CVE" required=true>
                        <TextInput
                            placeholder="CVE-2024-0001"
                            value={(*cve_id).clone()}
                            onchange={{ let cve_id = cve_id.clone(); Callback::from(move |value: String| cve_id.set(value)) }}
                            autofocus=true
                        />
                    </FormGroup>
                    <FormGroup label="Software" required=true>
                        {
                            match &*software {
                                UseAsyncState::Ready(Ok(software)) => html!(
                                    <Dropdown text={software_text}>
                                        { for software.iter().map(|entry| {
                                            let label = entry.label();
                                            let id = entry.id;
                                            let text = label.clone();
                                            let selected_software = selected_software.clone();
                                            html_nested!(
                                                <MenuAction onclick={Callback::from(move |()| selected_software.set(Some((id, label.clone()))))}>
                                                    { text }
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
                    <FormGroup label="Summary">
                        <TextArea
                            value={(*summary).clone()}
                            onchange={{ let summary = summary.clone(); Callback::from(move |value: String| summary.set(value)) }}
                            rows={3}
                            resize={ResizeOrientation::Vertical}
                        />
                    </FormGroup>
                    <FormGroup label="CVSS score">
                        <TextInput
                            placeholder="0.0 – 10.0"
                            value={(*score).clone()}
                            onchange={{ let score = score.clone(); Callback::from(move |value: String| score.set(value)) }}
                            state={if parsed_score.is_ok() { InputState::Default } else { InputState::Error }}
                        />
                    </FormGroup>
                    <FormGroup label="Severity">
                        <SeverityFilter
                            selected={*severity}
                            onselect={{ let severity = severity.clone(); Callback::from(move |value| severity.set(value)) }}
                        />
                    </FormGroup>
                    <FormGroup label="Published">
                        <TextInput
                            placeholder="YYYY-MM-DD"
                            value={(*published).clone()}
                            onchange={{ let published = published.clone(); Callback::from(move |value: String| published.set(value)) }}
                            state={if parsed_published.is_ok() { InputState::Default } else { InputState::Error }}
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

    fn vuln(cve_id: &str, summary: Option<&str>, severity: Option<data::Severity>) -> data::Vulnerability {
        data::Vulnerability {
            id: 1,
            cve_id: cve_id.to_string(),
            summary: summary.map(|s| s.to_string()),
            severity,
            cvss_score: None,
            published: None,
            software_id: 1,
            software: None,
            threats: vec![],
            patches: vec![],
        }
    }

    #[test]
    fn empty_filter_passes() {
        assert!(matches(&vuln("CVE-2024-0001", None, None), "", None));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let v = vuln("CVE-2024-0001", Some("Heap overflow in parser"), None);
        assert!(matches(&v, "heap", None));
        assert!(matches(&v, "cve-2024", None));
        assert!(!matches(&v, "use-after-free", None));
    }

    #[test]
    fn severity_filter_is_exact() {
        let v = vuln("CVE-2024-0001", None, Some(data::Severity::High));
        assert!(matches(&v, "", Some(data::Severity::High)));
        assert!(!matches(&v, "", Some(data::Severity::Critical)));
        // unrated records never match a severity filter
        let unrated = vuln("CVE-2024-0002", None, None);
        assert!(!matches(&unrated, "", Some(data::Severity::Low)));
    }
}
