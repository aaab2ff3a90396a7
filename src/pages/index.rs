use patternfly_yew::prelude::*;
use std::rc::Rc;
use strum::IntoEnumIterator;
use vulntracker_ui_backend::{
    data, use_backend, SoftwareService, VendorService, VulnerabilityService,
};
use vulntracker_ui_components::{
    async_state_renderer::async_content, common::PageHeading, severity::SeverityLabel,
};
use yew::prelude::*;
use yew_more_hooks::prelude::*;
use yew_oauth2::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct Summary {
    vendors: usize,
    software: usize,
    vulnerabilities: usize,
    by_severity: Vec<(data::Severity, usize)>,
    unrated: usize,
}

/// The counts the dashboard cards show. Derived client-side, the backend has
/// no aggregation endpoint.
fn summarize(vendors: usize, software: usize, vulnerabilities: &[data::Vulnerability]) -> Summary {
    let by_severity = data::Severity::iter()
        .map(|severity| {
            let count = vulnerabilities
                .iter()
                .filter(|vuln| vuln.severity == Some(severity))
                .count();
            (severity, count)
        })
        .collect();

    let unrated = vulnerabilities
        .iter()
        .filter(|vuln| vuln.severity.is_none())
        .count();

    Summary {
        vendors,
        software,
        vulnerabilities: vulnerabilities.len(),
        by_severity,
        unrated,
    }
}

#[function_component(Index)]
pub fn index() -> Html {
    let backend = use_backend();
    let access_token = use_latest_access_token();

    let summary = use_async_with_cloned_deps(
        move |()| async move {
            let vendors = VendorService::new(backend.clone(), access_token.clone())
                .list()
                .await
                .map_err(|err| err.to_string())?;
            let software = SoftwareService::new(backend.clone(), access_token.clone())
                .list()
                .await
                .map_err(|err| err.to_string())?;
            let vulnerabilities = VulnerabilityService::new(backend, access_token)
                .list()
                .await
                .map_err(|err| err.to_string())?;

            Ok::<_, String>(Rc::new(summarize(
                vendors.len(),
                software.len(),
                &vulnerabilities,
            )))
        },
        (),
    );

    html!(
        <>
            <PageHeading subtitle="Vendors, software, and the vulnerabilities that affect them">
                { "Dashboard" }
            </PageHeading>
            <PageSection variant={PageSectionVariant::Default} fill=true>
                {
                    async_content(&*summary, |summary| html!(
                        <Grid gutter=true>
                            <GridItem cols={[4]}>
                                <Card>
                                    <CardTitle>{ "Vendors" }</CardTitle>
                                    <CardBody>
                                        <Title level={Level::H2} size={Size::XXXXLarge}>
                                            { summary.vendors }
                                        </Title>
                                    </CardBody>
                                </Card>
                            </GridItem>
                            <GridItem cols={[4]}>
                                <Card>
                                    <CardTitle>{ "Software" }</CardTitle>
                                    <CardBody>
                                        <Title level={Level::H2} size={Size::XXXXLarge}>
                                            { summary.software }
                                        </Title>
                                    </CardBody>
                                </Card>
                            </GridItem>
                            <GridItem cols={[4]}>
                                <Card>
                                    <CardTitle>{ "Vulnerabilities" }</CardTitle>
                                    <CardBody>
                                        <Title level={Level::H2} size={Size::XXXXLarge}>
                                            { summary.vulnerabilities }
                                        </Title>
                                    </CardBody>
                                </Card>
                            </GridItem>
                            <GridItem cols={[12]}>
                                <Card>
                                    <CardTitle>{ "By severity" }</CardTitle>
                                    <CardBody>
                                        <Split gutter=true>
                                            { for summary.by_severity.iter().map(|(severity, count)| html_nested!(
                                                <SplitItem>
                                                    <SeverityLabel severity={*severity} />
                                                    {" "}
                                                    { count }
                                                </SplitItem>
                                            ))}
                                            { for (summary.unrated > 0).then(|| html_nested!(
                                                <SplitItem>
                                                    <Label label="Unrated" compact=true />
                                                    {" "}
                                                    { summary.unrated }
                                                </SplitItem>
                                            ))}
                                        </Split>
                                    </CardBody>
                                </Card>
                            </GridItem>
                        </Grid>
                    ))
                }
            </PageSection>
        </>
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn vuln(id: i64, severity: Option<data::Severity>) -> data::Vulnerability {
        data::Vulnerability {
            id,
            cve_id: format!("CVE-2024-{id:04}"),
            summary: None,
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
    fn severity_breakdown() {
        let vulns = vec![
            vuln(1, Some(data::Severity::Critical)),
            vuln(2, Some(data::Severity::Critical)),
            vuln(3, Some(data::Severity::Low)),
            vuln(4, None),
        ];

        let summary = summarize(2, 3, &vulns);

        assert_eq!(summary.vendors, 2);
        assert_eq!(summary.software, 3);
        assert_eq!(summary.vulnerabilities, 4);
        assert_eq!(summary.unrated, 1);

        let critical = summary
            .by_severity
            .iter()
            .find(|(severity, _)| *severity == data::Severity::Critical)
            .unwrap();
        assert_eq!(critical.1, 2);
    }
}
