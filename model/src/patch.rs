use crate::vuln::VulnerabilityRef;
use time::OffsetDateTime;

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Patch {
    pub id: i64,
    pub url: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub released: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub vulnerability_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability: Option<VulnerabilityRef>,
}

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CreatePatch {
    pub vulnerability_id: i64,
    pub url: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub released: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn released_round_trips_as_rfc3339() {
        let patch: Patch = serde_json::from_value(json!({
            "id": 9,
            "url": "https://acme.example.com/patch",
            "released": "2023-11-04T12:30:00Z",
            "vulnerability_id": 1,
            "vulnerability": { "id": 1, "cve_id": "CVE-2023-4567" }
        }))
        .unwrap();

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value["released"], "2023-11-04T12:30:00Z");
        assert_eq!(patch.vulnerability.as_ref().unwrap().cve_id, "CVE-2023-4567");
    }
}
