use crate::{patch::Patch, software::Software, threat::Threat};
use time::OffsetDateTime;

/// Severity classification used by the backend.
#[derive(
    utoipa::ToSchema,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Map a CVSS v3 base score into its severity band.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 9.0 => Self::Critical,
            s if s >= 7.0 => Self::High,
            s if s >= 4.0 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Lenient parse, accepting any capitalization the backend may emit.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => return None,
        })
    }
}

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
pub struct Vulnerability {
    pub id: i64,
    pub cve_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvss_score: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub published: Option<OffsetDateTime>,
    pub software_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software: Option<Software>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threats: Vec<Threat>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patches: Vec<Patch>,
}

/// Lightweight reference to a vulnerability, used when it is nested in
/// another record.
#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct VulnerabilityRef {
    pub id: i64,
    pub cve_id: String,
}

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, Default, PartialEq)]
pub struct CreateVulnerability {
    pub software_id: i64,
    pub cve_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvss_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub published: Option<OffsetDateTime>,
}

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkThreat {
    pub threat_id: i64,
}

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkPatch {
    pub patch_id: i64,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn severity_bands() {
        assert_eq!(Severity::from_score(9.8), Severity::Critical);
        assert_eq!(Severity::from_score(7.0), Severity::High);
        assert_eq!(Severity::from_score(6.9), Severity::Medium);
        assert_eq!(Severity::from_score(0.0), Severity::Low);
    }

    #[test]
    fn severity_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("critical"), Some(Severity::Critical));
        assert_eq!(Severity::parse("HIGH"), Some(Severity::High));
        assert_eq!(Severity::parse("Medium"), Some(Severity::Medium));
        assert_eq!(Severity::parse("bogus"), None);
        assert_eq!(Severity::parse(""), None);
    }

    #[test]
    fn deserialize_full_record() {
        let vuln: Vulnerability = serde_json::from_value(json!({
            "id": 1,
            "cve_id": "CVE-2023-4567",
            "summary": "Remote code execution",
            "severity": "Critical",
            "cvss_score": 9.8,
            "published": "2023-10-25T00:00:00Z",
            "software_id": 7,
            "software": {
                "id": 7,
                "name": "AcmeOS",
                "version": "2.1",
                "vendor_id": 3,
                "vendor": { "id": 3, "name": "Acme Corp" }
            },
            "threats": [
                { "id": 4, "name": "Ransomware", "threat_type_id": 2 }
            ],
            "patches": [
                { "id": 9, "url": "https://acme.example.com/patch", "vulnerability_id": 1 }
            ]
        }))
        .unwrap();

        assert_eq!(vuln.severity, Some(Severity::Critical));
        assert_eq!(vuln.published, Some(datetime!(2023-10-25 00:00:00 UTC)));
        assert_eq!(vuln.software.as_ref().unwrap().vendor.as_ref().unwrap().name, "Acme Corp");
        assert_eq!(vuln.threats.len(), 1);
        assert_eq!(vuln.patches.len(), 1);
    }

    #[test]
    fn relationship_arrays_default_to_empty() {
        let vuln: Vulnerability = serde_json::from_value(json!({
            "id": 1,
            "cve_id": "CVE-2023-4567",
            "software_id": 7
        }))
        .unwrap();

        assert!(vuln.threats.is_empty());
        assert!(vuln.patches.is_empty());
        assert_eq!(vuln.severity, None);
        assert_eq!(vuln.published, None);
    }
}
