use crate::vuln::VulnerabilityRef;

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Threat {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub threat_type_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vulnerabilities: Vec<VulnerabilityRef>,
}

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ThreatType {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateThreat {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub threat_type_id: i64,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_with_linked_vulnerabilities() {
        let threat: Threat = serde_json::from_value(json!({
            "id": 4,
            "name": "Ransomware",
            "description": "Encrypts data for extortion",
            "threat_type_id": 2,
            "threat_type_name": "Malware",
            "vulnerabilities": [
                { "id": 1, "cve_id": "CVE-2023-4567" }
            ]
        }))
        .unwrap();

        assert_eq!(threat.threat_type_name.as_deref(), Some("Malware"));
        assert_eq!(threat.vulnerabilities[0].cve_id, "CVE-2023-4567");
    }

    #[test]
    fn minimal_record() {
        let threat: Threat = serde_json::from_value(json!({
            "id": 4,
            "name": "Ransomware",
            "threat_type_id": 2
        }))
        .unwrap();

        assert!(threat.vulnerabilities.is_empty());
    }
}
