use crate::vendor::Vendor;

/// A piece of software tracked for vulnerabilities. The owning vendor is
/// resolved server-side and delivered nested.
#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Software {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub vendor_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Vendor>,
}

impl Software {
    /// Name plus version, the way tables render it.
    pub fn label(&self) -> String {
        match &self.version {
            Some(version) => format!("{} ({version})", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateSoftware {
    pub name: String,
    pub vendor_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_nested_vendor() {
        let software: Software = serde_json::from_value(json!({
            "id": 7,
            "name": "AcmeOS",
            "version": "2.1",
            "vendor_id": 3,
            "vendor": {
                "id": 3,
                "name": "Acme Corp",
                "website": "https://acme.example.com"
            }
        }))
        .unwrap();

        assert_eq!(software.label(), "AcmeOS (2.1)");
        assert_eq!(software.vendor.as_ref().unwrap().name, "Acme Corp");
    }

    #[test]
    fn vendor_may_be_absent() {
        let software: Software = serde_json::from_value(json!({
            "id": 7,
            "name": "AcmeOS",
            "vendor_id": 3
        }))
        .unwrap();

        assert_eq!(software.vendor, None);
        assert_eq!(software.label(), "AcmeOS");
    }
}
