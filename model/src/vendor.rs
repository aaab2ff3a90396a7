#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateVendor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}
