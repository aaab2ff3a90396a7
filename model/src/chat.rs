#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(utoipa::ToSchema, serde::Deserialize, serde::Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}
