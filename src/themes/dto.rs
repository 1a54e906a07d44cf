use serde::Deserialize;

/// Fields are optional so that missing values surface as validation errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThemeRequest {
    pub name: Option<String>,
    pub max_votes: Option<i64>,
    pub form_id: Option<String>,
}
