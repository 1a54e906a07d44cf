use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInput {
    pub name: Option<String>,
    pub max_votes: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub themes: Vec<ThemeInput>,
}
