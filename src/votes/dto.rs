use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub theme_id: Option<String>,
    pub voter_name: Option<String>,
}
