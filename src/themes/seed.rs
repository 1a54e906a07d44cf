use crate::themes::repo_types::NewTheme;
use crate::utils::slugify;

const DEFAULT_THEMES: [&str; 5] = ["Italian", "Mexican", "Chinese", "Indian", "Mediterranean"];
const DEFAULT_MAX_VOTES: i32 = 100;

/// The catalog written when no theme exists. Ids are derived from the
/// names, so writing it twice is a no-op.
pub fn default_catalog() -> Vec<NewTheme> {
    DEFAULT_THEMES
        .iter()
        .map(|name| NewTheme {
            id: format!("seed-{}", slugify(name)),
            name: (*name).to_string(),
            max_votes: DEFAULT_MAX_VOTES,
            form_id: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_stable() {
        let ids: Vec<String> = default_catalog().into_iter().map(|t| t.id).collect();
        assert_eq!(ids[0], "seed-italian");
        assert_eq!(ids[4], "seed-mediterranean");
        assert_eq!(ids, default_catalog().into_iter().map(|t| t.id).collect::<Vec<_>>());
    }
}
