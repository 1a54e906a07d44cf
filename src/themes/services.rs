use std::{sync::Arc, time::Duration};

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    cache::TtlCache,
    dto::CreateThemeRequest,
    repo_types::{NewTheme, Theme, ThemeSummary},
    seed::default_catalog,
};
use crate::{
    error::AppError,
    store::{Store, StoreError},
};

const ALL_THEMES: &str = "all";

/// Checks a theme name and vote cap as submitted by a client.
pub fn validate_theme_fields(
    name: Option<&str>,
    max_votes: Option<i64>,
) -> Result<(String, i32), AppError> {
    let name = name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::validation("Each option must have a name"));
    }
    let max_votes = max_votes
        .filter(|v| *v >= 1)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| AppError::validation("Maximum votes must be a positive number"))?;
    Ok((name.to_string(), max_votes))
}

/// Theme reads and writes, with a short-lived snapshot of the full list.
pub struct ThemeCatalog {
    store: Arc<dyn Store>,
    cache: TtlCache<&'static str, Vec<ThemeSummary>>,
}

impl ThemeCatalog {
    pub fn new(store: Arc<dyn Store>, ttl: Duration) -> Self {
        Self {
            store,
            cache: TtlCache::new(ttl),
        }
    }

    /// All themes with vote counts. Seeds the default catalog when empty and
    /// serves the last snapshot if the store cannot be read.
    pub async fn list(&self) -> Result<Vec<ThemeSummary>, StoreError> {
        if let Some(hit) = self.cache.get_fresh(&ALL_THEMES) {
            debug!(count = hit.len(), "theme cache hit");
            return Ok(hit);
        }

        match self.load().await {
            Ok(themes) => {
                self.cache.insert(ALL_THEMES, themes.clone());
                Ok(themes)
            }
            Err(e) => match self.cache.get_stale(&ALL_THEMES) {
                Some(stale) => {
                    warn!(error = %e, "theme read failed; serving stale snapshot");
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    async fn load(&self) -> Result<Vec<ThemeSummary>, StoreError> {
        let themes = self.store.list_themes().await?;
        if !themes.is_empty() {
            return Ok(themes);
        }
        info!("no themes found, seeding default catalog");
        self.seed_defaults().await?;
        self.store.list_themes().await
    }

    /// Writes the default catalog entries that are missing.
    pub async fn seed_defaults(&self) -> Result<u64, StoreError> {
        let written = self.store.insert_themes_if_absent(&default_catalog()).await?;
        info!(written, "default themes seeded");
        Ok(written)
    }

    /// Drops the snapshot so the next `list` reads the store.
    pub fn invalidate(&self) {
        self.cache.invalidate(&ALL_THEMES);
    }

    /// Adds a theme, standalone or attached to one of `user_id`'s forms.
    pub async fn create(&self, user_id: Uuid, req: CreateThemeRequest) -> Result<Theme, AppError> {
        let (name, max_votes) = validate_theme_fields(req.name.as_deref(), req.max_votes)?;
        let form_id = match req.form_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(self.owned_form(user_id, raw).await?),
        };

        let theme = self
            .store
            .create_theme(NewTheme {
                id: Uuid::new_v4().to_string(),
                name,
                max_votes,
                form_id,
            })
            .await?;
        self.invalidate();
        Ok(theme)
    }

    /// Someone else's form reads as missing.
    async fn owned_form(&self, user_id: Uuid, raw_id: &str) -> Result<Uuid, AppError> {
        let not_found = || AppError::NotFound("Form not found".into());
        let id = Uuid::parse_str(raw_id).map_err(|_| not_found())?;
        match self.store.get_form(id).await? {
            Some(found) if found.form.creator_id == user_id => Ok(id),
            Some(_) => {
                warn!(form_id = %id, user_id = %user_id, "theme rejected for foreign form");
                Err(not_found())
            }
            None => Err(not_found()),
        }
    }
}
