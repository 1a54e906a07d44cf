use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use uuid::Uuid;

lazy_static! {
    static ref NON_SLUG: Regex = Regex::new(r"[^a-z0-9-]").unwrap();
}

/// Lowercases, trims and replaces anything outside `[a-z0-9-]` with `-`.
pub fn slugify(text: &str) -> String {
    NON_SLUG
        .replace_all(&text.trim().to_lowercase(), "-")
        .into_owned()
}

/// `<prefix>-<slug>-<unix millis>-<8 hex chars>`; stays unique across retries.
pub fn derived_id(prefix: &str, text: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}-{millis}-{}", slugify(text), &suffix[..8])
}
