use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Adds `Secure` to the auth cookie. Enable behind HTTPS.
    pub cookie_secure: bool,
    pub theme_cache_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "formvote".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "formvote-users".into()),
            ttl_minutes: parse_var("JWT_TTL_MINUTES").unwrap_or(60 * 24 * 7),
        };
        Ok(Self {
            database_url,
            jwt,
            cookie_secure: parse_var("COOKIE_SECURE").unwrap_or(false),
            theme_cache_ttl_secs: parse_var("THEME_CACHE_TTL_SECS").unwrap_or(5),
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}
