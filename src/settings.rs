use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::auth::StaticTokenProvider;
use crate::resolver::Endpoints;

pub const DEFAULT_BASE_URL: &str = "https://www.vier.be";
pub const DEFAULT_API_URL: &str = "https://api.viervijfzes.be";
pub const DEFAULT_SEARCH_URL: &str = "https://api.viervijfzes.be/search";
pub const DEFAULT_CATEGORIES_URL: &str =
    "https://www.vrt.be/vrtnu/categorieen/jcr:content/par/categories.model.json";
const DEFAULT_USER_AGENT: &str = concat!("vier-content/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub api_url: String,
    pub search_url: String,
    pub categories_url: String,
    /// Sites searched; the search API also knows "vijf" and "zes".
    pub sites: Vec<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub access_token: Option<String>,
}

impl Settings {
    /// Defaults, overridden by `VIER_*` environment variables
    /// (`VIER_SITES` is comma separated).
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("search_url", DEFAULT_SEARCH_URL)?
            .set_default("categories_url", DEFAULT_CATEGORIES_URL)?
            .set_default("sites", vec!["vier"])?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .add_source(
                Environment::with_prefix("VIER")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("sites"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            base_url: self.base_url.clone(),
            api_url: self.api_url.clone(),
            search_url: self.search_url.clone(),
            categories_url: self.categories_url.clone(),
            sites: self.sites.clone(),
        }
    }

    pub fn access_token(&self) -> Option<StaticTokenProvider> {
        self.access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .map(StaticTokenProvider::new)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            categories_url: DEFAULT_CATEGORIES_URL.to_string(),
            sites: vec!["vier".to_string()],
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            access_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_vier() {
        let endpoints = Settings::default().endpoints();
        assert_eq!(endpoints.base_url, "https://www.vier.be");
        assert_eq!(endpoints.search_url, "https://api.viervijfzes.be/search");
        assert_eq!(endpoints.sites, vec!["vier"]);
    }

    #[test]
    fn load_without_overrides_matches_defaults() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.api_url, std::env::var("VIER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()));
        assert!(settings.timeout_secs > 0);
    }

    #[test]
    fn blank_token_is_ignored() {
        let settings = Settings {
            access_token: Some(" ".into()),
            ..Settings::default()
        };
        assert!(settings.access_token().is_none());
        let settings = Settings {
            access_token: Some("abc".into()),
            ..Settings::default()
        };
        assert!(settings.access_token().is_some());
    }
}
