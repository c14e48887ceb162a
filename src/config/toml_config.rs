use crate::adapters::google_maps::GoogleMapsProvider;
use crate::adapters::here::HereProvider;
use crate::adapters::http::{HttpClient, HttpClientConfig, DEFAULT_USER_AGENT};
use crate::adapters::map_quest::MapQuestProvider;
use crate::config::ProviderKind;
use crate::core::chain::ChainProvider;
use crate::domain::ports::Provider;
use crate::utils::error::{GeocoderError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    pub geocoder: SelectionConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Either a single `provider` or an ordered `chain`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub provider: Option<ProviderKind>,
    #[serde(default)]
    pub chain: Vec<ProviderKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub google_maps: Option<GoogleMapsConfig>,
    pub map_quest: Option<MapQuestConfig>,
    pub here: Option<HereConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleMapsConfig {
    pub api_key: String,
    /// URL-signing secret; an empty value disables signing.
    pub secret: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapQuestConfig {
    pub api_key: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HereConfig {
    pub app_id: String,
    pub app_code: String,
    pub base_url: Option<String>,
}

impl GoogleMapsConfig {
    fn secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Config problems are reported as `ConfigError` with the offending field.
fn as_config_error(err: GeocoderError) -> GeocoderError {
    match err {
        GeocoderError::ValidationError { field, reason } => {
            GeocoderError::config(format!("{}: {}", field, reason))
        }
        other => other,
    }
}

fn validate_credential(field: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field, value).map_err(as_config_error)?;
    if value.contains("${") {
        return Err(GeocoderError::config(format!(
            "{}: environment variable {} is not set",
            field, value
        )));
    }
    Ok(())
}

fn validate_base_url(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(url) => validate_url(field, url).map_err(as_config_error),
        None => Ok(()),
    }
}

impl GeocoderConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GeocoderError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| GeocoderError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| GeocoderError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Replaces the configured selection with a single provider.
    pub fn select(&mut self, provider: ProviderKind) {
        self.geocoder = SelectionConfig {
            provider: Some(provider),
            chain: Vec::new(),
        };
    }

    /// Selected providers, in chain order.
    pub fn selected(&self) -> Vec<ProviderKind> {
        match self.geocoder.provider {
            Some(provider) => vec![provider],
            None => self.geocoder.chain.clone(),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        match (&self.geocoder.provider, self.geocoder.chain.is_empty()) {
            (Some(_), false) => {
                return Err(GeocoderError::config(
                    "geocoder: set either provider or chain, not both",
                ))
            }
            (None, true) => {
                return Err(GeocoderError::config(
                    "geocoder: no provider selected (set provider or chain)",
                ))
            }
            _ => {}
        }

        validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)
            .map_err(as_config_error)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)
            .map_err(as_config_error)?;

        for kind in self.selected() {
            self.validate_provider(kind)?;
        }
        Ok(())
    }

    fn validate_provider(&self, kind: ProviderKind) -> Result<()> {
        let missing = || {
            GeocoderError::config(format!(
                "providers.{}: provider is selected but not configured",
                kind
            ))
        };

        match kind {
            ProviderKind::GoogleMaps => {
                let google = self.providers.google_maps.as_ref().ok_or_else(missing)?;
                validate_credential("providers.google_maps.api_key", &google.api_key)?;
                if let Some(secret) = google.secret() {
                    validate_credential("providers.google_maps.secret", secret)?;
                }
                validate_base_url("providers.google_maps.base_url", google.base_url.as_deref())
            }
            ProviderKind::MapQuest => {
                let map_quest = self.providers.map_quest.as_ref().ok_or_else(missing)?;
                validate_credential("providers.map_quest.api_key", &map_quest.api_key)?;
                validate_base_url("providers.map_quest.base_url", map_quest.base_url.as_deref())
            }
            ProviderKind::Here => {
                let here = self.providers.here.as_ref().ok_or_else(missing)?;
                validate_credential("providers.here.app_id", &here.app_id)?;
                validate_credential("providers.here.app_code", &here.app_code)?;
                validate_base_url("providers.here.base_url", here.base_url.as_deref())
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    pub fn http_client(&self) -> Result<HttpClient> {
        HttpClient::with_config(
            HttpClientConfig::default()
                .with_timeout(self.timeout())
                .with_user_agent(self.http.user_agent.clone()),
        )
    }

    /// Builds the selected provider, or a [`ChainProvider`] when `chain` is set.
    pub fn build_provider(&self, client: HttpClient) -> Result<Box<dyn Provider>> {
        if self.geocoder.provider.is_none() && !self.geocoder.chain.is_empty() {
            let members = self
                .geocoder
                .chain
                .iter()
                .map(|kind| self.build_single(*kind, client.clone()))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Box::new(ChainProvider::new(members)?));
        }

        match self.geocoder.provider {
            Some(kind) => self.build_single(kind, client),
            None => Err(GeocoderError::config("geocoder: no provider selected")),
        }
    }

    fn build_single(&self, kind: ProviderKind, client: HttpClient) -> Result<Box<dyn Provider>> {
        let missing = || {
            GeocoderError::config(format!(
                "providers.{}: provider is selected but not configured",
                kind
            ))
        };

        tracing::debug!("Building provider {}", kind);

        let provider: Box<dyn Provider> = match kind {
            ProviderKind::GoogleMaps => {
                let google = self.providers.google_maps.as_ref().ok_or_else(missing)?;
                let provider = match google.secret() {
                    Some(secret) => {
                        GoogleMapsProvider::with_secret(client, google.api_key.clone(), secret)
                    }
                    None => GoogleMapsProvider::new(client, google.api_key.clone()),
                };
                match &google.base_url {
                    Some(base_url) => Box::new(provider.with_base_url(base_url.clone())),
                    None => Box::new(provider),
                }
            }
            ProviderKind::MapQuest => {
                let map_quest = self.providers.map_quest.as_ref().ok_or_else(missing)?;
                let provider = MapQuestProvider::new(client, map_quest.api_key.clone());
                match &map_quest.base_url {
                    Some(base_url) => Box::new(provider.with_base_url(base_url.clone())),
                    None => Box::new(provider),
                }
            }
            ProviderKind::Here => {
                let here = self.providers.here.as_ref().ok_or_else(missing)?;
                let provider =
                    HereProvider::new(client, here.app_id.clone(), here.app_code.clone());
                match &here.base_url {
                    Some(base_url) => Box::new(provider.with_base_url(base_url.clone())),
                    None => Box::new(provider),
                }
            }
        };
        Ok(provider)
    }
}

impl Validate for GeocoderConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
