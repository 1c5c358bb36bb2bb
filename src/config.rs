use crate::{
    config::date_display::{DateDisplay, default_locale},
    error::{AdminResult, BadEnvVarSnafu, ParseNumberSnafu},
};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::{sync::Arc, time::Duration};

pub mod date_display;

const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    api_config: Arc<ApiConfig>,
    date_display: Arc<DateDisplay>,
    page_size: u32,
}

impl RuntimeConfiguration {
    pub fn new() -> AdminResult<Self> {
        let page_size = match var("ADMIN_PAGE_SIZE") {
            Ok(raw) => raw.parse().context(ParseNumberSnafu {
                name: "ADMIN_PAGE_SIZE",
            })?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };
        let timezone = var("ADMIN_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let locale = var("ADMIN_LOCALE").unwrap_or_else(|_| default_locale().to_string());

        Ok(Self {
            api_config: Arc::new(ApiConfig::new()?),
            date_display: Arc::new(DateDisplay::new(timezone, locale)?),
            page_size: page_size.max(1),
        })
    }

    pub fn from_parts(api_config: ApiConfig, date_display: DateDisplay, page_size: u32) -> Self {
        Self {
            api_config: Arc::new(api_config),
            date_display: Arc::new(date_display),
            page_size: page_size.max(1),
        }
    }

    pub fn api_config(&self) -> Arc<ApiConfig> {
        self.api_config.clone()
    }

    pub fn date_display(&self) -> Arc<DateDisplay> {
        self.date_display.clone()
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[derive(Debug)]
pub struct ApiConfig {
    base_url: String,
    token: Option<SecretString>,
    timeout: Duration,
}

impl ApiConfig {
    pub fn new() -> AdminResult<Self> {
        let base_url = var("SIS_API_URL").context(BadEnvVarSnafu {
            name: "SIS_API_URL",
        })?;
        let token = var("SIS_API_TOKEN").ok().map(SecretString::from);
        let timeout = match var("SIS_API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().context(ParseNumberSnafu {
                name: "SIS_API_TIMEOUT_SECS",
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::with_values(
            base_url,
            token,
            Duration::from_secs(timeout),
        ))
    }

    pub fn with_values(
        base_url: impl Into<String>,
        token: Option<SecretString>,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            timeout,
        }
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    pub fn bearer_header(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
