//! Configuration for the Kindroid inference client

use serde::{Deserialize, Serialize};
use std::time::Duration;
use log::debug;

/// Environment variable holding the inference endpoint URL
pub const INFER_URL_ENV: &str = "KINDROID_INFER_URL";
/// Environment variable holding the bearer credential
pub const API_KEY_ENV: &str = "KINDROID_API_KEY";
/// Optional environment variable with a request timeout in seconds,
/// fractions allowed
pub const TIMEOUT_SECS_ENV: &str = "KINDROID_TIMEOUT_SECS";

/// Kindroid client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindroidConfig
{   /// Full URL of the inference endpoint
    pub infer_url: String
  , /// Bearer credential sent on every request
    pub api_key: String
  , /// Request timeout, transport default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>
}

impl KindroidConfig
{   pub fn new(
      infer_url: impl Into<String>
    , api_key: impl Into<String>
    ) -> Self
    {   KindroidConfig
        {   infer_url: infer_url.into()
          , api_key: api_key.into()
          , timeout: None
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self
    {   self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration>
    {   self.timeout
    }

    /// Load from `KINDROID_INFER_URL`, `KINDROID_API_KEY` and the
    /// optional `KINDROID_TIMEOUT_SECS`, then validate.
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`KindroidConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where
      F: Fn(&str) -> Option<String>
    {   let require = |name: &str| {
          lookup(name).ok_or_else(|| {
            crate::error::Error::InvalidConfiguration(
              format!("{} is not set", name)
            )
          })
        };

        let infer_url = require(INFER_URL_ENV)?;
        let api_key = require(API_KEY_ENV)?;

        let timeout = match lookup(TIMEOUT_SECS_ENV)
        {   Some(raw) => Some(
              raw.trim().parse::<f64>()
                .ok()
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .ok_or_else(|| {
                  crate::error::Error::InvalidConfiguration(
                    format!("{}: invalid duration {:?}", TIMEOUT_SECS_ENV, raw)
                  )
                })?
            )
          , None => None
        };

        let config = KindroidConfig
        {   infer_url
          , api_key
          , timeout
        };
        config.validate()?;
        debug!("Loaded Kindroid config for {}", config.infer_url);
        Ok(config)
    }

    /// Fail fast on values that can never produce a working request
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if self.infer_url.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "inference URL is empty".to_string()
            ));
        }

        let url = reqwest::Url::parse(&self.infer_url)
          .map_err(|e| {
            crate::error::Error::InvalidConfiguration(
              format!("inference URL {:?}: {}", self.infer_url, e)
            )
          })?;

        if url.scheme() != "https" && url.scheme() != "http"
        {   return Err(crate::error::Error::InvalidConfiguration(
              format!("unsupported URL scheme: {}", url.scheme())
            ));
        }

        if self.api_key.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "API key is empty".to_string()
            ));
        }

        // Must survive as an Authorization header value
        reqwest::header::HeaderValue::from_str(
          &format!("Bearer {}", self.api_key)
        ).map_err(|_| {
          crate::error::Error::InvalidConfiguration(
            "API key contains characters not allowed in a header"
              .to_string()
          )
        })?;

        if self.timeout.is_some_and(|t| t.is_zero())
        {   return Err(crate::error::Error::InvalidConfiguration(
              "timeout must be greater than zero".to_string()
            ));
        }

        Ok(())
    }
}
