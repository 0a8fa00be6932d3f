use crate::core::{ConfigProvider, Credentials, TransferPlan};
use crate::utils::error::{Result, TransferError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_resolved, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_LOGIN_URL: &str = "https://users.premierleague.com/accounts/login/";
pub const DEFAULT_TRANSFERS_URL: &str = "https://fantasy.premierleague.com/api/transfers/";
pub const DEFAULT_API_BASE: &str = "https://fantasy.premierleague.com/api/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FplConfig {
    pub auth: Credentials,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    pub request: TransferPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_login_url")]
    pub login_url: String,
    #[serde(default = "default_transfers_url")]
    pub transfers_url: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    pub timeout_seconds: Option<u64>,
}

fn default_login_url() -> String {
    DEFAULT_LOGIN_URL.to_string()
}

fn default_transfers_url() -> String {
    DEFAULT_TRANSFERS_URL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            transfers_url: default_transfers_url(),
            api_base: default_api_base(),
            timeout_seconds: None,
        }
    }
}

impl FplConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TransferError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| TransferError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        config.substitute_env_vars()?;
        Ok(config)
    }

    /// 解析後替換字串欄位中的環境變數 (例如 ${FPL_PASSWORD})，未設定的保留原樣
    fn substitute_env_vars(&mut self) -> Result<()> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TransferError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        for value in [
            &mut self.auth.login,
            &mut self.auth.password,
            &mut self.auth.redirect_uri,
            &mut self.auth.app,
            &mut self.endpoints.login_url,
            &mut self.endpoints.transfers_url,
            &mut self.endpoints.api_base,
        ] {
            let substituted = re.replace_all(value.as_str(), |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            });
            *value = substituted.into_owned();
        }

        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("auth.login", &self.auth.login)?;
        validate_resolved("auth.login", &self.auth.login)?;
        validate_non_empty_string("auth.password", &self.auth.password)?;
        validate_resolved("auth.password", &self.auth.password)?;

        validate_url("endpoints.login_url", &self.endpoints.login_url)?;
        validate_url("endpoints.transfers_url", &self.endpoints.transfers_url)?;
        validate_url("endpoints.api_base", &self.endpoints.api_base)?;

        if let Some(timeout) = self.endpoints.timeout_seconds {
            validate_range("endpoints.timeout_seconds", timeout, 1, 600)?;
        }

        validate_range("request.event", self.request.event, 1, crate::core::builder::MAX_EVENT)?;
        if self.request.entry == 0 {
            return Err(TransferError::InvalidConfigValueError {
                field: "request.entry".to_string(),
                value: "0".to_string(),
                reason: "Entry id must be positive".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for FplConfig {
    fn login_url(&self) -> &str {
        &self.endpoints.login_url
    }

    fn transfers_url(&self) -> &str {
        &self.endpoints.transfers_url
    }

    fn api_base(&self) -> &str {
        &self.endpoints.api_base
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.endpoints
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }
}

impl Validate for FplConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
