use crate::core::{
    ApiResponse, ConfigProvider, Credentials, FantasyApi, LoginState, PlayerSummary, SquadPicks,
};
use crate::utils::error::{Result, TransferError};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{CONTENT_TYPE, REFERER};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

pub const TRANSFER_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
pub const REQUESTED_WITH: &str = "XMLHttpRequest";
pub const TRANSFER_REFERER: &str = "https://fantasy.premierleague.com/a/squad/transfers";

#[derive(Deserialize)]
struct BootstrapResponse {
    elements: Vec<PlayerSummary>,
}

#[derive(Deserialize)]
struct PicksResponse {
    picks: Vec<Pick>,
    entry_history: EntryHistory,
}

#[derive(Deserialize)]
struct Pick {
    element: u32,
}

#[derive(Deserialize)]
struct EntryHistory {
    bank: i64,
}

/// reqwest-backed [`FantasyApi`]. Cookies set during login stay in the jar
/// and ride along on every later request.
pub struct HttpFantasyApi {
    client: Client,
    cookies: Arc<Jar>,
    login_url: Url,
    transfers_url: Url,
    api_base: Url,
}

fn parse_url(field: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| TransferError::InvalidConfigValueError {
        field: field.to_string(),
        value: raw.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })
}

impl HttpFantasyApi {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let cookies = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .timeout(config.timeout())
            .user_agent(concat!("fpl-transfer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut api_base = config.api_base().to_string();
        if !api_base.ends_with('/') {
            api_base.push('/');
        }

        Ok(Self {
            client,
            cookies,
            login_url: parse_url("endpoints.login_url", config.login_url())?,
            transfers_url: parse_url("endpoints.transfers_url", config.transfers_url())?,
            api_base: parse_url("endpoints.api_base", &api_base)?,
        })
    }

    pub fn has_session_cookie(&self) -> bool {
        self.cookies.cookies(&self.login_url).is_some()
    }

    fn api_url(&self, path: &str) -> Result<Url> {
        self.api_base
            .join(path)
            .map_err(|e| TransferError::ConfigError {
                message: format!("cannot build API URL for {}: {}", path, e),
            })
    }

    /// Reads the login verdict the site leaves in the final redirect target.
    fn login_state(&self, final_url: &Url) -> LoginState {
        let pairs: HashMap<String, String> = final_url.query_pairs().into_owned().collect();

        match pairs.get("state").map(String::as_str) {
            Some("success") => LoginState::Success,
            Some("fail") => LoginState::Failed {
                reason: pairs
                    .get("reason")
                    .cloned()
                    .unwrap_or_else(|| "failed state for unknown reason".to_string()),
            },
            Some(other) => LoginState::Failed {
                reason: format!("login state '{}' was not understood", other),
            },
            None if self.has_session_cookie() => LoginState::Success,
            None => LoginState::Failed {
                reason: "login response carried neither a state nor a session cookie".to_string(),
            },
        }
    }
}

#[async_trait::async_trait]
impl FantasyApi for HttpFantasyApi {
    async fn log_in(&self, credentials: &Credentials) -> Result<LoginState> {
        tracing::debug!("Posting login form to {}", self.login_url);
        let response = self
            .client
            .post(self.login_url.clone())
            .form(&credentials.form_fields())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Login finished at {} with status {}", response.url(), status);

        if !status.is_success() {
            return Ok(LoginState::Failed {
                reason: format!("login endpoint returned status {}", status.as_u16()),
            });
        }
        Ok(self.login_state(response.url()))
    }

    async fn post_transfers(&self, body: &str) -> Result<ApiResponse> {
        let response = self
            .client
            .post(self.transfers_url.clone())
            .header(CONTENT_TYPE, TRANSFER_CONTENT_TYPE)
            .header("X-Requested-With", REQUESTED_WITH)
            .header(REFERER, TRANSFER_REFERER)
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }

    async fn fetch_players(&self) -> Result<Vec<PlayerSummary>> {
        let url = self.api_url("bootstrap-static/")?;
        tracing::debug!("Fetching players from {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TransferError::UnexpectedResponse {
                endpoint: "bootstrap-static".to_string(),
                status: response.status().as_u16(),
            });
        }

        let bootstrap: BootstrapResponse = response.json().await?;
        Ok(bootstrap.elements)
    }

    async fn fetch_picks(&self, entry: u64, event: u32) -> Result<SquadPicks> {
        let url = self.api_url(&format!("entry/{}/event/{}/picks/", entry, event))?;
        tracing::debug!("Fetching picks from {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TransferError::UnexpectedResponse {
                endpoint: format!("entry/{}/event/{}/picks", entry, event),
                status: response.status().as_u16(),
            });
        }

        let picks: PicksResponse = response.json().await?;
        Ok(SquadPicks {
            elements: picks.picks.into_iter().map(|pick| pick.element).collect(),
            bank: picks.entry_history.bank,
        })
    }
}
