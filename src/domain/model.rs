use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_REDIRECT_URI: &str = "https://fantasy.premierleague.com/";
pub const DEFAULT_APP: &str = "plfpl-web";

/// Form credentials posted to the login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
    #[serde(default = "default_app")]
    pub app: String,
}

fn default_redirect_uri() -> String {
    DEFAULT_REDIRECT_URI.to_string()
}

fn default_app() -> String {
    DEFAULT_APP.to_string()
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            redirect_uri: default_redirect_uri(),
            app: default_app(),
        }
    }

    /// Field order matches what the login form submits.
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("login", self.login.as_str()),
            ("password", self.password.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("app", self.app.as_str()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("app", &self.app)
            .finish()
    }
}

/// One player swap. Prices are in tenths of a million.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub element_in: u32,
    pub element_out: u32,
    pub purchase_price: u32,
    pub selling_price: u32,
}

/// Body of `POST /api/transfers/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub confirmed: bool,
    pub entry: u64,
    pub event: u32,
    pub transfers: Vec<Transfer>,
    pub wildcard: bool,
    pub freehit: bool,
}

/// A transfer as configured; missing prices are looked up in the player catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSpec {
    pub element_in: u32,
    pub element_out: u32,
    pub purchase_price: Option<u32>,
    pub selling_price: Option<u32>,
}

impl TransferSpec {
    pub fn is_priced(&self) -> bool {
        self.purchase_price.is_some() && self.selling_price.is_some()
    }
}

impl FromStr for TransferSpec {
    type Err = String;

    /// Parses `IN:OUT` or `IN:OUT:PURCHASE:SELLING`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();

        match parts.as_slice() {
            [element_in, element_out] => Ok(Self {
                element_in: number("element_in", element_in)?,
                element_out: number("element_out", element_out)?,
                purchase_price: None,
                selling_price: None,
            }),
            [element_in, element_out, purchase, selling] => Ok(Self {
                element_in: number("element_in", element_in)?,
                element_out: number("element_out", element_out)?,
                purchase_price: Some(number("purchase_price", purchase)?),
                selling_price: Some(number("selling_price", selling)?),
            }),
            _ => Err(format!(
                "expected IN:OUT or IN:OUT:PURCHASE:SELLING, got '{}'",
                s
            )),
        }
    }
}

fn number(name: &str, raw: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|_| format!("{} must be a non-negative integer, got '{}'", name, raw))
}

fn default_true() -> bool {
    true
}

/// Everything needed to build one transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPlan {
    pub entry: u64,
    pub event: u32,
    #[serde(default = "default_true")]
    pub confirmed: bool,
    #[serde(default)]
    pub wildcard: bool,
    #[serde(default)]
    pub freehit: bool,
    #[serde(default)]
    pub verify_squad: bool,
    #[serde(default)]
    pub transfers: Vec<TransferSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Success,
    Failed { reason: String },
}

/// Raw HTTP answer, kept unparsed for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Accepted { transfers: Vec<Transfer> },
    Rejected { reason: String },
    AuthFailure { reason: String },
}

#[derive(Debug, Clone)]
pub struct TransferReport {
    pub serialized_payload: String,
    pub request: TransferRequest,
    pub response: ApiResponse,
    pub outcome: TransferOutcome,
}

impl TransferReport {
    /// Serialized payload, payload object, raw response text.
    pub fn lines(&self) -> [String; 3] {
        [
            self.serialized_payload.clone(),
            format!("{:?}", self.request),
            self.response.body.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerSummary {
    pub id: u32,
    pub web_name: String,
    pub now_cost: u32,
    /// Position: 1 goalkeeper, 2 defender, 3 midfielder, 4 forward.
    pub element_type: u8,
    /// Club id.
    pub team: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadPicks {
    pub elements: Vec<u32>,
    pub bank: i64,
}
