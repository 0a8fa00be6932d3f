use crate::domain::model::{ApiResponse, Credentials, LoginState, PlayerSummary, SquadPicks};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn login_url(&self) -> &str;
    fn transfers_url(&self) -> &str;
    /// Base of the read-only API, ending in `/`.
    fn api_base(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// The calls the transfer flow makes against the fantasy service.
///
/// Implementations keep whatever session state `log_in` establishes and reuse
/// it for the calls that follow.
#[async_trait]
pub trait FantasyApi: Send + Sync {
    async fn log_in(&self, credentials: &Credentials) -> Result<LoginState>;
    async fn post_transfers(&self, body: &str) -> Result<ApiResponse>;
    async fn fetch_players(&self) -> Result<Vec<PlayerSummary>>;
    async fn fetch_picks(&self, entry: u64, event: u32) -> Result<SquadPicks>;
}
