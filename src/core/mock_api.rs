use crate::core::{ApiResponse, Credentials, FantasyApi, LoginState, PlayerSummary, SquadPicks};
use crate::utils::error::{Result, TransferError};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory [`FantasyApi`] that records what the flow sent.
#[derive(Clone)]
pub struct MockApi {
    login_state: LoginState,
    transfer_response: ApiResponse,
    players: Vec<PlayerSummary>,
    picks: Option<SquadPicks>,
    posted: Arc<Mutex<Vec<String>>>,
    catalog_calls: Arc<Mutex<usize>>,
}

impl MockApi {
    pub fn new(login_state: LoginState) -> Self {
        Self {
            login_state,
            transfer_response: ApiResponse {
                status: 200,
                body: String::new(),
            },
            players: Vec::new(),
            picks: None,
            posted: Arc::new(Mutex::new(Vec::new())),
            catalog_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_transfer_response(mut self, response: ApiResponse) -> Self {
        self.transfer_response = response;
        self
    }

    pub fn with_players(mut self, players: Vec<PlayerSummary>) -> Self {
        self.players = players;
        self
    }

    pub fn with_picks(mut self, picks: SquadPicks) -> Self {
        self.picks = Some(picks);
        self
    }

    pub async fn posted_bodies(&self) -> Vec<String> {
        self.posted.lock().await.clone()
    }

    pub async fn catalog_calls(&self) -> usize {
        *self.catalog_calls.lock().await
    }
}

#[async_trait::async_trait]
impl FantasyApi for MockApi {
    async fn log_in(&self, _credentials: &Credentials) -> Result<LoginState> {
        Ok(self.login_state.clone())
    }

    async fn post_transfers(&self, body: &str) -> Result<ApiResponse> {
        self.posted.lock().await.push(body.to_string());
        Ok(self.transfer_response.clone())
    }

    async fn fetch_players(&self) -> Result<Vec<PlayerSummary>> {
        *self.catalog_calls.lock().await += 1;
        Ok(self.players.clone())
    }

    async fn fetch_picks(&self, _entry: u64, _event: u32) -> Result<SquadPicks> {
        self.picks.clone().ok_or(TransferError::UnexpectedResponse {
            endpoint: "picks".to_string(),
            status: 404,
        })
    }
}
