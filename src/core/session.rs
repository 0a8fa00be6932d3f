use crate::core::outcome::classify;
use crate::core::{Credentials, FantasyApi, LoginState, TransferReport, TransferRequest};
use crate::utils::error::{Result, TransferError};

/// A logged-in handle on the fantasy service.
///
/// The only way to obtain one is [`AuthenticatedSession::establish`], so
/// holding a session means the login was confirmed before any transfer goes
/// out.
pub struct AuthenticatedSession<'a, A: FantasyApi> {
    api: &'a A,
    login: String,
}

impl<'a, A: FantasyApi> AuthenticatedSession<'a, A> {
    pub async fn establish(api: &'a A, credentials: &Credentials) -> Result<Self> {
        tracing::info!("🔐 Logging in");

        match api.log_in(credentials).await? {
            LoginState::Success => {
                tracing::info!("✅ Logged in");
                Ok(Self {
                    api,
                    login: credentials.login.clone(),
                })
            }
            LoginState::Failed { reason } => {
                tracing::error!("❌ Login rejected: {}", reason);
                Err(TransferError::AuthenticationError { reason })
            }
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn api(&self) -> &'a A {
        self.api
    }

    /// Posts the request and keeps the serialized body next to the raw reply.
    pub async fn submit(&self, request: &TransferRequest) -> Result<TransferReport> {
        let serialized_payload = serde_json::to_string(request)?;
        tracing::debug!("Transfer payload: {}", serialized_payload);
        tracing::info!(
            "📤 Submitting {} transfer(s) for entry {} in gameweek {}",
            request.transfers.len(),
            request.entry,
            request.event
        );

        let response = self.api.post_transfers(&serialized_payload).await?;
        tracing::debug!("Transfer endpoint answered with status {}", response.status);

        let outcome = classify(request, &response);
        Ok(TransferReport {
            serialized_payload,
            request: request.clone(),
            response,
            outcome,
        })
    }
}
