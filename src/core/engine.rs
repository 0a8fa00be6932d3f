use crate::core::builder::{build_request, needs_catalog};
use crate::core::session::AuthenticatedSession;
use crate::core::squad::check_squad;
use crate::core::{
    Credentials, FantasyApi, PlayerSummary, TransferPlan, TransferReport, TransferRequest,
};
use crate::utils::error::Result;

pub struct TransferEngine<A: FantasyApi> {
    api: A,
}

impl<A: FantasyApi> TransferEngine<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    async fn fetch_catalog(&self) -> Result<Vec<PlayerSummary>> {
        tracing::info!("📚 Fetching player catalog");
        let players = self.api.fetch_players().await?;
        tracing::debug!("Catalog holds {} players", players.len());
        Ok(players)
    }

    /// Builds and validates the request without touching the session.
    pub async fn prepare(&self, plan: &TransferPlan) -> Result<TransferRequest> {
        let catalog = if needs_catalog(plan) {
            Some(self.fetch_catalog().await?)
        } else {
            None
        };

        build_request(plan, catalog.as_deref())
    }

    pub async fn run(&self, plan: &TransferPlan, credentials: &Credentials) -> Result<TransferReport> {
        // Squad verification needs positions and clubs even for priced transfers.
        let catalog = if needs_catalog(plan) || plan.verify_squad {
            Some(self.fetch_catalog().await?)
        } else {
            None
        };
        let request = build_request(plan, catalog.as_deref())?;
        let session = AuthenticatedSession::establish(&self.api, credentials).await?;

        if plan.verify_squad {
            tracing::info!("🔎 Verifying squad for entry {}", request.entry);
            let picks = session
                .api()
                .fetch_picks(request.entry, request.event)
                .await?;
            check_squad(&request, &picks, catalog.as_deref().unwrap_or_default())?;
        }

        let report = session.submit(&request).await?;
        if report.outcome.is_accepted() {
            tracing::info!("✅ Transfer accepted");
        } else {
            tracing::warn!("⚠️ Transfer not accepted: {:?}", report.outcome);
        }
        Ok(report)
    }
}
