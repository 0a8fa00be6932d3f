pub mod builder;
pub mod engine;
pub mod outcome;
pub mod session;
pub mod squad;

#[cfg(test)]
pub(crate) mod mock_api;

pub use crate::domain::model::{
    ApiResponse, Credentials, LoginState, PlayerSummary, SquadPicks, Transfer, TransferOutcome,
    TransferPlan, TransferReport, TransferRequest, TransferSpec,
};
pub use crate::domain::ports::{ConfigProvider, FantasyApi};
pub use crate::utils::error::Result;
