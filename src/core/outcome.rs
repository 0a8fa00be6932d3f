use crate::core::{ApiResponse, Transfer, TransferOutcome, TransferRequest};
use crate::utils::error::TransferError;
use serde::Deserialize;

#[derive(Deserialize)]
struct ConfirmedTransfers {
    transfers: Vec<Transfer>,
}

/// Maps the transfer endpoint's answer onto an outcome.
pub fn classify(request: &TransferRequest, response: &ApiResponse) -> TransferOutcome {
    match response.status {
        401 | 403 => TransferOutcome::AuthFailure {
            reason: extract_reason(response),
        },
        _ if response.is_success() => {
            let transfers = serde_json::from_str::<ConfirmedTransfers>(&response.body)
                .map(|confirmed| confirmed.transfers)
                .unwrap_or_else(|_| request.transfers.clone());
            TransferOutcome::Accepted { transfers }
        }
        _ => TransferOutcome::Rejected {
            reason: extract_reason(response),
        },
    }
}

/// Collects every message string the server put in its error body.
pub fn extract_reason(response: &ApiResponse) -> String {
    let body = response.body.trim();
    if body.is_empty() {
        return format!("HTTP status {}", response.status);
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => {
            let mut messages = Vec::new();
            collect_strings(&value, &mut messages);
            if messages.is_empty() {
                format!("HTTP status {}", response.status)
            } else {
                messages.join("; ")
            }
        }
        Err(_) => body.to_string(),
    }
}

fn collect_strings(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(text) => out.push(text.clone()),
        serde_json::Value::Array(items) => items.iter().for_each(|item| collect_strings(item, out)),
        serde_json::Value::Object(map) => map.values().for_each(|item| collect_strings(item, out)),
        _ => {}
    }
}

impl TransferOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, TransferOutcome::Accepted { .. })
    }

    /// Turns a non-accepted outcome into the matching error.
    pub fn into_result(self) -> crate::utils::error::Result<Vec<Transfer>> {
        match self {
            TransferOutcome::Accepted { transfers } => Ok(transfers),
            TransferOutcome::Rejected { reason } => Err(TransferError::TransferRejected { reason }),
            TransferOutcome::AuthFailure { reason } => {
                Err(TransferError::AuthenticationError { reason })
            }
        }
    }
}
