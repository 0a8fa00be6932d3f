use crate::core::{PlayerSummary, Transfer, TransferPlan, TransferRequest, TransferSpec};
use crate::utils::error::{Result, TransferError};
use crate::utils::validation::{validate_range, Validate};
use std::collections::HashSet;

/// Gameweeks in a Premier League season.
pub const MAX_EVENT: u32 = 38;

/// True when at least one transfer leaves a price to the player catalog.
pub fn needs_catalog(plan: &TransferPlan) -> bool {
    plan.transfers.iter().any(|spec| !spec.is_priced())
}

/// Assembles the request body from a plan. Missing prices come from
/// `catalog`: the buy price is the incoming player's `now_cost`, the sell
/// price the outgoing player's.
pub fn build_request(
    plan: &TransferPlan,
    catalog: Option<&[PlayerSummary]>,
) -> Result<TransferRequest> {
    let transfers = plan
        .transfers
        .iter()
        .enumerate()
        .map(|(index, spec)| resolve_transfer(index, spec, catalog))
        .collect::<Result<Vec<_>>>()?;

    let request = TransferRequest {
        confirmed: plan.confirmed,
        entry: plan.entry,
        event: plan.event,
        transfers,
        wildcard: plan.wildcard,
        freehit: plan.freehit,
    };
    request.validate()?;
    Ok(request)
}

fn resolve_transfer(
    index: usize,
    spec: &TransferSpec,
    catalog: Option<&[PlayerSummary]>,
) -> Result<Transfer> {
    let purchase_price = match spec.purchase_price {
        Some(price) => price,
        None => catalog_price(index, "purchase_price", spec.element_in, catalog)?,
    };
    let selling_price = match spec.selling_price {
        Some(price) => price,
        None => catalog_price(index, "selling_price", spec.element_out, catalog)?,
    };

    Ok(Transfer {
        element_in: spec.element_in,
        element_out: spec.element_out,
        purchase_price,
        selling_price,
    })
}

fn catalog_price(
    index: usize,
    field: &str,
    element: u32,
    catalog: Option<&[PlayerSummary]>,
) -> Result<u32> {
    let catalog = catalog.ok_or_else(|| TransferError::MissingConfigError {
        field: format!("request.transfers[{}].{}", index, field),
    })?;

    let player = catalog
        .iter()
        .find(|player| player.id == element)
        .ok_or(TransferError::PlayerNotFound { element })?;

    tracing::debug!(
        "Resolved {} for {} ({}) to {}",
        field,
        player.web_name,
        element,
        player.now_cost
    );
    Ok(player.now_cost)
}

impl Validate for TransferRequest {
    fn validate(&self) -> Result<()> {
        if self.entry == 0 {
            return Err(TransferError::InvalidConfigValueError {
                field: "request.entry".to_string(),
                value: self.entry.to_string(),
                reason: "Entry id must be positive".to_string(),
            });
        }
        validate_range("request.event", self.event, 1, MAX_EVENT)?;

        if self.wildcard && self.freehit {
            return Err(TransferError::ValidationError {
                message: "wildcard and freehit cannot be played in the same gameweek".to_string(),
            });
        }

        if self.transfers.is_empty() {
            return Err(TransferError::ValidationError {
                message: "at least one transfer is required".to_string(),
            });
        }

        let mut incoming = HashSet::new();
        let mut outgoing = HashSet::new();
        for (index, transfer) in self.transfers.iter().enumerate() {
            if transfer.element_in == 0 || transfer.element_out == 0 {
                return Err(TransferError::ValidationError {
                    message: format!("transfer {} references player id 0", index),
                });
            }
            if transfer.element_in == transfer.element_out {
                return Err(TransferError::ValidationError {
                    message: format!(
                        "transfer {} swaps player {} for itself",
                        index, transfer.element_in
                    ),
                });
            }
            if transfer.purchase_price == 0 || transfer.selling_price == 0 {
                return Err(TransferError::ValidationError {
                    message: format!("transfer {} has a zero price", index),
                });
            }
            if !incoming.insert(transfer.element_in) {
                return Err(TransferError::ValidationError {
                    message: format!("player {} is bought twice", transfer.element_in),
                });
            }
            if !outgoing.insert(transfer.element_out) {
                return Err(TransferError::ValidationError {
                    message: format!("player {} is sold twice", transfer.element_out),
                });
            }
        }

        Ok(())
    }
}
