use crate::core::{PlayerSummary, SquadPicks, TransferRequest};
use crate::utils::error::{Result, TransferError};
use std::collections::HashMap;

pub const MAX_PLAYERS_PER_TEAM: usize = 3;

/// Checks a request against the entry's current picks and bank.
///
/// The catalog supplies each player's position (`element_type`) and club
/// (`team`): an incoming player must fill the outgoing player's position, and
/// the squad after the transfers may hold at most [`MAX_PLAYERS_PER_TEAM`]
/// players from one club.
pub fn check_squad(
    request: &TransferRequest,
    picks: &SquadPicks,
    catalog: &[PlayerSummary],
) -> Result<()> {
    for transfer in &request.transfers {
        if !picks.elements.contains(&transfer.element_out) {
            return Err(TransferError::ValidationError {
                message: format!("player {} is not in the squad", transfer.element_out),
            });
        }
        if picks.elements.contains(&transfer.element_in) {
            return Err(TransferError::ValidationError {
                message: format!("player {} is already in the squad", transfer.element_in),
            });
        }
    }

    let players: HashMap<u32, &PlayerSummary> = catalog.iter().map(|p| (p.id, p)).collect();
    let lookup = |element: u32| {
        players
            .get(&element)
            .copied()
            .ok_or(TransferError::PlayerNotFound { element })
    };

    for transfer in &request.transfers {
        let incoming = lookup(transfer.element_in)?;
        let outgoing = lookup(transfer.element_out)?;
        if incoming.element_type != outgoing.element_type {
            return Err(TransferError::ValidationError {
                message: format!(
                    "{} ({}) cannot replace {} ({}): positions differ ({} vs {})",
                    incoming.web_name,
                    incoming.id,
                    outgoing.web_name,
                    outgoing.id,
                    incoming.element_type,
                    outgoing.element_type
                ),
            });
        }
    }

    let squad_after = picks
        .elements
        .iter()
        .copied()
        .filter(|id| !request.transfers.iter().any(|t| t.element_out == *id))
        .chain(request.transfers.iter().map(|t| t.element_in));

    let mut per_team: HashMap<u8, usize> = HashMap::new();
    for element in squad_after {
        let player = lookup(element)?;
        let count = per_team.entry(player.team).or_insert(0);
        *count += 1;
        if *count > MAX_PLAYERS_PER_TEAM {
            return Err(TransferError::ValidationError {
                message: format!(
                    "too many players from team {}: at most {} allowed",
                    player.team, MAX_PLAYERS_PER_TEAM
                ),
            });
        }
    }

    let sold: i64 = request
        .transfers
        .iter()
        .map(|t| i64::from(t.selling_price))
        .sum();
    let bought: i64 = request
        .transfers
        .iter()
        .map(|t| i64::from(t.purchase_price))
        .sum();
    let remaining = picks.bank + sold - bought;

    if remaining < 0 {
        return Err(TransferError::ValidationError {
            message: format!(
                "transfers cost {} more than the bank allows (bank {}, selling {}, buying {})",
                -remaining, picks.bank, sold, bought
            ),
        });
    }

    tracing::debug!("Squad check passed, {} left in the bank", remaining);
    Ok(())
}
