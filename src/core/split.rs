//! Equal-split calculation
//!
//! Pure math with no side effects: given a total amount, the participants,
//! and the payer, compute each participant's share and the signed balance
//! deltas the ledger must apply.
//!
//! # Rounding
//!
//! Amounts are integer cents, so an equal split may leave a remainder of up
//! to n-1 cents. The remainder is charged one cent each to the earliest
//! participants (in deduplicated submission order), which keeps the result
//! deterministic and the shares summing exactly to the total.

use crate::types::{LedgerError, MemberId, Money};
use std::collections::HashSet;

/// Result of splitting an expense equally
///
/// `shares` holds every participant's owed portion in deduplicated
/// submission order; the shares always sum exactly to the expense amount.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Base (floor) share each participant owes
    pub per_person_share: Money,

    /// Net amount the payer is owed back
    ///
    /// `amount - payer's own share` when the payer participates in the
    /// split; the full amount when they do not.
    pub payer_credit: Money,

    shares: Vec<(MemberId, Money)>,
}

impl Split {
    /// Per-participant shares in deduplicated submission order
    pub fn shares(&self) -> &[(MemberId, Money)] {
        &self.shares
    }

    /// The deduplicated participant identities
    pub fn participants(&self) -> Vec<MemberId> {
        self.shares.iter().map(|(member, _)| member.clone()).collect()
    }

    /// Signed balance deltas for this split
    ///
    /// The payer is credited `payer_credit`; every non-payer participant is
    /// debited their share. The deltas sum to zero by construction, which
    /// is what preserves the house's zero-sum invariant.
    pub fn deltas(&self, payer: &MemberId) -> Vec<(MemberId, Money)> {
        let mut deltas = vec![(payer.clone(), self.payer_credit)];
        for (member, share) in &self.shares {
            if member != payer {
                deltas.push((member.clone(), -*share));
            }
        }
        deltas
    }
}

/// Compute the equal split of `amount` across `participants`
///
/// # Arguments
///
/// * `amount` - Total expense amount (must be positive)
/// * `participants` - Members sharing the expense; duplicates are collapsed
///   to their first occurrence, and the payer may or may not appear
/// * `payer` - The member who paid up front
///
/// # Errors
///
/// * `InvalidAmount` if `amount <= 0`
/// * `EmptySplit` if no participants remain after deduplication
pub fn compute_split(
    amount: Money,
    participants: &[MemberId],
    payer: &MemberId,
) -> Result<Split, LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::invalid_amount(amount));
    }

    let mut seen = HashSet::new();
    let unique: Vec<MemberId> = participants
        .iter()
        .filter(|member| seen.insert((*member).clone()))
        .cloned()
        .collect();

    if unique.is_empty() {
        return Err(LedgerError::EmptySplit);
    }

    let count = unique.len() as i64;
    let base = amount.cents().div_euclid(count);
    let remainder = amount.cents() - base * count;

    let shares: Vec<(MemberId, Money)> = unique
        .into_iter()
        .enumerate()
        .map(|(index, member)| {
            let extra = if (index as i64) < remainder { 1 } else { 0 };
            (member, Money::from_cents(base + extra))
        })
        .collect();

    let payer_share = shares
        .iter()
        .find(|(member, _)| member == payer)
        .map(|(_, share)| *share)
        .unwrap_or(Money::ZERO);

    let payer_credit = Money::from_cents(amount.cents() - payer_share.cents());

    Ok(Split {
        per_person_share: Money::from_cents(base),
        payer_credit,
        shares,
    })
}
