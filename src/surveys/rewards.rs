//! Reward ledger aggregation for dashboard and balance views.

use chrono::{DateTime, Months, Utc};
use serde::Serialize;

use crate::surveys::profiling::domain::{RewardKind, RewardLedgerEntry};

/// Derived balance view over a panelist's reward ledger. Never stored; the
/// ledger entries are the only source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardsSummary {
    pub total_earned: i32,
    pub total_redeemed: i32,
    pub total_expired: i32,
    pub total_available: i32,
    pub entries: Vec<RewardEntryView>,
}

/// One ledger movement as shown on the rewards dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardEntryView {
    pub description: String,
    pub points: i32,
    pub completed_on: DateTime<Utc>,
    pub is_expired: bool,
}

/// Fold the ledger into totals. Earned entries older than `expiry_months`
/// before `now` count as expired; redemptions are summed by magnitude; the
/// available balance never goes negative.
pub fn summarize_rewards(
    entries: &[RewardLedgerEntry],
    now: DateTime<Utc>,
    expiry_months: u32,
) -> RewardsSummary {
    let cutoff = now
        .checked_sub_months(Months::new(expiry_months))
        .unwrap_or(now);

    let mut total_earned = 0;
    let mut total_expired = 0;
    let mut total_redeemed = 0;
    let mut views = Vec::with_capacity(entries.len());

    for entry in entries {
        let expired = entry.kind == RewardKind::Earned && entry.created_on < cutoff;

        match entry.kind {
            RewardKind::Earned => {
                total_earned += entry.points;
                if expired {
                    total_expired += entry.points;
                }
            }
            RewardKind::Redeemed => total_redeemed += entry.points.abs(),
        }

        views.push(RewardEntryView {
            description: entry.description.clone(),
            points: entry.points,
            completed_on: entry.created_on,
            is_expired: expired,
        });
    }

    let total_available = (total_earned - total_expired - total_redeemed).max(0);

    RewardsSummary {
        total_earned,
        total_redeemed,
        total_expired,
        total_available,
        entries: views,
    }
}
