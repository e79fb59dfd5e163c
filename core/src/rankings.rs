//! Short leaderboards shown next to the KPIs.
//!
//! Both work on a copy; the input order is never touched.

use crate::types::Client;

pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Newest registrations first.
pub fn recent_clients(clients: &[Client], limit: usize) -> Vec<Client> {
    let mut sorted: Vec<&Client> = clients.iter().collect();
    sorted.sort_by(|a, b| b.registration_date.cmp(&a.registration_date));
    sorted.into_iter().take(limit).cloned().collect()
}

/// Highest lifetime spend first.
pub fn top_spenders(clients: &[Client], limit: usize) -> Vec<Client> {
    let mut sorted: Vec<&Client> = clients.iter().collect();
    sorted.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    sorted.into_iter().take(limit).cloned().collect()
}
