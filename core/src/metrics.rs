//! Headline KPIs for a client set.
//!
//! RULE: every function here is total. Empty input yields zeros,
//! never NaN, and never an error.

use crate::types::{Client, Region, Segment};
use serde::{Deserialize, Serialize};

/// Churn risk strictly above this marks a client as at risk.
pub const CHURN_RISK_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionRevenue {
    pub region: Region,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentCount {
    pub segment: Segment,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsSnapshot {
    pub total_revenue: f64,
    pub total_clients: usize,
    pub active_clients: usize,
    pub inactive_rate: f64,
    pub average_order_value: f64,
    /// Average lifetime spend per client.
    pub customer_lifetime_value: f64,
    pub churn_rate: f64,
    pub revenue_by_region: Vec<RegionRevenue>,
    pub clients_by_segment: Vec<SegmentCount>,
}

/// `num / den`, or 0 when the denominator is zero.
pub(crate) fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

pub fn compute_snapshot(clients: &[Client]) -> MetricsSnapshot {
    let total_clients = clients.len();
    let total_revenue: f64 = clients.iter().map(|c| c.total_spent).sum();
    let total_purchases: u64 = clients.iter().map(|c| c.total_purchases as u64).sum();
    let active_clients = clients.iter().filter(|c| c.is_active()).count();
    let at_risk = clients.iter().filter(|c| c.is_at_risk()).count();

    let revenue_by_region = Region::ALL
        .iter()
        .map(|&region| RegionRevenue {
            region,
            revenue: clients
                .iter()
                .filter(|c| c.region == region)
                .map(|c| c.total_spent)
                .sum(),
        })
        .collect();

    let clients_by_segment = Segment::ALL
        .iter()
        .map(|&segment| SegmentCount {
            segment,
            count: clients.iter().filter(|c| c.segment == segment).count(),
        })
        .collect();

    MetricsSnapshot {
        total_revenue,
        total_clients,
        active_clients,
        inactive_rate: ratio((total_clients - active_clients) as f64, total_clients as f64),
        average_order_value: ratio(total_revenue, total_purchases as f64),
        customer_lifetime_value: ratio(total_revenue, total_clients as f64),
        churn_rate: ratio(at_risk as f64, total_clients as f64),
        revenue_by_region,
        clients_by_segment,
    }
}
