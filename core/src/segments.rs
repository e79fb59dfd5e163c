//! Per-segment rollups.
//!
//! An empty segment reports 0 for every derived field. Display code
//! divides by these without guards.

use crate::{
    metrics::ratio,
    types::{Client, Segment},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentSummary {
    pub segment: Segment,
    pub client_count: usize,
    pub revenue: f64,
    pub average_spend: f64,
    /// Mean purchases per month.
    pub purchase_frequency: f64,
    pub churn_rate: f64,
    pub satisfaction: f64,
    pub average_order_value: f64,
}

pub fn summarize_segment(clients: &[Client], segment: Segment) -> SegmentSummary {
    let mut client_count = 0usize;
    let mut revenue = 0.0;
    let mut purchases = 0u64;
    let mut frequency_sum = 0.0;
    let mut satisfaction_sum = 0.0;
    let mut at_risk = 0usize;

    for c in clients.iter().filter(|c| c.segment == segment) {
        client_count += 1;
        revenue += c.total_spent;
        purchases += c.total_purchases as u64;
        frequency_sum += c.purchase_frequency;
        satisfaction_sum += c.satisfaction as f64;
        if c.is_at_risk() {
            at_risk += 1;
        }
    }

    let n = client_count as f64;
    SegmentSummary {
        segment,
        client_count,
        revenue,
        average_spend: ratio(revenue, n),
        purchase_frequency: ratio(frequency_sum, n),
        churn_rate: ratio(at_risk as f64, n),
        satisfaction: ratio(satisfaction_sum, n),
        average_order_value: ratio(revenue, purchases as f64),
    }
}

/// One summary per requested segment, in the order given.
pub fn compute_segment_summaries(clients: &[Client], segments: &[Segment]) -> Vec<SegmentSummary> {
    segments
        .iter()
        .map(|&segment| summarize_segment(clients, segment))
        .collect()
}
