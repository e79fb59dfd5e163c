//! The dashboard orchestrator — owns the client book and the current
//! filter, and publishes immutable views.
//!
//! RULES:
//!   - A view is built completely before it is published.
//!   - Publishing replaces the Arc; a published view is never mutated.
//!   - Every view is recomputed from the full book. Nothing carries over
//!     from the previous filter pass.

use crate::{
    error::BoardResult,
    filter::{apply_filters, ClientFilter},
    metrics::{compute_snapshot, MetricsSnapshot},
    rankings::{recent_clients, top_spenders, DEFAULT_RANKING_LIMIT},
    segments::{compute_segment_summaries, SegmentSummary},
    source::ClientSource,
    time_series::{compute_time_series, TimeSeriesPoint, DEFAULT_MONTHS_BACK},
    types::{Client, Segment, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything the rendering layer displays, for one filter at one instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub filter: ClientFilter,
    pub reference: Timestamp,
    pub metrics: MetricsSnapshot,
    pub time_series: Vec<TimeSeriesPoint>,
    pub segment_analysis: Vec<SegmentSummary>,
    pub recent_clients: Vec<Client>,
    pub top_spenders: Vec<Client>,
}

impl DashboardView {
    pub fn compute(
        book: &[Client],
        filter: ClientFilter,
        reference: Timestamp,
        months_back: u32,
    ) -> Self {
        let clients = apply_filters(book, &filter, reference);
        Self {
            filter,
            reference,
            metrics: compute_snapshot(&clients),
            time_series: compute_time_series(&clients, months_back, reference),
            segment_analysis: compute_segment_summaries(&clients, &Segment::ALL),
            recent_clients: recent_clients(&clients, DEFAULT_RANKING_LIMIT),
            top_spenders: top_spenders(&clients, DEFAULT_RANKING_LIMIT),
        }
    }
}

pub struct Dashboard<S: ClientSource> {
    source: S,
    book: Vec<Client>,
    filter: ClientFilter,
    reference: Timestamp,
    months_back: u32,
    view: Arc<DashboardView>,
}

impl<S: ClientSource> Dashboard<S> {
    /// Load the book and publish the unfiltered view.
    pub fn new(source: S, reference: Timestamp) -> BoardResult<Self> {
        Self::with_months_back(source, reference, DEFAULT_MONTHS_BACK)
    }

    pub fn with_months_back(mut source: S, reference: Timestamp, months_back: u32) -> BoardResult<Self> {
        let book = source.load(reference)?;
        log::info!("dashboard: {} source loaded {} clients", source.name(), book.len());
        let filter = ClientFilter::all();
        let view = Arc::new(DashboardView::compute(&book, filter, reference, months_back));
        Ok(Self {
            source,
            book,
            filter,
            reference,
            months_back,
            view,
        })
    }

    /// The currently published view.
    pub fn view(&self) -> Arc<DashboardView> {
        Arc::clone(&self.view)
    }

    pub fn filter(&self) -> ClientFilter {
        self.filter
    }

    pub fn book(&self) -> &[Client] {
        &self.book
    }

    /// Swap in a new filter and publish the recomputed view.
    /// An unchanged filter keeps the current view.
    pub fn set_filter(&mut self, filter: ClientFilter) -> Arc<DashboardView> {
        if filter != self.filter {
            self.filter = filter;
            self.publish();
        }
        self.view()
    }

    /// Reload the book from the source and recompute with the current
    /// filter. On failure the previous book and view stay in place.
    pub fn refresh(&mut self, reference: Timestamp) -> BoardResult<Arc<DashboardView>> {
        let book = match self.source.load(reference) {
            Ok(book) => book,
            Err(e) => {
                log::warn!("dashboard: {} refresh failed, keeping previous view: {e}", self.source.name());
                return Err(e);
            }
        };
        self.book = book;
        self.reference = reference;
        self.publish();
        Ok(self.view())
    }

    fn publish(&mut self) {
        let view = DashboardView::compute(&self.book, self.filter, self.reference, self.months_back);
        log::debug!(
            "dashboard: published view clients={} revenue={:.2} filter={:?}",
            view.metrics.total_clients,
            view.metrics.total_revenue,
            self.filter
        );
        self.view = Arc::new(view);
    }
}
