//! Orchestrator tests: filter swaps, refresh, and view publication.

use chrono::{Duration, TimeZone, Utc};
use clientboard_core::{
    config::GeneratorConfig,
    dashboard::Dashboard,
    error::{BoardError, BoardResult},
    filter::{apply_filters, ClientFilter},
    metrics::compute_snapshot,
    source::{ClientSource, JsonFileSource, SyntheticSource},
    types::{Client, Segment, Timestamp},
};
use std::sync::Arc;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn reference() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

fn make_dashboard(seed: u64) -> Dashboard<SyntheticSource> {
    let _ = env_logger::builder().is_test(true).try_init();
    let source = SyntheticSource::new(GeneratorConfig::default_test().with_seed(seed)).unwrap();
    Dashboard::new(source, reference()).unwrap()
}

/// Serves a fixed book, then fails every load after the first `ok_loads`.
struct FlakySource {
    book: Vec<Client>,
    ok_loads: usize,
}

impl ClientSource for FlakySource {
    fn name(&self) -> &'static str {
        "flaky"
    }

    fn load(&mut self, _reference: Timestamp) -> BoardResult<Vec<Client>> {
        if self.ok_loads == 0 {
            return Err(BoardError::Other(anyhow::anyhow!("upstream timed out")));
        }
        self.ok_loads -= 1;
        Ok(self.book.clone())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The initial view is unfiltered and covers the whole book.
#[test]
fn initial_view_covers_whole_book() {
    let dash = make_dashboard(42);
    let view = dash.view();

    assert!(view.filter.is_all());
    assert_eq!(view.metrics.total_clients, dash.book().len());
    assert_eq!(view.time_series.len(), 12);
    assert_eq!(view.segment_analysis.len(), Segment::ALL.len());
    assert!(view.recent_clients.len() <= 10);
    assert!(view.top_spenders.len() <= 10);
}

/// A new filter publishes a fresh view; an old Arc keeps its contents.
#[test]
fn set_filter_publishes_new_view_and_keeps_old_intact() {
    let mut dash = make_dashboard(7);
    let before = dash.view();
    let before_total = before.metrics.total_clients;

    let filter = ClientFilter::parse("all", "premium", "all").unwrap();
    let after = dash.set_filter(filter);

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.metrics.total_clients, before_total, "published view was mutated");
    assert_eq!(after.filter, filter);

    let expected = apply_filters(dash.book(), &filter, reference());
    assert_eq!(after.metrics, compute_snapshot(&expected));
    assert!(after.top_spenders.iter().all(|c| c.segment == Segment::Premium));
    assert!(after.recent_clients.iter().all(|c| c.segment == Segment::Premium));

    let empty: Vec<_> = after
        .segment_analysis
        .iter()
        .filter(|s| s.segment != Segment::Premium)
        .collect();
    assert!(empty.iter().all(|s| s.client_count == 0 && s.average_spend == 0.0));
}

/// Re-applying the same filter keeps the same published view.
#[test]
fn unchanged_filter_is_noop() {
    let mut dash = make_dashboard(11);
    let filter = ClientFilter::parse("90", "all", "all").unwrap();
    let first = dash.set_filter(filter);
    let second = dash.set_filter(filter);
    assert!(Arc::ptr_eq(&first, &second));
}

/// Going back to the all-pass filter restores the original numbers.
#[test]
fn clearing_filter_restores_totals() {
    let mut dash = make_dashboard(3);
    let original = dash.view();
    dash.set_filter(ClientFilter::parse("30", "basic", "norte").unwrap());
    let restored = dash.set_filter(ClientFilter::all());
    assert_eq!(original.metrics, restored.metrics);
    assert_eq!(original.time_series, restored.time_series);
}

/// Refresh reloads the book and recomputes under the current filter.
#[test]
fn refresh_recomputes_with_current_filter() {
    let mut dash = make_dashboard(5);
    let filter = ClientFilter::parse("all", "standard", "all").unwrap();
    dash.set_filter(filter);

    let later = reference() + Duration::days(40);
    let view = dash.refresh(later).unwrap();

    assert_eq!(view.reference, later);
    assert_eq!(view.filter, filter);
    let expected = apply_filters(dash.book(), &filter, later);
    assert_eq!(view.metrics.total_clients, expected.len());
}

/// A failing refresh leaves the previous view published.
#[test]
fn failed_refresh_keeps_previous_view() {
    let book = SyntheticSource::new(GeneratorConfig::default_test())
        .unwrap()
        .load(reference())
        .unwrap();
    let mut dash = Dashboard::new(FlakySource { book, ok_loads: 1 }, reference()).unwrap();
    let before = dash.view();

    let err = dash.refresh(reference() + Duration::days(1)).unwrap_err();
    assert!(err.to_string().contains("timed out"), "unexpected error: {err}");
    assert!(Arc::ptr_eq(&before, &dash.view()));
    assert_eq!(dash.view().reference, reference());
}

/// A client book round-trips through a JSON file source.
#[test]
fn json_file_source_loads_clients() {
    let book = SyntheticSource::new(GeneratorConfig::default_test().with_seed(21))
        .unwrap()
        .load(reference())
        .unwrap();

    let path = std::env::temp_dir().join(format!("clientboard-book-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string(&book).unwrap()).unwrap();

    let dash = Dashboard::new(JsonFileSource::new(path.clone()), reference()).unwrap();
    let expected = compute_snapshot(&book);
    let loaded = dash.view();
    assert_eq!(dash.book().len(), book.len());
    assert_eq!(loaded.metrics.total_clients, expected.total_clients);
    assert_eq!(loaded.metrics.active_clients, expected.active_clients);
    assert!(
        (loaded.metrics.total_revenue - expected.total_revenue).abs() < 1e-6,
        "revenue drifted through JSON: {:.4} vs {:.4}",
        loaded.metrics.total_revenue,
        expected.total_revenue
    );

    std::fs::remove_file(&path).ok();
}

/// Missing files surface as I/O errors from the source.
#[test]
fn json_file_source_reports_missing_file() {
    let result = Dashboard::new(JsonFileSource::new("/nonexistent/clients.json"), reference());
    assert!(matches!(result, Err(BoardError::Io(_))));
}

/// Client books written with Portuguese category spellings load.
#[test]
fn json_accepts_portuguese_category_spellings() {
    let json = r#"[{
        "id": "CLI000001",
        "segment": "Básico",
        "region": "Centro-Oeste",
        "status": "Ativo",
        "registration_date": "2026-05-01T10:00:00Z",
        "total_spent": 120.0,
        "total_purchases": 2,
        "churn_risk": 0.4,
        "satisfaction": 4
    }]"#;
    let clients: Vec<Client> = serde_json::from_str(json).unwrap();
    let m = compute_snapshot(&clients);
    assert_eq!(m.active_clients, 1);
    assert!((m.average_order_value - 60.0).abs() < 1e-9);
}

/// A book that breaks the record invariants is rejected at load time.
#[test]
fn json_file_source_rejects_invalid_book() {
    let json = r#"[{
        "id": "CLI000042",
        "segment": "Premium",
        "region": "Sul",
        "status": "Active",
        "registration_date": "2026-05-01T10:00:00Z",
        "total_spent": 777.0,
        "total_purchases": 1,
        "churn_risk": 3.0,
        "satisfaction": 9,
        "purchases": [{
            "date": "2026-05-02T10:00:00Z",
            "product": "Produto A",
            "quantity": 0,
            "unit_price": -1.0,
            "total": 777.0
        }]
    }]"#;
    let path = std::env::temp_dir().join(format!("clientboard-bad-{}.json", std::process::id()));
    std::fs::write(&path, json).unwrap();

    let result = JsonFileSource::new(path.clone()).load(reference());
    std::fs::remove_file(&path).ok();

    match result {
        Err(BoardError::InvalidClient { id, .. }) => assert_eq!(id, "CLI000042"),
        other => panic!("expected InvalidClient, got {other:?}"),
    }
}

/// A single bad purchase total is enough to reject the book.
#[test]
fn json_file_source_rejects_inconsistent_purchase_total() {
    let mut book = SyntheticSource::new(GeneratorConfig::default_test().with_seed(8))
        .unwrap()
        .load(reference())
        .unwrap();
    let victim = book
        .iter_mut()
        .find(|c| !c.purchases.is_empty())
        .expect("generated book has purchases");
    victim.purchases[0].total += 100.0;

    let path = std::env::temp_dir().join(format!("clientboard-total-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string(&book).unwrap()).unwrap();
    let result = Dashboard::new(JsonFileSource::new(path.clone()), reference());
    std::fs::remove_file(&path).ok();

    assert!(
        matches!(result, Err(BoardError::InvalidClient { .. })),
        "inconsistent total was accepted"
    );
}
