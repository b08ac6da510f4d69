use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pretty_assertions::assert_eq;
use scout_engine::{ProbeResult, ProbeSettings, Prober, ProbingEngine, SizeOrderedResults};

/// Answers from a fixed table after a per-URL delay and tracks concurrency.
#[derive(Default)]
struct TableProber {
    table: HashMap<String, (u64, Duration)>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl TableProber {
    fn with(entries: &[(&str, u64, u64)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(url, size, delay_ms)| {
                    (url.to_string(), (*size, Duration::from_millis(*delay_ms)))
                })
                .collect(),
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl Prober for TableProber {
    async fn probe_one(&self, url: &str, _user_agent: &str) -> ProbeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let (size, delay) = self.table.get(url).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        ProbeResult::new(url, size)
    }
}

fn settings(workers: usize, deadline_ms: u64) -> ProbeSettings {
    ProbeSettings {
        workers,
        deadline: Duration::from_millis(deadline_ms),
        ..ProbeSettings::default()
    }
}

fn urls(prober: &TableProber) -> Vec<String> {
    prober.table.keys().cloned().collect()
}

#[tokio::test]
async fn results_come_back_largest_first() {
    let prober = Arc::new(TableProber::with(&[
        ("a", 300, 5),
        ("b", 0, 1),
        ("c", 90_000, 10),
        ("d", 12_000, 0),
        ("e", 300, 3),
    ]));
    let engine = ProbingEngine::new(prober.clone(), settings(3, 5_000));

    let results = engine.probe(urls(&prober), "ua").await;

    let sizes: Vec<u64> = results.iter().map(|r| r.size_bytes).collect();
    assert_eq!(sizes, vec![90_000, 12_000, 300, 300, 0]);
    assert_eq!(results[0].url, "c");
    assert_eq!(results[1].url, "d");
    assert_eq!(prober.calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn worker_count_bounds_concurrency() {
    let entries: Vec<(String, u64, u64)> =
        (0..24).map(|i| (format!("u{i}"), 10_000 + i, 15)).collect();
    let borrowed: Vec<(&str, u64, u64)> = entries
        .iter()
        .map(|(url, size, delay)| (url.as_str(), *size, *delay))
        .collect();
    let prober = Arc::new(TableProber::with(&borrowed));
    let engine = ProbingEngine::new(prober.clone(), settings(4, 10_000));

    let results = engine.probe(urls(&prober), "ua").await;

    assert_eq!(results.len(), 24);
    assert_eq!(prober.calls.load(Ordering::SeqCst), 24);
    assert!(prober.max_in_flight.load(Ordering::SeqCst) <= 4);
    assert!(results.windows(2).all(|w| w[0].size_bytes >= w[1].size_bytes));
}

#[tokio::test]
async fn deadline_drops_stragglers() {
    let prober = Arc::new(TableProber::with(&[
        ("fast", 20_000, 0),
        ("quick", 30_000, 10),
        ("hung", 99_000, 60_000),
    ]));
    let engine = ProbingEngine::new(prober.clone(), settings(3, 300));

    let started = std::time::Instant::now();
    let results = engine.probe(urls(&prober), "ua").await;

    assert!(started.elapsed() < Duration::from_secs(10));
    let got: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(got, vec!["quick", "fast"]);
}

#[tokio::test]
async fn no_candidates_means_no_probes() {
    let prober = Arc::new(TableProber::default());
    let engine = ProbingEngine::new(prober.clone(), settings(6, 1_000));

    let results = engine.probe(Vec::<String>::new(), "ua").await;

    assert!(results.is_empty());
    assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn drain_is_non_increasing_under_concurrent_inserts() {
    let results = Arc::new(SizeOrderedResults::new());
    let handles: Vec<_> = (0..8u64)
        .map(|worker| {
            let results = results.clone();
            thread::spawn(move || {
                for i in 0..50u64 {
                    let size = (i * 7919 + worker * 104_729) % 1_000;
                    assert!(results.insert(ProbeResult::new(format!("{worker}-{i}"), size)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let drained = results.drain();
    assert_eq!(drained.len(), 400);
    assert!(drained.windows(2).all(|w| w[0].size_bytes >= w[1].size_bytes));
}

#[test]
fn inserts_after_drain_are_rejected() {
    let results = SizeOrderedResults::new();
    assert!(results.insert(ProbeResult::new("a", 10)));
    assert_eq!(results.drain().len(), 1);

    assert!(results.is_sealed());
    assert!(!results.insert(ProbeResult::new("late", 50)));
    assert!(results.is_empty());
    assert!(results.drain().is_empty());
}

#[test]
fn probe_results_compare_by_url_only() {
    assert_eq!(ProbeResult::new("a", 1), ProbeResult::new("a", 2));
    assert_ne!(ProbeResult::new("a", 1), ProbeResult::new("b", 1));
}
