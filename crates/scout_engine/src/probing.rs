use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Arc, Mutex};

use engine_logging::{engine_debug, engine_info, engine_warn};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::{ProbeResult, ProbeSettings, Prober};

/// Heap entry ordered by size alone, so the max-heap pops largest first.
#[derive(Debug)]
struct BySize(ProbeResult);

impl PartialEq for BySize {
    fn eq(&self, other: &Self) -> bool {
        self.0.size_bytes == other.0.size_bytes
    }
}

impl Eq for BySize {}

impl PartialOrd for BySize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BySize {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.size_bytes.cmp(&other.0.size_bytes)
    }
}

#[derive(Debug, Default)]
struct Inner {
    heap: BinaryHeap<BySize>,
    sealed: bool,
}

/// Size-ordered collection shared by probe workers.
///
/// Any number of workers may insert concurrently. A single consumer drains it
/// once; draining seals it and every later insert is rejected.
#[derive(Debug, Default)]
pub struct SizeOrderedResults {
    inner: Mutex<Inner>,
}

impl SizeOrderedResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the collection was already drained.
    pub fn insert(&self, result: ProbeResult) -> bool {
        let mut inner = self.lock();
        if inner.sealed {
            engine_debug!("late probe result discarded url={}", result.url);
            return false;
        }
        inner.heap.push(BySize(result));
        true
    }

    pub fn len(&self) -> usize {
        self.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sealed(&self) -> bool {
        self.lock().sealed
    }

    /// Seals the collection and returns its contents, largest first.
    pub fn drain(&self) -> Vec<ProbeResult> {
        let heap = {
            let mut inner = self.lock();
            inner.sealed = true;
            std::mem::take(&mut inner.heap)
        };
        heap.into_sorted_vec()
            .into_iter()
            .rev()
            .map(|BySize(result)| result)
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A worker panicking mid-insert leaves the heap intact.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Probes candidates on a fixed pool of workers and returns them ordered by
/// size, largest first.
#[derive(Clone)]
pub struct ProbingEngine {
    prober: Arc<dyn Prober>,
    settings: ProbeSettings,
}

impl ProbingEngine {
    pub fn new(prober: Arc<dyn Prober>, settings: ProbeSettings) -> Self {
        Self { prober, settings }
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Probes every URL and waits for all of them or for the deadline,
    /// whichever comes first. Results still in flight at the deadline are
    /// dropped.
    pub async fn probe<I>(&self, urls: I, user_agent: &str) -> Vec<ProbeResult>
    where
        I: IntoIterator<Item = String>,
    {
        let (work_tx, work_rx) = mpsc::unbounded_channel();
        let mut queued = 0usize;
        for url in urls {
            // The receiver is alive until the end of this function.
            let _ = work_tx.send(url);
            queued += 1;
        }
        drop(work_tx);
        if queued == 0 {
            return Vec::new();
        }

        let results = Arc::new(SizeOrderedResults::new());
        let work_rx = Arc::new(tokio::sync::Mutex::new(work_rx));
        let user_agent: Arc<str> = Arc::from(user_agent);
        let workers = self.settings.workers.clamp(1, queued);

        let mut pool = JoinSet::new();
        for _ in 0..workers {
            let prober = self.prober.clone();
            let work_rx = work_rx.clone();
            let results = results.clone();
            let user_agent = user_agent.clone();
            pool.spawn(async move {
                loop {
                    let next = work_rx.lock().await.recv().await;
                    let Some(url) = next else { break };
                    let result = prober.probe_one(&url, &user_agent).await;
                    results.insert(result);
                }
            });
        }

        let all_done = async {
            while let Some(joined) = pool.join_next().await {
                if let Err(err) = joined {
                    engine_warn!("probe worker ended abnormally: {}", err);
                }
            }
        };
        if tokio::time::timeout(self.settings.deadline, all_done).await.is_err() {
            engine_warn!(
                "probe deadline of {:?} reached with {}/{} results",
                self.settings.deadline,
                results.len(),
                queued
            );
        }

        let ordered = results.drain();
        // Stragglers are aborted; anything they still produce is rejected by
        // the sealed collection.
        pool.abort_all();
        engine_info!(
            "probed {} candidates, {} accepted",
            ordered.len(),
            ordered.iter().filter(|r| r.is_accepted()).count()
        );
        ordered
    }
}
