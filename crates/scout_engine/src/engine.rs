use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use engine_logging::engine_error;
use scout_core::{update, DeliveryState, Effect, ErrorCode, Msg, RankedResult};

use crate::scrape::{ImageScraper, ScrapeRequest};

/// Receives the notifications of one scrape.
pub trait ScrapeListener: Send + Sync {
    fn on_started(&self);
    fn on_finished(&self, result: RankedResult);
}

struct Delivery {
    state: DeliveryState,
    listener: Option<Arc<dyn ScrapeListener>>,
}

impl Delivery {
    fn apply(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            match effect {
                Effect::NotifyStarted => {
                    if let Some(listener) = &self.listener {
                        listener.on_started();
                    }
                }
                Effect::NotifyFinished(result) => {
                    if let Some(listener) = &self.listener {
                        listener.on_finished(result);
                    }
                }
                Effect::DetachListener => self.listener = None,
            }
        }
    }
}

/// Handle to a scrape running on its own thread.
///
/// Listener callbacks run while the handle's internal lock is held, so a
/// listener must not call back into the handle.
pub struct ScrapeHandle {
    delivery: Arc<Mutex<Delivery>>,
    worker: Option<JoinHandle<()>>,
}

impl ScrapeHandle {
    /// Starts `request` on a background thread with its own runtime. The
    /// listener, if any, receives `on_started` then exactly one
    /// `on_finished`.
    pub fn start(
        scraper: ImageScraper,
        request: ScrapeRequest,
        listener: Option<Arc<dyn ScrapeListener>>,
    ) -> Self {
        let delivery = Arc::new(Mutex::new(Delivery {
            state: DeliveryState::new(),
            listener: None,
        }));
        if let Some(listener) = listener {
            attach(&delivery, listener);
        }

        let worker = thread::spawn({
            let delivery = delivery.clone();
            move || {
                lock(&delivery).apply(Msg::ScrapeStarted);
                let result = panic::catch_unwind(AssertUnwindSafe(|| run(&scraper, &request)))
                    .unwrap_or_else(|_| {
                        engine_error!("scrape of {} panicked", request.page_url);
                        RankedResult::failed(ErrorCode::Io)
                    });
                lock(&delivery).apply(Msg::ScrapeFinished(result));
            }
        });

        Self {
            delivery,
            worker: Some(worker),
        }
    }

    /// Attaches or replaces the listener. After completion the stored
    /// result is delivered to it once and the listener is dropped.
    pub fn set_listener(&self, listener: Arc<dyn ScrapeListener>) {
        attach(&self.delivery, listener);
    }

    pub fn is_finished(&self) -> bool {
        lock(&self.delivery).state.is_finished()
    }

    /// Blocks until the scrape thread exits.
    pub fn join(mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                engine_error!("scrape thread panicked");
            }
        }
    }
}

fn run(scraper: &ImageScraper, request: &ScrapeRequest) -> RankedResult {
    match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime.block_on(scraper.scrape(request)),
        Err(err) => {
            engine_error!("could not start scrape runtime: {}", err);
            RankedResult::failed(ErrorCode::Io)
        }
    }
}

fn attach(delivery: &Mutex<Delivery>, listener: Arc<dyn ScrapeListener>) {
    let mut delivery = lock(delivery);
    delivery.listener = Some(listener);
    delivery.apply(Msg::ListenerAttached);
}

fn lock(delivery: &Mutex<Delivery>) -> MutexGuard<'_, Delivery> {
    delivery
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
