use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tracing::debug;
use vrkb_session::CandidateError;

use crate::candidate_service::CandidateService;

// ---------------------------------------------------------------------------
// Work / Result types
// ---------------------------------------------------------------------------

pub(crate) struct CandidateWork {
    pub reading: String,
    pub generation: u64,
}

/// Finished lookup, tagged with the conversion generation it answers.
pub struct CandidateResult {
    pub reading: String,
    pub generation: u64,
    pub result: Result<Vec<String>, CandidateError>,
}

// ---------------------------------------------------------------------------
// CandidateWorker
// ---------------------------------------------------------------------------

/// Runs candidate lookups off the UI thread. Only the newest request is
/// served; older queued requests are skipped.
pub struct CandidateWorker {
    work_tx: mpsc::Sender<CandidateWork>,
    result_rx: Mutex<mpsc::Receiver<CandidateResult>>,
    latest: Arc<AtomicU64>,
}

impl CandidateWorker {
    pub fn spawn(service: Arc<dyn CandidateService>) -> std::io::Result<Self> {
        let latest = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<CandidateWork>();
        let (result_tx, result_rx) = mpsc::channel::<CandidateResult>();
        {
            let latest = Arc::clone(&latest);
            thread::Builder::new()
                .name("vrkb-candidates".into())
                .spawn(move || candidate_worker(work_rx, result_tx, latest, service))?;
        }
        Ok(Self {
            work_tx,
            result_rx: Mutex::new(result_rx),
            latest,
        })
    }

    /// Queue a lookup for the conversion identified by `generation`.
    pub fn submit(&self, reading: String, generation: u64) {
        self.latest.store(generation, Ordering::SeqCst);
        let _ = self.work_tx.send(CandidateWork {
            reading,
            generation,
        });
    }

    /// Mark every queued or running request stale.
    pub fn invalidate(&self) {
        self.latest.store(0, Ordering::SeqCst);
    }

    pub fn try_recv(&self) -> Option<CandidateResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    /// Block until a result arrives or the worker is gone.
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<CandidateResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.recv_timeout(timeout).ok()
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn candidate_worker(
    rx: mpsc::Receiver<CandidateWork>,
    tx: mpsc::Sender<CandidateResult>,
    latest: Arc<AtomicU64>,
    service: Arc<dyn CandidateService>,
) {
    while let Ok(work) = rx.recv() {
        // Drain: if multiple work items queued, skip to latest
        let mut work = work;
        while let Ok(newer) = rx.try_recv() {
            work = newer;
        }

        // Check staleness before doing work
        if work.generation != latest.load(Ordering::SeqCst) {
            debug!(generation = work.generation, "candidate work skipped: stale");
            continue;
        }

        let result = service.fetch(&work.reading);

        // Check staleness after work
        if work.generation != latest.load(Ordering::SeqCst) {
            debug!(generation = work.generation, "candidate result discarded: stale");
            continue;
        }

        if tx
            .send(CandidateResult {
                reading: work.reading,
                generation: work.generation,
                result,
            })
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::candidate_service::StaticCandidates;

    fn worker() -> CandidateWorker {
        let svc = StaticCandidates::new().with("ねこ", &["猫", "ネコ"]);
        CandidateWorker::spawn(Arc::new(svc)).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let w = worker();
        w.submit("ねこ".into(), 1);
        let r = w.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(r.generation, 1);
        assert_eq!(r.reading, "ねこ");
        assert_eq!(r.result.unwrap(), vec!["猫", "ネコ"]);
    }

    /// Blocks every lookup until the test lets it through.
    struct GatedService {
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl CandidateService for GatedService {
        fn fetch(&self, reading: &str) -> Result<Vec<String>, CandidateError> {
            self.gate.lock().unwrap().recv().unwrap();
            Ok(vec![reading.to_uppercase()])
        }
    }

    fn gated_worker() -> (CandidateWorker, mpsc::Sender<()>) {
        let (open, gate) = mpsc::channel();
        let svc = GatedService {
            gate: Mutex::new(gate),
        };
        (CandidateWorker::spawn(Arc::new(svc)).unwrap(), open)
    }

    #[test]
    fn test_only_latest_request_answered() {
        let (w, open) = gated_worker();
        w.submit("a".into(), 3);
        w.submit("b".into(), 4);
        open.send(()).unwrap();
        open.send(()).unwrap();
        let r = w.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(r.generation, 4);
        assert_eq!(r.result.unwrap(), vec!["B"]);
        assert!(w.recv_timeout(Duration::from_millis(100)).is_none());
    }

    #[test]
    fn test_invalidated_work_produces_nothing() {
        let (w, open) = gated_worker();
        w.submit("a".into(), 5);
        w.invalidate();
        open.send(()).unwrap();
        assert!(w.recv_timeout(Duration::from_millis(200)).is_none());
    }
}
