// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA Simulation Controller
// ─────────────────────────────────────────────────────────────────────
//! Lifecycle (Idle ⇄ Running) and the fixed-cadence step clock.
//!
//! A dedicated ticker thread owns the clock: every `tick_interval` it
//! locks the engine for exactly one step. Steps are atomic and never
//! overlap. Recorded steps are published: the frame is stored for the
//! getters, then handed to every observer on the ticker thread with no
//! engine lock held.
//!
//! # Cancellation
//!
//! `stop()`/`reset()` signal the ticker and join it before returning, so
//! no step runs after they return. Called from an observer (i.e. on the
//! ticker thread itself) they only signal; the loop exits as soon as
//! the current tick finishes.
//!
//! Every reset bumps an epoch. A frame stepped under an older epoch is
//! neither stored nor delivered to the observers still waiting for it,
//! so the reset frame is the last one anybody sees.
//!
//! A panic inside a step halts the simulation: the ticker logs it,
//! drops to `Idle` and exits.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, RwLock};

use seqa_physics::{BoxMuller, NormalSource};
use seqa_types::{
    EngineConfig, Influence, SeqaResult, SimulationAnalysis, SimulationFrame, SimulationHistory,
    SimulationParams, SimulationState,
};

use crate::engine::SimulationEngine;
use crate::influence::InfluenceAccumulator;

/// Callback invoked with every published frame.
pub type Observer = Arc<dyn Fn(&SimulationFrame) + Send + Sync>;

/// Handle returned by [`SimulationController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct CancelToken {
    cancelled: Mutex<bool>,
    signal: Condvar,
}

impl CancelToken {
    fn new() -> Self {
        Self {
            cancelled: Mutex::new(false),
            signal: Condvar::new(),
        }
    }

    fn cancel(&self) {
        let mut cancelled = self.cancelled.lock();
        *cancelled = true;
        self.signal.notify_all();
    }

    /// Sleep until `deadline`. Returns true if cancelled meanwhile.
    fn wait_until(&self, deadline: Instant) -> bool {
        let mut cancelled = self.cancelled.lock();
        while !*cancelled {
            if self.signal.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        *cancelled
    }
}

thread_local! {
    // Token of the ticker running on this thread, if any.
    static ACTIVE_TICKER: RefCell<Option<Arc<CancelToken>>> = const { RefCell::new(None) };
}

fn on_ticker_thread(token: &Arc<CancelToken>) -> bool {
    ACTIVE_TICKER.with(|slot| {
        slot.borrow()
            .as_ref()
            .is_some_and(|active| Arc::ptr_eq(active, token))
    })
}

struct Ticker {
    token: Arc<CancelToken>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn<N>(shared: Arc<Shared<N>>, period: Duration) -> std::io::Result<Self>
    where
        N: NormalSource + Send + 'static,
    {
        let token = Arc::new(CancelToken::new());
        let worker_token = Arc::clone(&token);
        let handle = thread::Builder::new()
            .name("seqa-ticker".to_string())
            .spawn(move || run_ticker(shared, worker_token, period))?;
        Ok(Self { token, handle })
    }

    /// Signal the worker and wait for it, unless we *are* the worker.
    fn cancel(self) {
        self.token.cancel();
        if on_ticker_thread(&self.token) {
            return;
        }
        if self.handle.join().is_err() {
            log::error!("SEQA ticker thread panicked");
        }
    }
}

fn run_ticker<N: NormalSource>(shared: Arc<Shared<N>>, token: Arc<CancelToken>, period: Duration) {
    ACTIVE_TICKER.with(|slot| *slot.borrow_mut() = Some(Arc::clone(&token)));

    let mut next_tick = Instant::now() + period;
    while !token.wait_until(next_tick) {
        if panic::catch_unwind(AssertUnwindSafe(|| shared.tick())).is_err() {
            log::error!("SEQA step panicked, simulation halted");
            shared.running.store(false, Ordering::SeqCst);
            break;
        }
        next_tick += period;
        // Fell behind: resume the cadence from now instead of bursting.
        let now = Instant::now();
        if next_tick < now {
            next_tick = now;
        }
    }

    ACTIVE_TICKER.with(|slot| slot.borrow_mut().take());
}

struct Shared<N> {
    engine: Mutex<SimulationEngine<N>>,
    influence: Arc<InfluenceAccumulator>,
    params: RwLock<SimulationParams>,
    published: RwLock<SimulationFrame>,
    observers: RwLock<Vec<(ObserverId, Observer)>>,
    next_observer: AtomicU64,
    running: AtomicBool,
    epoch: AtomicU64,
}

impl<N: NormalSource> Shared<N> {
    fn tick(&self) {
        let params = *self.params.read();
        let (frame, epoch) = {
            let mut engine = self.engine.lock();
            (engine.step(&params), self.epoch.load(Ordering::SeqCst))
        };
        if let Some(frame) = frame {
            self.publish(frame, epoch);
        }
    }

    /// Store and deliver `frame`, produced under `epoch`.
    fn publish(&self, frame: SimulationFrame, epoch: u64) {
        {
            let mut published = self.published.write();
            if self.epoch.load(Ordering::SeqCst) != epoch {
                return;
            }
            *published = frame.clone();
        }

        let observers: Vec<Observer> = self
            .observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            // An earlier observer reset the simulation.
            if self.epoch.load(Ordering::SeqCst) != epoch {
                log::debug!("SEQA frame {} superseded by reset", frame.step);
                break;
            }
            if panic::catch_unwind(AssertUnwindSafe(|| observer(&frame))).is_err() {
                log::warn!("SEQA observer panicked at step {}", frame.step);
            }
        }
    }
}

/// Owns a simulation engine and drives it on a periodic tick.
///
/// All methods take `&self`; share the controller behind an `Arc` to
/// feed influence from input threads while another thread reads frames.
pub struct SimulationController<N = BoxMuller>
where
    N: NormalSource + Send + 'static,
{
    shared: Arc<Shared<N>>,
    ticker: Mutex<Option<Ticker>>,
    tick_interval: Duration,
}

impl SimulationController<BoxMuller> {
    pub fn new(config: EngineConfig) -> SeqaResult<Self> {
        Ok(Self::from_engine(SimulationEngine::new(config)?))
    }
}

impl<N> SimulationController<N>
where
    N: NormalSource + Send + 'static,
{
    pub fn with_noise(config: EngineConfig, noise: N) -> SeqaResult<Self> {
        Ok(Self::from_engine(SimulationEngine::with_noise(config, noise)?))
    }

    /// Wrap an existing engine. Starts `Idle` with default params.
    pub fn from_engine(engine: SimulationEngine<N>) -> Self {
        let tick_interval = Duration::from_millis(engine.config().tick_interval_ms);
        let shared = Shared {
            influence: engine.influence(),
            published: RwLock::new(engine.frame()),
            engine: Mutex::new(engine),
            params: RwLock::new(SimulationParams::default()),
            observers: RwLock::new(Vec::new()),
            next_observer: AtomicU64::new(0),
            running: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        };
        Self {
            shared: Arc::new(shared),
            ticker: Mutex::new(None),
            tick_interval,
        }
    }

    /// Idle/Running → Running. Restarts the clock if already running;
    /// simulation state is kept.
    pub fn start(&self) {
        let previous = self.ticker.lock().take();
        if let Some(previous) = previous {
            previous.cancel();
        }

        // Raised before spawning so a step that panics right away is
        // not masked by a late store.
        self.shared.running.store(true, Ordering::SeqCst);
        match Ticker::spawn(Arc::clone(&self.shared), self.tick_interval) {
            Ok(ticker) => {
                let displaced = self.ticker.lock().replace(ticker);
                if let Some(displaced) = displaced {
                    displaced.cancel();
                }
                log::info!(
                    "SEQA simulation started (tick {} ms)",
                    self.tick_interval.as_millis()
                );
            }
            Err(e) => {
                self.shared.running.store(false, Ordering::SeqCst);
                log::error!("SEQA ticker could not be spawned: {e}");
            }
        }
    }

    /// Running → Idle. State and history are kept.
    pub fn stop(&self) {
        let ticker = self.ticker.lock().take();
        self.shared.running.store(false, Ordering::SeqCst);
        if let Some(ticker) = ticker {
            ticker.cancel();
            log::info!("SEQA simulation stopped");
        }
    }

    /// Any → Idle, with initial state, empty history, zero influence,
    /// step 0, and `{0, 0, Calculating}` analysis. The reset frame is
    /// published to observers on the calling thread and supersedes any
    /// frame still being delivered.
    pub fn reset(&self) {
        self.stop();
        let (frame, epoch) = {
            let mut engine = self.shared.engine.lock();
            engine.reset();
            let epoch = self.shared.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            (engine.frame(), epoch)
        };
        self.shared.publish(frame, epoch);
        log::info!("SEQA simulation reset");
    }

    /// Replace the parameter set; effective from the next step.
    pub fn set_params(&self, params: SimulationParams) {
        *self.shared.params.write() = params;
    }

    pub fn params(&self) -> SimulationParams {
        *self.shared.params.read()
    }

    /// Add a perturbation. Never waits on an in-flight step.
    pub fn apply_influence(&self, delta: Influence) {
        self.shared.influence.apply(delta);
    }

    pub fn influence(&self) -> Arc<InfluenceAccumulator> {
        Arc::clone(&self.shared.influence)
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Last published frame.
    pub fn frame(&self) -> SimulationFrame {
        self.shared.published.read().clone()
    }

    pub fn state(&self) -> SimulationState {
        self.shared.published.read().state
    }

    pub fn history(&self) -> SimulationHistory {
        self.shared.published.read().history.clone()
    }

    pub fn analysis(&self) -> SimulationAnalysis {
        self.shared.published.read().analysis
    }

    /// Live step counter (not only recorded steps).
    pub fn step_count(&self) -> u64 {
        self.shared.engine.lock().step_count()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Register an observer for published frames.
    ///
    /// Observers run on the ticker thread (or the thread calling
    /// `reset`) and should return quickly.
    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&SimulationFrame) + Send + Sync + 'static,
    {
        let id = ObserverId(self.shared.next_observer.fetch_add(1, Ordering::Relaxed));
        self.shared.observers.write().push((id, Arc::new(observer)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.shared.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }
}

impl<N> Drop for SimulationController<N>
where
    N: NormalSource + Send + 'static,
{
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.get_mut().take() {
            ticker.cancel();
        }
    }
}
