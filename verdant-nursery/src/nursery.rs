//! The process-wide nursery: root group, flyweight caches and the driver.
//!
//! There is at most one live [`Nursery`] per process. The registry only keeps
//! a weak handle; once every `Arc<Nursery>` is dropped the nursery stops its
//! driver, drops the tree and then the caches, and the next call to
//! [`Nursery::instance`] builds a fresh one.

use crate::group::{CareTarget, Group};
use crate::observer::CareObserver;
use crate::plant::{Plant, PlantKind};
use crate::strategy::{self, CareStrategy};
use crate::{GrowthState, NurseryConfig, NurseryError, NurseryResult};
use std::any::Any;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use verdant_flyweight::{SharedCache, StringInterner};
use verdant_types::{Resource, Stage, Tier};

static INSTANCE: Mutex<Weak<Nursery>> = Mutex::new(Weak::new());

/// Pause between attempts to take the root lock while someone else holds it.
const LOCK_RETRY: Duration = Duration::from_millis(1);

/// Shared handle to an opaque collaborator (a customer, for instance).
pub type Collaborator = Arc<dyn Any + Send + Sync>;

/// The nursery scheduler.
///
/// Owns the root [`Group`], the hydration, light and growth-state caches
/// (prepopulated with every tier and stage), the name interner, and at most
/// one background driver thread that ticks the root group on a fixed period.
///
/// The root group sits behind a mutex. The driver takes it for each tick, and
/// callers that touch the tree from other threads go through
/// [`Nursery::with_root`] or [`Nursery::root`].
pub struct Nursery {
    config: NurseryConfig,
    running: Arc<AtomicBool>,
    driver: Mutex<Option<JoinHandle<()>>>,
    // Field order is drop order: the tree goes before the caches.
    root: Arc<Mutex<Group>>,
    staff: Mutex<Vec<Arc<dyn CareObserver>>>,
    customers: Mutex<Vec<Collaborator>>,
    hydration: SharedCache<Tier, dyn CareStrategy>,
    light: SharedCache<Tier, dyn CareStrategy>,
    states: SharedCache<Stage, GrowthState>,
    names: StringInterner,
}

impl Nursery {
    /// Returns the live nursery, creating one with the default configuration
    /// if none exists.
    #[must_use]
    pub fn instance() -> Arc<Self> {
        let mut slot = lock(&INSTANCE);
        match slot.upgrade() {
            Some(existing) => existing,
            None => Self::install(&mut slot, NurseryConfig::default()),
        }
    }

    /// Returns the live nursery, creating one from `config` if none exists.
    ///
    /// If a nursery is already alive it is returned unchanged and `config`
    /// is ignored.
    pub fn instance_with(config: NurseryConfig) -> NurseryResult<Arc<Self>> {
        let mut slot = lock(&INSTANCE);
        if let Some(existing) = slot.upgrade() {
            debug!("nursery already running; configuration ignored");
            return Ok(existing);
        }
        config.validate()?;
        Ok(Self::install(&mut slot, config))
    }

    fn install(slot: &mut Weak<Nursery>, config: NurseryConfig) -> Arc<Self> {
        let nursery = Arc::new(Self::build(config));
        *slot = Arc::downgrade(&nursery);
        info!(
            tick_interval_ms = nursery.config.tick_interval_ms,
            "nursery created"
        );
        nursery
    }

    fn build(config: NurseryConfig) -> Self {
        let hydration: SharedCache<Tier, dyn CareStrategy> = SharedCache::new("hydration strategy");
        let light: SharedCache<Tier, dyn CareStrategy> = SharedCache::new("light strategy");
        for tier in Tier::ALL {
            hydration.get_or_insert(tier, strategy::for_tier(Resource::Hydration, tier));
            light.get_or_insert(tier, strategy::for_tier(Resource::Light, tier));
        }

        let states: SharedCache<Stage, GrowthState> = SharedCache::new("growth state");
        for state in GrowthState::lifecycle() {
            states.get_or_insert(state.stage(), state);
        }

        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            driver: Mutex::new(None),
            root: Arc::new(Mutex::new(Group::new())),
            staff: Mutex::new(Vec::new()),
            customers: Mutex::new(Vec::new()),
            hydration,
            light,
            states,
            names: StringInterner::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &NurseryConfig {
        &self.config
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }

    // ── Flyweights ───────────────────────────────────────────────

    /// The shared hydration strategy for a tier id. Unknown ids get the
    /// low tier.
    #[must_use]
    pub fn hydration_strategy(&self, id: u32) -> Arc<dyn CareStrategy> {
        resolve(&self.hydration, id, Tier::Low, || {
            strategy::for_tier(Resource::Hydration, Tier::Low)
        })
    }

    /// The shared light strategy for a tier id. Unknown ids get the low tier.
    #[must_use]
    pub fn light_strategy(&self, id: u32) -> Arc<dyn CareStrategy> {
        resolve(&self.light, id, Tier::Low, || {
            strategy::for_tier(Resource::Light, Tier::Low)
        })
    }

    /// The shared growth state for a stage id. Unknown ids get `Seed`.
    #[must_use]
    pub fn growth_state(&self, id: u32) -> Arc<GrowthState> {
        resolve(&self.states, id, Stage::Seed, || {
            let [seed, ..] = GrowthState::lifecycle();
            seed
        })
    }

    #[must_use]
    pub fn hydration_cache(&self) -> &SharedCache<Tier, dyn CareStrategy> {
        &self.hydration
    }

    #[must_use]
    pub fn light_cache(&self) -> &SharedCache<Tier, dyn CareStrategy> {
        &self.light
    }

    #[must_use]
    pub fn state_cache(&self) -> &SharedCache<Stage, GrowthState> {
        &self.states
    }

    #[must_use]
    pub fn names(&self) -> &StringInterner {
        &self.names
    }

    /// Interns a name or season tag.
    pub fn intern(&self, s: &str) -> Arc<str> {
        self.names.intern(s)
    }

    // ── Plants ───────────────────────────────────────────────────

    /// A plant of the given kind under its default name.
    pub fn new_plant(&self, kind: PlantKind) -> Plant {
        Plant::new(self.intern(kind.default_name()), kind.traits())
    }

    /// A custom-named plant of the given kind.
    pub fn new_named_plant(&self, name: &str, kind: PlantKind) -> Plant {
        Plant::new(self.intern(name), kind.named_traits())
    }

    /// Assigns the shared strategies and growth state by id.
    ///
    /// Ids are validated first; on error the plant is left untouched.
    pub fn assign_care(
        &self,
        plant: &mut Plant,
        hydration_tier: u32,
        light_tier: u32,
        stage: u32,
    ) -> NurseryResult<()> {
        let hydration = self.hydration.get(&Tier::try_from(hydration_tier)?)?;
        let light = self.light.get(&Tier::try_from(light_tier)?)?;
        let state = self.states.get(&Stage::try_from(stage)?)?;

        plant.set_hydration_strategy(hydration)?;
        plant.set_light_strategy(light)?;
        plant.set_growth_state(state);
        Ok(())
    }

    /// Image path of the plant's current stage under the configured image
    /// directory. `None` without a growth state.
    #[must_use]
    pub fn image_path(&self, plant: &Plant) -> Option<String> {
        plant
            .growth_state()
            .map(|state| state.image_path(plant, &self.config.image_dir))
    }

    // ── Tree ─────────────────────────────────────────────────────

    /// Shared handle to the root group.
    #[must_use]
    pub fn root(&self) -> Arc<Mutex<Group>> {
        Arc::clone(&self.root)
    }

    /// Runs `f` with the root group locked.
    pub fn with_root<R>(&self, f: impl FnOnce(&mut Group) -> R) -> R {
        f(&mut *lock(&self.root))
    }

    // ── Collaborators ────────────────────────────────────────────

    /// Keeps a staff member alive for the nursery's lifetime. Groups only
    /// hold weak registrations, so attach the returned handle to them.
    pub fn add_staff(&self, member: Arc<dyn CareObserver>) -> Arc<dyn CareObserver> {
        lock(&self.staff).push(Arc::clone(&member));
        member
    }

    #[must_use]
    pub fn staff(&self) -> Vec<Arc<dyn CareObserver>> {
        lock(&self.staff).clone()
    }

    pub fn add_customer(&self, customer: Collaborator) {
        lock(&self.customers).push(customer);
    }

    #[must_use]
    pub fn customers(&self) -> Vec<Collaborator> {
        lock(&self.customers).clone()
    }

    // ── Driver ───────────────────────────────────────────────────

    #[must_use]
    pub fn is_driver_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Starts the background driver.
    ///
    /// Returns `true` only when this call started it, `false` if it was
    /// already running or the thread could not be spawned.
    pub fn start_driver(&self) -> bool {
        match self.try_start_driver() {
            Ok(started) => started,
            Err(e) => {
                warn!(error = %e, "failed to start nursery driver");
                false
            }
        }
    }

    /// Like [`start_driver`](Self::start_driver), but reports spawn failures.
    pub fn try_start_driver(&self) -> NurseryResult<bool> {
        let mut slot = lock(&self.driver);
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(false);
        }

        let root = Arc::clone(&self.root);
        let running = Arc::clone(&self.running);
        let interval = self.config.tick_interval();
        let spawned = thread::Builder::new()
            .name(self.config.driver_thread_name.clone())
            .spawn(move || run_driver(&root, &running, interval));

        match spawned {
            Ok(handle) => {
                *slot = Some(handle);
                info!(
                    interval_ms = self.config.tick_interval_ms,
                    thread = %self.config.driver_thread_name,
                    "nursery driver started"
                );
                Ok(true)
            }
            Err(e) => {
                self.running.store(false, Ordering::Release);
                Err(NurseryError::Driver(e.to_string()))
            }
        }
    }

    /// Stops the background driver and waits for it to exit.
    ///
    /// May be called while holding the root lock, including from inside
    /// [`with_root`](Self::with_root). Returns `true` only when this call
    /// stopped it.
    pub fn stop_driver(&self) -> bool {
        let mut slot = lock(&self.driver);
        if self
            .running
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        if let Some(handle) = slot.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                warn!("nursery driver panicked");
            }
        }
        info!("nursery driver stopped");
        true
    }
}

impl Drop for Nursery {
    fn drop(&mut self) {
        self.stop_driver();
        debug!("nursery dropped");
    }
}

impl fmt::Debug for Nursery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nursery")
            .field("config", &self.config)
            .field("running", &self.is_driver_running())
            .field("hydration", &self.hydration)
            .field("light", &self.light)
            .field("states", &self.states)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

/// Ticks the root group, then sleeps until the next deadline, while the
/// running flag is set.
fn run_driver(root: &Mutex<Group>, running: &AtomicBool, interval: Duration) {
    while running.load(Ordering::Acquire) {
        let Some(mut group) = lock_while_running(root, running) else {
            break;
        };
        let visited = group.tick();
        drop(group);
        debug!(visited, "nursery tick");

        let deadline = Instant::now() + interval;
        while running.load(Ordering::Acquire) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::park_timeout(deadline - now);
        }
    }
}

/// Waits for the root lock, giving up once the running flag is cleared.
///
/// A caller may hold the root lock while it stops the driver, so the driver
/// must never block on the lock without watching the flag.
fn lock_while_running<'a>(
    root: &'a Mutex<Group>,
    running: &AtomicBool,
) -> Option<MutexGuard<'a, Group>> {
    loop {
        if !running.load(Ordering::Acquire) {
            return None;
        }
        match root.try_lock() {
            Ok(guard) => return Some(guard),
            Err(TryLockError::Poisoned(poisoned)) => return Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => thread::park_timeout(LOCK_RETRY),
        }
    }
}

fn resolve<K, V>(
    cache: &SharedCache<K, V>,
    id: u32,
    default: K,
    make_default: impl FnOnce() -> Arc<V>,
) -> Arc<V>
where
    K: TryFrom<u32, Error = verdant_types::Error> + Eq + Hash + fmt::Debug,
    V: ?Sized,
{
    let found = K::try_from(id)
        .map_err(NurseryError::from)
        .and_then(|key| cache.get(&key).map_err(NurseryError::from));

    match found {
        Ok(value) => value,
        Err(e) => {
            warn!(
                family = cache.family(),
                id,
                default = ?default,
                error = %e,
                "flyweight lookup failed, using default"
            );
            cache.get_or_insert_with(default, make_default)
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
