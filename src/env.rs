use crate::registry::Registry;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Mutable state shared by every command of a session.
///
/// The environment contains:
/// - `registry`: the named container slots commands operate on.
/// - `rng`: random source for `list_shuffle`; seeded for reproducible runs.
/// - `should_exit`: a flag the read loop checks to know when to terminate.
pub struct Environment {
    pub registry: Registry,
    pub rng: StdRng,
    pub should_exit: bool,
}

impl Environment {
    /// Fresh environment with `slots` empty slots and an entropy-seeded rng.
    pub fn new(slots: usize) -> Self {
        Self {
            registry: Registry::new(slots),
            rng: StdRng::from_entropy(),
            should_exit: false,
        }
    }

    /// Same as [`Environment::new`] but with a fixed shuffle seed.
    pub fn with_seed(slots: usize, seed: u64) -> Self {
        Self {
            registry: Registry::new(slots),
            rng: StdRng::seed_from_u64(seed),
            should_exit: false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(crate::registry::SLOT_COUNT)
    }
}
