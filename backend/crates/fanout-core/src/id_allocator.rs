use crate::{FanoutError, Result as FanoutResult, SubscriberId};

use std::panic::Location;

use error_location::ErrorLocation;
use log::warn;
use rand::Rng;

/// Draws subscriber ids uniformly from `[0, id_space)`.
///
/// Each draw is checked against the caller's registry. After
/// `max_draw_attempts` collisions a linear probe from a random offset takes
/// the first free id, so allocation always finishes in bounded time and only
/// fails when every id in the space is active.
///
/// The probe runs under the registry write lock and costs up to `id_space`
/// lookups. It is only reached when the registry is nearly full, and config
/// validation caps `id_space` at `MAX_ID_SPACE` to bound it.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    id_space: u64,
    max_draw_attempts: u32,
}

impl IdAllocator {
    pub fn new(id_space: u64, max_draw_attempts: u32) -> Self {
        Self {
            id_space: id_space.max(1),
            max_draw_attempts,
        }
    }

    pub fn id_space(&self) -> u64 {
        self.id_space
    }

    /// Pick an id for which `is_taken` returns false.
    #[track_caller]
    pub fn allocate<F>(&self, active: usize, is_taken: F) -> FanoutResult<SubscriberId>
    where
        F: Fn(SubscriberId) -> bool,
    {
        if active as u64 >= self.id_space {
            return Err(self.exhausted(active));
        }

        let mut rng = rand::rng();

        for _ in 0..self.max_draw_attempts {
            let candidate = SubscriberId::new(rng.random_range(0..self.id_space));
            if !is_taken(candidate) {
                return Ok(candidate);
            }
        }

        warn!(
            "No free subscriber id after {} draws ({} active of {}), probing",
            self.max_draw_attempts, active, self.id_space
        );

        let start = rng.random_range(0..self.id_space);
        for offset in 0..self.id_space {
            let candidate = SubscriberId::new((start + offset) % self.id_space);
            if !is_taken(candidate) {
                return Ok(candidate);
            }
        }

        Err(self.exhausted(active))
    }

    #[track_caller]
    fn exhausted(&self, active: usize) -> FanoutError {
        FanoutError::IdentitySpaceExhausted {
            active,
            id_space: self.id_space,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<&fanout_config::BroadcastConfig> for IdAllocator {
    fn from(config: &fanout_config::BroadcastConfig) -> Self {
        Self::new(config.id_space, config.max_id_draw_attempts)
    }
}
