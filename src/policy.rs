//! Target selection for the automated side.

use rand::{Rng, RngCore};

use crate::board::AttackView;
use crate::common::GuessResult;
use crate::config::RANDOM_SAMPLE_THRESHOLD;

/// Chooses the automated side's next target.
///
/// The coordinator only asks for one cell the view reports as a valid
/// target, so smarter strategies can be swapped in without touching it.
pub trait OpponentPolicy {
    /// Pick a cell to attack, or `None` if no valid target is left.
    fn select_target(&mut self, rng: &mut dyn RngCore, view: AttackView<'_>) -> Option<(usize, usize)>;

    /// Inform the policy of the result of its last attack.
    fn handle_guess_result(&mut self, _target: (usize, usize), _result: GuessResult) {}
}

/// Uniformly random targeting over cells not yet attacked.
#[derive(Debug, Clone, Copy)]
pub struct RandomPolicy {
    threshold: usize,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self::with_threshold(RANDOM_SAMPLE_THRESHOLD)
    }

    /// Below `threshold` legal cells, pick from the filtered set directly.
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(1),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentPolicy for RandomPolicy {
    fn select_target(&mut self, rng: &mut dyn RngCore, view: AttackView<'_>) -> Option<(usize, usize)> {
        let remaining = view.valid_targets().count();
        if remaining == 0 {
            return None;
        }
        if remaining >= self.threshold {
            let size = view.grid_size();
            // Expected tries stay below size² / threshold; the cap only
            // guards against a degenerate random source.
            for _ in 0..4 * size * size {
                let x = rng.random_range(0..size);
                let y = rng.random_range(0..size);
                if view.is_valid_target(x, y) {
                    return Some((x, y));
                }
            }
        }
        let pick = rng.random_range(0..remaining);
        view.valid_targets().nth(pick)
    }
}
