//! The spirit hunt mini-game.
//!
//! A hunt is a batch of clickable spirits scattered across the screen.
//! The hunt only tracks the collection and the caught counter; deciding
//! what happens when the hunt completes belongs to the state machine.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of spirits spawned per hunt.
pub const SPIRIT_COUNT: u8 = 5;

// Placement bounds, in percent of the playing field.
const X_RANGE: std::ops::Range<f32> = 10.0..90.0;
const Y_RANGE: std::ops::Range<f32> = 20.0..80.0;

/// A clickable spirit wisp. Positions are percentages of the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spirit {
    pub id: u8,
    pub x: f32,
    pub y: f32,
}

/// The live state of one hunt: remaining spirits plus the caught counter.
///
/// Spirits may overlap; placement does no collision avoidance.
#[derive(Debug, Clone, PartialEq)]
pub struct Hunt {
    spirits: Vec<Spirit>,
    caught: u8,
    total: u8,
}

impl Hunt {
    /// Spawn a fresh batch of [`SPIRIT_COUNT`] spirits at random positions.
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let spirits = (0..SPIRIT_COUNT)
            .map(|id| Spirit {
                id,
                x: rng.gen_range(X_RANGE),
                y: rng.gen_range(Y_RANGE),
            })
            .collect();

        Self {
            spirits,
            caught: 0,
            total: SPIRIT_COUNT,
        }
    }

    /// Catch the spirit with the given id.
    ///
    /// Returns `true` if a spirit was removed. Catching an id that is
    /// already gone (double-click, stale callback) is a no-op and does
    /// not touch the counter.
    pub fn catch(&mut self, id: u8) -> bool {
        let Some(index) = self.spirits.iter().position(|s| s.id == id) else {
            return false;
        };
        self.spirits.remove(index);
        self.caught += 1;
        true
    }

    /// Spirits still waiting to be caught.
    pub fn spirits(&self) -> &[Spirit] {
        &self.spirits
    }

    /// How many spirits have been caught so far.
    pub fn caught(&self) -> u8 {
        self.caught
    }

    /// Batch size for this hunt.
    pub fn total(&self) -> u8 {
        self.total
    }

    /// Whether every spirit has been caught.
    pub fn is_complete(&self) -> bool {
        self.caught >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_yields_full_batch_in_bounds() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let hunt = Hunt::spawn(&mut rng);

            assert_eq!(hunt.spirits().len(), SPIRIT_COUNT as usize);
            assert_eq!(hunt.caught(), 0);
            for spirit in hunt.spirits() {
                assert!(
                    (10.0..90.0).contains(&spirit.x),
                    "x out of bounds: {}",
                    spirit.x
                );
                assert!(
                    (20.0..80.0).contains(&spirit.y),
                    "y out of bounds: {}",
                    spirit.y
                );
            }
        }
    }

    #[test]
    fn test_spirit_ids_are_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let hunt = Hunt::spawn(&mut rng);

        let mut ids: Vec<u8> = hunt.spirits().iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SPIRIT_COUNT as usize);
    }

    #[test]
    fn test_catch_removes_and_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut hunt = Hunt::spawn(&mut rng);

        assert!(hunt.catch(0));
        assert_eq!(hunt.caught(), 1);
        assert_eq!(hunt.spirits().len(), 4);
        assert!(!hunt.is_complete());
    }

    #[test]
    fn test_double_catch_is_a_noop() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut hunt = Hunt::spawn(&mut rng);

        assert!(hunt.catch(3));
        assert!(!hunt.catch(3));
        assert_eq!(hunt.caught(), 1);
    }

    #[test]
    fn test_unknown_id_is_a_noop() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut hunt = Hunt::spawn(&mut rng);

        assert!(!hunt.catch(42));
        assert_eq!(hunt.caught(), 0);
        assert_eq!(hunt.spirits().len(), 5);
    }

    #[test]
    fn test_counter_never_exceeds_total() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut hunt = Hunt::spawn(&mut rng);

        // Hammer every id several times, plus ids that never existed.
        for _ in 0..3 {
            for id in 0..10 {
                hunt.catch(id);
            }
        }

        assert_eq!(hunt.caught(), SPIRIT_COUNT);
        assert!(hunt.is_complete());
        assert!(hunt.spirits().is_empty());
    }
}
