use crate::dataset;
use crate::error::{DatasetError, OccupancyError};
use crate::model::{Facility, free_spaces};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Largest change ambient drift applies to a facility in a single pass, in either direction.
pub const DRIFT_MAX_DELTA: i64 = 3;

/// Upper bound on the number of space toggles one sensor event performs.
pub const MAX_SENSOR_TOGGLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftReport {
    pub facilities: usize,
    pub changed: usize,
}

/// Authoritative facility collection plus the random source driving every mutation.
///
/// Callers that share the store across tasks are expected to hold an exclusive lock for the
/// duration of each mutating call, so each call is observed as one atomic update.
pub struct OccupancyStore<R = StdRng> {
    pub(crate) facilities: Vec<Facility>,
    rng: R,
}

impl OccupancyStore<StdRng> {
    /// Builds a store driven by [`StdRng`], seeded from `seed` or from OS entropy when `None`.
    pub fn seeded(facilities: Vec<Facility>, seed: Option<u64>) -> Result<Self, DatasetError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(facilities, rng)
    }
}

impl<R: Rng> OccupancyStore<R> {
    pub fn new(mut facilities: Vec<Facility>, rng: R) -> Result<Self, DatasetError> {
        dataset::validate(&mut facilities)?;
        Ok(Self { facilities, rng })
    }

    /// Applies one ambient drift pass to every facility.
    ///
    /// Ambient facilities move by a uniform delta in `[-DRIFT_MAX_DELTA, DRIFT_MAX_DELTA]`,
    /// clamped to `[0, total]`. Detailed facilities keep their spaces as they are and only have
    /// `available` recounted.
    pub fn drift(&mut self) -> DriftReport {
        let mut next = Vec::with_capacity(self.facilities.len());
        let mut changed = 0;

        for facility in &self.facilities {
            let mut updated = facility.clone();
            updated.available = match facility.spaces.as_deref() {
                Some(spaces) => free_spaces(spaces),
                None => {
                    let delta = drift_delta(&mut self.rng);
                    drifted_availability(facility.available, facility.total, delta)
                }
            };
            if updated.available != facility.available {
                changed += 1;
            }
            next.push(updated);
        }

        self.facilities = next;
        DriftReport {
            facilities: self.facilities.len(),
            changed,
        }
    }

    /// Flips between 1 and [`MAX_SENSOR_TOGGLES`] randomly chosen spaces of a detailed facility
    /// (with replacement, so a space may flip back) and recounts `available`.
    ///
    /// Returns the updated facility. On error the store is left untouched.
    pub fn simulate_sensor(&mut self, facility_id: u32) -> Result<Facility, OccupancyError> {
        let facility = self
            .facilities
            .iter_mut()
            .find(|f| f.id == facility_id)
            .ok_or(OccupancyError::NotFound(facility_id))?;

        let spaces = facility
            .spaces
            .as_mut()
            .filter(|spaces| !spaces.is_empty())
            .ok_or(OccupancyError::UnsupportedOperation(facility_id))?;

        let toggles = sensor_toggle_count(&mut self.rng);
        for _ in 0..toggles {
            let index = self.rng.random_range(0..spaces.len());
            spaces[index].occupied = !spaces[index].occupied;
        }
        facility.available = free_spaces(spaces);

        debug!(
            facility_id,
            toggles,
            available = facility.available,
            "simulated sensor event"
        );
        Ok(facility.clone())
    }
}

/// Uniform step in `[-DRIFT_MAX_DELTA, DRIFT_MAX_DELTA]`, both ends included.
fn drift_delta<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.random_range(-DRIFT_MAX_DELTA..=DRIFT_MAX_DELTA)
}

/// Uniform count in `[1, MAX_SENSOR_TOGGLES]`, so every event picks at least one space.
fn sensor_toggle_count<R: Rng + ?Sized>(rng: &mut R) -> usize {
    rng.random_range(1..=MAX_SENSOR_TOGGLES)
}

/// `available + delta`, clamped to `[0, total]`.
pub fn drifted_availability(available: u32, total: u32, delta: i64) -> u32 {
    let clamped = (i64::from(available) + delta).clamp(0, i64::from(total));
    u32::try_from(clamped).unwrap_or(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DETAILED_ALLEY_ID, montreal};
    use rand::RngCore;
    use std::collections::BTreeSet;

    /// Always yields zero bits, which puts every uniform draw at the low end of its range.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn store(seed: u64) -> OccupancyStore {
        OccupancyStore::seeded(montreal(), Some(seed)).unwrap()
    }

    fn assert_invariants(store: &OccupancyStore) {
        for facility in &store.facilities {
            assert!(facility.available <= facility.total, "facility {}", facility.id);
            if let Some(spaces) = facility.spaces.as_deref() {
                assert_eq!(facility.available, free_spaces(spaces));
            }
        }
    }

    #[test]
    fn drift_clamps_at_capacity() {
        for delta in 1..=DRIFT_MAX_DELTA {
            assert_eq!(drifted_availability(50, 50, delta), 50);
        }
        assert_eq!(drifted_availability(49, 50, 3), 50);
    }

    #[test]
    fn drift_clamps_at_zero() {
        for delta in -DRIFT_MAX_DELTA..0 {
            assert_eq!(drifted_availability(0, 50, delta), 0);
        }
        assert_eq!(drifted_availability(1, 50, -3), 0);
        assert_eq!(drifted_availability(10, 50, -3), 7);
        assert_eq!(drifted_availability(10, 50, 0), 10);
    }

    #[test]
    fn drift_delta_reaches_both_ends() {
        let mut rng = StdRng::seed_from_u64(11);
        let seen: BTreeSet<i64> = (0..2_000).map(|_| drift_delta(&mut rng)).collect();
        let expected: BTreeSet<i64> = (-DRIFT_MAX_DELTA..=DRIFT_MAX_DELTA).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn sensor_toggle_count_is_one_to_max() {
        let mut rng = StdRng::seed_from_u64(11);
        let seen: BTreeSet<usize> = (0..2_000).map(|_| sensor_toggle_count(&mut rng)).collect();
        assert_eq!(seen, BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn ambient_moves_cover_every_delta_across_seeds() {
        // Facility 1 starts at 23/50, far enough from both bounds that no move is clamped.
        let moves: BTreeSet<i64> = (0..300)
            .map(|seed| {
                let mut store = store(seed);
                store.drift();
                i64::from(store.facilities[0].available) - 23
            })
            .collect();
        let expected: BTreeSet<i64> = (-DRIFT_MAX_DELTA..=DRIFT_MAX_DELTA).collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn lowest_draws_drift_every_ambient_facility_down() {
        let mut store = OccupancyStore::new(montreal(), ZeroRng).unwrap();
        let report = store.drift();
        assert_eq!(
            report,
            DriftReport {
                facilities: 17,
                changed: 16
            }
        );

        let available: Vec<u32> = store.facilities.iter().map(|f| f.available).collect();
        assert_eq!(
            available,
            vec![20, 42, 75, 9, 5, 17, 64, 2, 0, 39, 15, 11, 52, 8, 47, 6, 7]
        );
    }

    #[test]
    fn lowest_draws_toggle_exactly_the_first_space() {
        let mut store = OccupancyStore::new(montreal(), ZeroRng).unwrap();
        let before = store.facilities[16].spaces.clone().unwrap();

        let updated = store.simulate_sensor(DETAILED_ALLEY_ID).unwrap();
        let after = updated.spaces.as_deref().unwrap();

        assert!(after[0].occupied);
        assert_eq!(&after[1..], &before[1..]);
        assert_eq!(updated.available, 6);
    }

    #[test]
    fn drift_stays_within_bounds_over_many_passes() {
        let mut store = store(42);
        let before = store.facilities.clone();

        let report = store.drift();
        assert_eq!(report.facilities, 17);
        for (old, new) in before.iter().zip(&store.facilities) {
            let moved = i64::from(new.available) - i64::from(old.available);
            assert!(moved.abs() <= DRIFT_MAX_DELTA);
        }

        for _ in 0..500 {
            store.drift();
            assert_invariants(&store);
        }
    }

    #[test]
    fn drift_leaves_detailed_spaces_untouched() {
        let mut store = store(7);
        let alley_before = store.facilities[16].clone();
        for _ in 0..50 {
            store.drift();
        }
        assert_eq!(store.facilities[16], alley_before);
    }

    #[test]
    fn drift_keeps_identity_fields() {
        let mut store = store(3);
        let before = store.facilities.clone();
        store.drift();
        for (old, new) in before.iter().zip(&store.facilities) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.name, new.name);
            assert_eq!(old.total, new.total);
            assert_eq!(old.kind, new.kind);
        }
    }

    #[test]
    fn same_seed_drifts_identically() {
        let mut a = store(99);
        let mut b = store(99);
        for _ in 0..10 {
            assert_eq!(a.drift(), b.drift());
        }
        assert_eq!(a.facilities, b.facilities);
    }

    #[test]
    fn sensor_event_toggles_one_to_three_spaces() {
        for seed in 0..200 {
            let mut store = store(seed);
            let before = store.facilities[16].spaces.clone().unwrap();
            let occupied_before = before.iter().filter(|s| s.occupied).count();
            assert_eq!(occupied_before, 5);

            let updated = store.simulate_sensor(DETAILED_ALLEY_ID).unwrap();
            let after = updated.spaces.as_deref().unwrap();

            let flipped = before
                .iter()
                .zip(after)
                .filter(|(b, a)| b.occupied != a.occupied)
                .count();
            // Repeated picks of the same space can cancel out.
            assert!(flipped <= MAX_SENSOR_TOGGLES, "seed {seed}");

            let occupied_after = after.iter().filter(|s| s.occupied).count();
            assert_eq!(updated.available as usize, 12 - occupied_after);
            assert_eq!(store.facilities[16], updated);
            assert_invariants(&store);
        }
    }

    #[test]
    fn sensor_event_changes_state_for_some_seed() {
        let changed = (0..50).any(|seed| {
            let mut store = store(seed);
            let before = store.facilities[16].clone();
            store.simulate_sensor(DETAILED_ALLEY_ID).unwrap() != before
        });
        assert!(changed);
    }

    #[test]
    fn sensor_event_on_ambient_facility_is_unsupported() {
        let mut store = store(1);
        let before = store.facilities.clone();
        assert_eq!(
            store.simulate_sensor(4),
            Err(OccupancyError::UnsupportedOperation(4))
        );
        assert_eq!(store.facilities, before);
    }

    #[test]
    fn sensor_event_on_unknown_facility_is_not_found() {
        let mut store = store(1);
        let before = store.facilities.clone();
        assert_eq!(store.simulate_sensor(999), Err(OccupancyError::NotFound(999)));
        assert_eq!(store.facilities, before);
    }

    #[test]
    fn invalid_dataset_is_rejected() {
        let mut facilities = montreal();
        facilities[0].available = 51;
        assert!(OccupancyStore::seeded(facilities, Some(1)).is_err());
    }
}
