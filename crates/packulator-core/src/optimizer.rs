//! # Pack Optimizer
//!
//! Decides which packs to ship for a requested amount.
//!
//! ## Objective
//! Sizes may be reused without limit. In priority order:
//! 1. Minimize overshoot (`shipped − requested`, with `shipped ≥ requested`)
//! 2. Minimize the number of packs
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Bounded DP over reachable totals                       │
//! │                                                                         │
//! │  bound = requested + max_size                                          │
//! │                                                                         │
//! │  sum:   0    1  ...  250  ...  500  ...  750  ...  bound               │
//! │  slot: [0]   ·        [1]      [1]       [2]         ·                  │
//! │         │              ▲        ▲         ▲                             │
//! │         └──── +250 ────┘        │         │                             │
//! │         └──── +500 ─────────────┘         │                             │
//! │                        └──── +500 ────────┘                             │
//! │                                                                         │
//! │  Each slot keeps (pack count, size used to reach it).                  │
//! │  Winner = best slot in [requested, bound]; walk back-pointers once     │
//! │  to rebuild size → count.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A running total never needs to pass `requested + max_size − 1`: once it
//! reaches `requested`, adding another pack only grows the overshoot. So the
//! winner always lies inside the window.
//!
//! ## Determinism
//! Sizes are visited ascending and sums are swept ascending; a slot is only
//! replaced by a strictly better candidate, so the earliest-found state wins
//! every tie.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{CoreError, CoreResult};
use crate::types::{PackSize, ResultCombination};
use crate::DEFAULT_MAX_SEARCH_BOUND;

/// How many sums the sweep processes between cancellation checks.
pub const CANCEL_CHECK_INTERVAL: usize = 4096;

/// Hard upper limit for `SearchLimits::max_search_bound`.
///
/// Pack counts and size indexes are stored as `u32`.
pub const SEARCH_BOUND_CEILING: u64 = u32::MAX as u64 - 1;

// =============================================================================
// Cancellation
// =============================================================================

/// Lets a caller abort a running calculation.
pub trait CancellationSignal {
    /// True once the caller wants the calculation to stop.
    fn is_cancelled(&self) -> bool;
}

impl CancellationSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// A signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancelled;

impl CancellationSignal for NeverCancelled {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

// =============================================================================
// Limits
// =============================================================================

/// Caps the optimizer's memory.
///
/// The state array holds `requested + max_size + 1` slots of 8 bytes each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Largest `requested + max_size` the optimizer will accept.
    pub max_search_bound: u64,
}

impl SearchLimits {
    /// Creates limits, clamped to [`SEARCH_BOUND_CEILING`].
    pub const fn new(max_search_bound: u64) -> Self {
        let max_search_bound = if max_search_bound > SEARCH_BOUND_CEILING {
            SEARCH_BOUND_CEILING
        } else {
            max_search_bound
        };
        SearchLimits { max_search_bound }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::new(DEFAULT_MAX_SEARCH_BOUND)
    }
}

// =============================================================================
// DP State
// =============================================================================

/// One DP slot: how many packs reach this sum, and which size was added last.
#[derive(Debug, Clone, Copy)]
struct Slot {
    packs: u32,
    via: u32,
}

impl Slot {
    const UNREACHED: Slot = Slot {
        packs: u32::MAX,
        via: u32::MAX,
    };

    const ORIGIN: Slot = Slot { packs: 0, via: 0 };

    #[inline]
    fn is_reached(self) -> bool {
        self.packs != u32::MAX
    }
}

/// Two-level comparison key: (overshoot, pack count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    overshoot: u64,
    packs: u32,
}

// =============================================================================
// Optimizer
// =============================================================================

/// Computes minimal-waste pack combinations under fixed limits.
///
/// ## Example
/// ```rust
/// use std::sync::atomic::AtomicBool;
/// use packulator_core::optimizer::{Optimizer, SearchLimits};
///
/// let optimizer = Optimizer::new(SearchLimits::new(1_000_000));
/// let cancel = AtomicBool::new(false);
///
/// let result = optimizer.compute(501, &[250, 500, 1000], &cancel).unwrap();
/// assert_eq!(result.count(500), 1);
/// assert_eq!(result.count(250), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    limits: SearchLimits,
}

impl Optimizer {
    /// Creates an optimizer with the given limits.
    pub fn new(limits: SearchLimits) -> Self {
        Optimizer { limits }
    }

    /// Returns the configured limits.
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Computes the combination for `requested` using `sizes`.
    ///
    /// ## Returns
    /// * `Ok(empty)` - `requested <= 0`, or no positive size given
    /// * `Ok(combination)` - minimal (overshoot, pack count)
    /// * `Err(SearchSpaceTooLarge)` - `requested + max_size` over the limit
    /// * `Err(Cancelled)` - `cancel` fired during the sweep
    /// * `Err(NoReachableCombination)` - internal invariant violated
    pub fn compute<C>(
        &self,
        requested: i64,
        sizes: &[PackSize],
        cancel: &C,
    ) -> CoreResult<ResultCombination>
    where
        C: CancellationSignal + ?Sized,
    {
        if requested <= 0 {
            return Ok(ResultCombination::empty());
        }

        let mut sizes: Vec<PackSize> = sizes.iter().copied().filter(|s| *s > 0).collect();
        sizes.sort_unstable();
        sizes.dedup();

        let Some(&max_size) = sizes.last() else {
            return Ok(ResultCombination::empty());
        };

        let too_large = || CoreError::SearchSpaceTooLarge {
            requested,
            max_size,
            limit: self.limits.max_search_bound,
        };
        let bound = (requested as u64)
            .checked_add(max_size)
            .filter(|bound| *bound <= self.limits.max_search_bound)
            .ok_or_else(too_large)?;

        // bound <= SEARCH_BOUND_CEILING, so every sum, size and index fits usize and u32
        let bound = bound as usize;
        let target = requested as usize;
        let steps: Vec<usize> = sizes.iter().map(|s| *s as usize).collect();

        let slots = sweep(&steps, bound, cancel)?;
        let winner = select(&slots, target, bound)
            .ok_or(CoreError::NoReachableCombination { requested })?;

        Ok(rebuild(&slots, &sizes, winner))
    }
}

/// Computes the combination with default limits and no cancellation.
///
/// ## Example
/// ```rust
/// use packulator_core::compute_combination;
///
/// let result = compute_combination(12001, &[250, 500, 1000, 2000, 5000]).unwrap();
/// assert_eq!(result.count(5000), 2);
/// assert_eq!(result.count(2000), 1);
/// assert_eq!(result.count(250), 1);
///
/// assert!(compute_combination(0, &[250]).unwrap().is_empty());
/// ```
pub fn compute_combination(requested: i64, sizes: &[PackSize]) -> CoreResult<ResultCombination> {
    Optimizer::default().compute(requested, sizes, &NeverCancelled)
}

/// Fills the slot table for sums `0..=bound`. `steps` is ascending.
fn sweep<C>(steps: &[usize], bound: usize, cancel: &C) -> CoreResult<Vec<Slot>>
where
    C: CancellationSignal + ?Sized,
{
    let mut slots = vec![Slot::UNREACHED; bound + 1];
    slots[0] = Slot::ORIGIN;

    for sum in 0..=bound {
        if sum % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        let current = slots[sum];
        if !current.is_reached() {
            continue;
        }

        for (index, step) in steps.iter().enumerate() {
            let next = sum + step;
            if next > bound {
                break;
            }

            // same sum means same overshoot; only the pack count decides
            let packs = current.packs + 1;
            let existing = slots[next];
            if !existing.is_reached() || packs < existing.packs {
                slots[next] = Slot {
                    packs,
                    via: index as u32,
                };
            }
        }
    }

    Ok(slots)
}

/// Picks the best reached sum in `[target, bound]`.
fn select(slots: &[Slot], target: usize, bound: usize) -> Option<usize> {
    let mut best: Option<(usize, Rank)> = None;

    for (sum, slot) in slots.iter().enumerate().take(bound + 1).skip(target) {
        if !slot.is_reached() {
            continue;
        }
        let rank = Rank {
            overshoot: (sum - target) as u64,
            packs: slot.packs,
        };
        if best.map_or(true, |(_, current)| rank < current) {
            best = Some((sum, rank));
        }
    }

    best.map(|(sum, _)| sum)
}

/// Walks back-pointers from `winner` to zero and counts each size used.
fn rebuild(slots: &[Slot], sizes: &[PackSize], winner: usize) -> ResultCombination {
    let mut counts = vec![0u64; sizes.len()];
    let mut sum = winner;

    while sum > 0 {
        let via = slots[sum].via as usize;
        counts[via] += 1;
        sum -= sizes[via] as usize;
    }

    let mut combination = ResultCombination::empty();
    for (size, count) in sizes.iter().zip(counts) {
        if count > 0 {
            combination.add(*size, count);
        }
    }
    combination
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STANDARD: [PackSize; 5] = [250, 500, 1000, 2000, 5000];

    /// Independent answer: min packs per exact sum, then the first reachable
    /// sum at or above `requested`.
    fn oracle(requested: u64, sizes: &[PackSize]) -> (u64, u64) {
        let max = *sizes.iter().max().unwrap();
        let bound = (requested + max) as usize;
        let mut min_packs: Vec<Option<u64>> = vec![None; bound + 1];
        min_packs[0] = Some(0);

        for sum in 1..=bound {
            for &size in sizes {
                let size = size as usize;
                if size <= sum {
                    if let Some(prev) = min_packs[sum - size] {
                        let candidate = prev + 1;
                        min_packs[sum] = Some(min_packs[sum].map_or(candidate, |c| c.min(candidate)));
                    }
                }
            }
        }

        (requested as usize..=bound)
            .find_map(|sum| min_packs[sum].map(|packs| (sum as u64 - requested, packs)))
            .unwrap()
    }

    #[test]
    fn test_standard_catalog_scenarios() {
        let cases: [(i64, ResultCombination); 5] = [
            (1, ResultCombination::from([(250, 1)])),
            (250, ResultCombination::from([(250, 1)])),
            (251, ResultCombination::from([(500, 1)])),
            (501, ResultCombination::from([(500, 1), (250, 1)])),
            (12001, ResultCombination::from([(5000, 2), (2000, 1), (250, 1)])),
        ];

        for (amount, expected) in cases {
            let actual = compute_combination(amount, &STANDARD).unwrap();
            assert_eq!(actual, expected, "amount {amount}");
        }
    }

    #[test]
    fn test_degenerate_inputs_are_empty() {
        assert!(compute_combination(0, &STANDARD).unwrap().is_empty());
        assert!(compute_combination(-100, &STANDARD).unwrap().is_empty());
        assert!(compute_combination(i64::MIN, &STANDARD).unwrap().is_empty());
        assert!(compute_combination(1000, &[]).unwrap().is_empty());
        assert!(compute_combination(1000, &[0, 0]).unwrap().is_empty());
    }

    #[test]
    fn test_other_catalogs() {
        assert_eq!(
            compute_combination(250, &[100]).unwrap(),
            ResultCombination::from([(100, 3)])
        );
        assert_eq!(
            compute_combination(1000, &[250, 500, 1000]).unwrap(),
            ResultCombination::from([(1000, 1)])
        );
        assert_eq!(
            compute_combination(100, &[5, 10, 25]).unwrap(),
            ResultCombination::from([(25, 4)])
        );
        assert_eq!(
            compute_combination(150_000, &[10_000, 50_000, 100_000]).unwrap(),
            ResultCombination::from([(100_000, 1), (50_000, 1)])
        );
        assert_eq!(
            compute_combination(50_000, &STANDARD).unwrap(),
            ResultCombination::from([(5000, 10)])
        );
    }

    #[test]
    fn test_duplicate_and_unsorted_sizes() {
        assert_eq!(
            compute_combination(350, &[100, 100, 200]).unwrap(),
            ResultCombination::from([(200, 2)])
        );
        assert_eq!(
            compute_combination(501, &[5000, 250, 1000, 500, 2000]).unwrap(),
            compute_combination(501, &STANDARD).unwrap()
        );
        assert_eq!(
            compute_combination(10, &[0, 7]).unwrap(),
            ResultCombination::from([(7, 2)])
        );
    }

    #[test]
    fn test_deterministic() {
        for amount in [1, 333, 4999, 12001, 23456] {
            let first = compute_combination(amount, &[7, 11, 13, 17, 250]).unwrap();
            let second = compute_combination(amount, &[250, 17, 13, 11, 7]).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_search_limit() {
        let optimizer = Optimizer::new(SearchLimits::new(10_000));

        let ok = optimizer.compute(5000, &STANDARD, &NeverCancelled).unwrap();
        assert_eq!(ok, ResultCombination::from([(5000, 1)]));

        let err = optimizer.compute(5001, &STANDARD, &NeverCancelled).unwrap_err();
        assert!(matches!(
            err,
            CoreError::SearchSpaceTooLarge { requested: 5001, max_size: 5000, limit: 10_000 }
        ));

        let err = compute_combination(i64::MAX, &[u64::MAX]).unwrap_err();
        assert!(matches!(err, CoreError::SearchSpaceTooLarge { .. }));
    }

    #[test]
    fn test_limits_are_clamped() {
        assert_eq!(SearchLimits::new(u64::MAX).max_search_bound, SEARCH_BOUND_CEILING);
        assert_eq!(SearchLimits::default().max_search_bound, DEFAULT_MAX_SEARCH_BOUND);
    }

    #[test]
    fn test_cancelled_before_sweep() {
        let cancel = AtomicBool::new(true);
        let err = Optimizer::default()
            .compute(12001, &STANDARD, &cancel)
            .unwrap_err();
        assert!(err.is_cancelled());

        // degenerate inputs short-circuit before the sweep
        assert!(Optimizer::default().compute(0, &STANDARD, &cancel).unwrap().is_empty());
    }

    /// Fires on the `fire_at`-th poll and counts every poll.
    struct FireOnPoll {
        fire_at: usize,
        polls: std::cell::Cell<usize>,
    }

    impl CancellationSignal for FireOnPoll {
        fn is_cancelled(&self) -> bool {
            let polls = self.polls.get() + 1;
            self.polls.set(polls);
            polls >= self.fire_at
        }
    }

    #[test]
    fn test_cancelled_mid_sweep() {
        let cancel = FireOnPoll {
            fire_at: 4,
            polls: std::cell::Cell::new(0),
        };

        // a bound of 100_011 gives 25 polls, so the sweep stops well before the end
        let err = Optimizer::default()
            .compute(100_000, &[7, 11], &cancel)
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(cancel.polls.get(), 4);

        let never = FireOnPoll {
            fire_at: usize::MAX,
            polls: std::cell::Cell::new(0),
        };
        assert!(Optimizer::default().compute(100_000, &[7, 11], &never).is_ok());
        assert_eq!(never.polls.get(), 100_011 / CANCEL_CHECK_INTERVAL + 1);
    }

    #[test]
    fn test_matches_oracle_on_primes() {
        let sizes = [7, 11, 13, 17];
        for amount in 1..=200u64 {
            let result = compute_combination(amount as i64, &sizes).unwrap();
            let (overshoot, packs) = oracle(amount, &sizes);
            assert_eq!(result.overshoot(amount as i64), overshoot as i64, "amount {amount}");
            assert_eq!(result.pack_count(), packs, "amount {amount}");
        }
    }

    proptest! {
        #[test]
        fn prop_optimal_against_oracle(
            sizes in prop::collection::vec(1u64..=40, 1..=4),
            amount in 1u64..=300,
        ) {
            let result = compute_combination(amount as i64, &sizes).unwrap();
            let (overshoot, packs) = oracle(amount, &sizes);

            prop_assert!(result.total_shipped() >= amount);
            prop_assert_eq!(result.overshoot(amount as i64), overshoot as i64);
            prop_assert_eq!(result.pack_count(), packs);
            prop_assert!(result.iter().all(|(size, _)| sizes.contains(&size)));
        }
    }
}
