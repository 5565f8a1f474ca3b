//! # Combination Enumerator
//!
//! Precomputes every non-empty subset ("profile") of a catalog's distinct
//! sizes together with its total. Used once, when a catalog is registered.
//!
//! ## Construction
//! ```text
//! sizes {1, 2, 3}, processed ascending
//!
//!  s=1:  {1}
//!  s=2:  {2}  {1,2}
//!  s=3:  {3}  {1,3}  {2,3}  {1,2,3}
//!
//!  sorted by (total, member count):
//!  {1}=1  {2}=2  {3}=3  {1,2}=3  {1,3}=4  {2,3}=5  {1,2,3}=6
//! ```
//!
//! ## Cost
//! 2ⁿ−1 profiles for n distinct sizes. Enumeration refuses more than
//! [`MAX_PROFILE_SIZES`](crate::MAX_PROFILE_SIZES) distinct sizes.

use crate::error::{CoreError, CoreResult};
use crate::types::{CombinationProfile, PackSize};
use crate::MAX_PROFILE_SIZES;

/// Enumerates every non-empty subset of the distinct sizes in `sizes`.
///
/// Duplicates and zeros are ignored. The result is ordered by ascending
/// `total_amount`, then by fewer member sizes; profiles equal on both keep
/// the order in which they were produced.
///
/// ## Example
/// ```rust
/// use packulator_core::enumerator::enumerate_profiles;
///
/// let profiles = enumerate_profiles(&[3, 1, 2]).unwrap();
/// let totals: Vec<u64> = profiles.iter().map(|p| p.total_amount).collect();
/// assert_eq!(totals, vec![1, 2, 3, 3, 4, 5, 6]);
/// ```
pub fn enumerate_profiles(sizes: &[PackSize]) -> CoreResult<Vec<CombinationProfile>> {
    let mut distinct: Vec<PackSize> = sizes.iter().copied().filter(|s| *s > 0).collect();
    distinct.sort_unstable();
    distinct.dedup();

    if distinct.len() > MAX_PROFILE_SIZES {
        return Err(CoreError::TooManyDistinctSizes {
            count: distinct.len(),
            max: MAX_PROFILE_SIZES,
        });
    }

    let mut profiles: Vec<CombinationProfile> = Vec::with_capacity((1usize << distinct.len()) - 1);

    for size in distinct {
        let produced = profiles.len();
        profiles.push(CombinationProfile::singleton(size));
        for i in 0..produced {
            let next = profiles[i].extended(size);
            profiles.push(next);
        }
    }

    // stable: equal (total, len) pairs stay in production order
    profiles.sort_by_key(|p| (p.total_amount, p.len()));

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(profiles: &[CombinationProfile]) -> Vec<Vec<PackSize>> {
        profiles.iter().map(|p| p.sizes.clone()).collect()
    }

    #[test]
    fn test_three_sizes() {
        let profiles = enumerate_profiles(&[1, 2, 3]).unwrap();

        assert_eq!(profiles.len(), 7);
        assert_eq!(
            members(&profiles),
            vec![
                vec![1],
                vec![2],
                vec![3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
                vec![1, 2, 3],
            ]
        );
        let totals: Vec<u64> = profiles.iter().map(|p| p.total_amount).collect();
        assert_eq!(totals, vec![1, 2, 3, 3, 4, 5, 6]);
    }

    #[test]
    fn test_input_order_and_duplicates_ignored() {
        let sorted = enumerate_profiles(&[1, 2, 3]).unwrap();
        assert_eq!(enumerate_profiles(&[3, 1, 2]).unwrap(), sorted);
        assert_eq!(enumerate_profiles(&[1, 1, 2, 3, 3]).unwrap(), sorted);
    }

    #[test]
    fn test_empty_and_zero() {
        assert!(enumerate_profiles(&[]).unwrap().is_empty());
        assert!(enumerate_profiles(&[0]).unwrap().is_empty());

        let single = enumerate_profiles(&[0, 250]).unwrap();
        assert_eq!(single, vec![CombinationProfile::singleton(250)]);
    }

    #[test]
    fn test_power_set_size() {
        let profiles = enumerate_profiles(&[250, 500, 1000, 2000, 5000]).unwrap();
        assert_eq!(profiles.len(), 31);
        assert_eq!(profiles.first().unwrap().total_amount, 250);
        assert_eq!(profiles.last().unwrap().total_amount, 8750);

        for pair in profiles.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!((a.total_amount, a.len()) <= (b.total_amount, b.len()));
        }
        for profile in &profiles {
            assert_eq!(profile.total_amount, profile.sizes.iter().sum::<u64>());
            assert!(profile.sizes.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_equal_totals_keep_production_order() {
        // {2,3} and {1,4} both total 5 with two members; {2,3} is produced first
        let profiles = enumerate_profiles(&[1, 2, 3, 4]).unwrap();
        let fives: Vec<Vec<PackSize>> = profiles
            .iter()
            .filter(|p| p.total_amount == 5)
            .map(|p| p.sizes.clone())
            .collect();
        assert_eq!(fives, vec![vec![2, 3], vec![1, 4]]);
    }

    #[test]
    fn test_too_many_sizes() {
        let sizes: Vec<PackSize> = (1..=(MAX_PROFILE_SIZES as u64 + 1)).collect();
        let err = enumerate_profiles(&sizes).unwrap_err();
        assert!(matches!(
            err,
            CoreError::TooManyDistinctSizes { count, max } if count == MAX_PROFILE_SIZES + 1 && max == MAX_PROFILE_SIZES
        ));

        let at_limit: Vec<PackSize> = (1..=MAX_PROFILE_SIZES as u64).collect();
        assert_eq!(
            enumerate_profiles(&at_limit).unwrap().len(),
            (1 << MAX_PROFILE_SIZES) - 1
        );
    }
}
