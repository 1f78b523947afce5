//! Generate random numbers.

use fastrand::Rng;

/// Pick distinct random values from a range.
///
/// Takes the first `amount` values of a random permutation of `0..range`.
/// When `amount` is bigger than `range` every value in the range is returned once.
///
/// # Arguments
///
/// * `rng` - Random number generator, seed it for reproducible results.
/// * `range` - Exclusive upper bound of the values.
/// * `amount` - How many values to pick.
///
/// # Returns
///
/// - A vector of distinct values between `0` and `range`.
pub fn permutation_prefix(rng: &mut Rng, range: usize, amount: usize) -> Vec<usize> {
    let mut values = (0..range).collect::<Vec<_>>();
    rng.shuffle(&mut values);
    values.truncate(amount);

    values
}
