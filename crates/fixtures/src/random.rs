use rand::Rng;

/// Returns an integer uniformly distributed over the half-open range
/// `[low, high)`.
///
/// The upper bound is exclusive, and callers lean on that asymmetry:
/// an age drawn from `rand_in_range(rng, 4, 80)` is never 80.
pub fn rand_in_range<R: Rng>(rng: &mut R, low: i64, high: i64) -> i64 {
    rng.gen_range(low..high)
}
