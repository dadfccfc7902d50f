use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Returns the generator that drives a whole run.
/// Seeded runs are reproducible; unseeded runs
/// draw their seed from OS entropy.
///
/// # Examples
/// ```
/// use oxiga::rng::seeded_rng;
/// use rand::Rng;
///
/// let a: f64 = seeded_rng(Some(7)).gen();
/// let b: f64 = seeded_rng(Some(7)).gen();
/// assert_eq!(a, b);
/// ```
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Returns `true` with probability `chance`.
///
/// A `chance` of 0 never succeeds and a
/// `chance` of 1 always does.
pub(crate) fn gen_bool<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.gen::<f64>() < chance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certain_and_impossible_chances() {
        let mut rng = seeded_rng(Some(3));
        for _ in 0..1000 {
            assert!(gen_bool(&mut rng, 1.0));
            assert!(!gen_bool(&mut rng, 0.0));
        }
    }
}
