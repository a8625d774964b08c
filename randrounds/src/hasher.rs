use log::debug;
use rand::Rng;
use rrdigest::ChainDigest;

use crate::params::{HashParams, RoundsError};

/// Hashes and verifies passwords with a randomly drawn round count.
///
/// The round count used at hash time is never encoded into the output,
/// so verification has to re-derive the chain across the whole window.
/// An attacker brute-forcing a stolen hash pays the full window per
/// guess; a legitimate check on the right password pays half of it on
/// average.
pub struct RoundsHasher {
    params: HashParams,
    digest: ChainDigest,
}

impl RoundsHasher {
    pub fn new(initial_rounds: u32, max_rounds: u32) -> Result<Self, RoundsError> {
        Ok(RoundsHasher {
            params: HashParams::new(initial_rounds, max_rounds)?,
            digest: ChainDigest::new(),
        })
    }

    pub fn from_settings(settings: &config::Config) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(RoundsHasher {
            params: HashParams::from_settings(settings)?,
            digest: ChainDigest::new(),
        })
    }

    pub fn params(&self) -> HashParams {
        self.params
    }

    /// Produces a new hash for `password`, chaining the digest for a
    /// round count drawn uniformly in `[initial_rounds, max_rounds)`.
    pub fn hash(&self, password: &str, salt: &str) -> String {
        self.hash_with_rng(password, salt, &mut rand::thread_rng())
    }

    /// Same as [`hash`](Self::hash) with a caller-supplied RNG, so the
    /// draw can be pinned in tests.
    pub fn hash_with_rng<R: Rng>(&self, password: &str, salt: &str, rng: &mut R) -> String {
        let extra = rng.gen_range(0..self.params.span());
        let total = self.params.initial_rounds() + extra;
        debug!("hashing with {} rounds", total);

        let mut chain = String::new();
        for _ in 0..total {
            chain = self.round(password, salt, &chain);
        }
        chain
    }

    /// Whether `target` is a valid hash of `password` under these params.
    pub fn check(&self, password: &str, salt: &str, target: &str) -> bool {
        self.recover_rounds(password, salt, target).is_some()
    }

    /// Searches the whole round window for `target` and returns the round
    /// count that produced it.
    ///
    /// The floor rounds are mandatory cost and are not compared; the
    /// chain is then compared at every round count the generator could
    /// have drawn. A miss always performs exactly `max_rounds` digests
    /// before returning `None`.
    pub fn recover_rounds(&self, password: &str, salt: &str, target: &str) -> Option<u32> {
        let mut chain = String::new();
        for _ in 0..self.params.initial_rounds() {
            chain = self.round(password, salt, &chain);
        }
        if chain == target {
            debug!("hash matched at the {}-round floor", self.params.initial_rounds());
            return Some(self.params.initial_rounds());
        }

        for total in self.params.initial_rounds() + 1..=self.params.max_rounds() {
            chain = self.round(password, salt, &chain);
            if chain == target {
                debug!("hash matched after {} rounds", total);
                return Some(total);
            }
        }

        debug!("no match within {} rounds", self.params.max_rounds());
        None
    }

    fn round(&self, password: &str, salt: &str, chain: &str) -> String {
        self.digest.digest(&format!("{}{}{}", password, salt, chain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Rebuilds the chain for an exact round count, bypassing the RNG.
    fn chain(password: &str, salt: &str, rounds: u32) -> String {
        let digest = ChainDigest::new();
        let mut chain = String::new();
        for _ in 0..rounds {
            chain = digest.digest(&format!("{}{}{}", password, salt, chain));
        }
        chain
    }

    #[test]
    fn every_possible_draw_verifies() {
        let hasher = RoundsHasher::new(2, 6).unwrap();
        for total in 2..6 {
            let stored = chain("hunter2", "pepper", total);
            assert!(
                hasher.check("hunter2", "pepper", &stored),
                "missed a {}-round hash",
                total
            );
            assert_eq!(hasher.recover_rounds("hunter2", "pepper", &stored), Some(total));
        }
    }

    #[test]
    fn generated_hash_round_trips() {
        let hasher = RoundsHasher::new(1, 8).unwrap();
        for _ in 0..16 {
            let stored = hasher.hash("hunter2", "pepper");
            assert!(hasher.check("hunter2", "pepper", &stored));
        }
    }

    #[test]
    fn wrong_password_rejects() {
        let hasher = RoundsHasher::new(2, 6).unwrap();
        let stored = hasher.hash("hunter2", "pepper");
        assert!(!hasher.check("hunter3", "pepper", &stored));
        assert_eq!(hasher.recover_rounds("hunter3", "pepper", &stored), None);
    }

    #[test]
    fn wrong_salt_rejects() {
        let hasher = RoundsHasher::new(2, 6).unwrap();
        let stored = hasher.hash("hunter2", "pepper");
        assert!(!hasher.check("hunter2", "salt", &stored));
    }

    #[test]
    fn degenerate_range_always_uses_the_floor() {
        let hasher = RoundsHasher::new(2, 3).unwrap();
        let expected = chain("hunter2", "pepper", 2);
        for _ in 0..4 {
            assert_eq!(hasher.hash("hunter2", "pepper"), expected);
        }
    }

    #[test]
    fn zero_extra_draw_hashes_at_the_floor() {
        let hasher = RoundsHasher::new(3, 10).unwrap();
        let mut rng = StepRng::new(0, 0);
        let stored = hasher.hash_with_rng("hunter2", "pepper", &mut rng);
        assert_eq!(stored, chain("hunter2", "pepper", 3));
        assert_eq!(hasher.recover_rounds("hunter2", "pepper", &stored), Some(3));
    }

    #[test]
    fn zero_round_hash_is_the_empty_string() {
        let hasher = RoundsHasher::new(0, 5).unwrap();
        let mut rng = StepRng::new(0, 0);
        assert_eq!(hasher.hash_with_rng("hunter2", "pepper", &mut rng), "");
        assert!(hasher.check("hunter2", "pepper", ""));
        assert_eq!(hasher.recover_rounds("hunter2", "pepper", ""), Some(0));
    }

    #[test]
    fn generation_is_deterministic_for_a_fixed_rng() {
        let hasher = RoundsHasher::new(2, 20).unwrap();
        let a = hasher.hash_with_rng("hunter2", "pepper", &mut StdRng::seed_from_u64(7));
        let b = hasher.hash_with_rng("hunter2", "pepper", &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn recovered_rounds_stay_in_the_window() {
        let hasher = RoundsHasher::new(4, 12).unwrap();
        for seed in 0..8 {
            let stored = hasher.hash_with_rng("hunter2", "pepper", &mut StdRng::seed_from_u64(seed));
            let rounds = hasher.recover_rounds("hunter2", "pepper", &stored).unwrap();
            assert!((4..12).contains(&rounds), "round count {} out of window", rounds);
        }
    }

    #[test]
    fn invalid_ranges_fail_before_hashing() {
        assert_eq!(
            RoundsHasher::new(5, 5).err(),
            Some(RoundsError::InvalidRoundRange { initial: 5, max: 5 })
        );
        assert_eq!(
            RoundsHasher::new(10, 3).err(),
            Some(RoundsError::InvalidRoundRange { initial: 10, max: 3 })
        );
    }
}
