use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seeded RNG owned by a session so a game can be replayed from its seed.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn digit(&mut self) -> u8 {
        self.rng.random_range(1..=9)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// Fisher-Yates in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_digits() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);

        let left: Vec<u8> = (0..50).map(|_| a.digit()).collect();
        let right: Vec<u8> = (0..50).map(|_| b.digit()).collect();

        assert_eq!(left, right);
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_digits_in_range() {
        let mut rng = SessionRng::new(99);
        for _ in 0..1000 {
            let d = rng.digit();
            assert!((1..=9).contains(&d));
        }
    }

    #[test]
    fn test_shuffle_keeps_multiset() {
        let mut rng = SessionRng::new(3);
        let mut values = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 9];
        rng.shuffle(&mut values);
        values.sort();

        assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 9]);
    }
}
