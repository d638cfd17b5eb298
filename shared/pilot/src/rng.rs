pub use rand_chacha::ChaCha8Rng as SeededRng;

pub fn new_rng(seed: u64) -> SeededRng {
    rand_seeder::Seeder::from(seed).make_rng()
}

/// Derives an independent stream for one randomized component of a pilot.
pub fn fork_rng(rng: &mut SeededRng) -> SeededRng {
    use rand::Rng;
    new_rng(rng.gen())
}
