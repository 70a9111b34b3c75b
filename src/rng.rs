use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Deterministic RNG factory for one search run within a batch.
///
/// Derives a per-run 64-bit seed as `seed ^ run_index * GOLDEN` so neighbouring runs
/// start from unrelated streams, then seeds a PCG 64-bit generator.
#[inline]
pub fn rng_for_run(seed: u64, run_index: u64) -> Pcg64 {
    let derived: u64 = seed ^ run_index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    Pcg64::seed_from_u64(derived)
}
