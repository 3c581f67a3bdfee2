//! Seedable uniform random source for stochastic nodes.
//!
//! Each generator node owns one [`RandomStream`]. Production constructors
//! seed from the wall clock so instances differ; tests inject a seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seed used when no clock is available.
pub const FALLBACK_SEED: u64 = 0x5EED_0F_B4A9_C4E5;

/// Per-instance uniform random stream.
///
/// # Example
///
/// ```rust
/// use branches_core::RandomStream;
///
/// let mut a = RandomStream::with_seed(7);
/// let mut b = RandomStream::with_seed(7);
/// for _ in 0..16 {
///     let r = a.next_fraction();
///     assert!((0.0..1.0).contains(&r));
///     assert_eq!(r, b.next_fraction());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RandomStream {
    rng: SmallRng,
    seed: u64,
}

impl RandomStream {
    /// Stream with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Stream seeded from nanoseconds since the Unix epoch.
    #[cfg(feature = "std")]
    pub fn from_clock() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(FALLBACK_SEED, |elapsed| elapsed.as_nanos() as u64);
        Self::with_seed(seed)
    }

    /// Clock-seeded stream with `std`, [`FALLBACK_SEED`] without.
    pub fn unseeded() -> Self {
        #[cfg(feature = "std")]
        let stream = Self::from_clock();
        #[cfg(not(feature = "std"))]
        let stream = Self::with_seed(FALLBACK_SEED);

        #[cfg(feature = "tracing")]
        tracing::debug!(seed = stream.seed, "random stream seeded");

        stream
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn next_fraction(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }

    /// Seed this stream was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
