//! Host block configuration.
//!
//! A [`BlockConfig`] carries the two numbers every node needs at
//! construction time: the sample rate and the number of frames per block.
//! Both are fixed for the lifetime of a node; hosts that change either
//! rebuild their nodes.

/// Sample rate and block size supplied by the host at node construction.
///
/// # Example
///
/// ```rust
/// use branches_core::BlockConfig;
///
/// let config = BlockConfig::default();
/// assert_eq!(config.sample_rate, 48000.0);
/// assert_eq!(config.block_size, 256);
///
/// let config = BlockConfig::new(44100.0, 128);
/// assert_eq!(config.block_duration_s(), 128.0 / 44100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockConfig {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Frames per block. Every audio buffer of a node has this length.
    pub block_size: usize,
}

impl BlockConfig {
    /// Default sample rate in Hz.
    pub const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
    /// Default block size in frames.
    pub const DEFAULT_BLOCK_SIZE: usize = 256;

    /// Create a configuration from a sample rate and a block size.
    pub const fn new(sample_rate: f32, block_size: usize) -> Self {
        Self {
            sample_rate,
            block_size,
        }
    }

    /// Replace the sample rate.
    pub const fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Replace the block size.
    pub const fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Duration of one block in seconds.
    pub fn block_duration_s(&self) -> f32 {
        self.block_size as f32 / self.sample_rate
    }
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SAMPLE_RATE, Self::DEFAULT_BLOCK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_replace_fields() {
        let config = BlockConfig::default()
            .with_sample_rate(44100.0)
            .with_block_size(64);
        assert_eq!(config, BlockConfig::new(44100.0, 64));
    }

    #[test]
    fn block_duration() {
        let config = BlockConfig::new(48000.0, 480);
        assert!((config.block_duration_s() - 0.01).abs() < 1e-7);
    }
}
