//! Branches Core - block-processing signal model and DSP primitives
//!
//! This crate provides the shared execution model for the branches node
//! catalog: every node is a [`BlockProcessor`] that is built once for a
//! [`BlockConfig`], then executed once per audio block by an external host.
//!
//! # Signal Model
//!
//! Three kinds of per-block data flow between nodes:
//!
//! - **Audio buffers** - `&[f32]` inputs, owned `Vec<f32>` outputs, one
//!   sample per frame of the block
//! - **Scalars** - one `f32`, `i32`, or `bool` per block
//! - **Trigger streams** - [`TriggerBuffer`], a sparse set of frame indices
//!
//! Hosts pass inputs through [`BlockInputs`] (one optional [`InputRef`] per
//! declared input) and read results back through [`OutputRef`].
//!
//! # Signatures
//!
//! - [`NodeSignature`] - static input/output port declaration of a node
//! - [`PortDescriptor`] - name, description, [`SignalKind`] and [`PortDefault`]
//!
//! # Primitives
//!
//! - [`Slew`] - asymmetric one-pole slew limiter
//! - [`Debouncer`], [`EdgeDetector`], [`ZeroCrossingDetector`] - debounced event detection
//! - [`ThresholdCrossing`] - rising threshold detector for sample-and-hold triggers
//! - [`AllpassStage`] - first-order allpass with a short circular delay
//! - [`RandomStream`] - seedable uniform random source
//! - Gain laws and tuning math in [`math`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! branches-core = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, [`RandomStream::from_clock`] is unavailable and callers
//! must seed random streams explicitly.
//!
//! # Example
//!
//! ```rust
//! use branches_core::{BlockConfig, TriggerBuffer};
//!
//! let config = BlockConfig::default().with_block_size(64);
//! let mut triggers = TriggerBuffer::new(config.block_size);
//! triggers.fire(3);
//! triggers.fire(17);
//! assert_eq!(triggers.iter().collect::<Vec<_>>(), vec![3, 17]);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocation inside `execute()` or `reset()`
//! - **Clamp, don't fail**: out-of-range controls are clamped, invalid
//!   configuration is defaulted
//! - **Object-safe traits**: hosts drive every node through `dyn BlockProcessor`

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod allpass;
pub mod config;
pub mod detect;
pub mod math;
pub mod port;
pub mod processor;
pub mod random;
pub mod signal;
pub mod slew;

// Re-export main types at crate root
pub use allpass::AllpassStage;
pub use config::BlockConfig;
pub use detect::{Debouncer, Direction, EdgeDetector, ThresholdCrossing, ZeroCrossingDetector};
pub use math::{
    balance_gains, crossfade_gains, debounce_samples, edo_frequency, flush_denormal,
    normalized_balance_gains, pitch_class, slew_coefficient, tuned_frequency, widen,
};
pub use port::{NodeSignature, PortDefault, PortDescriptor, SignalKind};
pub use processor::BlockProcessor;
pub use random::RandomStream;
pub use signal::{BlockInputs, InputRef, NO_TRIGGERS, OutputRef, TriggerBuffer};
pub use slew::Slew;
