//! Branches Nodes - control and stereo utility nodes
//!
//! Every node here is a [`BlockProcessor`](branches_core::BlockProcessor)
//! built from a [`BlockConfig`](branches_core::BlockConfig):
//!
//! - **Detection**: [`Edge`], [`ZeroCrossing`]
//! - **Smoothing**: [`Slew`], [`SlewFloat`], [`BoolToAudio`]
//! - **Memory**: [`Sah`], [`SahBank`], [`ShiftRegister`], [`TriggerShiftRegister`]
//! - **Clock**: [`ClockDivider`]
//! - **Generators**: [`Dust`], [`DustTrigger`], [`Click`], [`Impulse`]
//! - **Stereo**: [`Balance`], [`StereoBalance`], [`Width`], [`CrossfadeStereo`],
//!   [`StereoInverter`], [`StereoGain`]
//! - **Filters**: [`PhaseDisperser`], [`PhaseDispersion`]
//! - **Tuning**: [`Edo`], [`Tuning`]
//!
//! Each node offers a typed `process(...)` for direct use and implements
//! `execute()` for hosts that bind inputs by index.
//!
//! ## Example
//!
//! ```rust
//! use branches_core::{BlockConfig, BlockInputs, BlockProcessor, InputRef};
//! use branches_nodes::Width;
//!
//! let config = BlockConfig::new(48000.0, 4);
//! let mut width = Width::new(&config);
//!
//! let left = [1.0; 4];
//! let right = [0.0; 4];
//! let silence = [0.0; 4];
//! let ports = [
//!     Some(InputRef::Audio(&left)),
//!     Some(InputRef::Audio(&right)),
//!     Some(InputRef::Float(0.0)),
//! ];
//! width.execute(&BlockInputs::new(&ports, &silence));
//!
//! let out_l = width.output_by_name("Out L").and_then(|o| o.as_audio()).unwrap();
//! assert_eq!(out_l, &[0.5; 4]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod click;
pub mod clock_divider;
pub mod dust;
pub mod edge;
pub mod phase;
pub mod sample_hold;
pub mod shift_register;
pub mod slew;
pub mod stereo;
pub mod tuning;

// Re-export main types at crate root
pub use click::{Click, Impulse};
pub use clock_divider::ClockDivider;
pub use dust::{Dust, DustTrigger};
pub use edge::{Edge, ZeroCrossing};
pub use phase::{PhaseDisperser, PhaseDispersion};
pub use sample_hold::{Sah, SahBank};
pub use shift_register::{ShiftRegister, TriggerShiftRegister};
pub use slew::{BoolToAudio, Slew, SlewFloat};
pub use stereo::{Balance, CrossfadeStereo, StereoBalance, StereoGain, StereoInverter, Width};
pub use tuning::{Edo, Tuning};
