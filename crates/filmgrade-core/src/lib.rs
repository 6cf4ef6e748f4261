//! # filmgrade-core
//!
//! Core types for the film negative grading pipeline.
//!
//! This crate defines the data model shared by every other filmgrade
//! crate: the single [`AdjustmentState`] record that drives the whole
//! pipeline, the normalized crop rectangle, curve control points, the
//! RGBA working buffer, display histograms, and the undo/redo history.
//!
//! # Design
//!
//! The adjustment state is one plain record; any mutation is followed by
//! a full synchronous recompute in `filmgrade-ops`. There is no hidden
//! caching in the data model itself - the only derived artifacts (baked
//! 256-entry LUTs, histograms, the working buffer) live outside the state
//! and are rebuilt on every pass.
//!
//! # Usage
//!
//! ```rust
//! use filmgrade_core::{AdjustmentState, History};
//!
//! let mut state = AdjustmentState::default();
//! let mut history = History::new();
//!
//! history.record(&state);
//! state.exposure = 25.0;
//!
//! let restored = history.undo(&state).unwrap();
//! assert_eq!(restored.exposure, 0.0);
//! ```
//!
//! # Dependencies
//!
//! - [`filmgrade-lut`] - LUT slot type held on the state
//! - [`serde`] - host-side persistence of adjustments
//! - [`thiserror`] - error handling
//!
//! # Used By
//!
//! - `filmgrade-ops` - processing engines
//! - `filmgrade-cli` - command-line front end

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod crop;
mod error;
mod histogram;
mod history;
mod image;
mod state;

pub use crop::CropRect;
pub use error::{Error, Result};
pub use histogram::{HistogramAccum, Histograms, HISTOGRAM_BUCKETS};
pub use history::History;
pub use image::PixelBuffer;
pub use state::{AdjustmentState, ControlPoint, Curve, CurveChannel, CurveSet, Orientation};
