//! # filmgrade-ops
//!
//! Processing engines for the film negative grading pipeline.
//!
//! This crate turns an [`AdjustmentState`](filmgrade_core::AdjustmentState)
//! plus a source buffer into a graded image: it bakes curves and tone
//! mapping into 256-entry lookup tables, runs the ordered per-pixel
//! transform with histogram accumulation, manages rotation/crop geometry,
//! and bakes the whole grade into an exportable 3D LUT.
//!
//! # Modules
//!
//! - [`curve`] - monotone cubic curve fitting and LUT baking
//! - [`tone`] - exposure/contrast/levels tone-mapping LUT
//! - [`white_balance`] - temp/tint and manual channel gains
//! - [`pipeline`] - the ordered per-pixel pass
//! - [`geometry`] - orientation, rotation, crop, inscribed-rect recrop
//! - [`bake`] - export the grade as a `.cube` 3D LUT
//! - [`picker`] - on-image color sampling
//! - [`session`] - edit session orchestration with undo/redo
//!
//! # Stage Order
//!
//! The per-pixel stage order is load-bearing and shared by the pipeline,
//! the exporter, and the picker:
//!
//! ```text
//! invert -> white balance -> tone LUT -> RGB curve -> channel curves
//!        -> LUT 1 -> LUT 2 -> clamp
//! ```
//!
//! # Example
//!
//! ```rust
//! use filmgrade_core::{AdjustmentState, PixelBuffer};
//! use filmgrade_ops::session::EditSession;
//!
//! let source = PixelBuffer::new_opaque(64, 48);
//! let mut session = EditSession::new(source);
//! session.begin_edit();
//! session.state_mut().exposure = 20.0;
//! let render = session.recompute().unwrap();
//! assert_eq!(render.buffer.width(), 64);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod bake;
pub mod curve;
pub mod geometry;
pub mod picker;
pub mod pipeline;
pub mod session;
pub mod tone;
pub mod white_balance;

pub use error::{OpsError, OpsResult};
pub use geometry::Corner;
pub use picker::PickedColor;
pub use pipeline::BakedLuts;
pub use session::{EditSession, LutSlot, RenderOutput};
