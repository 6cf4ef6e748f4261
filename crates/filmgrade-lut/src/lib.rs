//! # filmgrade-lut
//!
//! 3D Look-Up Table support for the filmgrade pipeline.
//!
//! This crate provides the LUT grid type, trilinear sampling, and the
//! Adobe/Resolve `.cube` text format used for both loading creative looks
//! and exporting baked grades.
//!
//! # Types
//!
//! - [`Lut3D`] - flat RGB cube with trilinear sampling
//! - [`LutState`] - a loaded LUT slot (name, intensity, shared grid)
//!
//! # Usage
//!
//! ```rust
//! use filmgrade_lut::{cube, Lut3D};
//!
//! let lut = Lut3D::identity(33);
//! let rgb = lut.sample([0.5, 0.3, 0.2]);
//! let text = cube::write(&lut);
//! let back = cube::parse(&text).unwrap();
//! assert_eq!(back.size(), 33);
//! ```
//!
//! # Format notes
//!
//! `.cube` files store triples with R varying fastest, then G, then B.
//! The in-memory grid keeps the same order, so
//! `index = (r + g*size + b*size^2) * 3`.
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `filmgrade-core` - LUT slots on the adjustment state
//! - `filmgrade-ops` - pipeline sampling and export baking

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod lut3d;
mod state;
pub mod cube;

pub use error::{LutError, LutResult};
pub use lut3d::Lut3D;
pub use state::LutState;
