//! Data model, geometry and IO for laying out rectangular pieces on stock slabs.
//!
//! The algorithms that fill slabs live in the `slabfit` crate, this crate holds everything
//! they operate on: [`entities::PackInstance`] going in, [`entities::PackingResult`] coming out.

/// Entities to model slab packing runs
pub mod entities;

/// Axis-aligned geometric primitives
pub mod geometry;

/// Importing jobs into and exporting results out of the library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
