//! Typed `INSERT` construction for Rust data models.
//!
//! Derive [`Table`] on a struct to insert it as one row, with or without
//! `RETURNING`, or to insert many instances with a single statement. Statements
//! run on any [`Executor`]: a [`Connection`] or an [`OnDatabase`] adapter over a
//! pooled [`Container`].
pub use ::sluice_core::*;
pub use ::sluice_macros::*;
