//! Core library for the cercalc command line application.
//!
//! The library exposes high-level helpers that power the command-line
//! interface, the interactive session boundary, and the tests. The modules
//! are structured to keep responsibilities narrow and composable: file
//! adapters live under [`io`], the table representation inside [`model`],
//! the CER computation and column alignment in [`metrics`], the batch
//! pipeline in [`batch`], and the interactive state under [`session`].

pub mod batch;
pub mod error;
pub mod io;
pub mod metrics;
pub mod model;
pub mod session;

pub use error::{CerError, Result};
