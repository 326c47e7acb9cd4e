//! # Core routines for bias-corrected read-depth profiles.
//!
//! This crate holds the correction engine: the per-bin data model, the
//! valid/ideal bin classifier, the curve-fitting strategies (local
//! regression and least-squares polynomial), and the GC/mappability bias
//! corrector that turns raw binned read counts into log2 copy-number
//! estimates. Track parsing and table writing live in `readcorrect-io`.

pub mod classify;
pub mod config;
pub mod correct;
pub mod errors;
pub mod merge;
pub mod models;
pub mod smooth;
pub mod stats;
