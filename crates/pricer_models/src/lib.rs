//! # Pricer Models (L2: Business Logic)
//!
//! Stochastic model and instrument definitions for default-simulation XVA.
//!
//! This crate provides:
//! - Correlated Brownian drivers for two-factor models (`models::hybrid`)
//! - The joint hazard-rate / FX model with a devaluation jump at default
//!   (`models::credit_fx`)
//! - The FX forward whose counterparty exposure is measured
//!   (`instruments::fx`)
//!
//! ## Design Principles
//!
//! - **Validated construction**: parameters are checked once, in `new`,
//!   and the simulation hot loop never re-validates
//! - **Plain values**: every type is `Copy` or cheaply cloneable and carries
//!   no ambient state, so independent batches can share nothing

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
pub mod models;
