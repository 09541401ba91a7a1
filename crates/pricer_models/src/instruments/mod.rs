//! Instrument definitions.
//!
//! Only the FX forward is needed: its strike and notional are fixed scalars
//! and its positive mark-to-market is the counterparty exposure.

pub mod fx;

pub use fx::FxForward;
