//! Time and payroll calculation engine.
//!
//! This crate converts raw clock-in, clock-out and break timestamps into
//! regular, overtime and double-time hours under a configurable shift
//! policy, applies shift-differential multipliers, reconciles hours across
//! ISO weeks, and prices the result into payroll figures.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
