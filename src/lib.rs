//! Estate Distribution Engine
//!
//! This crate distributes a deceased person's estate among surviving
//! relatives under a fixed-share and residual inheritance scheme. The
//! rules are loaded from a YAML catalog; shares are computed with exact
//! rational arithmetic, reduced proportionally when fixed shares exceed
//! the estate, and explained through an audit trace.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod presentation;
