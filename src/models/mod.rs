//! Core data models for the Estate Distribution Engine.
//!
//! This module contains the domain models used throughout the engine.

mod calculation_result;
mod case;
mod fraction;
mod relative;

pub use calculation_result::{
    AuditStep, CalculationResult, ExcludedRelative, ShareAward, ShareCategory,
};
pub use case::InheritanceCase;
pub use fraction::Fraction;
pub use relative::{Deceased, Gender, Relative, Role};
