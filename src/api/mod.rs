//! HTTP API module for the Estate Distribution Engine.
//!
//! This module provides the REST API endpoints for distributing an estate
//! and for listing the roles the loaded scheme supports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, DeceasedRequest, RelativeRequest};
pub use response::{ApiError, CalculationResponse, HealthResponse, RoleDescription};
pub use state::AppState;
