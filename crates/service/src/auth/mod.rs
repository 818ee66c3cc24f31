//! Auth module: resolves the caller behind a bearer token.
//!
//! Login and registration live outside this service; tokens are only verified
//! here (and issued for tooling/tests).

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AuthService, TokenService};
