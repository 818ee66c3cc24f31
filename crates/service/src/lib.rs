//! Service layer providing the poll resource's business rules on top of models.
//! - Separates ownership policy from data access (`polls::repository`).
//! - Resolves the authenticated caller from a bearer token (`auth`).
//! - Provides clear error types shared with the HTTP layer.

pub mod errors;
pub mod pagination;
pub mod auth;
pub mod polls;
#[cfg(test)]
pub mod test_support;
