use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::polls::domain::Caller;

/// The user behind a validated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<models::user::Model> for CurrentUser {
    fn from(u: models::user::Model) -> Self {
        Self { id: u.id, email: u.email, full_name: u.full_name, is_active: u.is_active, is_superuser: u.is_superuser }
    }
}

impl From<&CurrentUser> for Caller {
    fn from(u: &CurrentUser) -> Self {
        Caller { id: u.id, is_superuser: u.is_superuser }
    }
}

/// JWT payload: `sub` carries the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: usize,
}
