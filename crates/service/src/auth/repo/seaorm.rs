use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::domain::CurrentUser;
use crate::auth::errors::AuthError;
use crate::auth::repository::UserDirectory;

pub struct SeaOrmUserDirectory {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserDirectory for SeaOrmUserDirectory {
    async fn find_user(&self, id: Uuid) -> Result<Option<CurrentUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(CurrentUser::from))
    }
}
