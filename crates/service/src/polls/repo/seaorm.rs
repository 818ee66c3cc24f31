use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};
use uuid::Uuid;

use models::poll;
use crate::errors::ServiceError;
use crate::polls::domain::{Poll, PollCreate, PollUpdate};
use crate::polls::repository::PollRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmPollRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPollRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn scoped(owner: Option<Uuid>) -> Select<poll::Entity> {
    let q = poll::Entity::find();
    match owner {
        Some(o) => q.filter(poll::Column::OwnerId.eq(o)),
        None => q,
    }
}

#[async_trait]
impl PollRepository for SeaOrmPollRepository {
    async fn count(&self, owner: Option<Uuid>) -> Result<u64, ServiceError> {
        Ok(scoped(owner).count(&self.db).await?)
    }

    async fn list(&self, owner: Option<Uuid>, skip: u64, limit: u64) -> Result<Vec<Poll>, ServiceError> {
        let rows = scoped(owner)
            .order_by_asc(poll::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<Poll>, ServiceError> {
        Ok(poll::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn insert(&self, owner_id: Uuid, input: &PollCreate) -> Result<Poll, ServiceError> {
        let created = poll::create(&self.db, owner_id, &input.title, input.description.as_deref()).await?;
        Ok(created)
    }

    async fn update(&self, existing: Poll, patch: &PollUpdate) -> Result<Poll, ServiceError> {
        let id = existing.id;
        let mut am: poll::ActiveModel = existing.into();
        if let Some(title) = &patch.title {
            am.title = Set(title.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(description.clone());
        }
        // 没有字段变化时 SeaORM 不会发出 UPDATE，直接回读当前记录
        if !am.is_changed() {
            return poll::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .ok_or_else(|| ServiceError::not_found("Poll"));
        }
        Ok(am.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = poll::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
