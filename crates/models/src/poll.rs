use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait, EntityTrait};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "poll")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Owner }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity)
                .from(Column::OwnerId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("title must be at most {} characters", TITLE_MAX_LEN)));
    }
    Ok(())
}

pub fn validate_description(description: Option<&str>) -> Result<(), errors::ModelError> {
    if let Some(d) = description {
        if d.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(errors::ModelError::Validation(format!("description must be at most {} characters", DESCRIPTION_MAX_LEN)));
        }
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    owner_id: Uuid,
    title: &str,
    description: Option<&str>,
) -> Result<Model, errors::ModelError> {
    validate_title(title)?;
    validate_description(description)?;
    let am = ActiveModel {
        title: Set(title.to_string()),
        description: Set(description.map(str::to_string)),
        owner_id: Set(owner_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_must_not_be_blank() {
        assert!(validate_title("Foo").is_ok());
        assert!(validate_title("  ").is_err());
    }

    #[test]
    fn title_length_is_counted_in_chars() {
        let at_limit = "é".repeat(TITLE_MAX_LEN);
        assert!(validate_title(&at_limit).is_ok());
        let over = "a".repeat(TITLE_MAX_LEN + 1);
        assert!(validate_title(&over).is_err());
    }

    #[test]
    fn description_is_optional_but_bounded() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("")).is_ok());
        assert!(validate_description(Some(&"d".repeat(DESCRIPTION_MAX_LEN + 1))).is_err());
    }
}
