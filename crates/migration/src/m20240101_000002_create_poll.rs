//! Create `poll` table with FK to `user`.
//! Polls are removed together with their owner.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Poll::Table)
                    .if_not_exists()
                    .col(pk_auto(Poll::Id))
                    .col(string_len(Poll::Title, 255).not_null())
                    .col(string_len_null(Poll::Description, 255))
                    .col(uuid(Poll::OwnerId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poll_owner")
                            .from(Poll::Table, Poll::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Poll::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Poll { Table, Id, Title, Description, OwnerId }

#[derive(DeriveIden)]
enum User { Table, Id }
