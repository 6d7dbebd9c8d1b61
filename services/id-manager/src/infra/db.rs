use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionError, TransactionTrait,
    sea_query::{Expr, Query},
};

use iim_core::sea_ext::is_unique_violation;
use iim_schema::{generated_identifiers, id_generation_config, id_sequences};

use crate::domain::repository::{ConfigRegistry, IdentifierStore, SequenceAllocator};
use crate::domain::types::{GeneratedIdentifier, IssuanceConfig, NewIssuanceConfig, Registration};
use crate::error::IdManagerError;

// ── Configuration registry ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbConfigRegistry {
    pub db: DatabaseConnection,
}

impl ConfigRegistry for DbConfigRegistry {
    async fn register(&self, config: &NewIssuanceConfig) -> Result<Registration, IdManagerError> {
        let result = self
            .db
            .transaction::<_, Option<id_generation_config::Model>, DbErr>(|txn| {
                let config = config.clone();
                Box::pin(async move {
                    if is_registered(txn, &config).await? {
                        return Ok(None);
                    }
                    // Sequence first: the config row references it.
                    insert_sequence(txn, &config).await?;
                    insert_config(txn, &config).await.map(Some)
                })
            })
            .await;

        match result {
            Ok(Some(model)) => Ok(Registration::Created(config_from_model(model))),
            Ok(None) => Ok(Registration::AlreadyExists),
            // Lost a race against a concurrent registration of the same entity.
            Err(TransactionError::Transaction(err)) if is_unique_violation(&err) => {
                Ok(Registration::AlreadyExists)
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context(format!(
                    "register id generation config for '{}'",
                    config.entity_name
                ))
                .into()),
        }
    }

    async fn lookup(&self, entity_name: &str) -> Result<Option<IssuanceConfig>, IdManagerError> {
        let model = id_generation_config::Entity::find()
            .filter(id_generation_config::Column::EntityName.eq(entity_name))
            .one(&self.db)
            .await
            .context("find id generation config by entity name")?;
        Ok(model.map(config_from_model))
    }

    async fn list_all(&self) -> Result<Vec<IssuanceConfig>, IdManagerError> {
        let models = id_generation_config::Entity::find()
            .order_by_asc(id_generation_config::Column::Id)
            .all(&self.db)
            .await
            .context("list id generation configs")?;
        Ok(models.into_iter().map(config_from_model).collect())
    }
}

async fn is_registered(
    txn: &DatabaseTransaction,
    config: &NewIssuanceConfig,
) -> Result<bool, DbErr> {
    let sequence_name = config.sequence_name();
    let configs = id_generation_config::Entity::find()
        .filter(
            Condition::any()
                .add(id_generation_config::Column::EntityName.eq(config.entity_name.as_str()))
                .add(id_generation_config::Column::SequenceName.eq(sequence_name.as_str())),
        )
        .count(txn)
        .await?;
    if configs > 0 {
        return Ok(true);
    }
    let sequence = id_sequences::Entity::find_by_id(sequence_name).one(txn).await?;
    Ok(sequence.is_some())
}

async fn insert_sequence(
    txn: &DatabaseTransaction,
    config: &NewIssuanceConfig,
) -> Result<(), DbErr> {
    id_sequences::Entity::insert(id_sequences::ActiveModel {
        sequence_name: Set(config.sequence_name()),
        last_value: Set(config.sequence_start - 1),
        created_at: Set(Utc::now()),
    })
    .exec_without_returning(txn)
    .await?;
    Ok(())
}

async fn insert_config(
    txn: &DatabaseTransaction,
    config: &NewIssuanceConfig,
) -> Result<id_generation_config::Model, DbErr> {
    id_generation_config::ActiveModel {
        entity_name: Set(config.entity_name.clone()),
        field_name: Set(config.source_field_name.clone()),
        prefix: Set(config.prefix.clone()),
        padding_length: Set(config.padding_width as i32),
        sequence_name: Set(config.sequence_name()),
        sequence_start: Set(config.sequence_start),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(txn)
    .await
}

fn config_from_model(model: id_generation_config::Model) -> IssuanceConfig {
    IssuanceConfig {
        id: model.id,
        entity_name: model.entity_name,
        source_field_name: model.field_name,
        prefix: model.prefix,
        padding_width: model.padding_length.max(0) as u32,
        sequence_name: model.sequence_name,
        sequence_start: model.sequence_start,
        created_at: model.created_at,
    }
}

// ── Sequence allocator ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSequenceAllocator {
    pub db: DatabaseConnection,
}

impl SequenceAllocator for DbSequenceAllocator {
    async fn next(&self, sequence_name: &str) -> Result<i64, IdManagerError> {
        // Single UPDATE ... RETURNING: the row lock serializes concurrent callers.
        let stmt = Query::update()
            .table(id_sequences::Entity)
            .value(
                id_sequences::Column::LastValue,
                Expr::col(id_sequences::Column::LastValue).add(1),
            )
            .and_where(id_sequences::Column::SequenceName.eq(sequence_name))
            .returning_col(id_sequences::Column::LastValue)
            .to_owned();

        let backend = self.db.get_database_backend();
        let row = self
            .db
            .query_one(backend.build(&stmt))
            .await
            .context("advance id sequence")?
            .ok_or_else(|| IdManagerError::SequenceNotFound {
                sequence_name: sequence_name.to_owned(),
            })?;

        let value: i64 = row
            .try_get("", "last_value")
            .context("read advanced sequence value")?;
        Ok(value)
    }
}

// ── Generated-identifier store ───────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIdentifierStore {
    pub db: DatabaseConnection,
}

impl IdentifierStore for DbIdentifierStore {
    async fn find_by_hash(
        &self,
        source_hash: &str,
    ) -> Result<Option<GeneratedIdentifier>, IdManagerError> {
        let model = generated_identifiers::Entity::find()
            .filter(generated_identifiers::Column::SourceHash.eq(source_hash))
            .one(&self.db)
            .await
            .context("find generated identifier by hash")?;
        Ok(model.map(identifier_from_model))
    }

    async fn create(
        &self,
        source_hash: &str,
        config_id: i32,
        generated_id: &str,
    ) -> Result<GeneratedIdentifier, IdManagerError> {
        let result = generated_identifiers::ActiveModel {
            source_hash: Set(source_hash.to_owned()),
            generated_id: Set(generated_id.to_owned()),
            config_id: Set(config_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(model) => Ok(identifier_from_model(model)),
            Err(err) if is_unique_violation(&err) => Err(IdManagerError::DuplicateSourceHash),
            Err(err) => Err(anyhow::Error::new(err)
                .context("create generated identifier")
                .into()),
        }
    }
}

fn identifier_from_model(model: generated_identifiers::Model) -> GeneratedIdentifier {
    GeneratedIdentifier {
        id: model.id,
        source_hash: model.source_hash,
        generated_id: model.generated_id,
        config_id: model.config_id,
        created_at: model.created_at,
    }
}
