use sea_orm::entity::prelude::*;

/// Identifier issued for a source hash. `source_hash` is the deduplication key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "generated_identifiers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, column_type = "Text")]
    pub source_hash: String,
    pub generated_id: String,
    pub config_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::id_generation_config::Entity",
        from = "Column::ConfigId",
        to = "super::id_generation_config::Column::Id",
        on_delete = "Restrict"
    )]
    Config,
}

impl Related<super::id_generation_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Config.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
