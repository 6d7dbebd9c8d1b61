use sea_orm::entity::prelude::*;

/// Issuance rule for one entity type: which field is hashed and how identifiers are formatted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "id_generation_config")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub entity_name: String,
    pub field_name: String,
    pub prefix: String,
    pub padding_length: i32,
    #[sea_orm(unique)]
    pub sequence_name: String,
    pub sequence_start: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::generated_identifiers::Entity")]
    GeneratedIdentifiers,
    #[sea_orm(
        belongs_to = "super::id_sequences::Entity",
        from = "Column::SequenceName",
        to = "super::id_sequences::Column::SequenceName"
    )]
    Sequence,
}

impl Related<super::generated_identifiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneratedIdentifiers.def()
    }
}

impl Related<super::id_sequences::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sequence.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
