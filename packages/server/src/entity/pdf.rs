use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pdf")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    #[sea_orm(default_value = false)]
    pub selected: bool,
    /// Content reference: remote URL or local path.
    pub file: String,
    /// Object-store key, set only for uploaded records.
    pub storage_key: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
