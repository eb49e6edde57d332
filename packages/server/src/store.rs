//! Persistence for PDF records.
//!
//! Every function takes any [`ConnectionTrait`], so handlers pass the pool
//! directly and tests pass a `MockDatabase` connection.

use sea_orm::*;

use crate::entity::pdf;

/// Fields for a new record. The id is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPdf {
    pub name: String,
    pub selected: bool,
    pub file: String,
    pub storage_key: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfChanges {
    pub name: Option<String>,
    pub selected: Option<bool>,
    pub file: Option<String>,
}

impl PdfChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewPdf) -> Result<pdf::Model, DbErr> {
    pdf::ActiveModel {
        name: Set(new.name),
        selected: Set(new.selected),
        file: Set(new.file),
        storage_key: Set(new.storage_key),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// All records in id order, optionally only those whose `selected` matches.
pub async fn list<C: ConnectionTrait>(
    db: &C,
    selected: Option<bool>,
) -> Result<Vec<pdf::Model>, DbErr> {
    let mut query = pdf::Entity::find();
    if let Some(selected) = selected {
        query = query.filter(pdf::Column::Selected.eq(selected));
    }
    query.order_by_asc(pdf::Column::Id).all(db).await
}

pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<pdf::Model>, DbErr> {
    pdf::Entity::find_by_id(id).one(db).await
}

/// Apply `changes` to record `id`. Returns `None` when the record does not exist.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    changes: PdfChanges,
) -> Result<Option<pdf::Model>, DbErr> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };
    if changes.is_empty() {
        return Ok(Some(existing));
    }

    let mut active: pdf::ActiveModel = existing.into();
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    if let Some(selected) = changes.selected {
        active.selected = Set(selected);
    }
    if let Some(file) = changes.file {
        active.file = Set(file);
    }

    active.update(db).await.map(Some)
}

/// Returns `true` if a row was removed.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
    let result = pdf::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
