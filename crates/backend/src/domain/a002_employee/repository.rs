use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_employee::aggregate::{Employee, EmployeeId};
use contracts::domain::common::{AggregateId, BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub display_name: String,
    pub color: String,
    pub position: i32,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Employee {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Employee {
            base: BaseAggregate::with_metadata(
                EmployeeId::new(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            display_name: m.display_name,
            color: m.color,
            position: m.position,
        }
    }
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Employee>> {
    let db = get_connection();
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

/// Live roster in position order
pub async fn list_all() -> Result<Vec<Employee>> {
    let db = get_connection();
    let models = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Position)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

pub async fn count() -> Result<u64> {
    let db = get_connection();
    let count = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .count(db)
        .await?;
    Ok(count)
}

/// Upsert a roster member by ID. Returns true when a new row was inserted.
pub async fn upsert_employee(employee: &Employee) -> Result<bool> {
    let db = get_connection();
    let id_str = employee.base.id.as_string();

    let existing = Entity::find_by_id(&id_str).one(db).await?;

    if existing.is_some() {
        let active_model = ActiveModel {
            id: Set(id_str),
            code: Set(employee.base.code.clone()),
            description: Set(employee.base.description.clone()),
            comment: Set(employee.base.comment.clone()),
            display_name: Set(employee.display_name.clone()),
            color: Set(employee.color.clone()),
            position: Set(employee.position),
            is_deleted: Set(employee.base.metadata.is_deleted),
            updated_at: Set(Some(Utc::now())),
            version: Set(employee.base.metadata.version + 1),
            created_at: sea_orm::ActiveValue::NotSet,
        };
        Entity::update(active_model).exec(db).await?;
        Ok(false)
    } else {
        let active_model = ActiveModel {
            id: Set(id_str),
            code: Set(employee.base.code.clone()),
            description: Set(employee.base.description.clone()),
            comment: Set(employee.base.comment.clone()),
            display_name: Set(employee.display_name.clone()),
            color: Set(employee.color.clone()),
            position: Set(employee.position),
            is_deleted: Set(false),
            created_at: Set(Some(Utc::now())),
            updated_at: Set(Some(Utc::now())),
            version: Set(1),
        };
        Entity::insert(active_model).exec(db).await?;
        Ok(true)
    }
}

pub async fn soft_delete(id: Uuid) -> Result<bool> {
    let db = get_connection();
    let existing = Entity::find_by_id(id.to_string()).one(db).await?;
    if let Some(model) = existing {
        let mut active: ActiveModel = model.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Some(Utc::now()));
        Entity::update(active).exec(db).await?;
        Ok(true)
    } else {
        Ok(false)
    }
}
