use anyhow::Result;
use chrono::Utc;
use contracts::domain::a001_sale_entry::aggregate::{SaleEntry, SaleEntryId};
use contracts::domain::common::{AggregateId, BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_sale_entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub entry_date: String,
    pub employee_id: String,
    pub visitors: i64,
    pub transactions: i64,
    pub units: i64,
    pub revenue: f64,
    pub hours_worked: f64,
    pub conversion: f64,
    pub apo: f64,
    pub pmv: f64,
    pub ticket_medio: f64,
    pub productividad: f64,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SaleEntry {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        SaleEntry {
            base: BaseAggregate::with_metadata(
                SaleEntryId::new(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            entry_date: m.entry_date,
            employee_id: m.employee_id,
            visitors: m.visitors,
            transactions: m.transactions,
            units: m.units,
            revenue: m.revenue,
            hours_worked: m.hours_worked,
            conversion: m.conversion,
            apo: m.apo,
            pmv: m.pmv,
            ticket_medio: m.ticket_medio,
            productividad: m.productividad,
        }
    }
}

pub async fn get_by_id(id: Uuid) -> Result<Option<SaleEntry>> {
    let db = get_connection();
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(|m| m.into()))
}

/// Upsert an entry by ID. Returns true when a new row was inserted.
pub async fn upsert_entry(entry: &SaleEntry) -> Result<bool> {
    let db = get_connection();
    let id_str = entry.base.id.as_string();

    let existing = Entity::find_by_id(&id_str).one(db).await?;

    if existing.is_some() {
        let active_model = ActiveModel {
            id: Set(id_str),
            code: Set(entry.base.code.clone()),
            description: Set(entry.base.description.clone()),
            comment: Set(entry.base.comment.clone()),
            entry_date: Set(entry.entry_date.clone()),
            employee_id: Set(entry.employee_id.clone()),
            visitors: Set(entry.visitors),
            transactions: Set(entry.transactions),
            units: Set(entry.units),
            revenue: Set(entry.revenue),
            hours_worked: Set(entry.hours_worked),
            conversion: Set(entry.conversion),
            apo: Set(entry.apo),
            pmv: Set(entry.pmv),
            ticket_medio: Set(entry.ticket_medio),
            productividad: Set(entry.productividad),
            is_deleted: Set(entry.base.metadata.is_deleted),
            updated_at: Set(Some(Utc::now())),
            version: Set(entry.base.metadata.version + 1),
            created_at: sea_orm::ActiveValue::NotSet,
        };
        Entity::update(active_model).exec(db).await?;
        Ok(false)
    } else {
        let active_model = ActiveModel {
            id: Set(id_str),
            code: Set(entry.base.code.clone()),
            description: Set(entry.base.description.clone()),
            comment: Set(entry.base.comment.clone()),
            entry_date: Set(entry.entry_date.clone()),
            employee_id: Set(entry.employee_id.clone()),
            visitors: Set(entry.visitors),
            transactions: Set(entry.transactions),
            units: Set(entry.units),
            revenue: Set(entry.revenue),
            hours_worked: Set(entry.hours_worked),
            conversion: Set(entry.conversion),
            apo: Set(entry.apo),
            pmv: Set(entry.pmv),
            ticket_medio: Set(entry.ticket_medio),
            productividad: Set(entry.productividad),
            is_deleted: Set(false),
            created_at: Set(Some(Utc::now())),
            updated_at: Set(Some(Utc::now())),
            version: Set(1),
        };
        Entity::insert(active_model).exec(db).await?;
        Ok(true)
    }
}

/// Query parameters for the entry list
#[derive(Debug, Clone)]
pub struct SaleEntryListQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub employee_id: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

/// List result with pagination
#[derive(Debug, Clone)]
pub struct SaleEntryListResult {
    pub items: Vec<SaleEntry>,
    pub total: u64,
}

/// Entries most-recent-first: entry_date DESC, then created_at DESC.
/// Downstream deduplication relies on this ordering.
pub async fn list(query: SaleEntryListQuery) -> Result<SaleEntryListResult> {
    let db = get_connection();

    let mut find = Entity::find().filter(Column::IsDeleted.eq(false));
    if let Some(ref date_from) = query.date_from {
        if !date_from.is_empty() {
            find = find.filter(Column::EntryDate.gte(date_from.clone()));
        }
    }
    if let Some(ref date_to) = query.date_to {
        if !date_to.is_empty() {
            find = find.filter(Column::EntryDate.lte(date_to.clone()));
        }
    }
    if let Some(ref employee_id) = query.employee_id {
        if !employee_id.is_empty() {
            find = find.filter(Column::EmployeeId.eq(employee_id.clone()));
        }
    }

    let total = find.clone().count(db).await?;

    let models = find
        .order_by_desc(Column::EntryDate)
        .order_by_desc(Column::CreatedAt)
        .limit(query.limit)
        .offset(query.offset)
        .all(db)
        .await?;

    Ok(SaleEntryListResult {
        items: models.into_iter().map(|m| m.into()).collect(),
        total,
    })
}

/// All live entries in a date range, most-recent-first
pub async fn list_between(date_from: &str, date_to: &str) -> Result<Vec<SaleEntry>> {
    let db = get_connection();
    let models = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::EntryDate.gte(date_from))
        .filter(Column::EntryDate.lte(date_to))
        .order_by_desc(Column::EntryDate)
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
}

/// The two most recent entries (for the last-sale trends)
pub async fn last_entries(count: u64) -> Result<Vec<SaleEntry>> {
    let db = get_connection();
    let models = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::EntryDate)
        .order_by_desc(Column::CreatedAt)
        .limit(count)
        .all(db)
        .await?;
    Ok(models.into_iter().map(|m| m.into()).collect())
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

/// Soft delete every entry of one calendar day (the whole duplicate stack
/// included). Returns the number of affected entries.
pub async fn soft_delete_day(date: &str) -> Result<u64> {
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let db = get_connection();
    let now = Utc::now().to_rfc3339();
    let result = db
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE a001_sale_entry SET is_deleted = 1, updated_at = ? \
             WHERE entry_date = ? AND is_deleted = 0",
            [now.into(), date.into()],
        ))
        .await?;
    Ok(result.rows_affected())
}
