//! Generic row access driven by the mapping tables

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{mapping::EntityMapping, Repository};
use crate::error::{AppError, AppResult};

fn quoted(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn select_all_sql(mapping: &EntityMapping) -> String {
    format!(
        "SELECT to_jsonb(t.*) FROM \"{}\" AS t ORDER BY t.\"{}\" {}",
        mapping.table,
        mapping.order_by,
        mapping.order.as_sql()
    )
}

pub(crate) fn insert_sql(mapping: &EntityMapping, columns: &[&str]) -> String {
    let columns = quoted(columns);
    format!(
        "INSERT INTO \"{table}\" AS t ({columns}) \
         SELECT {columns} FROM jsonb_populate_record(NULL::\"{table}\", $1) \
         RETURNING to_jsonb(t.*)",
        table = mapping.table,
        columns = columns,
    )
}

pub(crate) fn update_sql(mapping: &EntityMapping, columns: &[&str]) -> String {
    let columns = quoted(columns);
    format!(
        "UPDATE \"{table}\" AS t SET ({columns}) = \
         (SELECT {columns} FROM jsonb_populate_record(NULL::\"{table}\", $1)) \
         WHERE t.\"{key}\" = $2",
        table = mapping.table,
        columns = columns,
        key = mapping.key,
    )
}

impl Repository {
    /// Fetch every row of an entity in its canonical order
    pub(crate) async fn select_all<T: DeserializeOwned>(&self, mapping: &EntityMapping) -> AppResult<Vec<T>> {
        let rows: Vec<Value> = sqlx::query_scalar(&select_all_sql(mapping))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| decode(mapping, row))
            .collect()
    }

    /// Insert one row and return the canonical record (with id and timestamps)
    pub(crate) async fn insert_row<N, T>(&self, mapping: &EntityMapping, record: &N) -> AppResult<T>
    where
        N: Serialize,
        T: DeserializeOwned,
    {
        let payload = mapping.to_columns(serde_json::to_value(record)?)?;
        let columns: Vec<&str> = payload.keys().map(String::as_str).collect();
        let sql = insert_sql(mapping, &columns);

        let row: Value = sqlx::query_scalar(&sql)
            .bind(Value::Object(payload))
            .fetch_one(&self.pool)
            .await?;

        decode(mapping, row)
    }

    /// Replace every writable column of the row identified by `id`
    pub(crate) async fn update_row<T: Serialize>(&self, mapping: &EntityMapping, id: Uuid, record: &T) -> AppResult<()> {
        let payload = mapping.to_columns(serde_json::to_value(record)?)?;
        let columns: Vec<&str> = payload.keys().map(String::as_str).collect();
        let sql = update_sql(mapping, &columns);

        let result = sqlx::query(&sql)
            .bind(Value::Object(payload))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {} not found", mapping.entity, id)));
        }
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(mapping: &EntityMapping, row: Value) -> AppResult<T> {
    serde_json::from_value(mapping.to_fields(row)?).map_err(|e| {
        AppError::Backend(format!("malformed {} row: {}", mapping.entity, e))
    })
}
