//! # SQLite Repository
//!
//! [`SqliteStore`] is the persistent [`EntityStore`] backend, backed by rusqlite (bundled SQLite).
//! A record type opts in by implementing [`SqlRecord`], which describes its table and how to
//! bind and decode a row.
//!
//! The four lookup shapes become `WHERE` clauses that evaluate the same predicates as
//! [`Lookup::matches`]: `instr(lower(name), ?)` for the name filter (ASCII folding on both sides)
//! and plain equality for the category. Results are ordered by `name ASC, id ASC`, which is the
//! order [`sort_records`](crate::query::sort_records) produces for the in-memory backend.
//!
//! `modify` selects, applies and updates inside one transaction while holding the connection
//! mutex, so it is as atomic as the actor's single message.

use crate::entity::StoredRecord;
use crate::error::StoreError;
use crate::query::{Lookup, Page, PageRequest};
use crate::store::{EntityStore, Modifier};
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// A connection that several stores (one per table) can share.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open or create a SQLite database file.
pub fn open_connection(path: &Path) -> Result<SharedConnection, StoreError> {
    let conn = Connection::open(path)?;
    // WAL mode for better concurrent read performance.
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    info!(path = %path.display(), "Opened SQLite database");
    Ok(Arc::new(Mutex::new(conn)))
}

/// Create an in-memory SQLite database (useful for tests).
pub fn open_in_memory_connection() -> Result<SharedConnection, StoreError> {
    let conn = Connection::open_in_memory()?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Table mapping for a record kept in SQLite.
pub trait SqlRecord: StoredRecord {
    const TABLE: &'static str;
    /// `CREATE TABLE IF NOT EXISTS …` for [`Self::TABLE`].
    const SCHEMA: &'static str;
    /// Every column, in the order [`SqlRecord::to_values`] produces them and
    /// [`SqlRecord::from_row`] reads them. Must include [`Self::ID_COLUMN`].
    const COLUMNS: &'static [&'static str];
    const ID_COLUMN: &'static str;
    const NAME_COLUMN: &'static str;
    /// `None` for resources without a category; category lookups then match nothing.
    const CATEGORY_COLUMN: Option<&'static str>;

    fn id_value(id: &Self::Id) -> Value;
    fn category_value(category: &Self::Category) -> Value;
    fn to_values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> Result<Self, StoreError>;
}

/// SQLite-backed repository for one record type.
pub struct SqliteStore<T: SqlRecord> {
    conn: SharedConnection,
    _record: PhantomData<fn() -> T>,
}

impl<T: SqlRecord> Clone for SqliteStore<T> {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            _record: PhantomData,
        }
    }
}

impl<T: SqlRecord> SqliteStore<T> {
    /// Open or create a database file holding this record type's table.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::from_shared(open_connection(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_shared(open_in_memory_connection()?)
    }

    /// Use an existing connection, creating the table if needed.
    pub fn from_shared(conn: SharedConnection) -> Result<Self, StoreError> {
        {
            let guard = lock(&conn)?;
            guard.execute_batch(T::SCHEMA)?;
        }
        debug!(table = T::TABLE, "Schema ready");
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    /// Runs `op` on the blocking pool while holding the connection.
    async fn with_conn<R, F>(&self, op: F) -> Result<R, StoreError>
    where
        R: Send + 'static,
        F: FnOnce(&Connection) -> Result<R, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = lock(&conn)?;
            op(&guard)
        })
        .await
        .map_err(|e| StoreError::Storage(format!("blocking task failed: {e}")))?
    }
}

fn lock(conn: &SharedConnection) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
    conn.lock()
        .map_err(|e| StoreError::Storage(format!("connection lock poisoned: {e}")))
}

/// Builds the `WHERE` clause and its parameters for a lookup.
fn where_clause<T: SqlRecord>(lookup: &Lookup<T::Category>) -> (String, Vec<Value>) {
    let name_predicate = format!("instr(lower({}), ?) > 0", T::NAME_COLUMN);
    match (lookup, T::CATEGORY_COLUMN) {
        (Lookup::All, _) => (String::new(), Vec::new()),
        (Lookup::NameLike(needle), _) => (
            format!("WHERE {name_predicate}"),
            vec![Value::Text(needle.to_ascii_lowercase())],
        ),
        (Lookup::CategoryEq(category), Some(column)) => (
            format!("WHERE {column} = ?"),
            vec![T::category_value(category)],
        ),
        (Lookup::NameLikeAndCategory(needle, category), Some(column)) => (
            format!("WHERE {name_predicate} AND {column} = ?"),
            vec![
                Value::Text(needle.to_ascii_lowercase()),
                T::category_value(category),
            ],
        ),
        (Lookup::CategoryEq(_) | Lookup::NameLikeAndCategory(_, _), None) => {
            ("WHERE 0".to_string(), Vec::new())
        }
    }
}

fn select_by_id<T: SqlRecord>(
    conn: &Connection,
    id_value: Value,
) -> Result<Option<T>, StoreError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        T::COLUMNS.join(", "),
        T::TABLE,
        T::ID_COLUMN
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([id_value])?;
    let record = match rows.next()? {
        Some(row) => Some(T::from_row(row)?),
        None => None,
    };
    Ok(record)
}

/// `UPDATE` of every non-id column, with the id bound last.
fn update_sql<T: SqlRecord>() -> String {
    let assignments = T::COLUMNS
        .iter()
        .filter(|column| **column != T::ID_COLUMN)
        .map(|column| format!("{column} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("UPDATE {} SET {} WHERE {} = ?", T::TABLE, assignments, T::ID_COLUMN)
}

fn update_params<T: SqlRecord>(record: &T, id_value: Value) -> Vec<Value> {
    let mut params: Vec<Value> = T::COLUMNS
        .iter()
        .zip(record.to_values())
        .filter(|(column, _)| **column != T::ID_COLUMN)
        .map(|(_, value)| value)
        .collect();
    params.push(id_value);
    params
}

fn upsert_sql<T: SqlRecord>() -> String {
    let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
    let assignments = T::COLUMNS
        .iter()
        .filter(|column| **column != T::ID_COLUMN)
        .map(|column| format!("{column} = excluded.{column}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {table} ({columns}) VALUES ({placeholders}) \
         ON CONFLICT({id}) DO UPDATE SET {assignments}",
        table = T::TABLE,
        columns = T::COLUMNS.join(", "),
        id = T::ID_COLUMN,
    )
}

#[async_trait]
impl<T: SqlRecord> EntityStore<T> for SqliteStore<T> {
    async fn find(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        let id_value = T::id_value(id);
        let found = self
            .with_conn(move |conn| select_by_id::<T>(conn, id_value))
            .await?;
        debug!(table = T::TABLE, %id, found = found.is_some(), "Find");
        Ok(found)
    }

    async fn find_all(
        &self,
        lookup: &Lookup<T::Category>,
        page: PageRequest,
    ) -> Result<Page<T>, StoreError> {
        let (filter, params) = where_clause::<T>(lookup);
        let shape = lookup.shape();
        let result = self
            .with_conn(move |conn| {
                let tx = conn.unchecked_transaction()?;
                let total: i64 = tx.query_row(
                    &format!("SELECT COUNT(*) FROM {} {}", T::TABLE, filter),
                    params_from_iter(params.iter()),
                    |row| row.get(0),
                )?;

                let offset = i64::try_from(page.offset())
                    .map_err(|_| StoreError::Storage("page offset out of range".to_string()))?;
                let mut page_params = params;
                page_params.push(Value::Integer(i64::from(page.size())));
                page_params.push(Value::Integer(offset));

                let sql = format!(
                    "SELECT {columns} FROM {table} {filter} \
                     ORDER BY {name} ASC, {id} ASC LIMIT ? OFFSET ?",
                    columns = T::COLUMNS.join(", "),
                    table = T::TABLE,
                    name = T::NAME_COLUMN,
                    id = T::ID_COLUMN,
                );
                let mut content = Vec::new();
                {
                    let mut stmt = tx.prepare(&sql)?;
                    let mut rows = stmt.query(params_from_iter(page_params.iter()))?;
                    while let Some(row) = rows.next()? {
                        content.push(T::from_row(row)?);
                    }
                }
                tx.commit()?;
                Ok(Page::new(content, page, total.max(0) as u64))
            })
            .await?;
        debug!(
            table = T::TABLE,
            lookup = shape,
            page = page.index(),
            total = result.total_elements,
            "FindAll"
        );
        Ok(result)
    }

    async fn save(&self, record: T) -> Result<T, StoreError> {
        let values = record.to_values();
        self.with_conn(move |conn| {
            conn.execute(&upsert_sql::<T>(), params_from_iter(values.iter()))?;
            Ok(())
        })
        .await?;
        info!(table = T::TABLE, id = %record.id(), "Saved");
        Ok(record)
    }

    async fn modify(&self, id: &T::Id, modifier: Modifier<T>) -> Result<Option<T>, StoreError> {
        let id_value = T::id_value(id);
        let updated = self
            .with_conn(move |conn| {
                // The connection lock is held for the whole transaction.
                let tx = conn.unchecked_transaction()?;
                let Some(current) = select_by_id::<T>(&tx, id_value.clone())? else {
                    return Ok(None);
                };
                let updated = modifier.apply(current);
                let params = update_params(&updated, id_value);
                tx.execute(&update_sql::<T>(), params_from_iter(params.iter()))?;
                tx.commit()?;
                Ok(Some(updated))
            })
            .await?;
        info!(table = T::TABLE, %id, found = updated.is_some(), "Modified");
        Ok(updated)
    }

    async fn exists(&self, id: &T::Id) -> Result<bool, StoreError> {
        let id_value = T::id_value(id);
        self.with_conn(move |conn| {
            let sql = format!("SELECT 1 FROM {} WHERE {} = ?1", T::TABLE, T::ID_COLUMN);
            let hit: Option<i64> = conn
                .query_row(&sql, [id_value], |row| row.get(0))
                .optional()?;
            Ok(hit.is_some())
        })
        .await
    }

    async fn delete(&self, id: &T::Id) -> Result<bool, StoreError> {
        let id_value = T::id_value(id);
        let removed = self
            .with_conn(move |conn| {
                let sql = format!("DELETE FROM {} WHERE {} = ?1", T::TABLE, T::ID_COLUMN);
                Ok(conn.execute(&sql, [id_value])?)
            })
            .await?;
        info!(table = T::TABLE, %id, removed = removed > 0, "Deleted");
        Ok(removed > 0)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.with_conn(|conn| {
            let sql = format!("SELECT COUNT(*) FROM {}", T::TABLE);
            let total: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
            Ok(total.max(0) as u64)
        })
        .await
    }
}
