//! Represents a customer of the brewery.
//!
//! Customers have a name but no category and no inventory, so category lookups never match them
//! and redaction leaves them untouched.

use crate::merge::has_text;
use crate::model::columns::{parse_timestamp, parse_uuid, timestamp_value, uuid_value};
use crate::resource::Resource;
use chrono::{DateTime, Utc};
use record_store::{SqlRecord, StoreError, StoredRecord};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub version: i32,
    pub customer_name: String,
    pub created_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

impl Customer {
    /// Path a transport layer reports for this customer after a create.
    pub fn location(&self) -> String {
        format!("/api/v1/customer/{}", self.id)
    }
}

/// DTOs for Customer creation and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub customer_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub customer_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub customer_name: Option<String>,
}

impl StoredRecord for Customer {
    type Id = Uuid;
    type Category = ();

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn name(&self) -> &str {
        &self.customer_name
    }

    fn category(&self) -> Option<&()> {
        None
    }
}

impl Resource for Customer {
    const KIND: &'static str = "customer";

    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Patch = CustomerPatch;

    fn from_create(id: Uuid, params: CustomerCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            version: 1,
            customer_name: params.customer_name,
            created_date: now,
            update_date: now,
        }
    }

    fn replace_fields(&mut self, update: CustomerUpdate) {
        self.customer_name = update.customer_name;
    }

    fn patch_fields(&mut self, patch: CustomerPatch) {
        if let Some(name) = patch.customer_name.filter(|n| has_text(n)) {
            self.customer_name = name;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.version += 1;
        self.update_date = now;
    }
}

impl SqlRecord for Customer {
    const TABLE: &'static str = "customer";
    const SCHEMA: &'static str = "CREATE TABLE IF NOT EXISTS customer (
        id            TEXT PRIMARY KEY,
        version       INTEGER NOT NULL,
        customer_name TEXT NOT NULL,
        created_date  TEXT NOT NULL,
        update_date   TEXT NOT NULL
    );";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "version",
        "customer_name",
        "created_date",
        "update_date",
    ];
    const ID_COLUMN: &'static str = "id";
    const NAME_COLUMN: &'static str = "customer_name";
    const CATEGORY_COLUMN: Option<&'static str> = None;

    fn id_value(id: &Uuid) -> Value {
        uuid_value(id)
    }

    fn category_value(_: &()) -> Value {
        Value::Null
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            uuid_value(&self.id),
            Value::Integer(i64::from(self.version)),
            Value::Text(self.customer_name.clone()),
            timestamp_value(&self.created_date),
            timestamp_value(&self.update_date),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, StoreError> {
        let id: String = row.get(0)?;
        let created: String = row.get(3)?;
        let updated: String = row.get(4)?;

        Ok(Self {
            id: parse_uuid(&id)?,
            version: row.get(1)?,
            customer_name: row.get(2)?,
            created_date: parse_timestamp(&created)?,
            update_date: parse_timestamp(&updated)?,
        })
    }
}
