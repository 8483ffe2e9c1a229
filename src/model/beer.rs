//! Represents a beer in the catalog.
//!
//! # Record Store
//! This struct implements [`StoredRecord`], so it can be kept by any
//! [`EntityStore`](record_store::EntityStore), and [`SqlRecord`] for the SQLite backend.
//! Its name is `beer_name` and its category is the [`BeerStyle`].
//!
//! See [`impl Resource for Beer`](#impl-Resource-for-Beer) for how the payloads
//! ([`BeerCreate`], [`BeerUpdate`], [`BeerPatch`]) are applied.

use crate::merge::has_text;
use crate::model::columns::{parse_timestamp, parse_uuid, timestamp_value, uuid_value};
use crate::resource::Resource;
use chrono::{DateTime, Utc};
use record_store::{SqlRecord, StoreError, StoredRecord};
use rust_decimal::Decimal;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Beer styles. The wire and column form is `SCREAMING_SNAKE_CASE` (`PALE_ALE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    Lager,
    Pilsner,
    Stout,
    Gose,
    Porter,
    Ale,
    Wheat,
    Ipa,
    PaleAle,
    Saison,
}

impl BeerStyle {
    pub const ALL: [BeerStyle; 10] = [
        BeerStyle::Lager,
        BeerStyle::Pilsner,
        BeerStyle::Stout,
        BeerStyle::Gose,
        BeerStyle::Porter,
        BeerStyle::Ale,
        BeerStyle::Wheat,
        BeerStyle::Ipa,
        BeerStyle::PaleAle,
        BeerStyle::Saison,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BeerStyle::Lager => "LAGER",
            BeerStyle::Pilsner => "PILSNER",
            BeerStyle::Stout => "STOUT",
            BeerStyle::Gose => "GOSE",
            BeerStyle::Porter => "PORTER",
            BeerStyle::Ale => "ALE",
            BeerStyle::Wheat => "WHEAT",
            BeerStyle::Ipa => "IPA",
            BeerStyle::PaleAle => "PALE_ALE",
            BeerStyle::Saison => "SAISON",
        }
    }
}

impl Display for BeerStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown beer style: {0}")]
pub struct UnknownBeerStyle(pub String);

impl FromStr for BeerStyle {
    type Err = UnknownBeerStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeerStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| UnknownBeerStyle(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beer {
    pub id: Uuid,
    pub version: i32,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    pub price: Decimal,
    pub quantity_on_hand: Option<i32>,
    pub created_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

impl Beer {
    /// Path a transport layer reports for this beer after a create.
    pub fn location(&self) -> String {
        format!("/api/v1/beer/{}", self.id)
    }
}

/// DTO for Beer creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerCreate {
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    pub price: Decimal,
    pub quantity_on_hand: Option<i32>,
}

/// DTO for a full replace. `quantity_on_hand: None` clears the stored quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerUpdate {
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    pub price: Decimal,
    pub quantity_on_hand: Option<i32>,
}

// DTO for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerPatch {
    pub beer_name: Option<String>,
    pub beer_style: Option<BeerStyle>,
    pub upc: Option<String>,
    pub price: Option<Decimal>,
    pub quantity_on_hand: Option<i32>,
}

impl StoredRecord for Beer {
    type Id = Uuid;
    type Category = BeerStyle;

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn name(&self) -> &str {
        &self.beer_name
    }

    fn category(&self) -> Option<&BeerStyle> {
        Some(&self.beer_style)
    }
}

impl Resource for Beer {
    const KIND: &'static str = "beer";

    type Create = BeerCreate;
    type Update = BeerUpdate;
    type Patch = BeerPatch;

    fn from_create(id: Uuid, params: BeerCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            version: 1,
            beer_name: params.beer_name,
            beer_style: params.beer_style,
            upc: params.upc,
            price: params.price,
            quantity_on_hand: params.quantity_on_hand,
            created_date: now,
            update_date: now,
        }
    }

    fn replace_fields(&mut self, update: BeerUpdate) {
        self.beer_name = update.beer_name;
        self.beer_style = update.beer_style;
        self.upc = update.upc;
        self.price = update.price;
        self.quantity_on_hand = update.quantity_on_hand;
    }

    /// # Fields Updated
    /// - `beer_name`, `upc`: only when the patch carries non-blank text
    /// - `beer_style`, `price`, `quantity_on_hand`: whenever present
    fn patch_fields(&mut self, patch: BeerPatch) {
        if let Some(name) = patch.beer_name.filter(|n| has_text(n)) {
            self.beer_name = name;
        }
        if let Some(style) = patch.beer_style {
            self.beer_style = style;
        }
        if let Some(upc) = patch.upc.filter(|u| has_text(u)) {
            self.upc = upc;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity_on_hand {
            self.quantity_on_hand = Some(quantity);
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.version += 1;
        self.update_date = now;
    }

    fn redact_inventory(&mut self) {
        self.quantity_on_hand = None;
    }
}

impl SqlRecord for Beer {
    const TABLE: &'static str = "beer";
    const SCHEMA: &'static str = "CREATE TABLE IF NOT EXISTS beer (
        id               TEXT PRIMARY KEY,
        version          INTEGER NOT NULL,
        beer_name        TEXT NOT NULL,
        beer_style       TEXT NOT NULL,
        upc              TEXT NOT NULL,
        price            TEXT NOT NULL,
        quantity_on_hand INTEGER,
        created_date     TEXT NOT NULL,
        update_date      TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS beer_name_idx ON beer (beer_name, id);";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "version",
        "beer_name",
        "beer_style",
        "upc",
        "price",
        "quantity_on_hand",
        "created_date",
        "update_date",
    ];
    const ID_COLUMN: &'static str = "id";
    const NAME_COLUMN: &'static str = "beer_name";
    const CATEGORY_COLUMN: Option<&'static str> = Some("beer_style");

    fn id_value(id: &Uuid) -> Value {
        uuid_value(id)
    }

    fn category_value(style: &BeerStyle) -> Value {
        Value::Text(style.as_str().to_string())
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            uuid_value(&self.id),
            Value::Integer(i64::from(self.version)),
            Value::Text(self.beer_name.clone()),
            Self::category_value(&self.beer_style),
            Value::Text(self.upc.clone()),
            Value::Text(self.price.to_string()),
            self.quantity_on_hand
                .map_or(Value::Null, |q| Value::Integer(i64::from(q))),
            timestamp_value(&self.created_date),
            timestamp_value(&self.update_date),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, StoreError> {
        let id: String = row.get(0)?;
        let style: String = row.get(3)?;
        let price: String = row.get(5)?;
        let created: String = row.get(7)?;
        let updated: String = row.get(8)?;

        Ok(Self {
            id: parse_uuid(&id)?,
            version: row.get(1)?,
            beer_name: row.get(2)?,
            beer_style: style
                .parse()
                .map_err(|e: UnknownBeerStyle| StoreError::Corrupt(e.to_string()))?,
            upc: row.get(4)?,
            price: Decimal::from_str(&price)
                .map_err(|e| StoreError::Corrupt(format!("price {price:?}: {e}")))?,
            quantity_on_hand: row.get(6)?,
            created_date: parse_timestamp(&created)?,
            update_date: parse_timestamp(&updated)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names_match_the_wire_form() {
        for style in BeerStyle::ALL {
            assert_eq!(style.as_str().parse::<BeerStyle>().unwrap(), style);
        }
        assert_eq!(BeerStyle::PaleAle.to_string(), "PALE_ALE");
        assert!("pale ale".parse::<BeerStyle>().is_err());
    }

    #[test]
    fn test_create_stamps_server_fields() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let beer = Beer::from_create(
            id,
            BeerCreate {
                beer_name: "Galaxy Cat".into(),
                beer_style: BeerStyle::PaleAle,
                upc: "123123123123".into(),
                price: Decimal::new(1295, 2),
                quantity_on_hand: Some(200),
            },
            now,
        );
        assert_eq!(beer.id, id);
        assert_eq!(beer.version, 1);
        assert_eq!(beer.created_date, now);
        assert_eq!(beer.update_date, now);
        assert_eq!(beer.location(), format!("/api/v1/beer/{id}"));
    }

    #[test]
    fn test_redaction_only_clears_inventory() {
        let now = Utc::now();
        let mut beer = Beer::from_create(
            Uuid::new_v4(),
            BeerCreate {
                beer_name: "Crank".into(),
                beer_style: BeerStyle::PaleAle,
                upc: "123123123".into(),
                price: Decimal::new(1195, 2),
                quantity_on_hand: Some(200),
            },
            now,
        );
        let before = beer.clone();
        beer.redact_inventory();
        assert_eq!(beer.quantity_on_hand, None);
        assert_eq!(beer.beer_name, before.beer_name);
        assert_eq!(beer.version, before.version);
    }
}
