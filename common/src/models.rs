use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::utils::ContactMethod;

/// Row id assigned by SQLite on insert.
pub type RecordId = i64;

/// A candidate customer row, built by the caller for one submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub name: String,
    pub birthday: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub contact_method: ContactMethod,
}

impl CustomerRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A persisted row of the `customers` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCustomer {
    pub id: RecordId,
    pub name: String,
    pub birthday: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub contact_method: ContactMethod,
}

impl<'r> FromRow<'r, SqliteRow> for StoredCustomer {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let contact_method: String = row.try_get("contact_method")?;
        let contact_method = contact_method
            .parse()
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: "contact_method".to_string(),
                source: Box::new(err),
            })?;

        Ok(StoredCustomer {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            birthday: row.try_get("birthday")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            contact_method,
        })
    }
}
