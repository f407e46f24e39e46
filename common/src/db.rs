use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{CustomerRecord, RecordId, StoredCustomer};

const CREATE_CUSTOMERS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS customers ( \
    id INTEGER PRIMARY KEY AUTOINCREMENT, \
    name TEXT NOT NULL, \
    birthday TEXT, \
    email TEXT, \
    phone TEXT, \
    address TEXT, \
    contact_method TEXT \
)";

const INSERT_CUSTOMER: &str = "\
INSERT INTO customers (name, birthday, email, phone, address, contact_method) \
VALUES (?, ?, ?, ?, ?, ?)";

const SELECT_CUSTOMER: &str = "\
SELECT id, name, \
    COALESCE(birthday, '') AS birthday, \
    COALESCE(email, '') AS email, \
    COALESCE(phone, '') AS phone, \
    COALESCE(address, '') AS address, \
    COALESCE(contact_method, 'Email') AS contact_method \
FROM customers \
WHERE id = ?";

/// The database could not be opened or prepared. Fatal at startup.
#[derive(Debug, Error)]
#[error("storage unavailable: {message}")]
pub struct StorageUnavailable {
    pub message: String,
}

impl From<sqlx::Error> for StorageUnavailable {
    fn from(err: sqlx::Error) -> Self {
        StorageUnavailable {
            message: err.to_string(),
        }
    }
}

/// Handle on the SQLite file holding the `customers` table.
///
/// Holds connect options only. Every operation opens its own connection and
/// releases it before returning.
#[derive(Debug, Clone)]
pub struct CustomerStore {
    options: SqliteConnectOptions,
}

impl CustomerStore {
    /// Parses a `sqlite://` url. The file is created on first connect if missing.
    pub fn open(database_url: &str) -> Result<Self, StorageUnavailable> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        debug!("Db url: {:?}", database_url);
        Ok(CustomerStore { options })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        CustomerStore { options }
    }

    async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }

    /// Creates the `customers` table if it does not exist. Safe to call on every start.
    pub async fn init(&self) -> Result<(), StorageUnavailable> {
        let mut conn = self.connect().await?;

        sqlx::query(CREATE_CUSTOMERS_TABLE)
            .execute(&mut conn)
            .await?;

        conn.close().await?;
        info!("customers table ready");
        Ok(())
    }

    /// Single-statement insert of all six fields; returns the new row id.
    pub async fn insert(&self, record: &CustomerRecord) -> Result<RecordId, sqlx::Error> {
        let mut conn = self.connect().await?;

        let result = sqlx::query(INSERT_CUSTOMER)
            .bind(&record.name)
            .bind(&record.birthday)
            .bind(&record.email)
            .bind(&record.phone)
            .bind(&record.address)
            .bind(record.contact_method.to_string())
            .execute(&mut conn)
            .await?;

        // The row is already committed; a failed close must not turn it into an error.
        if let Err(err) = conn.close().await {
            warn!("closing connection after insert failed: {}", err);
        }

        Ok(result.last_insert_rowid())
    }

    pub async fn count(&self) -> anyhow::Result<i64> {
        let mut conn = self.connect().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&mut conn)
            .await?;

        conn.close().await?;
        Ok(count)
    }

    pub async fn find(&self, id: RecordId) -> anyhow::Result<Option<StoredCustomer>> {
        let mut conn = self.connect().await?;

        let customer: Option<StoredCustomer> = sqlx::query_as(SELECT_CUSTOMER)
            .bind(id)
            .fetch_optional(&mut conn)
            .await?;

        conn.close().await?;
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ContactMethod;
    use tempfile::tempdir;

    #[tokio::test]
    async fn init_is_idempotent_and_keeps_rows() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("customers.db");
        let store = CustomerStore::from_path(&path);

        store.init().await?;
        store.insert(&CustomerRecord::named("Ann")).await?;
        store.init().await?;

        assert_eq!(store.count().await?, 1);

        let mut conn = SqliteConnection::connect(&format!("sqlite://{}", path.display())).await?;
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'customers'",
        )
        .fetch_one(&mut conn)
        .await?;
        conn.close().await?;
        assert_eq!(tables, 1);
        Ok(())
    }

    #[tokio::test]
    async fn open_creates_the_database_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("fresh.db");
        let store = CustomerStore::open(&format!("sqlite://{}", path.display()))?;

        store.init().await?;

        assert!(path.exists());
        assert_eq!(store.count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn init_reports_unreachable_medium() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = CustomerStore::from_path(dir.path().join("missing").join("customers.db"));

        let err = store.init().await.unwrap_err();
        assert!(!err.message.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn insert_stores_every_field() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = CustomerStore::from_path(dir.path().join("customers.db"));
        store.init().await?;

        let record = CustomerRecord {
            name: "  Cy ".to_string(),
            birthday: "1984-02-29".to_string(),
            email: "c@d.com".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            contact_method: ContactMethod::Mail,
        };
        let id = store.insert(&record).await?;

        let stored = store.find(id).await?.expect("row was inserted");
        assert_eq!(stored.id, id);
        assert_eq!(stored.name, "  Cy ");
        assert_eq!(stored.birthday, record.birthday);
        assert_eq!(stored.email, record.email);
        assert_eq!(stored.phone, record.phone);
        assert_eq!(stored.address, record.address);
        assert_eq!(stored.contact_method, ContactMethod::Mail);

        assert_eq!(store.find(id + 1).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn find_reads_nulls_written_by_other_programs() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("customers.db");
        let store = CustomerStore::from_path(&path);
        store.init().await?;

        let mut conn = SqliteConnection::connect(&format!("sqlite://{}", path.display())).await?;
        let id = sqlx::query("INSERT INTO customers (name) VALUES ('Fay')")
            .execute(&mut conn)
            .await?
            .last_insert_rowid();
        conn.close().await?;

        let stored = store.find(id).await?.expect("row was inserted");
        assert_eq!(stored.name, "Fay");
        assert_eq!(stored.birthday, "");
        assert_eq!(stored.email, "");
        assert_eq!(stored.phone, "");
        assert_eq!(stored.address, "");
        assert_eq!(stored.contact_method, ContactMethod::Email);
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_fresh_per_insert() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = CustomerStore::from_path(dir.path().join("customers.db"));
        store.init().await?;

        let first = store.insert(&CustomerRecord::named("Ann")).await?;
        let second = store.insert(&CustomerRecord::named("Bo")).await?;

        assert_ne!(first, second);
        assert_eq!(store.count().await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn insert_without_table_fails() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = CustomerStore::from_path(dir.path().join("customers.db"));

        let err = store.insert(&CustomerRecord::named("Ann")).await.unwrap_err();
        assert!(err.to_string().contains("customers"));
        Ok(())
    }
}
