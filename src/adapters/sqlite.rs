//! 以 SQLite 實作的離線地址資料庫

use crate::domain::model::{AddressRecord, NewAddress, SearchParams};
use crate::domain::ports::OfflineStore;
use crate::utils::error::{AddressError, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS addresses (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    name TEXT,
    location_type TEXT NOT NULL,
    longitude REAL NOT NULL,
    latitude REAL NOT NULL,
    created_by TEXT NOT NULL,
    created_by_name TEXT NOT NULL DEFAULT '',
    project TEXT NOT NULL,
    observations TEXT,
    plus_code TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_addresses_project ON addresses(project);
"#;

const SELECT_COLUMNS: &str = "SELECT id, name, location_type, longitude, latitude, created_by, \
     created_by_name, project, observations, plus_code, created_at FROM addresses";

const ORDER_BY: &str = " ORDER BY created_at, seq";

/// 可篩選的欄位（記錄欄位名稱 -> 資料表欄位）
const FILTER_COLUMNS: &[(&str, &str)] = &[
    ("_id", "id"),
    ("name", "name"),
    ("locationType", "location_type"),
    ("createdBy", "created_by"),
    ("createdByName", "created_by_name"),
    ("project", "project"),
    ("plusCode", "plus_code"),
];

const SEARCH_COLUMNS: &[&str] = &[
    "name",
    "location_type",
    "observations",
    "plus_code",
    "created_by_name",
    "project",
];

pub struct SqliteAddressStore {
    conn: Mutex<Connection>,
}

impl SqliteAddressStore {
    /// 開啟（或建立）`path` 的資料庫，`":memory:"` 使用記憶體資料庫
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path == Path::new(":memory:") {
            return Self::open_in_memory();
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::debug!("Opened offline store at {}", path.display());
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| AddressError::LockPoisoned)
    }

    fn query(&self, sql: &str, values: Vec<String>) -> Result<Vec<AddressRecord>> {
        let conn = self.lock()?;
        tracing::debug!("Offline query: {} ({} params)", sql, values.len());

        let mut stmt = conn.prepare(sql)?;
        let records = stmt
            .query_map(params_from_iter(values), row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<AddressRecord> {
    Ok(AddressRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        location_type: row.get(2)?,
        longitude: row.get(3)?,
        latitude: row.get(4)?,
        created_by: row.get(5)?,
        created_by_name: row.get(6)?,
        project: row.get(7)?,
        observations: row.get(8)?,
        plus_code: row.get(9)?,
        created_at: row.get(10)?,
    })
}

fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn filter_column(key: &str) -> Result<&'static str> {
    FILTER_COLUMNS
        .iter()
        .find(|(field, _)| *field == key)
        .map(|(_, column)| *column)
        .ok_or_else(|| AddressError::validation(key, "Unsupported filter field"))
}

impl OfflineStore for SqliteAddressStore {
    async fn get_addresses_offline(&self) -> Result<Vec<AddressRecord>> {
        self.query(&format!("{}{}", SELECT_COLUMNS, ORDER_BY), Vec::new())
    }

    async fn search_addresses_offline(&self, search: &str) -> Result<Vec<AddressRecord>> {
        if search.is_empty() {
            return self.get_addresses_offline().await;
        }

        let predicate = SEARCH_COLUMNS
            .iter()
            .map(|column| format!("{} LIKE ?1 ESCAPE '\\'", column))
            .collect::<Vec<_>>()
            .join(" OR ");

        self.query(
            &format!("{} WHERE {}{}", SELECT_COLUMNS, predicate, ORDER_BY),
            vec![like_pattern(search)],
        )
    }

    async fn search_filtered_addresses_offline(
        &self,
        params: &SearchParams,
    ) -> Result<Vec<AddressRecord>> {
        let mut predicates = Vec::with_capacity(params.len());
        let mut values = Vec::with_capacity(params.len());

        for (index, (key, value)) in params.iter().enumerate() {
            let column = filter_column(key)?;
            predicates.push(format!("{} = ?{}", column, index + 1));
            values.push(value.to_string());
        }

        let sql = if predicates.is_empty() {
            format!("{}{}", SELECT_COLUMNS, ORDER_BY)
        } else {
            format!(
                "{} WHERE {}{}",
                SELECT_COLUMNS,
                predicates.join(" AND "),
                ORDER_BY
            )
        };

        self.query(&sql, values)
    }

    async fn register_address_offline(&self, address: &NewAddress) -> Result<AddressRecord> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let next_seq: i64 = tx.query_row(
            "SELECT COALESCE(MAX(seq), 0) + 1 FROM addresses",
            [],
            |row| row.get(0),
        )?;
        let now = Utc::now();

        let record = AddressRecord {
            id: format!("local-{}-{}", now.timestamp_millis(), next_seq),
            name: address.name.clone(),
            location_type: address.location_type.clone(),
            longitude: address.longitude,
            latitude: address.latitude,
            created_by: address.created_by.clone(),
            created_by_name: address.created_by_name.clone(),
            project: address.project.clone(),
            observations: address.observations.clone(),
            plus_code: address.plus_code.clone(),
            created_at: address
                .created_at
                .clone()
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        };

        tx.execute(
            "INSERT INTO addresses (id, name, location_type, longitude, latitude, created_by, \
             created_by_name, project, observations, plus_code, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                record.id,
                record.name,
                record.location_type,
                record.longitude,
                record.latitude,
                record.created_by,
                record.created_by_name,
                record.project,
                record.observations,
                record.plus_code,
                record.created_at,
            ],
        )?;
        tx.commit()?;

        tracing::debug!("Stored offline address {}", record.id);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_address(name: Option<&str>, location_type: &str, project: &str) -> NewAddress {
        NewAddress {
            name: name.map(String::from),
            location_type: location_type.to_string(),
            longitude: -46.63,
            latitude: -23.55,
            created_by: "u1".to_string(),
            created_by_name: "Ana".to_string(),
            project: project.to_string(),
            observations: None,
            plus_code: "588MC9X8+".to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_register_assigns_id_and_created_at() {
        let store = SqliteAddressStore::open_in_memory().unwrap();

        let first = store
            .register_address_offline(&new_address(Some("Casa"), "house", "p1"))
            .await
            .unwrap();
        let second = store
            .register_address_offline(&new_address(None, "poi", "p1"))
            .await
            .unwrap();

        assert!(first.id.starts_with("local-"));
        assert_ne!(first.id, second.id);
        assert!(!first.created_at.is_empty());

        let all = store.get_addresses_offline().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name.as_deref(), Some("Casa"));
        assert_eq!(all[1].name, None);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let store = SqliteAddressStore::open_in_memory().unwrap();
        store
            .register_address_offline(&new_address(Some("Escola Central"), "school", "p1"))
            .await
            .unwrap();
        store
            .register_address_offline(&new_address(Some("Posto"), "clinic", "p1"))
            .await
            .unwrap();

        let found = store.search_addresses_offline("central").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.as_deref(), Some("Escola Central"));

        let everything = store.search_addresses_offline("").await.unwrap();
        assert_eq!(everything.len(), 2);
    }

    #[tokio::test]
    async fn test_search_escapes_wildcards() {
        let store = SqliteAddressStore::open_in_memory().unwrap();
        store
            .register_address_offline(&new_address(Some("Casa"), "house", "p1"))
            .await
            .unwrap();

        let found = store.search_addresses_offline("%").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_filter_combines_predicates() {
        let store = SqliteAddressStore::open_in_memory().unwrap();
        store
            .register_address_offline(&new_address(Some("A"), "house", "p1"))
            .await
            .unwrap();
        store
            .register_address_offline(&new_address(Some("B"), "poi", "p1"))
            .await
            .unwrap();
        store
            .register_address_offline(&new_address(Some("C"), "house", "p2"))
            .await
            .unwrap();

        let params = SearchParams::new()
            .with("locationType", "house")
            .with("project", "p1");
        let found = store
            .search_filtered_addresses_offline(&params)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_filter_rejects_unknown_field() {
        let store = SqliteAddressStore::open_in_memory().unwrap();
        let params = SearchParams::new().with("longitude; DROP TABLE addresses", "1");

        let err = store
            .search_filtered_addresses_offline(&params)
            .await
            .unwrap_err();
        assert!(matches!(err, AddressError::Validation { .. }));
    }
}
