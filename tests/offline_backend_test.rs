use address_access::core::backend::AddressBackend;
use address_access::domain::ports::OfflineStore;
use address_access::{
    AddressError, AddressRecord, LocalBackend, NewAddress, Registration, SearchParams, Sentinel,
    Session, SqliteAddressStore,
};
use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tokio_test::assert_err;

fn new_address(name: Option<&str>, location_type: &str, longitude: f64, latitude: f64) -> NewAddress {
    NewAddress {
        name: name.map(String::from),
        location_type: location_type.to_string(),
        longitude,
        latitude,
        created_by: "u1".to_string(),
        created_by_name: "Ana".to_string(),
        project: "p1".to_string(),
        observations: Some(String::new()),
        plus_code: "588MC9X8+".to_string(),
        created_at: None,
    }
}

/// 每個操作都失敗的離線儲存
struct FailingStore;

impl OfflineStore for FailingStore {
    async fn get_addresses_offline(&self) -> address_access::Result<Vec<AddressRecord>> {
        Err(AddressError::LockPoisoned)
    }

    async fn search_addresses_offline(
        &self,
        _search: &str,
    ) -> address_access::Result<Vec<AddressRecord>> {
        Err(AddressError::LockPoisoned)
    }

    async fn search_filtered_addresses_offline(
        &self,
        _params: &SearchParams,
    ) -> address_access::Result<Vec<AddressRecord>> {
        Err(AddressError::LockPoisoned)
    }

    async fn register_address_offline(
        &self,
        _address: &NewAddress,
    ) -> address_access::Result<AddressRecord> {
        Err(AddressError::LockPoisoned)
    }
}

/// 寫入後回傳一筆毫不相干的紀錄
struct OddStore {
    inserts: AtomicUsize,
}

impl OfflineStore for OddStore {
    async fn get_addresses_offline(&self) -> address_access::Result<Vec<AddressRecord>> {
        Ok(Vec::new())
    }

    async fn search_addresses_offline(
        &self,
        _search: &str,
    ) -> address_access::Result<Vec<AddressRecord>> {
        Ok(Vec::new())
    }

    async fn search_filtered_addresses_offline(
        &self,
        _params: &SearchParams,
    ) -> address_access::Result<Vec<AddressRecord>> {
        Ok(Vec::new())
    }

    async fn register_address_offline(
        &self,
        _address: &NewAddress,
    ) -> address_access::Result<AddressRecord> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(AddressRecord {
            id: String::new(),
            name: None,
            location_type: String::new(),
            longitude: 0.0,
            latitude: 0.0,
            created_by: String::new(),
            created_by_name: String::new(),
            project: String::new(),
            observations: None,
            plus_code: String::new(),
            created_at: String::new(),
        })
    }
}

#[tokio::test]
async fn test_register_then_list_formats_records() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = SqliteAddressStore::open(temp_dir.path().join("db/addresses.db"))?;
    let backend = LocalBackend::new(store);
    let session = Session::anonymous();

    let registration = backend
        .create(&session, &new_address(Some("Casa"), "house", -46.63, -23.55))
        .await?;
    assert_eq!(registration, Registration::Accepted);
    assert_eq!(serde_json::to_value(&registration)?, serde_json::json!({}));

    backend
        .create(&session, &new_address(None, "poi", 10.0, 20.0))
        .await?;

    let addresses = backend.list(&session).await?;
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses[0].location().unwrap().coordinates, [-46.63, -23.55]);
    assert_eq!(addresses[1].location().unwrap().coordinates, [10.0, 20.0]);
    assert_eq!(addresses[0].name(), Some("Casa"));
    assert!(addresses[1].get("name").is_none());
    // 空字串的備註不輸出
    assert!(addresses[0].get("observations").is_none());
    assert_eq!(addresses[0].created_by_id(), Some("u1"));
    assert_eq!(addresses[0].created_by_name(), Some("Ana"));
    Ok(())
}

#[tokio::test]
async fn test_search_and_filter_are_formatted() -> Result<()> {
    let backend = LocalBackend::new(SqliteAddressStore::open_in_memory()?);
    let session = Session::anonymous();

    backend
        .create(&session, &new_address(Some("Escola Municipal"), "school", 1.0, 2.0))
        .await?;
    backend
        .create(&session, &new_address(Some("Casa"), "house", 3.0, 4.0))
        .await?;

    let found = backend.search(&session, "municipal").await?;
    assert_eq!(found.len(), 1);
    let location = found[0].location().unwrap();
    assert_eq!(location.coordinates, [1.0, 2.0]);
    assert_eq!(location.kind, "Point");

    let filtered = backend
        .filter(&session, &SearchParams::new().with("locationType", "house"))
        .await?;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name(), Some("Casa"));
    Ok(())
}

#[tokio::test]
async fn test_store_is_reopened_from_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("addresses.db");

    {
        let backend = LocalBackend::new(SqliteAddressStore::open(&path)?);
        backend
            .create(&Session::anonymous(), &new_address(Some("Casa"), "house", 1.0, 2.0))
            .await?;
    }

    let backend = LocalBackend::new(SqliteAddressStore::open(&path)?);
    assert_eq!(backend.list(&Session::anonymous()).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_failing_store_yields_errors() {
    let backend = LocalBackend::new(FailingStore);
    let session = Session::anonymous();

    assert!(backend.list(&session).await.or_log("list").is_none());
    assert!(backend.search(&session, "x").await.or_log("search").is_none());
    assert!(backend
        .filter(&session, &SearchParams::new())
        .await
        .or_log("filter")
        .is_none());

    // 儲存層本身出錯時直接往上傳
    let err = assert_err!(
        backend
            .create(&session, &new_address(None, "poi", 1.0, 2.0))
            .await
    );
    assert!(matches!(err, AddressError::LockPoisoned));
}

#[tokio::test]
async fn test_register_ignores_store_result() -> Result<()> {
    let backend = LocalBackend::new(OddStore {
        inserts: AtomicUsize::new(0),
    });

    let registration = backend
        .create(
            &Session::anonymous(),
            &new_address(Some("X"), "poi", 1.0, 2.0),
        )
        .await?;

    assert_eq!(registration, Registration::Accepted);
    assert_eq!(backend.store().inserts.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_single_item_operations_unsupported_offline() -> Result<()> {
    let backend = LocalBackend::new(SqliteAddressStore::open_in_memory()?);
    let session = Session::anonymous();

    assert!(matches!(
        backend.get_one(&session, "a1").await,
        Err(AddressError::Unsupported {
            operation: "get_one",
            backend: "local"
        })
    ));
    assert!(matches!(
        backend.delete_one(&session, "a1").await,
        Err(AddressError::Unsupported {
            operation: "delete_one",
            ..
        })
    ));
    Ok(())
}
