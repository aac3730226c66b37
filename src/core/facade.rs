use crate::adapters::{ApiClient, SqliteAddressStore};
use crate::config::AccessConfig;
use crate::core::backend::{AddressBackend, Connectivity};
use crate::core::local::LocalBackend;
use crate::core::remote::RemoteBackend;
use crate::core::session::Session;
use crate::domain::model::{Address, NewAddress, Registration, SearchParams};
use crate::utils::error::{AddressError, Result};
use serde_json::Value;
use std::sync::Arc;

/// 不分線上、離線的地址存取入口
///
/// 持有一個遠端與一個本地後端，所有呼叫都經由 [`AddressAccess::backend_for`] 選擇。
/// 失敗會在這裡記錄一次並回傳；要降級成 `None` 請用 `Sentinel::or_none`。
#[derive(Clone)]
pub struct AddressAccess {
    remote: Arc<dyn AddressBackend>,
    local: Arc<dyn AddressBackend>,
}

impl AddressAccess {
    pub fn new<R, L>(remote: R, local: L) -> Self
    where
        R: AddressBackend + 'static,
        L: AddressBackend + 'static,
    {
        Self {
            remote: Arc::new(remote),
            local: Arc::new(local),
        }
    }

    /// 依設定建立 HTTP client 與離線資料庫
    pub fn from_config(config: &AccessConfig) -> Result<Self> {
        let client = ApiClient::new(&config.api.base_url)?;
        let store = SqliteAddressStore::open(&config.offline.database_path)?;

        Ok(Self::new(RemoteBackend::new(client), LocalBackend::new(store)))
    }

    pub fn backend_for(&self, connectivity: Connectivity) -> &dyn AddressBackend {
        match connectivity {
            Connectivity::Online => self.remote.as_ref(),
            Connectivity::Offline => self.local.as_ref(),
        }
    }

    pub async fn get_addresses(
        &self,
        session: &Session,
        connectivity: Connectivity,
    ) -> Result<Vec<Address>> {
        let backend = self.backend_for(connectivity);
        logged("get_addresses", backend, backend.list(session).await)
    }

    pub async fn search_addresses(
        &self,
        session: &Session,
        search: &str,
        connectivity: Connectivity,
    ) -> Result<Vec<Address>> {
        let backend = self.backend_for(connectivity);
        logged(
            "search_addresses",
            backend,
            backend.search(session, search).await,
        )
    }

    pub async fn filter_addresses(
        &self,
        session: &Session,
        params: &SearchParams,
        connectivity: Connectivity,
    ) -> Result<Vec<Address>> {
        let backend = self.backend_for(connectivity);
        logged(
            "filter_addresses",
            backend,
            backend.filter(session, params).await,
        )
    }

    pub async fn register_address(
        &self,
        session: &Session,
        address: &NewAddress,
        connectivity: Connectivity,
    ) -> Result<Registration> {
        let backend = self.backend_for(connectivity);
        logged(
            "register_address",
            backend,
            backend.create(session, address).await,
        )
    }

    pub async fn get_one_address(
        &self,
        session: &Session,
        id: &str,
        connectivity: Connectivity,
    ) -> Result<Address> {
        let backend = self.backend_for(connectivity);
        logged("get_one_address", backend, backend.get_one(session, id).await)
    }

    pub async fn delete_one_address(
        &self,
        session: &Session,
        id: &str,
        connectivity: Connectivity,
    ) -> Result<Value> {
        let backend = self.backend_for(connectivity);
        logged(
            "delete_one_address",
            backend,
            backend.delete_one(session, id).await,
        )
    }
}

fn logged<T>(operation: &str, backend: &dyn AddressBackend, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => tracing::debug!(operation, backend = %backend.kind(), "address operation succeeded"),
        Err(AddressError::MissingId) => {}
        Err(e) => tracing::warn!(
            operation,
            backend = %backend.kind(),
            category = ?e.category(),
            "address operation failed: {}",
            e
        ),
    }
    result
}
