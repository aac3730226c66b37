use crate::core::backend::{AddressBackend, BackendKind};
use crate::core::format::format_result;
use crate::core::session::Session;
use crate::domain::model::{Address, NewAddress, Registration, SearchParams};
use crate::domain::ports::OfflineStore;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 使用裝置上離線資料庫的後端
///
/// 結果經 [`format_result`] 整理；離線時不支援單筆查詢與刪除。
pub struct LocalBackend<S: OfflineStore> {
    store: S,
}

impl<S: OfflineStore> LocalBackend<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: OfflineStore> AddressBackend for LocalBackend<S> {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    async fn list(&self, _session: &Session) -> Result<Vec<Address>> {
        let records = self.store.get_addresses_offline().await?;
        Ok(format_result(records))
    }

    async fn search(&self, _session: &Session, search: &str) -> Result<Vec<Address>> {
        let records = self.store.search_addresses_offline(search).await?;
        Ok(format_result(records))
    }

    async fn filter(&self, _session: &Session, params: &SearchParams) -> Result<Vec<Address>> {
        let records = self.store.search_filtered_addresses_offline(params).await?;
        Ok(format_result(records))
    }

    async fn create(&self, _session: &Session, address: &NewAddress) -> Result<Registration> {
        // 只回報已交給本地儲存，不檢查寫入結果
        let _stored = self.store.register_address_offline(address).await?;
        Ok(Registration::Accepted)
    }
}
