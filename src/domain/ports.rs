use crate::domain::model::{AddressRecord, NewAddress, SearchParams};
use crate::utils::error::Result;
use reqwest::header::HeaderValue;
use serde_json::Value;
use std::future::Future;

/// 本地離線資料庫
pub trait OfflineStore: Send + Sync {
    fn get_addresses_offline(&self) -> impl Future<Output = Result<Vec<AddressRecord>>> + Send;

    fn search_addresses_offline(
        &self,
        search: &str,
    ) -> impl Future<Output = Result<Vec<AddressRecord>>> + Send;

    fn search_filtered_addresses_offline(
        &self,
        params: &SearchParams,
    ) -> impl Future<Output = Result<Vec<AddressRecord>>> + Send;

    fn register_address_offline(
        &self,
        address: &NewAddress,
    ) -> impl Future<Output = Result<AddressRecord>> + Send;
}

/// 憑證的鍵值儲存
pub trait CredentialStore: Send + Sync {
    fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    fn set_item(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    fn remove_item(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// 綁定 API 基底網址的 HTTP 傳輸，路徑皆相對於基底網址
pub trait ApiTransport: Send + Sync {
    fn get(
        &self,
        path: &str,
        authorization: &HeaderValue,
    ) -> impl Future<Output = Result<Value>> + Send;

    fn post(
        &self,
        path: &str,
        body: &Value,
        authorization: &HeaderValue,
    ) -> impl Future<Output = Result<Value>> + Send;

    fn delete(
        &self,
        path: &str,
        authorization: &HeaderValue,
    ) -> impl Future<Output = Result<Value>> + Send;
}
