use crate::core::session::Session;
use crate::domain::model::{Address, NewAddress, Registration, SearchParams};
use crate::utils::error::{AddressError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Remote,
    Local,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Remote => "remote",
            BackendKind::Local => "local",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 操作要走哪個後端，對應原本的離線旗標
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    pub fn from_offline_flag(is_offline: bool) -> Self {
        if is_offline {
            Connectivity::Offline
        } else {
            Connectivity::Online
        }
    }
}

/// 地址操作集合，每個後端各實作一次
///
/// 單筆查詢與刪除預設回傳 `Unsupported`。
#[async_trait]
pub trait AddressBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    async fn list(&self, session: &Session) -> Result<Vec<Address>>;

    async fn search(&self, session: &Session, search: &str) -> Result<Vec<Address>>;

    async fn filter(&self, session: &Session, params: &SearchParams) -> Result<Vec<Address>>;

    async fn create(&self, session: &Session, address: &NewAddress) -> Result<Registration>;

    async fn get_one(&self, _session: &Session, _id: &str) -> Result<Address> {
        Err(AddressError::Unsupported {
            operation: "get_one",
            backend: self.kind().as_str(),
        })
    }

    async fn delete_one(&self, _session: &Session, _id: &str) -> Result<Value> {
        Err(AddressError::Unsupported {
            operation: "delete_one",
            backend: self.kind().as_str(),
        })
    }
}
