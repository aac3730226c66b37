use crate::core::backend::{AddressBackend, BackendKind};
use crate::core::session::Session;
use crate::domain::model::{Address, NewAddress, Registration, SearchParams};
use crate::domain::ports::ApiTransport;
use crate::utils::error::{AddressError, Result};
use async_trait::async_trait;
use serde_json::Value;
use url::form_urlencoded;

const ADDRESSES_PATH: &str = "/addresses";

/// 透過 HTTP API 存取地址，回應原樣保留
pub struct RemoteBackend<T: ApiTransport> {
    transport: T,
}

impl<T: ApiTransport> RemoteBackend<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

// 單一路徑片段的百分比編碼
fn encode_segment(segment: &str) -> String {
    // byte_serialize 把空白轉成 '+'，路徑中要用 %20
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn item_path(id: &str) -> Result<String> {
    if id.trim().is_empty() {
        return Err(AddressError::MissingId);
    }
    Ok(format!("{}/{}", ADDRESSES_PATH, encode_segment(id)))
}

pub(crate) fn search_path(search: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("searchString", search)
        .finish();
    format!("{}/search?{}", ADDRESSES_PATH, query)
}

pub(crate) fn filter_path(params: &SearchParams) -> String {
    format!(
        "{}/filtered_search?{}",
        ADDRESSES_PATH,
        params.to_query_string()
    )
}

/// 列表回應必須是陣列，元素原樣包裝
fn into_addresses(body: Value) -> Result<Vec<Address>> {
    match body {
        Value::Array(items) => Ok(items.into_iter().map(Address::from_value).collect()),
        other => Err(AddressError::UnexpectedPayload {
            expected: "a JSON array",
            body: other.to_string(),
        }),
    }
}

#[async_trait]
impl<T: ApiTransport> AddressBackend for RemoteBackend<T> {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    async fn list(&self, session: &Session) -> Result<Vec<Address>> {
        let body = self
            .transport
            .get(ADDRESSES_PATH, &session.authorization())
            .await?;
        into_addresses(body)
    }

    async fn search(&self, session: &Session, search: &str) -> Result<Vec<Address>> {
        let body = self
            .transport
            .get(&search_path(search), &session.authorization())
            .await?;
        into_addresses(body)
    }

    async fn filter(&self, session: &Session, params: &SearchParams) -> Result<Vec<Address>> {
        let body = self
            .transport
            .get(&filter_path(params), &session.authorization())
            .await?;
        into_addresses(body)
    }

    async fn create(&self, session: &Session, address: &NewAddress) -> Result<Registration> {
        let payload = serde_json::to_value(address)?;
        let body = self
            .transport
            .post(ADDRESSES_PATH, &payload, &session.authorization())
            .await?;
        Ok(Registration::Created(body))
    }

    async fn get_one(&self, session: &Session, id: &str) -> Result<Address> {
        let path = item_path(id)?;
        let body = self.transport.get(&path, &session.authorization()).await?;
        Ok(Address::from_value(body))
    }

    async fn delete_one(&self, session: &Session, id: &str) -> Result<Value> {
        let path = item_path(id)?;
        self.transport
            .delete(&path, &session.authorization())
            .await
    }
}
