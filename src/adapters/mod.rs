// Adapters 層：domain ports 的具體實作（http、離線資料庫、憑證）

pub mod credentials;
pub mod http;
pub mod sqlite;

pub use credentials::{FileCredentialStore, MemoryCredentialStore};
pub use http::ApiClient;
pub use sqlite::SqliteAddressStore;
