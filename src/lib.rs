pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ApiClient, FileCredentialStore, MemoryCredentialStore, SqliteAddressStore};
pub use config::AccessConfig;
pub use core::{
    backend::{AddressBackend, BackendKind, Connectivity},
    facade::AddressAccess,
    format::format_result,
    local::LocalBackend,
    remote::RemoteBackend,
    session::Session,
};
pub use domain::model::{
    Address, AddressRecord, GeoPoint, NewAddress, Registration, SearchParams,
};
pub use utils::error::{AddressError, Result, Sentinel};
