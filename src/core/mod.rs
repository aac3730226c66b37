pub mod backend;
pub mod facade;
pub mod format;
pub mod local;
pub mod remote;
pub mod session;

pub use crate::domain::model::{
    Address, AddressRecord, GeoPoint, NewAddress, Registration, SearchParams,
};
pub use crate::domain::ports::{ApiTransport, CredentialStore, OfflineStore};
pub use crate::utils::error::Result;
