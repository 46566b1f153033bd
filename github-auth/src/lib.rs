#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(any(), deny(clippy::unwrap_used))]

pub mod errors;
mod global;
mod key;
mod keys_client;
mod transport;

// --- PUBLIC API EXPORTS ---
pub use key::Key;
pub use keys_client::{DEFAULT_API_URL, DEFAULT_USER_AGENT, KeysClient, KeysClientBuilder};

// Transport
pub use transport::{HttpTransport, ReqwestTransport, ReqwestTransportBuilder, TransportResponse};

// Error and global transport
pub use errors::{BuildError, Error, Result, TransportError};
pub use global::{drop_global_transport, global_transport, set_global_transport};
