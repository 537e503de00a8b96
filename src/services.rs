//! Typed resource operations layered on [`Client`](crate::client::Client).
//!
//! Each submodule adds an `impl Client` block plus the request/response records for one
//! resource. Operations differ only in verb, path, and payload; authentication, retries, and
//! error mapping all come from the dispatcher.

pub mod analytics;
pub mod cmek;
pub mod instances;
pub mod snapshots;
pub mod tenants;

pub use analytics::*;
pub use cmek::*;
pub use instances::*;
pub use snapshots::*;
pub use tenants::*;
