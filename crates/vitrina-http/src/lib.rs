//! HTTP adapter for vitrina widgets
//!
//! The widgets only ever need one thing from the network: GET a fully
//! resolved URL and decode the JSON body. That boundary is the [`FetchJson`]
//! trait; [`ReqwestFetcher`] is the production implementation.
//!
//! ## Example
//!
//! ```ignore
//! use vitrina_conf::BackendSettings;
//! use vitrina_http::{FetchJson, ReqwestFetcher, decode_records, resolve_endpoint};
//!
//! let settings = BackendSettings::default();
//! let fetcher = ReqwestFetcher::new(&settings)?;
//! let url = resolve_endpoint(&settings.base_url()?, "api/rest/products")?;
//! let records = decode_records(fetcher.get_json(&url).await?)?;
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod decode;
pub mod endpoint;
pub mod error;
#[cfg(feature = "testing")]
pub mod testing;

pub use client::{FetchJson, ReqwestFetcher};
pub use decode::{Series, decode_records, decode_series};
pub use error::{FetchError, FetchResult};
pub use endpoint::{resolve_endpoint, set_query_params};
