//! Infrastructure adapters for the settler reconciliation flow
//!
//! Implements the core ports against the real world: the retailer's invoice
//! API (token-aware HTTP client), the local SQLite orders database, the xlsx
//! specification sheet extractor and the filesystem sheet archive. Also owns
//! configuration loading.

pub mod api;
pub mod archive;
pub mod config;
pub mod database;
pub mod http;
pub mod sheet;

pub use api::{ApiError, RetailerClient, RetailerGateway, TokenProvider};
pub use archive::FileSheetArchive;
pub use database::{DbManager, SqliteOrdersRepository};
pub use http::HttpClient;
pub use sheet::SpecSheetExtractor;
