//! HTTP plumbing shared by the API client

mod client;

pub use client::{HttpClient, HttpClientBuilder};
