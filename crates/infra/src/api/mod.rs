//! Retailer API integration: token lifecycle, wire client and gateway

mod client;
mod errors;
mod gateway;
mod token;

pub use client::RetailerClient;
pub use errors::ApiError;
pub use gateway::RetailerGateway;
pub use token::TokenProvider;
