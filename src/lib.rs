// Lygos API Client Library
//
// This crate provides HTTP client functionality for communicating
// with the Lygos payment gateway API: creating, reading, updating
// and deleting payment gateways, and querying payin status.

mod client;
mod errors;
mod models;

pub use client::{ClientBuilder, LygosClient, DEFAULT_API_URL};
pub use errors::LygosError;
pub use models::{
    generate_order_id, CreateGateway, Gateway, GatewayField, GatewayUpdate, PayinStatus,
};
