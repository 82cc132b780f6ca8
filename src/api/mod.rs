//! Client for the cloud API
//!
//! [`CloudClient`] holds the HTTP plumbing; the resource modules add one
//! method per remote operation together with the request and response
//! models of that resource. Response models keep unknown fields in `extra`
//! so printing a response never drops what the server sent.

mod client;

pub mod cluster;
pub mod database;
pub mod gateway;
pub mod project;
pub mod s3;

pub use client::CloudClient;
