//! Network transport for SeqDB
//!
//! A TCP server speaking newline-delimited JSON, plus a matching client.
//! The transport owns no store state: it decodes a request, hands the
//! command to the [`Executor`](seqdb_executor::Executor), and encodes the
//! result.
//!
//! - [`config`]: TOML-backed server settings
//! - [`wire`]: request/response types and line framing
//! - [`server`]: listener and per-connection loop
//! - [`client`]: async client for one connection

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod wire;

pub use client::{Client, ClientError};
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use server::{build_runtime, Server};
pub use wire::{ErrorCode, Request, Response};
