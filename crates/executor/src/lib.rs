//! Command execution layer for SeqDB
//!
//! Every request the transport receives becomes a [`Command`]. The
//! [`Executor`] dispatches it to a handler that calls the record store and
//! wraps the result in an [`Output`]. Store errors are converted to the
//! executor's [`Error`] on the way out.
//!
//! [`SeqDb`] is a typed facade over the executor for in-process callers.

pub mod api;
pub mod command;
pub mod convert;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod output;

pub use api::SeqDb;
pub use command::Command;
pub use error::{Error, Result};
pub use executor::Executor;
pub use output::{Output, StoreInfo};
pub use seqdb_core::Record;
