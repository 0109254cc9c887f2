//! Webcash Wallet Context
//!
//! The wallet core leaves the database engine, the log-file format, the
//! HTTPS client, and the UI toolkit to the host application. This crate
//! defines the traits a host implements for each of those and the façades
//! the core wraps them in:
//!
//! - [`StorageBackend`] / [`Storage`]: recovery log and wallet database
//!   lifecycle, plus terms-of-service bookkeeping
//! - [`ServerConnector`] / [`Server`]: the connection to a webcash server
//! - [`UserInterface`] / [`Ui`]: startup, shutdown, and user prompts
//! - [`Wallet`]: owns one of each and runs the terms-of-service protocol
//!
//! Everything here is single-threaded cooperative: the library spawns no
//! threads, and host callbacks may block for as long as they need.

pub mod epoch;
pub mod server;
pub mod storage;
pub mod ui;
pub mod wallet;

pub use epoch::WC_EPOCH;
pub use server::{Server, ServerConnector};
pub use storage::{Storage, StorageBackend, TermsAcceptance, TermsRecord};
pub use ui::{Ui, UserInterface};
pub use wallet::{TermsStatus, Wallet};
pub use wbc_core::{Error, Result};
