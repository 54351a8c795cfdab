//! # fmxml Core
//!
//! Protocol layer for a record-oriented database gateway that speaks flat
//! key/flag command sets over HTTP.
//!
//! This crate provides:
//! - `Value` and `Record` for field payloads
//! - `ClientConfig` for the immutable base configuration
//! - `Directive` and `with_flag` for composing gateway commands
//! - `RequestDescriptor` for the fully merged per-call request
//! - `RawResponse`, `ResultSet` and `normalize` for response interpretation
//! - `GatewayError` and `ClientError`
//!
//! This is a pure protocol crate with no I/O operations.
//!
//! ## Example
//!
//! ```rust
//! use fmxml_core::{with_flag, ClientConfig, Directive, Record, RequestDescriptor};
//!
//! let config = ClientConfig::new("https://gateway.example.com/fmi/xml")
//!     .with_auth("admin", "secret")
//!     .with_database("Contacts")
//!     .with_layout("people");
//!
//! let query = Record::from_iter([("name", "Ada")]);
//! let command = with_flag(None, Directive::Find);
//! let request = RequestDescriptor::build(&config, &query, command, None);
//!
//! assert_eq!(request.directive(), Some(Directive::Find));
//! assert_eq!(request.command.len(), 4);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod error;
mod gateway;
mod request;
mod response;
mod value;

pub use command::{with_flag, CommandMap, Directive};
pub use config::{ClientConfig, Credentials};
pub use error::{ClientError, ClientResult};
pub use gateway::{GatewayError, NO_RECORDS_CODE, SUCCESS_CODE};
pub use request::{RequestDescriptor, RequestOverride};
pub use response::{normalize, Count, ErrorEnvelope, Meta, RawResponse, ResultSet};
pub use value::{Record, Value, RECID_FIELD, UPDATE_RECID_FIELD};
