//! # fmxml Client
//!
//! Async CRUD client for a record-oriented database gateway.
//!
//! This crate provides:
//! - `Client` with `find`, `find_all`, `save`, `save_existing`, `upsert`,
//!   `update`, `delete` and `delete_by_rec_id`
//! - `Transport` abstraction over the request/response primitive
//! - `HttpTransport` sending requests as gateway query strings
//! - `MockTransport` for tests
//!
//! ## Architecture
//!
//! Every operation compiles the caller's intent into a flat command map
//! (directive flag, default parameters, payload fields), hands it to the
//! transport and normalizes the response envelope. Workflows that need an
//! existing row run a find first and only then the mutation:
//! 1. `upsert`: find, then edit the match or create a new row
//! 2. `update`: find, fail if nothing matched, then save
//! 3. `delete`: find (unless the query already names a row), then delete
//!
//! ## Key Invariants
//!
//! - The base configuration is never mutated
//! - A mutation never starts before its find has resolved
//! - A failed find short-circuits the workflow
//! - "No records match" is empty for reads and an error for mutations

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod http;
mod transport;

pub use client::Client;
pub use config::HttpConfig;
pub use http::{request_url, HttpClient, HttpTransport, ReqwestClient};
pub use transport::{MockTransport, Transport};

pub use fmxml_core::{
    normalize, with_flag, ClientConfig, ClientError, ClientResult, CommandMap, Count, Credentials,
    Directive, ErrorEnvelope, GatewayError, Meta, RawResponse, Record, RequestDescriptor,
    RequestOverride, ResultSet, Value, NO_RECORDS_CODE, RECID_FIELD, SUCCESS_CODE,
    UPDATE_RECID_FIELD,
};
