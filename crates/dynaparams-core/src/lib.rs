//! Request building and pagination over a document database client.
//!
//! The pieces compose bottom-up:
//!
//! - [`merge`] folds request fragments into one request.
//! - [`expression`] and [`list_ops`] build the expression fragments.
//! - [`paginate`] drives a paged listing to completion.
//! - [`collection`] ties them to a [`DocumentClient`] as table-level verbs.
//!
//! With the `aws-sdk` feature, [`sdk::SdkDocumentClient`] adapts the AWS SDK
//! DynamoDB client to [`DocumentClient`].
#![allow(clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod expression;
pub mod id;
pub mod list_ops;
pub mod merge;
pub mod paginate;
pub mod schema;
#[cfg(feature = "aws-sdk")]
pub mod sdk;

pub use client::{DocumentClient, ListOperation};
pub use collection::Collection;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use merge::merge_params;
pub use paginate::drive_pagination;
