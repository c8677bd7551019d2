//! Wire-level types for dynaparams.
//!
//! This crate holds the values that travel between the parameter-building
//! layer and a document database client: document values, tagged request
//! parameters, request fragments, response envelopes, and the client error
//! type. It has no async or client code of its own.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod attribute_value;
pub mod error;
pub mod fragment;
pub mod output;
pub mod param;
pub mod types;

pub use attribute_value::{AttributeValue, Item};
pub use error::{ClientError, ClientErrorCode};
pub use fragment::RequestFragment;
pub use output::{GetOutput, PageOutput};
pub use param::{ParamShape, ParamValue};
