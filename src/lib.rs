//! This crate turns AWS SDK request and response values into span attribute
//! strings for instrumentation of the AWS SDK.
//!
//! # Components
//!
//! Two independent entry points, invoked synchronously by an interception
//! layer, one per span attribute:
//!
//! - [`serialize`] renders an arbitrary captured SDK value — a structured
//!   object, a collection, a map, a byte buffer, or a primitive — as a
//!   single attribute string. It never fails; anything without a useful
//!   rendering becomes an absent attribute.
//! - [`extract`] pulls a named GenAI attribute (token counts, finish
//!   reason, sampling parameters) out of a Bedrock JSON body. Providers
//!   disagree on where each field lives, so the extractor probes the known
//!   JSON paths for the field in priority order. A body that is not JSON is
//!   an error on this path, by design.
//!
//! [`attributes`] holds the attribute names themselves plus
//! [`attributes::is_gen_ai_attribute`], which the interception layer uses to
//! decide which entry point applies.
//!
//! ### Quick start
//! ```
//! use opentelemetry_aws_sdk::{attributes, extract, serialize, RawValue};
//!
//! # fn main() -> Result<(), opentelemetry_aws_sdk::ExtractError> {
//! let body = br#"{"stop_reason":"end_turn","usage":{"output_tokens":7}}"#;
//!
//! let attribute = attributes::GEN_AI_RESPONSE_FINISH_REASON;
//! let value = if attributes::is_gen_ai_attribute(attribute) {
//!     extract(attribute, &RawValue::Bytes(body))?
//! } else {
//!     serialize(&RawValue::Bytes(body))
//! };
//! assert_eq!(value.as_deref(), Some("end_turn"));
//! # Ok(())
//! # }
//! ```
#![deny(missing_docs, unreachable_pub, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod attributes;
mod extractor;
mod serializer;

pub use extractor::{extract, ExtractError};
pub use serializer::{serialize, Marshallable, RawValue};
