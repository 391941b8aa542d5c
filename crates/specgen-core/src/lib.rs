//! Core types for specgen.
//!
//! This crate provides the typed intermediate representation consumed by the
//! code generator, together with the generation-time error type and the
//! generator configuration.
//!
//! # Examples
//!
//! ```
//! use specgen_core::{Spec, TypeExpr};
//!
//! let spec: Spec = serde_json::from_value(serde_json::json!({
//!     "name": "shop",
//!     "versions": [{
//!         "name": "v1",
//!         "apis": [{
//!             "name": "orders",
//!             "operations": [{
//!                 "name": "get_order",
//!                 "endpoint": {
//!                     "method": "GET",
//!                     "url": "/orders/{id}",
//!                     "url_params": [{ "name": "id", "type": "int64" }]
//!                 },
//!                 "responses": [{ "status": "ok", "body": { "json": "Order" } }]
//!             }]
//!         }],
//!         "models": []
//!     }]
//! }))
//! .unwrap();
//!
//! let operation = &spec.versions[0].apis[0].operations[0];
//! assert_eq!(operation.endpoint.url_params[0].ty, TypeExpr::plain("int64"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod ir;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use ir::*;
