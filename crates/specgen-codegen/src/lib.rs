//! Code generation of HTTP services and clients.
//!
//! Transforms a validated [`Spec`](specgen_core::Spec) into Rust source:
//! serde models, an axum service trait with routers and handlers, a blocking
//! reqwest client, and the shared helpers both sides rely on. Generation is
//! pure; the resulting [`GeneratedCode`] is handed to a [`Sink`].
//!
//! # Examples
//!
//! ```
//! use specgen_codegen::{CodeGenerator, MemorySink, Sink};
//! use specgen_core::{GeneratorConfig, Spec};
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
//!         "models": [{ "name": "Order", "kind": { "object": { "fields": [] } } }]
//!     }]
//! }))
//! .unwrap();
//!
//! let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();
//! let code = generator.generate_service(&spec).unwrap();
//!
//! let mut sink = MemorySink::new();
//! sink.accept(&code).unwrap();
//! assert!(sink.get("src/spec/v1/orders/routing.rs").is_some());
//! assert!(sink.get("src/services/v1/orders.rs").is_some());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod common;
pub mod dispatch;
pub mod emit;
pub mod generator;
pub mod marshal;
pub mod naming;
pub mod resolver;
pub mod signature;
pub mod sink;
pub mod syntax;
pub mod template_engine;
pub mod usage;
pub mod validate;
pub mod walker;

pub use common::{FileKind, GeneratedCode, GeneratedFile};
pub use generator::CodeGenerator;
pub use naming::{NamingPolicy, RustNaming};
pub use sink::{MemorySink, Sink};
