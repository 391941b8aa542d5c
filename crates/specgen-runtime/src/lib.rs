//! Shared helpers of specgen-generated code.
//!
//! Each module of this crate is also emitted verbatim into generated trees,
//! so modules only reach each other through `super::` paths and depend on
//! nothing but the crates a generated service or client already uses.
//!
//! # Examples
//!
//! ```
//! use specgen_runtime::convert::validation_errors;
//! use specgen_runtime::params::ParamsParser;
//!
//! let mut query = ParamsParser::query(vec![("page".to_string(), "two".to_string())]);
//! let page = query.with_default::<i32>("page", "1");
//! assert!(page.is_none());
//!
//! let errors = validation_errors(query.into_errors());
//! assert_eq!(errors[0].path, "page");
//! assert_eq!(errors[0].code, "parsing_failed");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod content_type;
pub mod convert;
pub mod empty;
pub mod errmodels;
pub mod form;
pub mod json;
pub mod params;
pub mod respond;
pub mod response;
