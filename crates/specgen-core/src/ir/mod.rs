//! Typed intermediate representation.
//!
//! The IR is built once by a loader and is read-only for the rest of the
//! pipeline. Every node derives serde traits so the tree can be handed over
//! as JSON.

mod model;
mod name;
mod operation;
mod spec;
mod types;

pub use model::{EnumValue, Field, Model, ModelKind};
pub use name::{Location, Name, StatusTag};
pub use operation::{
    BodyKind, Endpoint, HttpMethod, Operation, OperationResponse, Param, ParamLocation,
    RequestBody, ResponseBody,
};
pub use spec::{
    Api, ErrorResponse, HttpErrors, STANDARD_ERROR_MODELS, STANDARD_ERRORS, Spec, Version,
};
pub use types::{ParseTypeError, Primitive, TypeExpr};
