//! # ensemble-core
//!
//! Brief documents, the dual-strategy parser, the typed brief model, the
//! policy catalog, and schema validation.
//!
//! The pipeline runs front to back through this crate:
//! [`parse::parse_brief`] lowers a document into a [`brief::RawBrief`], and
//! [`schema::validate`] either produces a [`brief::Brief`] or reports the
//! first blocking problem. Everything downstream of validation takes the
//! validated type, so an unvalidated brief cannot reach a renderer by
//! construction.

pub mod brief;
pub mod catalog;
pub mod error;
mod minimal;
pub mod parse;
pub mod schema;
pub mod value;

pub use brief::{
    Brief, PolicyName, PolicyRef, RawBrief, RawReference, RawRole, RawSystem, RawWorkflow,
    Reference, Role, RoleName, System, TemplateBindings, Workflow,
};
pub use catalog::{PolicyCatalog, PolicyEntry};
pub use error::{ParseError, SchemaError};
pub use parse::{parse_brief, ParseStrategy};
pub use value::{Scalar, Value};
