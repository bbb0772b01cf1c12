//! # ensemble-renderer
//!
//! Tera-based template engine that renders the complete workflow repository
//! tree from a validated brief.
//!
//! Rendering is deterministic: the same brief and policy catalog always
//! produce a byte-identical [`RenderedTree`], with files ordered by the
//! emission plan and lists enumerated in brief declaration order.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ensemble_core::{parse_brief, schema, ParseStrategy, PolicyCatalog};
//! use ensemble_renderer::Renderer;
//!
//! fn render(text: &str) {
//!     let catalog = PolicyCatalog::builtin();
//!     let raw = parse_brief(text, ParseStrategy::Yaml).unwrap();
//!     let brief = schema::validate(raw, &catalog).unwrap();
//!     let renderer = Renderer::new().unwrap();
//!     let tree = renderer.render(&brief, &catalog).unwrap();
//!     for file in tree.files() {
//!         println!("{}: {} bytes", file.path.display(), file.contents.len());
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod plan;
pub mod tree;

pub use context::TemplateContext;
pub use engine::Renderer;
pub use error::RenderError;
pub use plan::{EmissionPlan, Payload, PlannedFile};
pub use tree::{RenderedTree, TreeFile};
