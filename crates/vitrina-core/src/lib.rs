//! Vitrina core
//!
//! Building blocks shared by the vitrina widgets:
//!
//! - [`dom`]: headless element tree with `data-element` landmarks and HTML serialization
//! - [`window`]: document-level scroll event stream
//! - [`getter`]: dotted-path resolver for records
//! - [`record`]: the record type exchanged with the backend
//! - [`diagnostics`]: sink for absorbed environmental errors
//! - [`logging`]: `tracing` subscriber setup

#![warn(missing_docs)]

pub mod diagnostics;
pub mod dom;
pub mod getter;
pub mod logging;
pub mod record;
pub mod window;

pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, TracingSink, default_sink};
pub use dom::{Element, IntoNode, Landmarks, Node, NodePath};
pub use getter::{Getter, create_getter};
pub use logging::{LoggingError, init_tracing};
pub use record::{Record, display_value};
pub use window::{ListenerId, ScrollListener, ScrollMetrics, ScrollTask, Window};
