//! Live synchronization and error-containment pipeline for Livemark.
//!
//! Connects three independently-owned actors into a crash-proof loop:
//!
//! ```text
//! EditorSurface ──change──► PipelineController ──text──► Invoker ──► Engine
//!                                   │
//!                                   └──RenderState──► RenderSink (preview)
//! ```
//!
//! - [`EditorSurface`]: the editable text source ([`PlainTextSurface`] or
//!   [`CodeSurface`]), created once per mount through an [`EditorFactory`]
//!   and guarded by an [`EditorSlot`]
//! - [`Invoker`]: runs a fresh engine per call and converts every failure
//!   into a [`TransformationError`]
//! - [`RenderSink`]: paints the current [`RenderState`] as a [`PreviewFrame`]
//! - [`PipelineController`]: owns the [`Document`], the render state and the
//!   editor lifecycle
//!
//! # Trust boundary
//!
//! Engine output is injected into the preview as raw markup. With
//! [`TrustPolicy::Sanitize`] it is cleaned with `ammonia` first; the default
//! [`TrustPolicy::Trusted`] assumes the engine is trusted.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lm_engine::MarkupEngineFactory;
//! use lm_pipeline::{
//!     EditorInput, EditorOptions, Invoker, MountPoint, PipelineController, PreviewBuffer,
//!     PreviewOptions, RenderState, SurfaceFactory,
//! };
//!
//! let mut controller = PipelineController::new(
//!     Arc::new(SurfaceFactory),
//!     EditorOptions::default(),
//!     Invoker::new(Arc::new(MarkupEngineFactory::default())),
//!     PreviewBuffer::new(PreviewOptions::default()),
//! );
//! controller.mount(&MountPoint::new("preview")).unwrap();
//! controller.dispatch(&EditorInput::Replace("- Item 1".to_owned()));
//!
//! assert_eq!(
//!     controller.state(),
//!     &RenderState::Rendered("<ul><li>Item 1</li></ul>".into())
//! );
//! controller.unmount();
//! ```

mod controller;
mod document;
pub mod editor;
mod help;
mod invoker;
mod sequence;
mod sink;
mod state;

pub use controller::{Completion, Job, PipelineController};
pub use document::Document;
pub use editor::{
    ChangeReceiver, CodeSurface, EditorError, EditorFactory, EditorInput, EditorOptions,
    EditorSlot, EditorSurface, MountPoint, PlainTextSurface, SurfaceFactory, SurfaceKind,
};
pub use help::{HelpContent, HelpOverlay, Metacharacter};
pub use invoker::{Invoker, TransformationError, TransformationResult};
pub use sequence::{Sequencer, Ticket};
pub use sink::{
    DEFAULT_PLACEHOLDER, PreviewBuffer, PreviewFrame, PreviewOptions, RenderSink, TrustPolicy,
    sanitize,
};
pub use state::{Markup, RenderState, SanitizedMarkup};
