//! Application state.
//!
//! Shared by all handlers; every session builds its own controller from it.

use std::sync::Arc;

use lm_engine::MarkupEngineFactory;
use lm_pipeline::{
    EditorFactory, EditorOptions, Invoker, PipelineController, PreviewOptions, RenderSink,
    SurfaceFactory,
};

use crate::ServerConfig;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Creates editor surfaces for sessions.
    pub(crate) editors: Arc<dyn EditorFactory>,
    /// Transformation invoker (shares one engine factory).
    pub(crate) invoker: Invoker,
    /// Editor options for new sessions.
    pub(crate) editor: EditorOptions,
    /// Preview placeholder and trust policy.
    pub(crate) preview: PreviewOptions,
    /// Run session transforms on the blocking pool.
    pub(crate) offload: bool,
    /// Application version.
    pub(crate) version: String,
}

impl AppState {
    pub(crate) fn new(config: &ServerConfig) -> Self {
        Self {
            editors: Arc::new(SurfaceFactory),
            invoker: Invoker::new(Arc::new(MarkupEngineFactory::new(config.engine))),
            editor: config.editor.clone(),
            preview: config.preview.clone(),
            offload: config.offload,
            version: config.version.clone(),
        }
    }

    /// Build an unmounted controller painting into `sink`.
    pub(crate) fn controller<S: RenderSink>(&self, sink: S) -> PipelineController<S> {
        PipelineController::new(
            Arc::clone(&self.editors),
            self.editor.clone(),
            self.invoker.clone(),
            sink,
        )
    }
}
