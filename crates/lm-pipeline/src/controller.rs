//! Pipeline controller: editor lifecycle plus the render state machine.
//!
//! Every document change yields exactly one new [`RenderState`], which is
//! immediately painted by the [`RenderSink`]. Two driving modes exist:
//!
//! - synchronous: [`PipelineController::pump`] transforms each pending change
//!   on the calling thread
//! - deferred: [`PipelineController::pump_deferred`] hands out a [`Job`] that
//!   can run elsewhere; its [`Completion`] is applied only while its ticket is
//!   still the latest issued

use std::sync::Arc;

use crate::document::Document;
use crate::editor::{
    ChangeReceiver, EditorError, EditorFactory, EditorInput, EditorOptions, EditorSlot,
    EditorSurface, MountPoint,
};
use crate::invoker::{Invoker, TransformationResult};
use crate::sequence::{Sequencer, Ticket};
use crate::sink::RenderSink;
use crate::state::RenderState;

/// Transformation request detached from the controller.
#[derive(Debug)]
pub struct Job {
    ticket: Ticket,
    text: String,
    invoker: Invoker,
}

impl Job {
    /// Ticket identifying this request.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Document text to transform.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Run the transformation. Never panics outward.
    #[must_use]
    pub fn run(self) -> Completion {
        let result = self.invoker.transform(&self.text);
        Completion {
            ticket: self.ticket,
            result,
        }
    }
}

/// Finished [`Job`], ready to be applied with [`PipelineController::complete`].
#[derive(Debug)]
pub struct Completion {
    ticket: Ticket,
    result: TransformationResult,
}

impl Completion {
    /// Ticket of the originating job.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Transformation outcome.
    #[must_use]
    pub fn result(&self) -> &TransformationResult {
        &self.result
    }
}

/// Orchestrates editor, invoker and sink for one mount.
///
/// Owns the [`Document`] and the editor surface. After [`unmount`] no
/// further transitions happen; dropping the controller unmounts it.
///
/// [`unmount`]: Self::unmount
pub struct PipelineController<S: RenderSink> {
    editors: Arc<dyn EditorFactory>,
    options: EditorOptions,
    slot: EditorSlot,
    changes: Option<ChangeReceiver>,
    invoker: Invoker,
    sink: S,
    document: Document,
    state: RenderState,
    sequencer: Sequencer,
    torn_down: bool,
}

impl<S: RenderSink> PipelineController<S> {
    /// Create an unmounted controller with an empty document.
    pub fn new(
        editors: Arc<dyn EditorFactory>,
        options: EditorOptions,
        invoker: Invoker,
        sink: S,
    ) -> Self {
        Self {
            editors,
            options,
            slot: EditorSlot::new(),
            changes: None,
            invoker,
            sink,
            document: Document::new(),
            state: RenderState::Idle,
            sequencer: Sequencer::new(),
            torn_down: false,
        }
    }

    /// Create the editor surface in `mount` and paint the current state.
    ///
    /// Returns `Ok(false)` without touching the factory if a surface is
    /// already live.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Create`] if the factory fails (the controller
    /// stays unmounted) and [`EditorError::TornDown`] after [`unmount`].
    ///
    /// [`unmount`]: Self::unmount
    pub fn mount(&mut self, mount: &MountPoint) -> Result<bool, EditorError> {
        if self.torn_down {
            return Err(EditorError::TornDown);
        }

        let created = self.slot.create_with(|| {
            self.editors
                .create(mount, self.document.as_str(), &self.options)
        })?;
        if !created {
            tracing::debug!(mount = mount.id(), "Editor already live, create skipped");
            return Ok(false);
        }

        self.changes = self.slot.get_mut().map(EditorSurface::subscribe);
        tracing::debug!(
            mount = mount.id(),
            surface = ?self.options.surface,
            "Editor created"
        );
        self.sink.render(&self.state);
        Ok(true)
    }

    /// Apply a user edit to the editor and process the resulting changes.
    ///
    /// Returns the number of changes processed.
    pub fn dispatch(&mut self, input: &EditorInput) -> usize {
        self.edit(input);
        self.pump()
    }

    /// Apply a user edit to the editor without processing it.
    ///
    /// The change stays queued until [`pump`](Self::pump) or
    /// [`pump_deferred`](Self::pump_deferred). Returns `true` if the text
    /// changed.
    pub fn edit(&mut self, input: &EditorInput) -> bool {
        self.live_surface()
            .is_some_and(|surface| surface.apply(input))
    }

    /// Transform every pending change notification, in order.
    ///
    /// Returns the number of changes processed.
    pub fn pump(&mut self) -> usize {
        let pending = self.pending();
        let count = pending.len();
        for text in pending {
            self.on_text_change(&text);
        }
        count
    }

    /// Set the document and transition to the engine's verdict on it.
    ///
    /// Ignored after teardown.
    pub fn on_text_change(&mut self, text: &str) {
        if self.torn_down {
            tracing::trace!("Change after teardown ignored");
            return;
        }
        self.document.set(text);
        self.sequencer.issue();
        let result = self.invoker.transform(text);
        self.transition(result);
    }

    /// Record pending changes and return a job for the latest one.
    ///
    /// Intermediate changes are coalesced: the document takes the newest
    /// text and only it is transformed. Any job handed out earlier becomes
    /// stale.
    pub fn pump_deferred(&mut self) -> Option<Job> {
        let text = self.pending().pop()?;
        self.document.set(&text);
        let ticket = self.sequencer.issue();
        Some(Job {
            ticket,
            text,
            invoker: self.invoker.clone(),
        })
    }

    /// Apply a finished job.
    ///
    /// Returns `false` (and changes nothing) if the job is stale or the
    /// controller was torn down.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if self.torn_down || !self.sequencer.is_current(completion.ticket) {
            tracing::debug!(
                ticket = completion.ticket.get(),
                torn_down = self.torn_down,
                "Discarding stale transformation result"
            );
            return false;
        }
        self.transition(completion.result);
        true
    }

    /// Dispose the editor surface and stop all further transitions.
    ///
    /// Returns `true` only on the call that actually disposed a surface.
    pub fn unmount(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.changes = None;
        let disposed = self.slot.dispose();
        if disposed {
            tracing::debug!(document_len = self.document.as_str().len(), "Editor disposed");
        }
        disposed
    }

    /// Current document text.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current render state.
    #[must_use]
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// The render sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The render sink, mutably (e.g. to drain buffered frames).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The live editor surface.
    #[must_use]
    pub fn editor(&self) -> Option<&(dyn EditorSurface + 'static)> {
        self.slot.get()
    }

    /// Editor options the surface was created with.
    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Whether an editor surface is live.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.slot.is_live()
    }

    /// Whether [`unmount`](Self::unmount) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn live_surface(&mut self) -> Option<&mut (dyn EditorSurface + 'static)> {
        if self.torn_down {
            return None;
        }
        self.slot.get_mut()
    }

    fn pending(&self) -> Vec<String> {
        match &self.changes {
            Some(rx) if !self.torn_down => rx.drain().collect(),
            _ => Vec::new(),
        }
    }

    fn transition(&mut self, result: TransformationResult) {
        self.state = match result {
            Ok(markup) => RenderState::Rendered(markup),
            Err(err) => RenderState::Errored(err.into_message()),
        };
        tracing::trace!(state = self.state.name(), "Render state changed");
        self.sink.render(&self.state);
    }
}

impl<S: RenderSink> Drop for PipelineController<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<S: RenderSink + std::fmt::Debug> std::fmt::Debug for PipelineController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineController")
            .field("slot", &self.slot)
            .field("document", &self.document)
            .field("state", &self.state)
            .field("sink", &self.sink)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
