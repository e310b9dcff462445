//! Editing sessions: one WebSocket connection drives one mounted pipeline.

mod protocol;
mod websocket;

pub(crate) use websocket::ws_handler;

use lm_pipeline::{
    Completion, EditorError, EditorSurface, HelpOverlay, Job, MountPoint, PipelineController,
    PreviewFrame, PreviewOptions, RenderSink, RenderState,
};
use protocol::{ClientMessage, ServerMessage};

use crate::state::AppState;

/// Render sink queueing preview messages for the socket.
pub(crate) struct SessionSink {
    options: PreviewOptions,
    outbox: Vec<ServerMessage>,
}

impl RenderSink for SessionSink {
    fn render(&mut self, state: &RenderState) {
        let frame = PreviewFrame::from_state(state, &self.options);
        self.outbox.push(ServerMessage::Preview {
            state: state.name(),
            html: frame.to_html(),
        });
    }
}

/// Transport-independent session logic.
///
/// `revision` counts the edit messages handled so far. The browser counts the
/// edits it sent, and applies a `document` frame only when the two agree, so
/// an echo overtaken by newer typing never clobbers the textarea.
pub(crate) struct Session {
    controller: PipelineController<SessionSink>,
    help: HelpOverlay,
    offload: bool,
    revision: u64,
    in_flight: bool,
}

impl Session {
    /// Mount a new pipeline; the initial preview is queued.
    pub(crate) fn open(state: &AppState, mount: &MountPoint) -> Result<Self, EditorError> {
        let sink = SessionSink {
            options: state.preview.clone(),
            outbox: Vec::new(),
        };
        let mut controller = state.controller(sink);
        controller.mount(mount)?;
        Ok(Self {
            controller,
            help: HelpOverlay::new(),
            offload: state.offload,
            revision: 0,
            in_flight: false,
        })
    }

    /// Handle one client message.
    ///
    /// Returns a job to run off the connection task when offloading. At most
    /// one job is handed out at a time; edits arriving meanwhile stay queued
    /// and are coalesced into the next job by [`complete`](Self::complete).
    pub(crate) fn handle(&mut self, message: ClientMessage) -> Option<Job> {
        // The browser already shows the text it reported; only keystrokes
        // the editor interprets need echoing back.
        let echo = !matches!(message, ClientMessage::Input { .. });
        let Some(input) = message.into_input() else {
            let visible = self.help.toggle();
            self.push(ServerMessage::Help { visible });
            return None;
        };

        self.revision += 1;
        if self.controller.edit(&input) && echo {
            let text = self
                .controller
                .editor()
                .map(EditorSurface::value)
                .unwrap_or_default()
                .to_owned();
            self.push(ServerMessage::Document {
                text,
                revision: self.revision,
            });
        }

        if !self.offload {
            self.controller.pump();
            return None;
        }
        if self.in_flight {
            return None;
        }
        self.next_job()
    }

    /// Apply a finished job and hand out the next one, if edits queued up
    /// while it ran. Stale results are dropped.
    pub(crate) fn complete(&mut self, completion: Completion) -> Option<Job> {
        if !self.controller.complete(completion) {
            tracing::trace!("Dropped stale transformation result");
        }
        self.next_job()
    }

    /// Forget a job that never finished and hand out the next one.
    pub(crate) fn abandon(&mut self) -> Option<Job> {
        self.next_job()
    }

    /// Edit messages handled so far.
    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    fn next_job(&mut self) -> Option<Job> {
        let job = self.controller.pump_deferred();
        self.in_flight = job.is_some();
        job
    }

    /// Queue an error for the client.
    pub(crate) fn reject(&mut self, message: String) {
        self.push(ServerMessage::Error { message });
    }

    /// Drain queued messages in order.
    pub(crate) fn take_messages(&mut self) -> Vec<ServerMessage> {
        std::mem::take(&mut self.controller.sink_mut().outbox)
    }

    /// Unmount the pipeline.
    pub(crate) fn close(&mut self) -> bool {
        self.controller.unmount()
    }

    fn push(&mut self, message: ServerMessage) {
        self.controller.sink_mut().outbox.push(message);
    }
}

#[cfg(test)]
mod tests {
    use lm_pipeline::SurfaceKind;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ServerConfig;

    fn open(offload: bool) -> Session {
        let state = AppState::new(&ServerConfig {
            offload,
            ..ServerConfig::default()
        });
        Session::open(&state, &MountPoint::new("session-test")).unwrap()
    }

    fn input(text: &str) -> ClientMessage {
        ClientMessage::Input {
            text: text.to_owned(),
        }
    }

    fn preview(state: &'static str, html: &str) -> ServerMessage {
        ServerMessage::Preview {
            state,
            html: html.to_owned(),
        }
    }

    #[test]
    fn test_open_sends_placeholder() {
        let mut session = open(false);
        assert_eq!(
            session.take_messages(),
            vec![preview(
                "idle",
                r#"<p class="preview-placeholder">No output</p>"#
            )]
        );
        assert!(session.take_messages().is_empty());
    }

    #[test]
    fn test_input_renders_preview() {
        let mut session = open(false);
        session.take_messages();

        assert!(session.handle(input("- Item 1")).is_none());
        assert_eq!(
            session.take_messages(),
            vec![preview("rendered", "<ul><li>Item 1</li></ul>")]
        );
    }

    #[test]
    fn test_keystroke_echoes_document() {
        let mut session = open(false);
        session.handle(input("    - a"));
        session.take_messages();

        session.handle(ClientMessage::Newline { at: 7 });
        let messages = session.take_messages();
        assert_eq!(
            messages[0],
            ServerMessage::Document {
                text: "    - a\n    ".to_owned(),
                revision: 2,
            }
        );
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_typing_after_keystroke_outdates_echo() {
        let mut session = open(false);
        session.handle(input("a"));
        session.take_messages();

        // The browser types "x" before the tab echo arrives.
        session.handle(ClientMessage::Tab { at: 1 });
        session.handle(input("ax"));

        assert_eq!(
            session.take_messages(),
            vec![
                ServerMessage::Document {
                    text: "a   ".to_owned(),
                    revision: 2,
                },
                preview("rendered", "<p>a</p>"),
                preview("rendered", "<p>ax</p>"),
            ]
        );
        // Three edits sent, so the revision-2 echo is ignored by the browser
        // and both sides agree on the text.
        assert_eq!(session.revision(), 3);
        assert_eq!(session.controller.document().as_str(), "ax");
        assert_eq!(
            session.controller.editor().map(EditorSurface::value),
            Some("ax")
        );
    }

    #[test]
    fn test_help_toggle_does_not_count_as_edit() {
        let mut session = open(false);
        session.handle(ClientMessage::ToggleHelp);
        session.handle(input("a"));
        assert_eq!(session.revision(), 1);
    }

    #[test]
    fn test_toggle_help_leaves_pipeline_alone() {
        let mut session = open(false);
        session.take_messages();

        session.handle(ClientMessage::ToggleHelp);
        session.handle(ClientMessage::ToggleHelp);

        assert_eq!(
            session.take_messages(),
            vec![
                ServerMessage::Help { visible: true },
                ServerMessage::Help { visible: false },
            ]
        );
        assert_eq!(session.controller.state(), &RenderState::Idle);
    }

    #[test]
    fn test_one_job_in_flight() {
        let mut session = open(true);
        session.take_messages();

        let first = session.handle(input("# first")).unwrap();
        assert!(session.handle(input("# second")).is_none());
        assert!(session.handle(input("# third")).is_none());
        assert!(session.take_messages().is_empty());

        let next = session.complete(first.run()).unwrap();
        assert_eq!(next.text(), "# third");
        assert!(session.complete(next.run()).is_none());

        assert_eq!(
            session.take_messages(),
            vec![
                preview("rendered", "<h1>first</h1>"),
                preview("rendered", "<h1>third</h1>"),
            ]
        );
        assert_eq!(session.controller.document().as_str(), "# third");
    }

    #[test]
    fn test_abandoned_job_frees_the_slot() {
        let mut session = open(true);
        let _lost = session.handle(input("# first")).unwrap();
        assert!(session.handle(input("# second")).is_none());

        let next = session.abandon().unwrap();
        assert_eq!(next.text(), "# second");
        assert!(session.abandon().is_none());
        assert!(session.handle(input("# third")).is_some());
    }

    #[test]
    fn test_close_disposes_once() {
        let mut session = open(false);
        assert!(session.close());
        assert!(!session.close());

        session.take_messages();
        assert!(session.handle(input("late")).is_none());
        assert!(session.take_messages().is_empty());
    }

    #[test]
    fn test_failed_mount_is_reported() {
        let state = AppState::new(&ServerConfig {
            editor: lm_pipeline::EditorOptions {
                surface: SurfaceKind::Plain,
                tab_size: 0,
                ..lm_pipeline::EditorOptions::default()
            },
            ..ServerConfig::default()
        });
        let result = Session::open(&state, &MountPoint::new("broken"));
        assert!(matches!(result, Err(EditorError::Create { .. })));
    }
}
