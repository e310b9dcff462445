//! Session wire messages (JSON, tagged by `type`).

use lm_pipeline::EditorInput;
use serde::{Deserialize, Serialize};

/// Message from the browser.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub(crate) enum ClientMessage {
    /// Full textarea contents after a browser edit.
    Input { text: String },
    /// Text inserted at a character offset.
    Insert { at: usize, text: String },
    /// Tab key.
    Tab { at: usize },
    /// Enter key.
    Newline { at: usize },
    /// Backspace key.
    Backspace { at: usize },
    /// Show or hide the help overlay.
    ToggleHelp,
}

impl ClientMessage {
    /// The editor input this message carries, if any.
    pub(crate) fn into_input(self) -> Option<EditorInput> {
        match self {
            Self::Input { text } => Some(EditorInput::Replace(text)),
            Self::Insert { at, text } => Some(EditorInput::Insert { at, text }),
            Self::Tab { at } => Some(EditorInput::Tab { at }),
            Self::Newline { at } => Some(EditorInput::Newline { at }),
            Self::Backspace { at } => Some(EditorInput::Backspace { at }),
            Self::ToggleHelp => None,
        }
    }
}

/// Message to the browser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub(crate) enum ServerMessage {
    /// New preview contents.
    Preview { state: &'static str, html: String },
    /// Editor text after an edit the browser cannot predict, tagged with the
    /// number of edit messages the session had handled when it was produced.
    Document { text: String, revision: u64 },
    /// Help overlay visibility.
    Help { visible: bool },
    /// Protocol or session failure.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_client_messages() {
        let input: ClientMessage =
            serde_json::from_value(json!({"type": "input", "text": "# a"})).unwrap();
        assert_eq!(input, ClientMessage::Input { text: "# a".to_owned() });

        let toggle: ClientMessage =
            serde_json::from_value(json!({"type": "toggleHelp"})).unwrap();
        assert_eq!(toggle, ClientMessage::ToggleHelp);
        assert_eq!(toggle.into_input(), None);

        let tab: ClientMessage = serde_json::from_value(json!({"type": "tab", "at": 3})).unwrap();
        assert_eq!(tab.into_input(), Some(EditorInput::Tab { at: 3 }));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<ClientMessage, _> =
            serde_json::from_value(json!({"type": "save", "text": ""}));
        assert!(result.is_err());
    }

    #[test]
    fn test_server_message_shape() {
        let message = ServerMessage::Preview {
            state: "rendered",
            html: "<p>a</p>".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"type": "preview", "state": "rendered", "html": "<p>a</p>"})
        );
        assert_eq!(
            serde_json::to_value(ServerMessage::Document {
                text: "a".to_owned(),
                revision: 3,
            })
            .unwrap(),
            json!({"type": "document", "text": "a", "revision": 3})
        );
        assert_eq!(
            serde_json::to_value(ServerMessage::Help { visible: true }).unwrap(),
            json!({"type": "help", "visible": true})
        );
    }
}
