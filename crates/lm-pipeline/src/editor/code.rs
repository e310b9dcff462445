//! Code-editing surface with tab stops, auto-indent and line numbers.

use super::buffer::{TextBuffer, line_prefix};
use super::{ChangeReceiver, EditorInput, EditorOptions, EditorSurface, SurfaceKind};

/// Code editor surface.
///
/// - `Tab` inserts spaces up to the next tab stop
/// - `Newline` repeats the current line's leading whitespace (with auto-indent)
/// - `Backspace` inside leading spaces removes back to the previous tab stop
#[derive(Debug)]
pub struct CodeSurface {
    buffer: TextBuffer,
    tab_size: usize,
    auto_indent: bool,
    line_numbers: bool,
}

impl CodeSurface {
    /// Create an empty surface configured from editor options.
    #[must_use]
    pub fn new(options: &EditorOptions) -> Self {
        Self {
            buffer: TextBuffer::default(),
            tab_size: options.tab_size.max(1),
            auto_indent: options.auto_indent,
            line_numbers: options.line_numbers,
        }
    }

    /// Number of lines (an empty document has one).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.buffer.text().split('\n').count()
    }

    /// Right-aligned line numbers, one per line, or empty when disabled.
    #[must_use]
    pub fn gutter(&self) -> String {
        if !self.line_numbers {
            return String::new();
        }
        let count = self.line_count();
        let width = count.to_string().len();
        (1..=count)
            .map(|n| format!("{n:>width$}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn tab(&mut self, at: usize) -> bool {
        let column = line_prefix(self.buffer.text(), at).chars().count();
        let spaces = self.tab_size - column % self.tab_size;
        self.buffer.insert(at, &" ".repeat(spaces))
    }

    fn newline(&mut self, at: usize) -> bool {
        let mut inserted = String::from("\n");
        if self.auto_indent {
            let indent: String = line_prefix(self.buffer.text(), at)
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect();
            inserted.push_str(&indent);
        }
        self.buffer.insert(at, &inserted)
    }

    fn backspace(&mut self, at: usize) -> bool {
        let prefix = line_prefix(self.buffer.text(), at);
        let column = prefix.chars().count();
        let count = if column > 0 && prefix.chars().all(|c| c == ' ') {
            (column - 1) % self.tab_size + 1
        } else {
            1
        };
        self.buffer.remove_before(at, count)
    }
}

impl EditorSurface for CodeSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Code
    }

    fn value(&self) -> &str {
        self.buffer.text()
    }

    fn set_value(&mut self, text: &str) {
        self.buffer.set(text);
    }

    fn apply(&mut self, input: &EditorInput) -> bool {
        match input {
            EditorInput::Replace(text) => self.buffer.replace(text),
            EditorInput::Insert { at, text } => self.buffer.insert(*at, text),
            EditorInput::Tab { at } => self.tab(*at),
            EditorInput::Newline { at } => self.newline(*at),
            EditorInput::Backspace { at } => self.backspace(*at),
        }
    }

    fn subscribe(&mut self) -> ChangeReceiver {
        self.buffer.subscribe()
    }

    fn dispose(&mut self) {
        self.buffer.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.buffer.is_disposed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn surface(text: &str) -> CodeSurface {
        let mut surface = CodeSurface::new(&EditorOptions::default());
        surface.set_value(text);
        surface
    }

    #[test]
    fn test_tab_expands_to_next_stop() {
        let mut s = surface("ab");
        s.apply(&EditorInput::Tab { at: 2 });
        assert_eq!(s.value(), "ab  ");

        s.apply(&EditorInput::Tab { at: 4 });
        assert_eq!(s.value(), "ab      ");
    }

    #[test]
    fn test_tab_respects_tab_size() {
        let mut s = CodeSurface::new(&EditorOptions {
            tab_size: 2,
            ..EditorOptions::default()
        });
        s.apply(&EditorInput::Tab { at: 0 });
        assert_eq!(s.value(), "  ");
    }

    #[test]
    fn test_newline_auto_indents() {
        let mut s = surface("    - item");
        s.apply(&EditorInput::Newline { at: 10 });
        assert_eq!(s.value(), "    - item\n    ");
    }

    #[test]
    fn test_newline_without_auto_indent() {
        let mut s = CodeSurface::new(&EditorOptions {
            auto_indent: false,
            ..EditorOptions::default()
        });
        s.set_value("    x");
        s.apply(&EditorInput::Newline { at: 5 });
        assert_eq!(s.value(), "    x\n");
    }

    #[test]
    fn test_backspace_in_indent_removes_to_tab_stop() {
        let mut s = surface("      ");
        s.apply(&EditorInput::Backspace { at: 6 });
        assert_eq!(s.value(), "    ");
        s.apply(&EditorInput::Backspace { at: 4 });
        assert_eq!(s.value(), "");
    }

    #[test]
    fn test_backspace_after_text_removes_one_char() {
        let mut s = surface("  ab");
        s.apply(&EditorInput::Backspace { at: 4 });
        assert_eq!(s.value(), "  a");
    }

    #[test]
    fn test_gutter() {
        let s = surface("a\nb\nc\nd\ne\nf\ng\nh\ni\nj");
        assert_eq!(s.line_count(), 10);
        assert!(s.gutter().starts_with(" 1\n 2\n"));
        assert!(s.gutter().ends_with("\n10"));
    }

    #[test]
    fn test_gutter_disabled() {
        let s = CodeSurface::new(&EditorOptions {
            line_numbers: false,
            ..EditorOptions::default()
        });
        assert_eq!(s.line_count(), 1);
        assert_eq!(s.gutter(), "");
    }

    #[test]
    fn test_edits_notify_subscribers() {
        let mut s = surface("x");
        let rx = s.subscribe();
        s.apply(&EditorInput::Newline { at: 1 });
        assert_eq!(rx.try_recv(), Some("x\n".to_owned()));
    }
}
