//! Help overlay with static syntax reference.
//!
//! Independent of the pipeline: it never sees the document or render state.

/// One metacharacter of the markup dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Metacharacter {
    /// Syntax as typed.
    pub token: &'static str,
    /// What it produces.
    pub meaning: &'static str,
}

/// Static reference content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HelpContent {
    /// Metacharacter table.
    pub metacharacters: &'static [Metacharacter],
    /// Example document exercising the syntax.
    pub example: &'static str,
}

const METACHARACTERS: &[Metacharacter] = &[
    Metacharacter {
        token: "# ",
        meaning: "Heading (repeat # for levels 2-6)",
    },
    Metacharacter {
        token: "- ",
        meaning: "Bullet list item",
    },
    Metacharacter {
        token: "1. ",
        meaning: "Numbered list item",
    },
    Metacharacter {
        token: "- [ ] ",
        meaning: "Task list item",
    },
    Metacharacter {
        token: "*text*",
        meaning: "Emphasis",
    },
    Metacharacter {
        token: "**text**",
        meaning: "Strong emphasis",
    },
    Metacharacter {
        token: "~~text~~",
        meaning: "Strikethrough",
    },
    Metacharacter {
        token: "`code`",
        meaning: "Inline code",
    },
    Metacharacter {
        token: "```",
        meaning: "Code block fence (must be closed)",
    },
    Metacharacter {
        token: "> ",
        meaning: "Block quote",
    },
    Metacharacter {
        token: "[text](url)",
        meaning: "Link",
    },
    Metacharacter {
        token: "![alt](src)",
        meaning: "Image (the only line that may start with !)",
    },
    Metacharacter {
        token: "| a | b |",
        meaning: "Table row",
    },
    Metacharacter {
        token: "---",
        meaning: "Horizontal rule",
    },
];

const EXAMPLE: &str = "# Shopping list

- Item 1
- Item 2 with **emphasis**

> Quotes work too.

```
code blocks need a closing fence
```
";

static CONTENT: HelpContent = HelpContent {
    metacharacters: METACHARACTERS,
    example: EXAMPLE,
};

/// Toggleable help panel.
#[derive(Debug, Default)]
pub struct HelpOverlay {
    visible: bool,
}

impl HelpOverlay {
    /// Create a hidden overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Whether the overlay is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Reference content.
    #[must_use]
    pub fn content() -> &'static HelpContent {
        &CONTENT
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lm_engine::MarkupEngineFactory;

    use super::*;
    use crate::invoker::Invoker;

    #[test]
    fn test_toggle() {
        let mut overlay = HelpOverlay::new();
        assert!(!overlay.is_visible());
        assert!(overlay.toggle());
        assert!(!overlay.toggle());
    }

    #[test]
    fn test_example_renders() {
        let invoker = Invoker::new(Arc::new(MarkupEngineFactory::default()));
        let markup = invoker.transform(HelpOverlay::content().example).unwrap();
        assert!(markup.as_str().contains("<h1>Shopping list</h1>"));
    }

    #[test]
    fn test_image_is_listed() {
        assert!(
            HelpOverlay::content()
                .metacharacters
                .iter()
                .any(|m| m.token.starts_with("!["))
        );
    }
}
