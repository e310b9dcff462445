//! Strict-dialect checks run before rendering.
//!
//! Fenced code blocks are located with `pulldown-cmark` itself, so fences
//! nested in list items or block quotes are seen exactly as the renderer
//! sees them. Everything outside those blocks is document text.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::engine::EngineError;

/// A fenced code block found by the parser.
struct FencedBlock {
    /// Byte range in the source, opening fence through closing fence.
    range: Range<usize>,
    /// 1-based line of the opening fence.
    line: usize,
    closed: bool,
}

/// Check `text` against the strict dialect rules.
///
/// Reports whichever violation comes first in the document.
pub(crate) fn validate(text: &str, options: Options) -> Result<(), EngineError> {
    let blocks = fenced_blocks(text, options);

    let unterminated = blocks.iter().find(|block| !block.closed).map(|block| {
        EngineError::new(format!(
            "Unterminated code fence opened on line {}",
            block.line
        ))
        .at_line(block.line)
    });
    let bang = stray_bang(text, &blocks)
        .map(|line| EngineError::new("Unexpected token !").at_line(line));

    match (bang, unterminated) {
        (Some(bang), Some(fence)) if fence.line() < bang.line() => Err(fence),
        (Some(err), _) | (None, Some(err)) => Err(err),
        (None, None) => Ok(()),
    }
}

fn fenced_blocks(text: &str, options: Options) -> Vec<FencedBlock> {
    Parser::new_ext(text, options)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => Some(FencedBlock {
                line: line_of(text, range.start),
                closed: is_closed(&text[range.clone()]),
                range,
            }),
            _ => None,
        })
        .collect()
}

/// First line outside fenced code whose first non-blank character is a `!`
/// that does not start an image.
fn stray_bang(text: &str, blocks: &[FencedBlock]) -> Option<usize> {
    let mut offset = 0;
    for (index, line) in text.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += line.len();

        if blocks.iter().any(|block| block.range.contains(&start)) {
            continue;
        }
        if let Some(rest) = line.trim_start().strip_prefix('!')
            && !rest.starts_with('[')
        {
            return Some(index + 1);
        }
    }
    None
}

/// Whether a fenced block's source ends with a matching closing fence.
///
/// The parser also ends a block when its container (list item, quote) ends,
/// so the closing line has to be checked against the opening marker.
fn is_closed(block: &str) -> bool {
    let block = block.trim_end_matches(['\n', '\r']);
    let Some((opening, rest)) = block.split_once('\n') else {
        return false;
    };
    let Some((marker, width)) = fence_marker(opening) else {
        return false;
    };
    let closing = rest
        .rsplit('\n')
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| c.is_whitespace() || c == '>');
    let run = closing.chars().take_while(|c| *c == marker).count();
    run >= width && closing[run * marker.len_utf8()..].trim().is_empty()
}

/// Marker character and width of the fence on an opening line.
fn fence_marker(line: &str) -> Option<(char, usize)> {
    let start = line.find(['`', '~'])?;
    let marker = line[start..].chars().next()?;
    let width = line[start..].chars().take_while(|c| *c == marker).count();
    (width >= 3).then_some((marker, width))
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(text: &str) -> Result<(), EngineError> {
        validate(text, Options::empty())
    }

    #[test]
    fn test_plain_text_is_valid() {
        assert!(check("# Title\n\nSome *text*.").is_ok());
        assert!(check("").is_ok());
    }

    #[test]
    fn test_leading_bang_rejected() {
        let err = check("first\n!oops").unwrap_err();
        assert_eq!(err.message(), "Unexpected token !");
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_indented_bang_rejected() {
        assert!(check("   !").is_err());
    }

    #[test]
    fn test_image_allowed() {
        assert!(check("![logo](logo.png)").is_ok());
    }

    #[test]
    fn test_bang_inside_sentence_allowed() {
        assert!(check("Hello world!").is_ok());
    }

    #[test]
    fn test_bang_inside_fence_allowed() {
        assert!(check("```sh\n!history\n```").is_ok());
    }

    #[test]
    fn test_unterminated_fence() {
        let err = check("intro\n\n```rust\nfn main() {}").unwrap_err();
        assert_eq!(err.message(), "Unterminated code fence opened on line 3");
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_lone_fence_at_end() {
        let err = check("text\n\n```").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_shorter_fence_does_not_close() {
        assert!(check("````\n```\n").is_err());
        assert!(check("````\n```\n````").is_ok());
    }

    #[test]
    fn test_tilde_fence() {
        assert!(check("~~~\n!x\n~~~").is_ok());
        assert!(check("~~~\n```").is_err());
    }

    #[test]
    fn test_fence_with_trailing_text_does_not_close() {
        assert!(check("```\n``` not a close").is_err());
    }

    #[test]
    fn test_fence_in_list_item() {
        assert!(check("- ```\n  let x = 1;\n  ```\n").is_ok());
        assert!(check("- ```\n  !history\n  ```\n\nafter").is_ok());
    }

    #[test]
    fn test_fence_in_block_quote() {
        assert!(check("> ```\n> !history\n> ```\n").is_ok());
    }

    #[test]
    fn test_fence_cut_short_by_list_end() {
        let err = check("- ```\n  code\n\nparagraph").unwrap_err();
        assert_eq!(err.message(), "Unterminated code fence opened on line 1");
    }

    #[test]
    fn test_first_violation_wins() {
        let err = check("!bang\n\n```\nopen").unwrap_err();
        assert_eq!(err.message(), "Unexpected token !");

        let err = check("```\n!inside").unwrap_err();
        assert_eq!(err.line(), Some(1));
    }
}
