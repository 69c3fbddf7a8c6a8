//! Caret positions: mapping through operations and row/column conversion

use crate::operation::{Operation, Step};
use serde::{Deserialize, Serialize};

/// 1-based line and column of a caret, as sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub row: usize,
    pub col: usize,
}

/// Map a caret offset in the text before `op` to the matching offset in the
/// text after it.
///
/// - Text inserted at or before the caret pushes the caret forward, so the
///   caret ends up after freshly inserted content.
/// - A caret inside deleted text collapses to the start of the deletion.
/// - A caret inside replaced text (an insert paired with a delete at the
///   same offset) collapses to the start of the replacement.
///
/// # Example
///
/// ```
/// use otkit_core::{transform_cursor, Operation};
///
/// let mut op = Operation::new();
/// op.delete(5).insert("hi");
/// assert_eq!(transform_cursor(3, &op), 0);
/// ```
pub fn transform_cursor(index: usize, op: &Operation) -> usize {
    let mut cursor = index;
    let mut pos = 0;
    let mut steps = op.steps().iter().peekable();

    while let Some(step) = steps.next() {
        if pos > index {
            break;
        }
        match step {
            Step::Retain(n) => pos += n,
            Step::Insert(_) => {
                let replaced = match steps.peek() {
                    Some(Step::Delete(n)) => *n,
                    _ => 0,
                };
                if index > pos && index <= pos + replaced {
                    cursor -= index - pos;
                    pos += replaced;
                    steps.next();
                } else if index >= pos {
                    cursor += step.dst_len();
                }
            }
            Step::Delete(n) => {
                if index > pos && index <= pos + n {
                    cursor -= index - pos;
                } else if index > pos + n {
                    cursor -= n;
                }
                pos += n;
            }
        }
    }

    cursor
}

/// Convert a char offset into a 1-based row/column pair.
///
/// Offsets past the end of `text` are clamped to its end.
pub fn index_to_row_col(text: &str, index: usize) -> CursorPosition {
    let mut row = 1;
    let mut col = 1;
    for c in text.chars().take(index) {
        if c == '\n' {
            row += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    CursorPosition { row, col }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(build: impl FnOnce(&mut Operation)) -> Operation {
        let mut op = Operation::new();
        build(&mut op);
        op
    }

    #[test]
    fn test_retain_only_is_stable() {
        let op = op(|o| {
            o.retain(5);
        });
        for i in 0..=5 {
            assert_eq!(transform_cursor(i, &op), i);
        }
    }

    #[test]
    fn test_full_replace_collapses_caret() {
        let op = op(|o| {
            o.delete(5).insert("hi");
        });
        assert_eq!(transform_cursor(3, &op), 0);
        assert_eq!(transform_cursor(5, &op), 0);
    }

    #[test]
    fn test_insert_before_caret_shifts() {
        let op = op(|o| {
            o.retain(1).insert("abc").retain(4);
        });
        assert_eq!(transform_cursor(0, &op), 0);
        assert_eq!(transform_cursor(3, &op), 6);
    }

    #[test]
    fn test_insert_at_caret_pushes_caret() {
        let op = op(|o| {
            o.retain(2).insert("xy").retain(3);
        });
        assert_eq!(transform_cursor(2, &op), 4);
    }

    #[test]
    fn test_delete_before_caret() {
        let op = op(|o| {
            o.retain(1).delete(2).retain(4);
        });
        assert_eq!(transform_cursor(5, &op), 3);
    }

    #[test]
    fn test_caret_inside_delete() {
        let op = op(|o| {
            o.retain(1).delete(3).retain(1);
        });
        assert_eq!(transform_cursor(2, &op), 1);
        assert_eq!(transform_cursor(4, &op), 1);
        assert_eq!(transform_cursor(1, &op), 1);
    }

    #[test]
    fn test_edits_after_caret_ignored() {
        let op = op(|o| {
            o.retain(4).delete(1).insert("zz");
        });
        assert_eq!(transform_cursor(2, &op), 2);
    }

    #[test]
    fn test_index_to_row_col() {
        let text = "ab\ncde\n\nf";
        assert_eq!(index_to_row_col(text, 0), CursorPosition { row: 1, col: 1 });
        assert_eq!(index_to_row_col(text, 2), CursorPosition { row: 1, col: 3 });
        assert_eq!(index_to_row_col(text, 3), CursorPosition { row: 2, col: 1 });
        assert_eq!(index_to_row_col(text, 7), CursorPosition { row: 3, col: 1 });
        assert_eq!(index_to_row_col(text, 100), CursorPosition { row: 4, col: 2 });
    }
}
