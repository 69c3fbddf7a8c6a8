//! Diff generator: derive an operation from two text snapshots
//!
//! The diff trims the longest common prefix and, within what remains, the
//! longest common suffix. Everything in between becomes one delete plus one
//! insert. This is not a minimal edit script, but a single contiguous edit is
//! exactly what one keystroke, paste or cut produces, and OT only needs the
//! base and target lengths to be right.

use crate::operation::Operation;

/// Generate an operation turning `old_text` into `new_text`.
///
/// Identical inputs produce a single retain over the whole text.
///
/// # Example
///
/// ```
/// use otkit_core::generate_op;
///
/// let op = generate_op("hello", "help!");
/// assert_eq!(op.apply("hello").unwrap(), "help!");
/// ```
pub fn generate_op(old_text: &str, new_text: &str) -> Operation {
    let old_len = old_text.chars().count();
    let new_len = new_text.chars().count();

    let prefix = old_text
        .chars()
        .zip(new_text.chars())
        .take_while(|(a, b)| a == b)
        .count();

    // Never let the suffix reach back into the prefix
    let max_suffix = old_len.min(new_len) - prefix;
    let suffix = old_text
        .chars()
        .rev()
        .zip(new_text.chars().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    let deleted = old_len - prefix - suffix;
    let inserted: String = new_text
        .chars()
        .skip(prefix)
        .take(new_len - prefix - suffix)
        .collect();

    let mut op = Operation::new();
    op.retain(prefix).delete(deleted).insert(&inserted).retain(suffix);
    op
}
