//! Applying an operation to text, and inverting it

use super::{char_len, Operation, Step};
use crate::error::{OtError, Result};

impl Operation {
    /// Apply this operation to `text`, returning the new text.
    ///
    /// `text` must be exactly `base_len` characters long and every step must
    /// stay within it; otherwise `OperationLengthMismatch` is returned.
    pub fn apply(&self, text: &str) -> Result<String> {
        let text_len = char_len(text);
        let mismatch = OtError::OperationLengthMismatch {
            base_len: self.base_len,
            text_len,
        };
        if self.base_len != text_len {
            return Err(mismatch);
        }

        let mut result = String::with_capacity(text.len());
        let mut chars = text.chars();

        for step in &self.steps {
            match step {
                Step::Retain(n) => {
                    for _ in 0..*n {
                        result.push(chars.next().ok_or_else(|| mismatch.clone())?);
                    }
                }
                Step::Insert(s) => result.push_str(s),
                Step::Delete(n) => {
                    if chars.by_ref().take(*n).count() != *n {
                        return Err(mismatch);
                    }
                }
            }
        }

        // Every character must be consumed
        if chars.next().is_some() {
            return Err(mismatch);
        }

        Ok(result)
    }

    /// Compute the operation that undoes this one.
    ///
    /// `original` is the text this operation was applied to. Inserts become
    /// deletes of the same length; deletes become inserts of the removed text.
    pub fn invert(&self, original: &str) -> Result<Operation> {
        let mut inverse = Operation::new();
        let mut chars = original.chars();
        let mut offset = 0;

        for step in &self.steps {
            match step {
                Step::Retain(n) => {
                    inverse.retain(*n);
                    chars.by_ref().take(*n).for_each(drop);
                    offset += n;
                }
                Step::Insert(s) => {
                    inverse.delete_str(s);
                }
                Step::Delete(n) => {
                    let removed: String = chars.by_ref().take(*n).collect();
                    if char_len(&removed) != *n {
                        return Err(OtError::InvertRangeError {
                            offset,
                            len: *n,
                            text_len: char_len(original),
                        });
                    }
                    inverse.insert(&removed);
                    offset += n;
                }
            }
        }

        Ok(inverse)
    }
}
