//! Text operations: the core data type of the OT engine
//!
//! An [`Operation`] is an ordered list of [`Step`]s that walks over a source
//! text of `base_len` characters and produces a target text of `target_len`
//! characters.
//!
//! # Canonical form
//!
//! The builder methods keep every operation normalized:
//! - no zero-length step is ever stored
//! - adjacent steps of the same kind are merged
//! - an insert directly after a delete is moved in front of it
//!
//! Two operations with the same effect therefore have the same step list,
//! which keeps [`Operation::compose`] and [`transform`] deterministic.
//!
//! # Example
//!
//! ```
//! use otkit_core::Operation;
//!
//! let mut op = Operation::new();
//! op.retain(5).insert("!");
//!
//! assert_eq!(op.base_len(), 5);
//! assert_eq!(op.target_len(), 6);
//! assert_eq!(op.apply("hello").unwrap(), "hello!");
//! ```
//!
//! Lengths and offsets count `char`s (Unicode scalar values), never bytes.

mod apply;
mod compose;
mod transform;

pub use transform::{transform, transform_with_priority, InsertPriority};

use std::fmt;

/// A single edit step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Copy `n` characters unchanged
    Retain(usize),

    /// Insert literal text
    Insert(String),

    /// Remove `n` characters from the source
    Delete(usize),
}

impl Step {
    /// Characters this step produces in the target text
    pub fn dst_len(&self) -> usize {
        match self {
            Step::Retain(n) => *n,
            Step::Insert(s) => char_len(s),
            Step::Delete(_) => 0,
        }
    }
}

/// Ordered sequence of steps plus the derived base and target lengths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operation {
    steps: Vec<Step>,
    base_len: usize,
    target_len: usize,
}

impl Operation {
    /// Create an empty operation (base and target length 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps in canonical order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Length of the text this operation applies to
    pub fn base_len(&self) -> usize {
        self.base_len
    }

    /// Length of the text this operation produces
    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// True when applying the operation leaves any valid input unchanged
    pub fn is_noop(&self) -> bool {
        matches!(self.steps.as_slice(), [] | [Step::Retain(_)])
    }

    /// Skip over `n` characters. Merges with a trailing retain.
    pub fn retain(&mut self, n: usize) -> &mut Self {
        if n == 0 {
            return self;
        }
        self.base_len += n;
        self.target_len += n;
        if let Some(Step::Retain(last)) = self.steps.last_mut() {
            *last += n;
        } else {
            self.steps.push(Step::Retain(n));
        }
        self
    }

    /// Insert `text` at the current position.
    ///
    /// An insert following a delete is placed before that delete, merging
    /// with a preceding insert if there is one.
    pub fn insert(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        self.target_len += char_len(text);

        let n = self.steps.len();
        let merge_at = match self.steps.as_slice() {
            [.., Step::Insert(_)] => Some(n - 1),
            [.., Step::Insert(_), Step::Delete(_)] => Some(n - 2),
            _ => None,
        };

        if let Some(i) = merge_at {
            if let Step::Insert(existing) = &mut self.steps[i] {
                existing.push_str(text);
            }
        } else if matches!(self.steps.last(), Some(Step::Delete(_))) {
            self.steps.insert(n - 1, Step::Insert(text.to_string()));
        } else {
            self.steps.push(Step::Insert(text.to_string()));
        }
        self
    }

    /// Delete `n` characters. Merges with a trailing delete.
    pub fn delete(&mut self, n: usize) -> &mut Self {
        if n == 0 {
            return self;
        }
        self.base_len += n;
        if let Some(Step::Delete(last)) = self.steps.last_mut() {
            *last += n;
        } else {
            self.steps.push(Step::Delete(n));
        }
        self
    }

    /// Delete as many characters as `text` contains
    pub fn delete_str(&mut self, text: &str) -> &mut Self {
        self.delete(char_len(text))
    }

    /// Append a step through the normalizing builder
    pub fn push(&mut self, step: Step) -> &mut Self {
        match step {
            Step::Retain(n) => self.retain(n),
            Step::Insert(s) => self.insert(&s),
            Step::Delete(n) => self.delete(n),
        }
    }
}

impl FromIterator<Step> for Operation {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        let mut op = Operation::new();
        for step in iter {
            op.push(step);
        }
        op
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match step {
                Step::Retain(n) => write!(f, "retain {}", n)?,
                Step::Insert(s) => write!(f, "insert '{}'", s)?,
                Step::Delete(n) => write!(f, "delete {}", n)?,
            }
        }
        Ok(())
    }
}

/// Length of `s` in chars
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split `s` after `n` chars
pub(crate) fn split_chars(s: &str, n: usize) -> (&str, &str) {
    let at = s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len());
    s.split_at(at)
}
