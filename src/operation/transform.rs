//! Transformation of concurrent operations
//!
//! Given two operations `a` and `b` made against the same text, [`transform`]
//! returns `(a', b')` such that
//!
//! ```text
//! apply(apply(s, a), b') == apply(apply(s, b), a')
//! ```
//!
//! This is the TP1 convergence property: two replicas can apply each other's
//! concurrent edits in either order and end up with the same text.
//!
//! # Example
//!
//! ```
//! use otkit_core::{transform, Operation};
//!
//! let mut a = Operation::new();
//! a.retain(5).insert("!");
//! let mut b = Operation::new();
//! b.delete(2).retain(3);
//!
//! let (a_prime, b_prime) = transform(&a, &b).unwrap();
//! let left = b_prime.apply(&a.apply("hello").unwrap()).unwrap();
//! let right = a_prime.apply(&b.apply("hello").unwrap()).unwrap();
//! assert_eq!(left, "llo!");
//! assert_eq!(left, right);
//! ```

use super::{char_len, Operation, Step};
use crate::error::{OtError, Result};
use std::cmp::Ordering;

/// Which side's insertion goes first when both operations insert at the
/// same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPriority {
    /// The first argument's insert is placed first
    Left,
    /// The second argument's insert is placed first
    Right,
}

impl InsertPriority {
    /// Order ties by client identity: the lexicographically smaller id wins.
    ///
    /// Unlike argument order this gives the same answer no matter which
    /// replica performs the transform.
    pub fn by_client(left: &str, right: &str) -> Self {
        if left <= right {
            InsertPriority::Left
        } else {
            InsertPriority::Right
        }
    }
}

/// Transform two concurrent operations against each other.
///
/// Concurrent inserts at the same offset are ordered by argument position:
/// `a`'s text ends up before `b`'s.
pub fn transform(a: &Operation, b: &Operation) -> Result<(Operation, Operation)> {
    transform_with_priority(a, b, InsertPriority::Left)
}

/// Like [`transform`], with an explicit tie-break for same-offset inserts.
pub fn transform_with_priority(
    a: &Operation,
    b: &Operation,
    priority: InsertPriority,
) -> Result<(Operation, Operation)> {
    match priority {
        InsertPriority::Left => transform_left_first(a, b),
        InsertPriority::Right => {
            let (b_prime, a_prime) = transform_left_first(b, a)?;
            Ok((a_prime, b_prime))
        }
    }
}

fn transform_left_first(a: &Operation, b: &Operation) -> Result<(Operation, Operation)> {
    let mut a_prime = Operation::new();
    let mut b_prime = Operation::new();
    let mut steps1 = a.steps.iter().cloned();
    let mut steps2 = b.steps.iter().cloned();
    let mut step1 = steps1.next();
    let mut step2 = steps2.next();

    loop {
        match (step1.take(), step2.take()) {
            (None, None) => break,

            (Some(Step::Insert(s)), rest) => {
                a_prime.insert(&s);
                b_prime.retain(char_len(&s));
                step1 = steps1.next();
                step2 = rest;
            }
            (rest, Some(Step::Insert(s))) => {
                a_prime.retain(char_len(&s));
                b_prime.insert(&s);
                step1 = rest;
                step2 = steps2.next();
            }

            (None, Some(_)) => {
                return Err(OtError::TransformUnderflow("first operation is too short"))
            }
            (Some(_), None) => {
                return Err(OtError::TransformUnderflow("second operation is too short"))
            }

            (Some(Step::Retain(x)), Some(Step::Retain(y))) => {
                let min = x.min(y);
                a_prime.retain(min);
                b_prime.retain(min);
                (step1, step2) = carry(
                    x.cmp(&y),
                    (Step::Retain(x.saturating_sub(y)), Step::Retain(y.saturating_sub(x))),
                    &mut steps1,
                    &mut steps2,
                );
            }

            // Both removed the same range; neither side has to delete it again
            (Some(Step::Delete(x)), Some(Step::Delete(y))) => {
                (step1, step2) = carry(
                    x.cmp(&y),
                    (Step::Delete(x.saturating_sub(y)), Step::Delete(y.saturating_sub(x))),
                    &mut steps1,
                    &mut steps2,
                );
            }

            (Some(Step::Delete(x)), Some(Step::Retain(y))) => {
                a_prime.delete(x.min(y));
                (step1, step2) = carry(
                    x.cmp(&y),
                    (Step::Delete(x.saturating_sub(y)), Step::Retain(y.saturating_sub(x))),
                    &mut steps1,
                    &mut steps2,
                );
            }

            (Some(Step::Retain(x)), Some(Step::Delete(y))) => {
                b_prime.delete(x.min(y));
                (step1, step2) = carry(
                    x.cmp(&y),
                    (Step::Retain(x.saturating_sub(y)), Step::Delete(y.saturating_sub(x))),
                    &mut steps1,
                    &mut steps2,
                );
            }
        }
    }

    tracing::trace!(a_prime = %a_prime, b_prime = %b_prime, "transformed operations");
    Ok((a_prime, b_prime))
}

/// Advance both step streams after consuming the overlap of two steps.
///
/// The longer side keeps its remainder; a side that was fully consumed
/// pulls its next step.
fn carry<I1, I2>(
    order: Ordering,
    (rest1, rest2): (Step, Step),
    steps1: &mut I1,
    steps2: &mut I2,
) -> (Option<Step>, Option<Step>)
where
    I1: Iterator<Item = Step>,
    I2: Iterator<Item = Step>,
{
    match order {
        Ordering::Greater => (Some(rest1), steps2.next()),
        Ordering::Equal => (steps1.next(), steps2.next()),
        Ordering::Less => (steps1.next(), Some(rest2)),
    }
}
