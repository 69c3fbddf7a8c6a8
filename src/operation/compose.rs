//! Composition of two sequential operations

use super::{char_len, split_chars, Operation, Step};
use crate::error::{OtError, Result};
use std::cmp::Ordering;

impl Operation {
    /// Compose `self` with `other` into a single operation that has the same
    /// effect as applying `self` and then `other`.
    ///
    /// Requires `self.target_len() == other.base_len()`.
    pub fn compose(&self, other: &Operation) -> Result<Operation> {
        if self.target_len != other.base_len {
            return Err(OtError::IncompatibleOperations {
                first_target: self.target_len,
                second_base: other.base_len,
            });
        }

        let mut composed = Operation::new();
        let mut steps1 = self.steps.iter().cloned();
        let mut steps2 = other.steps.iter().cloned();
        let mut step1 = steps1.next();
        let mut step2 = steps2.next();

        loop {
            match (step1.take(), step2.take()) {
                (None, None) => break,

                // Deletes in the first operation never reach the second
                (Some(Step::Delete(n)), rest) => {
                    composed.delete(n);
                    step1 = steps1.next();
                    step2 = rest;
                }

                // Inserts in the second operation are unaffected by the first
                (rest, Some(Step::Insert(s))) => {
                    composed.insert(&s);
                    step1 = rest;
                    step2 = steps2.next();
                }

                (None, Some(_)) => {
                    return Err(OtError::ComposeUnderflow("first operation is too short"))
                }
                (Some(_), None) => {
                    return Err(OtError::ComposeUnderflow("second operation is too short"))
                }

                (Some(Step::Retain(a)), Some(Step::Retain(b))) => {
                    composed.retain(a.min(b));
                    match a.cmp(&b) {
                        Ordering::Greater => {
                            step1 = Some(Step::Retain(a - b));
                            step2 = steps2.next();
                        }
                        Ordering::Equal => {
                            step1 = steps1.next();
                            step2 = steps2.next();
                        }
                        Ordering::Less => {
                            step1 = steps1.next();
                            step2 = Some(Step::Retain(b - a));
                        }
                    }
                }

                // Text inserted by the first is removed again by the second
                (Some(Step::Insert(s)), Some(Step::Delete(d))) => {
                    let len = char_len(&s);
                    match len.cmp(&d) {
                        Ordering::Greater => {
                            step1 = Some(Step::Insert(split_chars(&s, d).1.to_string()));
                            step2 = steps2.next();
                        }
                        Ordering::Equal => {
                            step1 = steps1.next();
                            step2 = steps2.next();
                        }
                        Ordering::Less => {
                            step1 = steps1.next();
                            step2 = Some(Step::Delete(d - len));
                        }
                    }
                }

                (Some(Step::Insert(s)), Some(Step::Retain(r))) => {
                    let len = char_len(&s);
                    match len.cmp(&r) {
                        Ordering::Greater => {
                            let (kept, rest) = split_chars(&s, r);
                            composed.insert(kept);
                            step1 = Some(Step::Insert(rest.to_string()));
                            step2 = steps2.next();
                        }
                        Ordering::Equal => {
                            composed.insert(&s);
                            step1 = steps1.next();
                            step2 = steps2.next();
                        }
                        Ordering::Less => {
                            composed.insert(&s);
                            step1 = steps1.next();
                            step2 = Some(Step::Retain(r - len));
                        }
                    }
                }

                (Some(Step::Retain(r)), Some(Step::Delete(d))) => {
                    composed.delete(r.min(d));
                    match r.cmp(&d) {
                        Ordering::Greater => {
                            step1 = Some(Step::Retain(r - d));
                            step2 = steps2.next();
                        }
                        Ordering::Equal => {
                            step1 = steps1.next();
                            step2 = steps2.next();
                        }
                        Ordering::Less => {
                            step1 = steps1.next();
                            step2 = Some(Step::Delete(d - r));
                        }
                    }
                }
            }
        }

        Ok(composed)
    }
}
