//! Property tests for the OT engine
//!
//! Random operations are built over a random base text so every generated
//! operation is valid for the text it is paired with.

use otkit_core::{generate_op, transform, transform_cursor, Operation};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    "[a-cé\n]{0,24}"
}

/// An operation whose base length is `len`
fn operation(len: usize) -> impl Strategy<Value = Operation> {
    prop::collection::vec((0u8..3, 1usize..6, "[x-zü]{1,4}"), 0..12).prop_map(move |parts| {
        let mut op = Operation::new();
        let mut remaining = len;
        for (kind, n, s) in parts {
            match kind {
                0 => {
                    let n = n.min(remaining);
                    op.retain(n);
                    remaining -= n;
                }
                1 => {
                    op.insert(&s);
                }
                _ => {
                    let n = n.min(remaining);
                    op.delete(n);
                    remaining -= n;
                }
            }
        }
        op.retain(remaining);
        op
    })
}

fn text_and_op() -> impl Strategy<Value = (String, Operation)> {
    text().prop_flat_map(|s| {
        let len = s.chars().count();
        (Just(s), operation(len))
    })
}

fn text_and_concurrent_ops() -> impl Strategy<Value = (String, Operation, Operation)> {
    text().prop_flat_map(|s| {
        let len = s.chars().count();
        (Just(s), operation(len), operation(len))
    })
}

fn text_and_sequential_ops() -> impl Strategy<Value = (String, Operation, Operation)> {
    text_and_op().prop_flat_map(|(s, a)| {
        let len = a.target_len();
        (Just(s), Just(a), operation(len))
    })
}

proptest! {
    #[test]
    fn prop_generated_ops_fit_base((s, op) in text_and_op()) {
        prop_assert_eq!(op.base_len(), s.chars().count());
        let out = op.apply(&s).unwrap();
        prop_assert_eq!(out.chars().count(), op.target_len());
    }

    #[test]
    fn prop_invert_roundtrip((s, op) in text_and_op()) {
        let edited = op.apply(&s).unwrap();
        let inverse = op.invert(&s).unwrap();
        prop_assert_eq!(inverse.apply(&edited).unwrap(), s);
    }

    #[test]
    fn prop_compose_matches_sequential((s, a, b) in text_and_sequential_ops()) {
        let sequential = b.apply(&a.apply(&s).unwrap()).unwrap();
        let composed = a.compose(&b).unwrap();
        prop_assert_eq!(composed.apply(&s).unwrap(), sequential);
    }

    #[test]
    fn prop_transform_converges((s, a, b) in text_and_concurrent_ops()) {
        let (a_prime, b_prime) = transform(&a, &b).unwrap();
        let left = b_prime.apply(&a.apply(&s).unwrap()).unwrap();
        let right = a_prime.apply(&b.apply(&s).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_diff_is_correct(old in text(), new in text()) {
        let op = generate_op(&old, &new);
        prop_assert_eq!(op.apply(&old).unwrap(), new);
    }

    #[test]
    fn prop_cursor_stable_under_retain(len in 0usize..64, offset in 0usize..64) {
        let index = offset.min(len);
        let mut op = Operation::new();
        op.retain(len);
        prop_assert_eq!(transform_cursor(index, &op), index);
    }

    #[test]
    fn prop_cursor_stays_in_bounds((s, op) in text_and_op(), offset in 0usize..32) {
        let index = offset.min(s.chars().count());
        prop_assert!(transform_cursor(index, &op) <= op.target_len());
    }
}
