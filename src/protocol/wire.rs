//! Compact wire encoding of operations
//!
//! On the wire an operation is a JSON array in which every element is one of:
//! - a positive integer: retain that many characters
//! - a string: insert it
//! - a negative integer: delete that many characters
//!
//! ```text
//! [5, "!", -2]   <=>   retain 5, insert "!", delete 2
//! ```
//!
//! The sign convention only exists here. Decoding validates every element
//! and produces a canonical [`Operation`].

use crate::error::{OtError, Result};
use crate::operation::{Operation, Step};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One element of the compact encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireStep {
    Count(i64),
    Text(String),
}

impl TryFrom<&Step> for WireStep {
    type Error = OtError;

    fn try_from(step: &Step) -> Result<Self> {
        let count = |n: usize| {
            i64::try_from(n).map_err(|_| OtError::Protocol(format!("count {} does not fit the wire", n)))
        };
        Ok(match step {
            Step::Retain(n) => WireStep::Count(count(*n)?),
            Step::Insert(s) => WireStep::Text(s.clone()),
            Step::Delete(n) => WireStep::Count(-count(*n)?),
        })
    }
}

impl TryFrom<&WireStep> for Step {
    type Error = OtError;

    fn try_from(wire: &WireStep) -> Result<Self> {
        let count = |n: u64| {
            usize::try_from(n).map_err(|_| OtError::Protocol(format!("count {} out of range", n)))
        };
        match wire {
            WireStep::Count(0) => Err(OtError::InvalidArgument(
                "zero-length step".to_string(),
            )),
            WireStep::Count(n) if *n > 0 => Ok(Step::Retain(count(n.unsigned_abs())?)),
            WireStep::Count(n) => Ok(Step::Delete(count(n.unsigned_abs())?)),
            WireStep::Text(s) if s.is_empty() => Err(OtError::InvalidArgument(
                "empty insert".to_string(),
            )),
            WireStep::Text(s) => Ok(Step::Insert(s.clone())),
        }
    }
}

impl Operation {
    /// Encode as the compact wire list
    pub fn to_wire(&self) -> Result<Vec<WireStep>> {
        self.steps().iter().map(WireStep::try_from).collect()
    }

    /// Decode and validate a compact wire list.
    ///
    /// Fails if the summed base or target length does not fit in `usize`.
    pub fn from_wire(steps: &[WireStep]) -> Result<Operation> {
        let overflow = || OtError::Protocol("operation length overflows".to_string());
        let mut base_len: usize = 0;
        let mut target_len: usize = 0;
        let mut decoded = Vec::with_capacity(steps.len());

        for wire in steps {
            let step = Step::try_from(wire)?;
            match &step {
                Step::Retain(n) => {
                    base_len = base_len.checked_add(*n).ok_or_else(overflow)?;
                    target_len = target_len.checked_add(*n).ok_or_else(overflow)?;
                }
                Step::Insert(s) => {
                    target_len = target_len
                        .checked_add(s.chars().count())
                        .ok_or_else(overflow)?;
                }
                Step::Delete(n) => {
                    base_len = base_len.checked_add(*n).ok_or_else(overflow)?;
                }
            }
            decoded.push(step);
        }

        Ok(decoded.into_iter().collect())
    }

    /// Decode a wire list and check it against lengths declared by the sender
    pub fn from_wire_checked(
        steps: &[WireStep],
        base_len: Option<usize>,
        target_len: Option<usize>,
    ) -> Result<Operation> {
        let op = Operation::from_wire(steps)?;
        if let Some(declared) = base_len.filter(|n| *n != op.base_len()) {
            return Err(OtError::Protocol(format!(
                "declared base length {} but steps consume {}",
                declared,
                op.base_len()
            )));
        }
        if let Some(declared) = target_len.filter(|n| *n != op.target_len()) {
            return Err(OtError::Protocol(format!(
                "declared target length {} but steps produce {}",
                declared,
                op.target_len()
            )));
        }
        Ok(op)
    }
}

impl Serialize for Operation {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_wire()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let steps = Vec::<WireStep>::deserialize(deserializer)?;
        Operation::from_wire(&steps).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode() {
        let mut op = Operation::new();
        op.retain(5).delete(2).insert("!");

        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json, json!([5, "!", -2]));
    }

    #[test]
    fn test_decode() {
        let op: Operation = serde_json::from_value(json!([1, -3, "ab", 2])).unwrap();
        assert_eq!(
            op.steps(),
            &[
                Step::Retain(1),
                Step::Insert("ab".to_string()),
                Step::Delete(3),
                Step::Retain(2),
            ]
        );
        assert_eq!(op.base_len(), 6);
        assert_eq!(op.target_len(), 5);
    }

    #[test]
    fn test_decode_merges_adjacent_steps() {
        let steps: Vec<WireStep> = serde_json::from_value(json!([2, 3, "a", "b"])).unwrap();
        let op = Operation::from_wire(&steps).unwrap();
        assert_eq!(op.steps(), &[Step::Retain(5), Step::Insert("ab".to_string())]);
    }

    #[test]
    fn test_decode_rejects_zero() {
        let result = serde_json::from_value::<Operation>(json!([3, 0]));
        assert!(result.is_err());

        let steps = vec![WireStep::Count(0)];
        assert!(matches!(
            Operation::from_wire(&steps),
            Err(OtError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_decode_rejects_empty_insert() {
        let steps = vec![WireStep::Text(String::new())];
        assert!(matches!(
            Operation::from_wire(&steps),
            Err(OtError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_integers() {
        assert!(serde_json::from_value::<Operation>(json!([1.5])).is_err());
        assert!(serde_json::from_value::<Operation>(json!([true])).is_err());
        assert!(serde_json::from_value::<Operation>(json!({"retain": 1})).is_err());
    }

    #[test]
    fn test_decode_rejects_length_overflow() {
        let steps = vec![WireStep::Count(i64::MAX); 3];
        assert!(matches!(
            Operation::from_wire(&steps),
            Err(OtError::Protocol(_))
        ));

        let steps = vec![
            WireStep::Count(i64::MAX),
            WireStep::Count(-i64::MAX),
            WireStep::Count(i64::MAX),
            WireStep::Count(i64::MAX),
        ];
        assert!(Operation::from_wire(&steps).is_err());
    }

    #[test]
    fn test_decode_rejects_out_of_range_count() {
        // Each count is rejected outright where usize is 32 bits; on 64-bit
        // targets the sum overflows instead
        let steps = vec![
            WireStep::Count(i64::MAX),
            WireStep::Count(i64::MAX),
            WireStep::Count(4_294_967_301),
        ];
        assert!(matches!(
            Operation::from_wire(&steps),
            Err(OtError::Protocol(_))
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_encode_rejects_oversized_count() {
        let mut op = Operation::new();
        op.retain(usize::MAX);
        assert!(matches!(op.to_wire(), Err(OtError::Protocol(_))));
        assert!(serde_json::to_value(&op).is_err());
    }

    #[test]
    fn test_declared_lengths() {
        let steps = vec![WireStep::Count(3), WireStep::Text("x".to_string())];

        assert!(Operation::from_wire_checked(&steps, Some(3), Some(4)).is_ok());
        assert!(Operation::from_wire_checked(&steps, None, None).is_ok());
        assert!(matches!(
            Operation::from_wire_checked(&steps, Some(4), None),
            Err(OtError::Protocol(_))
        ));
        assert!(matches!(
            Operation::from_wire_checked(&steps, None, Some(3)),
            Err(OtError::Protocol(_))
        ));
    }
}
