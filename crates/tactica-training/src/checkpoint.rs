//! Snapshots of behavior weight vectors.
//!
//! A [`Checkpoint`] stores the flat array of a weight vector so a calibration run can be
//! saved and resumed later. It serializes as a JSON object with one field:
//!
//! ```json
//! {"weights": [0.5, 0.0, 0.25, ...]}
//! ```
//!
//! The array must hold exactly [`WEIGHT_COUNT`] numbers; anything else fails to
//! deserialize.

use serde::{Deserialize, Serialize};
use tactica_evaluator::behavior_weights::{BehaviorWeights, WEIGHT_COUNT};

/// An immutable copy of a weight vector. Equality is by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    weights: [f32; WEIGHT_COUNT],
}

impl Checkpoint {
    #[must_use]
    pub const fn from_weights(weights: &BehaviorWeights) -> Self {
        Self {
            weights: weights.to_array(),
        }
    }

    #[must_use]
    pub fn to_weights(&self) -> BehaviorWeights {
        BehaviorWeights::from_fn(|i| self.weights[i])
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }
}

impl From<&BehaviorWeights> for Checkpoint {
    fn from(weights: &BehaviorWeights) -> Self {
        Self::from_weights(weights)
    }
}
