//! The behavior weight vector: tunable parameters biasing utility scoring.
//!
//! A [`BehaviorWeights`] value holds exactly [`WEIGHT_COUNT`] real components. Each one
//! scales a single scoring term of the cost functions (see [`Weight`] for the named
//! dimensions). The vector is an immutable value: every transform returns a new vector,
//! which keeps the optimizer's search loop free of aliasing concerns.
//!
//! # Operations
//!
//! - **Arithmetic**: elementwise `+` / `-` and scalar `*`
//! - **Clamping**: [`BehaviorWeights::clamp`] bounds every dimension; dimensions from
//!   [`EXTENDED_RANGE_START`] onwards get an upper bound 1.5× wider
//! - **Coordinate search**: [`BehaviorWeights::perturb`] moves a single dimension
//! - **Sampling**: [`BehaviorWeights::random`] and [`BehaviorWeights::noise`] draw from the
//!   standard normal distribution
//! - **Convergence signal**: [`BehaviorWeights::max_abs`]
//!
//! # Example
//!
//! ```
//! use tactica_evaluator::behavior_weights::{BehaviorWeights, Weight, WeightBounds};
//!
//! let weights = BehaviorWeights::zero()
//!     .with(Weight::Bravery, 1.0)
//!     .perturb(Weight::Herding.index(), 0.25);
//! assert_eq!(weights.weight(Weight::Bravery), 1.0);
//! assert_eq!(weights.weight(Weight::Herding), 0.25);
//!
//! let clamped = (weights * 4.0).clamp(WeightBounds::default());
//! assert_eq!(clamped.weight(Weight::Bravery), 1.0);
//! ```

use std::ops::{Add, Index, Mul, Sub};

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Number of components in every behavior weight vector.
pub const WEIGHT_COUNT: usize = 29;

/// First dimension of the extended objective's weights, which clamp to a wider range.
pub const EXTENDED_RANGE_START: usize = 21;

/// Scale applied to the upper bound (and to random draws) of the extended dimensions.
const EXTENDED_RANGE_SCALE: f32 = 1.5;

/// Named dimensions of the weight vector.
///
/// Dimensions 9–20 and 25–28 are reserved: they take part in arithmetic, clamping and
/// search like any other dimension but no scoring term reads them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weight {
    Bravery = 0,
    SelfPreservation = 1,
    FallShame = 2,
    FavorHigherEvasion = 3,
    AntiCrowding = 4,
    FacingCorrection = 5,
    Aggression = 6,
    Herding = 7,
    OffBoard = 8,
    Victory = 21,
    Resource = 22,
    Control = 23,
    Curiosity = 24,
}

impl Weight {
    pub const ALL: [Weight; 13] = [
        Weight::Bravery,
        Weight::SelfPreservation,
        Weight::FallShame,
        Weight::FavorHigherEvasion,
        Weight::AntiCrowding,
        Weight::FacingCorrection,
        Weight::Aggression,
        Weight::Herding,
        Weight::OffBoard,
        Weight::Victory,
        Weight::Resource,
        Weight::Control,
        Weight::Curiosity,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Weight::Bravery => "bravery",
            Weight::SelfPreservation => "self_preservation",
            Weight::FallShame => "fall_shame",
            Weight::FavorHigherEvasion => "favor_higher_evasion",
            Weight::AntiCrowding => "anti_crowding",
            Weight::FacingCorrection => "facing_correction",
            Weight::Aggression => "aggression",
            Weight::Herding => "herding",
            Weight::OffBoard => "off_board",
            Weight::Victory => "victory",
            Weight::Resource => "resource",
            Weight::Control => "control",
            Weight::Curiosity => "curiosity",
        }
    }
}

/// Lower and upper bound used by [`BehaviorWeights::clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBounds {
    pub min: f32,
    pub max: f32,
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl WeightBounds {
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the `(min, max)` range that applies to dimension `index`.
    #[must_use]
    pub fn range_for(&self, index: usize) -> (f32, f32) {
        if index >= EXTENDED_RANGE_START {
            (self.min, self.max * EXTENDED_RANGE_SCALE)
        } else {
            (self.min, self.max)
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("expected {expected} weights, got {actual}")]
pub struct WeightCountError {
    pub expected: usize,
    pub actual: usize,
}

/// Immutable vector of [`WEIGHT_COUNT`] behavior weights.
///
/// Serialized as a flat JSON array of numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BehaviorWeights {
    values: [f32; WEIGHT_COUNT],
}

impl Default for BehaviorWeights {
    fn default() -> Self {
        Self::zero()
    }
}

impl BehaviorWeights {
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            values: [0.0; WEIGHT_COUNT],
        }
    }

    /// Builds a vector by evaluating `f` for each dimension index.
    #[must_use]
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> f32,
    {
        Self {
            values: std::array::from_fn(f),
        }
    }

    /// Builds a vector from a flat array.
    ///
    /// Fails if `values` does not hold exactly [`WEIGHT_COUNT`] elements.
    pub fn from_array(values: &[f32]) -> Result<Self, WeightCountError> {
        let values = <[f32; WEIGHT_COUNT]>::try_from(values).map_err(|_| WeightCountError {
            expected: WEIGHT_COUNT,
            actual: values.len(),
        })?;
        Ok(Self { values })
    }

    #[must_use]
    pub const fn to_array(&self) -> [f32; WEIGHT_COUNT] {
        self.values
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Returns the component at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= WEIGHT_COUNT`.
    #[must_use]
    pub fn get(&self, index: usize) -> f32 {
        self.values[index]
    }

    #[must_use]
    pub fn weight(&self, weight: Weight) -> f32 {
        self.values[weight.index()]
    }

    /// Returns a copy with the component at `index` replaced by `value`.
    #[must_use]
    pub fn set(&self, index: usize, value: f32) -> Self {
        let mut values = self.values;
        values[index] = value;
        Self { values }
    }

    #[must_use]
    pub fn with(&self, weight: Weight, value: f32) -> Self {
        self.set(weight.index(), value)
    }

    /// Returns a copy with `epsilon` added to the component at `index`.
    ///
    /// No clamping is applied; callers clamp the result when they need bounded weights.
    #[must_use]
    pub fn perturb(&self, index: usize, epsilon: f32) -> Self {
        self.set(index, self.values[index] + epsilon)
    }

    #[must_use]
    pub fn scale(&self, factor: f32) -> Self {
        Self::from_fn(|i| self.values[i] * factor)
    }

    /// Clamps every dimension into its range.
    ///
    /// Dimensions below [`EXTENDED_RANGE_START`] clamp to `[min, max]`; the remaining
    /// dimensions clamp to `[min, 1.5 × max]`. Clamping is idempotent and never panics,
    /// even for inverted bounds.
    #[must_use]
    pub fn clamp(&self, bounds: WeightBounds) -> Self {
        Self::from_fn(|i| {
            let (min, max) = bounds.range_for(i);
            self.values[i].max(min).min(max)
        })
    }

    /// Adds independent `N(0, strength²)` noise to every dimension.
    #[must_use]
    pub fn noise<R>(&self, strength: f32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_fn(|i| {
            let z: f32 = rng.sample(StandardNormal);
            self.values[i] + z * strength
        })
    }

    /// Draws a random vector.
    ///
    /// Each dimension is an independent standard-normal draw (scaled by 1.5 for the
    /// extended dimensions), clamped to `[0, 1]`.
    #[must_use]
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_fn(|i| {
            let z: f32 = rng.sample(StandardNormal);
            let z = if i >= EXTENDED_RANGE_START {
                z * EXTENDED_RANGE_SCALE
            } else {
                z
            };
            z.clamp(0.0, 1.0)
        })
    }

    /// Returns the largest absolute component.
    #[must_use]
    pub fn max_abs(&self) -> f32 {
        self.values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}

impl Index<usize> for BehaviorWeights {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.values[index]
    }
}

impl Index<Weight> for BehaviorWeights {
    type Output = f32;

    fn index(&self, weight: Weight) -> &f32 {
        &self.values[weight.index()]
    }
}

impl Add for BehaviorWeights {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.values[i] + rhs.values[i])
    }
}

impl Sub for BehaviorWeights {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.values[i] - rhs.values[i])
    }
}

impl Mul<f32> for BehaviorWeights {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn sample_vectors() -> Vec<BehaviorWeights> {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        (0..20)
            .map(|_| BehaviorWeights::zero().noise(3.0, &mut rng))
            .collect()
    }

    #[test]
    fn test_clamp_is_idempotent() {
        for bounds in [WeightBounds::default(), WeightBounds::new(-2.0, 5.0)] {
            for w in sample_vectors() {
                let once = w.clamp(bounds);
                assert_eq!(once.clamp(bounds), once);
            }
        }
    }

    #[test]
    fn test_clamp_extended_dimensions_get_wider_range() {
        let w = BehaviorWeights::from_fn(|_| 10.0).clamp(WeightBounds::new(0.0, 2.0));
        for i in 0..EXTENDED_RANGE_START {
            assert_eq!(w.get(i), 2.0);
        }
        for i in EXTENDED_RANGE_START..WEIGHT_COUNT {
            assert_eq!(w.get(i), 3.0);
        }

        let w = BehaviorWeights::from_fn(|_| -10.0).clamp(WeightBounds::new(-1.0, 2.0));
        assert!(w.as_slice().iter().all(|v| *v == -1.0));
    }

    #[test]
    fn test_clamp_with_inverted_bounds_does_not_panic() {
        let w = BehaviorWeights::from_fn(|_| 0.5).clamp(WeightBounds::new(1.0, 0.0));
        assert_eq!(w.clamp(WeightBounds::new(1.0, 0.0)), w);
    }

    #[test]
    fn test_array_roundtrip() {
        for w in sample_vectors() {
            assert_eq!(BehaviorWeights::from_array(&w.to_array()).unwrap(), w);
        }
    }

    #[test]
    fn test_from_array_rejects_wrong_length() {
        let err = BehaviorWeights::from_array(&[0.0; 28]).unwrap_err();
        assert_eq!(err.expected, WEIGHT_COUNT);
        assert_eq!(err.actual, 28);
        assert_eq!(err.to_string(), "expected 29 weights, got 28");
        assert!(BehaviorWeights::from_array(&[0.0; 30]).is_err());
        assert!(BehaviorWeights::from_array(&[]).is_err());
    }

    #[test]
    fn test_perturb_changes_only_one_coordinate() {
        for w in sample_vectors() {
            for i in [0, 7, EXTENDED_RANGE_START, WEIGHT_COUNT - 1] {
                let p = w.perturb(i, 0.5);
                for j in 0..WEIGHT_COUNT {
                    if j == i {
                        assert_eq!(p.get(j), w.get(j) + 0.5);
                    } else {
                        assert_eq!(p.get(j), w.get(j));
                    }
                }
            }
        }
    }

    #[test]
    fn test_perturb_does_not_clamp() {
        let w = BehaviorWeights::zero().perturb(3, 7.5);
        assert_eq!(w.get(3), 7.5);
        assert_eq!(w.clamp(WeightBounds::default()).get(3), 1.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = BehaviorWeights::from_fn(|i| i as f32);
        let b = BehaviorWeights::from_fn(|_| 1.0);
        assert_eq!((a + b).get(4), 5.0);
        assert_eq!((a - b).get(4), 3.0);
        assert_eq!((a * 2.0).get(4), 8.0);
        assert_eq!(a - a, BehaviorWeights::zero());
    }

    #[test]
    fn test_max_abs() {
        let w = BehaviorWeights::zero().set(2, 0.5).set(10, -3.0);
        assert_eq!(w.max_abs(), 3.0);
        assert_eq!(BehaviorWeights::zero().max_abs(), 0.0);
    }

    #[test]
    fn test_random_is_within_unit_range() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        for _ in 0..50 {
            let w = BehaviorWeights::random(&mut rng);
            assert!(w.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_noise_with_zero_strength_is_identity() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let w = BehaviorWeights::from_fn(|i| i as f32 * 0.1);
        assert_eq!(w.noise(0.0, &mut rng), w);
    }

    #[test]
    fn test_named_indices() {
        assert_eq!(Weight::Bravery.index(), 0);
        assert_eq!(Weight::OffBoard.index(), 8);
        assert_eq!(Weight::Victory.index(), EXTENDED_RANGE_START);
        assert_eq!(Weight::Curiosity.index(), 24);
        let w = BehaviorWeights::zero().with(Weight::Control, 0.3);
        assert_eq!(w[Weight::Control], 0.3);
        assert_eq!(w[23], 0.3);
    }

    #[test]
    fn test_serializes_as_flat_array() {
        let w = BehaviorWeights::zero().with(Weight::Bravery, 1.5);
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.starts_with("[1.5,0.0,"));
        let parsed: BehaviorWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, w);
    }
}
