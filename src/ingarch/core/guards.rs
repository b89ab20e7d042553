//! Floors for the NB-INGARCH recursions, keeping μ_t and φ_t strictly positive.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the lower bounds applied to the
//! conditional mean and conditional dispersion on every write into the
//! recursion buffers and on every forecast step.
//!
//! Key behaviors
//! -------------
//! - Construct [`Floors`] values that enforce strict positivity and
//!   finiteness of both bounds.
//! - Reject invalid configurations via typed errors (`IngarchError`) instead
//!   of panicking at call sites.
//!
//! Invariants & assumptions
//! ------------------------
//! - `mean > 0.0` and `dispersion > 0.0`, both finite.
//! - Floors are applied with `f64::max`, so a `NaN` candidate value maps to
//!   the floor.
//!
//! Testing notes
//! -------------
//! - Unit tests validate acceptance of the defaults and rejection of
//!   non-positive and non-finite bounds.
use crate::{
    ingarch::errors::{IngarchError, IngarchResult},
    optimization::numerical_stability::{DISPERSION_FLOOR, MEAN_FLOOR, floor_at},
};
use serde::{Deserialize, Serialize};

/// Lower bounds for μ_t and φ_t.
///
/// Defaults: `mean = 0.01`, `dispersion = 0.001`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Floors {
    /// Lower bound for the conditional mean (strictly > 0).
    pub mean: f64,
    /// Lower bound for the conditional dispersion (strictly > 0).
    pub dispersion: f64,
}

impl Floors {
    /// Construct validated floors.
    ///
    /// Errors
    /// ------
    /// - `IngarchError::InvalidFloors` if either bound is non-finite or ≤ 0.
    pub fn new(mean: f64, dispersion: f64) -> IngarchResult<Self> {
        if !mean.is_finite() || !dispersion.is_finite() {
            return Err(IngarchError::InvalidFloors {
                mean_floor: mean,
                dispersion_floor: dispersion,
                reason: "Floors must be finite.",
            });
        }
        if mean <= 0.0 || dispersion <= 0.0 {
            return Err(IngarchError::InvalidFloors {
                mean_floor: mean,
                dispersion_floor: dispersion,
                reason: "Floors must be strictly positive.",
            });
        }
        Ok(Floors { mean, dispersion })
    }

    pub fn apply_mean(&self, mu: f64) -> f64 {
        floor_at(mu, self.mean)
    }

    pub fn apply_dispersion(&self, phi: f64) -> f64 {
        floor_at(phi, self.dispersion)
    }
}

impl Default for Floors {
    fn default() -> Self {
        Floors { mean: MEAN_FLOOR, dispersion: DISPERSION_FLOOR }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Ensure `Floors::new` accepts positive finite bounds and rejects the rest.
    //
    // Given
    // -----
    // - `(0.01, 0.001)`, `(0.0, 0.001)`, `(0.01, NaN)`.
    //
    // Expect
    // ------
    // - `Ok` for the first; `InvalidFloors` for the others.
    fn floors_new_validates_bounds() {
        assert_eq!(Floors::new(0.01, 0.001), Ok(Floors::default()));
        assert!(matches!(Floors::new(0.0, 0.001), Err(IngarchError::InvalidFloors { .. })));
        assert!(matches!(Floors::new(0.01, f64::NAN), Err(IngarchError::InvalidFloors { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Check floors clamp low and NaN values but pass larger ones.
    //
    // Given
    // -----
    // - Default floors; candidates `-3.0`, `NaN`, `2.5`.
    //
    // Expect
    // ------
    // - `0.01`, `0.001` (dispersion NaN), `2.5`.
    fn floors_apply_clamps_from_below() {
        let floors = Floors::default();
        assert_eq!(floors.apply_mean(-3.0), 0.01);
        assert_eq!(floors.apply_dispersion(f64::NAN), 0.001);
        assert_eq!(floors.apply_mean(2.5), 2.5);
    }
}
