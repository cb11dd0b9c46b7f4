//! Rational isogeny maps between short Weierstrass curves
//! (RFC-9380 appendix E).

use ark_ec::AffineRepr;
use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::Field;

/// Rational map `(x, y) -> (x_num(x) / x_den(x), y * y_num(x) / y_den(x))`
/// carrying points from an isogenous curve onto the target curve.
///
/// Coefficient slices are in ascending powers of `x`.
#[derive(Debug, Clone, Copy)]
pub struct IsogenyMap<P: SWCurveConfig> {
    pub x_num: &'static [P::BaseField],
    pub x_den: &'static [P::BaseField],
    pub y_num: &'static [P::BaseField],
    pub y_den: &'static [P::BaseField],
}

impl<P: SWCurveConfig> IsogenyMap<P> {
    /// Apply the map.
    ///
    /// Exceptional inputs, those with a vanishing denominator, land on the
    /// point at infinity per the RFC's `inv0` convention.
    pub fn apply(&self, x: P::BaseField, y: P::BaseField) -> Affine<P> {
        let (Some(x_den_inv), Some(y_den_inv)) = (
            eval(self.x_den, x).inverse(),
            eval(self.y_den, x).inverse(),
        ) else {
            return Affine::zero();
        };
        Affine::new_unchecked(
            eval(self.x_num, x) * x_den_inv,
            y * eval(self.y_num, x) * y_den_inv,
        )
    }
}

/// Horner evaluation, coefficients in ascending powers.
fn eval<F: Field>(coeffs: &[F], x: F) -> F {
    coeffs.iter().rev().fold(F::ZERO, |acc, c| acc * x + *c)
}
