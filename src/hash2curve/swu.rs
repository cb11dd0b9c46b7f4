//! Simplified Shallue–van de Woestijne–Ulas mapping (RFC-9380 section 6.6.2).
//!
//! Deterministically maps base field elements to points of a short
//! Weierstrass curve. Curves with `A * B != 0` are mapped directly; curves
//! where the map is degenerate (such as secp256k1, with `A = 0`) run the
//! map on an isogenous curve and carry the result over with the rational
//! map from [`super::isogeny`].

use super::isogeny::IsogenyMap;
use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::{BigInteger, Field, One, PrimeField, Zero};

/// Curve configuration for the simplified SWU mapping.
///
/// Only fields with `p = 3 (mod 4)` are supported: [`sqrt_ratio`] relies on
/// square roots by exponentiation with `(p + 1) / 4`.
pub trait SwuConfig: SWCurveConfig
where
    Self::BaseField: PrimeField,
{
    /// The non-square `Z` from the RFC-9380 section 8 suite tables.
    const Z: Self::BaseField;

    /// `A` coefficient of the curve the map targets: the curve itself, or
    /// an isogenous curve when [`Self::ISOGENY`] is present.
    const SWU_A: Self::BaseField = <Self as SWCurveConfig>::COEFF_A;

    /// `B` coefficient of the curve the map targets.
    const SWU_B: Self::BaseField = <Self as SWCurveConfig>::COEFF_B;

    /// `c2 = (-Z)^((p + 1) / 4)`, the square root of `-Z`.
    ///
    /// `-Z` is a square exactly because `Z` is not and `p = 3 (mod 4)`.
    const SQRT_RATIO_C2: Self::BaseField;

    /// Rational map carrying points from the isogenous curve onto this
    /// curve. `None` when the map targets the curve directly.
    const ISOGENY: Option<IsogenyMap<Self>> = None;
}

/// Tagged output of the SWU map.
///
/// The map lands either directly on the target curve or on the isogenous
/// curve, in which case the pending rational map travels with the
/// coordinates until the caller applies it.
#[derive(Debug, Clone, Copy)]
pub enum MapToCurve<P: SwuConfig>
where
    P::BaseField: PrimeField,
{
    /// Point on the target curve.
    Target(Affine<P>),
    /// Point on the isogenous curve, with the map still to apply.
    Isogenous {
        x: P::BaseField,
        y: P::BaseField,
        map: IsogenyMap<P>,
    },
}

impl<P: SwuConfig> MapToCurve<P>
where
    P::BaseField: PrimeField,
{
    /// Land on the target curve, applying the isogeny when the variant
    /// demands it.
    pub fn into_affine(self) -> Affine<P> {
        match self {
            MapToCurve::Target(pt) => pt,
            MapToCurve::Isogenous { x, y, map } => map.apply(x, y),
        }
    }
}

/// `sgn0` for prime fields: the parity of the canonical representative
/// (RFC-9380 section 4.1).
#[inline(always)]
fn sgn0<F: PrimeField>(x: &F) -> bool {
    x.into_bigint().is_odd()
}

/// Inversion extended with `inv0(0) = 0` (RFC-9380 section 4).
#[inline(always)]
fn inv0<F: Field>(x: F) -> F {
    x.inverse().unwrap_or(F::ZERO)
}

/// Square root of the ratio `u / v` for fields with `p = 3 (mod 4)`
/// (RFC-9380 appendix F.2.1.2).
///
/// Returns whether `u / v` is a square, together with `sqrt(u / v)` when it
/// is and `sqrt(Z * u / v)` when it is not.
pub fn sqrt_ratio<P: SwuConfig>(u: P::BaseField, v: P::BaseField) -> (bool, P::BaseField)
where
    P::BaseField: PrimeField,
{
    // c1 = (p - 3) / 4
    let mut c1 = <P::BaseField as PrimeField>::MODULUS;
    c1.sub_with_borrow(&3u64.into());
    c1.div2();
    c1.div2();

    let tv2 = u * v;
    let tv1 = v.square() * tv2;
    let y1 = tv1.pow(c1) * tv2;
    let is_square = y1.square() * v == u;
    let y = if is_square { y1 } else { y1 * P::SQRT_RATIO_C2 };
    (is_square, y)
}

/// Map a field element to a curve point, straight-line variant of
/// RFC-9380 appendix F.2.
pub fn map_to_curve<P: SwuConfig>(u: P::BaseField) -> MapToCurve<P>
where
    P::BaseField: PrimeField,
{
    let tv1 = P::Z * u.square();
    let mut tv2 = tv1.square() + tv1;
    let tv3 = P::SWU_B * (tv2 + P::BaseField::one());
    // tv4 is never zero: SWU_A != 0 and both CMOV operands are non-zero.
    let tv4 = P::SWU_A * if tv2.is_zero() { P::Z } else { -tv2 };
    tv2 = tv3.square();
    let mut tv6 = tv4.square();
    let mut tv5 = P::SWU_A * tv6;
    tv2 = (tv2 + tv5) * tv3;
    tv6 *= tv4;
    tv5 = P::SWU_B * tv6;
    tv2 += tv5;
    let mut x = tv1 * tv3;
    let (is_gx1_square, y1) = sqrt_ratio::<P>(tv2, tv6);
    let mut y = tv1 * u * y1;
    if is_gx1_square {
        x = tv3;
        y = y1;
    }
    if sgn0(&u) != sgn0(&y) {
        y = -y;
    }
    x *= inv0(tv4);

    match P::ISOGENY {
        Some(map) => MapToCurve::Isogenous { x, y, map },
        None => MapToCurve::Target(Affine::new_unchecked(x, y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_secp256r1::{Config as P256Config, Fq};
    use ark_std::UniformRand;

    #[test]
    fn mapped_points_satisfy_curve_equation() {
        let rng = &mut ark_std::test_rng();
        for _ in 0..32 {
            let u = Fq::rand(rng);
            let pt = map_to_curve::<P256Config>(u).into_affine();
            assert!(pt.is_on_curve());
        }
        // Edge element: u = 0 must map to a valid point too.
        let pt = map_to_curve::<P256Config>(Fq::zero()).into_affine();
        assert!(pt.is_on_curve());
    }

    #[test]
    fn map_is_deterministic() {
        let rng = &mut ark_std::test_rng();
        let u = Fq::rand(rng);
        let a = map_to_curve::<P256Config>(u).into_affine();
        let b = map_to_curve::<P256Config>(u).into_affine();
        assert_eq!(a, b);
    }

    #[test]
    fn sqrt_ratio_contract() {
        let rng = &mut ark_std::test_rng();
        for _ in 0..32 {
            let u = Fq::rand(rng);
            let v = Fq::rand(rng);
            if v.is_zero() {
                continue;
            }
            let (is_square, y) = sqrt_ratio::<P256Config>(u, v);
            let ratio = u * v.inverse().unwrap();
            if is_square {
                assert_eq!(y.square(), ratio);
            } else {
                assert_eq!(y.square(), <P256Config as SwuConfig>::Z * ratio);
            }
        }
    }
}
