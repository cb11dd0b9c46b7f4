//! Hash-to-curve pipeline (RFC-9380).
//!
//! Layered bottom-up: uniform byte expansion ([`xmd`]), field element
//! derivation ([`hash_to_field`]), the simplified SWU mapping ([`swu`],
//! optionally through an [`isogeny`]), and the random-oracle
//! [`hash_to_curve`] construction tying them together.

pub mod isogeny;
pub mod swu;
pub mod xmd;

use crate::Error;
use ark_ec::short_weierstrass::Affine;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_std::vec::Vec;
use digest::{Digest, core_api::BlockSizeUser};
use swu::SwuConfig;

/// Target security level, in bits.
const SECURITY_BITS: usize = 128;

/// Expansion length per field element: `ceil((ceil(log2(p)) + k) / 8)`.
///
/// 48 bytes for the 256-bit moduli used by the built-in suites.
fn len_per_elem<F: PrimeField>() -> usize {
    (F::MODULUS_BIT_SIZE as usize + SECURITY_BITS).div_ceil(8)
}

/// Hash `msg` to `count` elements of the field `F` (RFC-9380 section 5.2).
///
/// The reduction modulus is `F`'s: instantiate with the curve base field
/// for map-to-curve, and with the scalar field for hash-to-scalar.
pub fn hash_to_field<F: PrimeField, H: Digest + BlockSizeUser>(
    msg: &[u8],
    dst: &[u8],
    count: usize,
) -> Result<Vec<F>, Error> {
    let len = len_per_elem::<F>();
    let uniform = xmd::expand_message_xmd::<H>(msg, dst, count * len)?;
    Ok(uniform
        .chunks_exact(len)
        .map(F::from_be_bytes_mod_order)
        .collect())
}

/// Hash `msg` to a point of the curve `P`, random-oracle construction
/// (RFC-9380 section 3, `hash_to_curve`).
///
/// Deterministic in `(msg, dst)`, and indistinguishable from a random
/// oracle into the group.
pub fn hash_to_curve<P: SwuConfig, H: Digest + BlockSizeUser>(
    msg: &[u8],
    dst: &[u8],
) -> Result<Affine<P>, Error>
where
    P::BaseField: PrimeField,
{
    let u = hash_to_field::<P::BaseField, H>(msg, dst, 2)?;
    let q0 = swu::map_to_curve::<P>(u[0]).into_affine();
    let q1 = swu::map_to_curve::<P>(u[1]).into_affine();
    let r = (q0.into_group() + q1).into_affine();
    // h_eff = 1 for the built-in suites; kept for uniformity.
    Ok(r.clear_cofactor())
}
