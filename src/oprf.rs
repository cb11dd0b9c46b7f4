//! # OPRF base mode
//!
//! Implementation of the oblivious pseudorandom function protocol defined in
//! [RFC-9497](https://datatracker.ietf.org/doc/rfc9497), mode 0.
//!
//! A protocol run sequences `blind -> evaluate -> finalize`:
//!
//! ```rust,ignore
//! // Client blinds its input under a fresh factor.
//! let blinding = BlindingFactor::random(&mut rng);
//! let blinded = oprf::blind::<MySuite>(input, &blinding)?;
//!
//! // Server multiplies by its secret, learning nothing about the input.
//! let evaluated = secret.evaluate(&blinded);
//!
//! // Client unblinds and hashes down to the protocol output.
//! let output = oprf::finalize::<MySuite>(input, &blinding, &evaluated)?;
//! ```
//!
//! For identical input and key the output is deterministic regardless of the
//! blinding factor.

use crate::{
    BlindedElement, BlindingFactor, Error, EvaluatedElement, HashOutput, ScalarField, Secret,
    Suite, codec, utils,
};
use ark_ec::CurveGroup;
use ark_ff::{Field, Zero};
use ark_std::vec::Vec;

/// Protocol mode identifier (`modeOPRF`).
pub const MODE_OPRF: u8 = 0x00;

/// `CreateContextString` from RFC-9497 section 3.1:
/// `"OPRFV1-" || mode || "-" || identifier`.
pub fn context_string<S: Suite>() -> Vec<u8> {
    let mut ctx = b"OPRFV1-".to_vec();
    ctx.push(MODE_OPRF);
    ctx.push(b'-');
    ctx.extend_from_slice(S::SUITE_ID);
    ctx
}

fn tagged_context<S: Suite>(tag: &[u8]) -> Vec<u8> {
    let mut dst = tag.to_vec();
    dst.extend_from_slice(&context_string::<S>());
    dst
}

/// Domain separation tag for `HashToGroup`.
pub fn hash_to_group_dst<S: Suite>() -> Vec<u8> {
    tagged_context::<S>(b"HashToGroup-")
}

/// Domain separation tag for `HashToScalar`.
pub fn hash_to_scalar_dst<S: Suite>() -> Vec<u8> {
    tagged_context::<S>(b"HashToScalar-")
}

/// Domain separation tag for `DeriveKeyPair`.
///
/// No separator between label and context, per RFC-9497 section 3.2.1.
pub fn derive_key_pair_dst<S: Suite>() -> Vec<u8> {
    tagged_context::<S>(b"DeriveKeyPair")
}

/// `HashToScalar` under the suite's protocol context.
pub fn hash_to_scalar<S: Suite>(input: &[u8]) -> Result<ScalarField<S>, Error> {
    S::data_to_scalar(input, &hash_to_scalar_dst::<S>())
}

/// Deterministic key derivation (`DeriveKeyPair` in RFC-9497 section 3.2.1).
///
/// Hashes `seed`, the length-framed `info` and a retry counter to a scalar,
/// bumping the counter on the cryptographically negligible zero outcome.
pub fn derive_key_pair<S: Suite>(seed: &[u8], info: &[u8]) -> Result<Secret<S>, Error> {
    let dst = derive_key_pair_dst::<S>();

    let mut buf = seed.to_vec();
    buf.extend_from_slice(&utils::i2osp(info.len() as u64, 2)?);
    buf.extend_from_slice(info);
    buf.push(0x00);
    let ctr_pos = buf.len() - 1;

    for counter in 0..=255u8 {
        buf[ctr_pos] = counter;
        let scalar = S::data_to_scalar(&buf, &dst)?;
        if !scalar.is_zero() {
            return Secret::from_scalar(scalar);
        }
    }
    Err(Error::DeriveKeyPairExhausted)
}

/// Client-side blinding (`Blind` in RFC-9497 section 3.3.1, with a
/// caller-provided blind).
///
/// Hashes `input` to the group and multiplies by the blinding factor,
/// hiding the input point from the evaluator.
pub fn blind<S: Suite>(
    input: &[u8],
    blinding: &BlindingFactor<S>,
) -> Result<BlindedElement<S>, Error> {
    let point = S::data_to_point(input)?;
    Ok(BlindedElement(
        utils::mul_secret::<S>(point, blinding.0).into_affine(),
    ))
}

/// Client-side unblinding and output hashing (`Finalize` in RFC-9497
/// section 3.3.1).
///
/// Multiplies the evaluated element by the blinding factor's inverse and
/// hashes the length-framed transcript down to the protocol output.
pub fn finalize<S: Suite>(
    input: &[u8],
    blinding: &BlindingFactor<S>,
    evaluated: &EvaluatedElement<S>,
) -> Result<HashOutput<S>, Error> {
    let inverse = blinding.0.inverse().ok_or(Error::WeakScalar)?;
    let unblinded = (evaluated.0 * inverse).into_affine();
    let issued = codec::point_encode::<S>(&unblinded);

    let mut transcript = utils::i2osp(input.len() as u64, 2)?;
    transcript.extend_from_slice(input);
    transcript.extend_from_slice(&utils::i2osp(issued.len() as u64, 2)?);
    transcript.extend_from_slice(&issued);
    transcript.extend_from_slice(b"Finalize");

    Ok(utils::hash::<S::Hasher>(&transcript))
}
