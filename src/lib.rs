//! # Oblivious Pseudorandom Function
//!
//! This library implements the OPRF protocol described in
//! [RFC9497](https://datatracker.ietf.org/doc/rfc9497) in its base mode
//! (mode 0), together with the full RFC-9380 hash-to-curve pipeline the
//! protocol is built on.
//!
//! It leverages the [Arkworks](https://github.com/arkworks-rs) framework and
//! supports customization of scheme parameters.
//!
//! ## What is an OPRF?
//!
//! An Oblivious Pseudorandom Function is a two-party protocol computing
//! `F(skS, input)` where:
//!
//! - **Obliviousness**: the server evaluating the function never sees `input`
//!   (nor the output), and the client never sees the server key `skS`
//! - **Determinism**: for a fixed server key, equal inputs always yield equal
//!   outputs, regardless of the per-call blinding
//! - **Pseudorandomness**: without `skS`, outputs are indistinguishable from
//!   random; distinct inputs or distinct keys produce unrelated outputs
//!
//! This makes an OPRF the natural primitive for deriving stable identifiers
//! from sensitive data: two clients submitting the same value to the same
//! server agree on the identifier, while the server learns nothing about the
//! value and cannot link identifiers back to plaintexts.
//!
//! ## Built-in suites
//!
//! - **P256-SHA256**: OPRF(P-256, SHA-256) per RFC-9497 section 4.1, with
//!   hash-to-curve suite `P256_XMD:SHA-256_SSWU_RO_`.
//! - **secp256k1** (feature `secp256k1`): the `secp256k1_XMD:SHA-256_SSWU_RO_`
//!   hash-to-curve target, exercising the isogeny-based mapping variant. No
//!   OPRF suite is defined over it.
//!
//! ## Basic Usage
//!
//! ```rust,ignore
//! use ark_oprf::suites::p256::*;
//!
//! let mut rng = ark_std::rand::rngs::OsRng;
//!
//! // Server side: a long-lived secret key and process identifier.
//! let server = Server::random(&mut rng);
//!
//! // Client side: derive a stable identity key for some sensitive value.
//! let client = Client::new();
//! let key = client.convert_to_identity_key(&server, "alice@example.com", &mut rng)?;
//! ```
//!
//! ## Features
//!
//! - `default`: `std`
//! - `std`: client/server components and uuid-based request tracing
//! - `secret-split`: point scalar multiplication with secret split. Secret
//!   scalar is split into the sum of two scalars, which randomly mutate but
//!   retain the same sum. Incurs 2x penalty in secret scalar multiplications,
//!   but provides side channel defenses.
//! - `secp256k1`: the isogeny-based hash-to-curve target
//! - `asm`: assembly implementation of some low level operations

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

use ark_ec::{CurveConfig, CurveGroup};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::UniformRand;
use ark_std::rand::RngCore;

use digest::{Digest, core_api::BlockSizeUser};
use zeroize::Zeroize;

pub mod codec;
pub mod hash2curve;
pub mod oprf;
pub mod suites;
pub mod utils;

#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
pub mod server;

/// Re-export stuff that may be useful downstream.
pub mod reexports {
    pub use ark_ec;
    pub use ark_ff;
    pub use ark_serialize;
    pub use ark_std;
}

use hash2curve::swu::SwuConfig;

pub type AffinePoint<S> = ark_ec::short_weierstrass::Affine<<S as Suite>::Config>;
pub type BaseField<S> = <<S as Suite>::Config as ark_ec::CurveConfig>::BaseField;
pub type ScalarField<S> = <<S as Suite>::Config as ark_ec::CurveConfig>::ScalarField;

pub type HashOutput<S> = digest::Output<<S as Suite>::Hasher>;

/// Overarching errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Malformed hex in a wire message.
    InvalidHex,
    /// Decoded point is off the curve, or is the point at infinity.
    OffCurvePoint,
    /// Byte expansion length out of range.
    InvalidLength,
    /// Unusable domain separation tag.
    InvalidDst,
    /// Key derivation ran out of counter space without a usable scalar.
    DeriveKeyPairExhausted,
    /// Secret scalar or blinding factor is zero.
    WeakScalar,
}

impl From<ark_serialize::SerializationError> for Error {
    fn from(_err: ark_serialize::SerializationError) -> Self {
        Error::OffCurvePoint
    }
}

impl From<hex::FromHexError> for Error {
    fn from(_err: hex::FromHexError) -> Self {
        Error::InvalidHex
    }
}

/// Defines a cipher suite.
///
/// This trait can be used to easily implement an OPRF which follows the
/// guidelines given by RFC-9497 section 4.
///
/// Every suite operates over a short Weierstrass curve carrying the
/// parameters of the RFC-9380 simplified SWU mapping.
pub trait Suite: Copy
where
    <Self::Config as CurveConfig>::BaseField: PrimeField,
{
    /// Suite identifier (aka `identifier` in RFC-9497).
    const SUITE_ID: &'static [u8];

    /// Curve configuration, including the hash-to-curve mapping parameters.
    type Config: SwuConfig;

    /// Overarching hasher.
    ///
    /// Used wherever a hash is required: byte expansion, key derivation,
    /// output finalization.
    type Hasher: Digest + BlockSizeUser;

    /// Overarching codec.
    ///
    /// Used wherever we need to encode/decode points and scalars.
    type Codec: codec::Codec<Self>;

    /// Hash data to a curve point (`HashToGroup` in RFC-9497).
    ///
    /// Uses the random-oracle hash-to-curve construction of RFC-9380 under
    /// the suite's protocol context.
    #[inline(always)]
    fn data_to_point(data: &[u8]) -> Result<AffinePoint<Self>, Error> {
        hash2curve::hash_to_curve::<Self::Config, Self::Hasher>(
            data,
            &oprf::hash_to_group_dst::<Self>(),
        )
    }

    /// Hash data to a scalar under the given domain separation tag.
    ///
    /// `HashToScalar` in RFC-9497: same byte expansion as [`Self::data_to_point`],
    /// reduced modulo the group order instead of the field prime.
    #[inline(always)]
    fn data_to_scalar(data: &[u8], dst: &[u8]) -> Result<ScalarField<Self>, Error> {
        Ok(hash2curve::hash_to_field::<ScalarField<Self>, Self::Hasher>(data, dst, 1)?[0])
    }
}

/// Secret key for OPRF evaluation.
///
/// Exclusively owned by the evaluating server. The scalar is never zero and
/// is automatically zeroized when the struct is dropped.
pub struct Secret<S: Suite> {
    // Secret scalar.
    pub scalar: ScalarField<S>,
}

impl<S: Suite> core::fmt::Debug for Secret<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Secret").field("scalar", &self.scalar).finish()
    }
}

impl<S: Suite> Clone for Secret<S> {
    fn clone(&self) -> Self {
        Self { scalar: self.scalar }
    }
}

impl<S: Suite> PartialEq for Secret<S> {
    fn eq(&self, other: &Self) -> bool {
        self.scalar == other.scalar
    }
}

impl<S: Suite> Drop for Secret<S> {
    fn drop(&mut self) {
        self.scalar.zeroize()
    }
}

impl<S: Suite> CanonicalSerialize for Secret<S> {
    fn serialize_with_mode<W: ark_std::io::prelude::Write>(
        &self,
        writer: W,
        compress: ark_serialize::Compress,
    ) -> Result<(), ark_serialize::SerializationError> {
        self.scalar.serialize_with_mode(writer, compress)
    }

    fn serialized_size(&self, compress: ark_serialize::Compress) -> usize {
        self.scalar.serialized_size(compress)
    }
}

impl<S: Suite> CanonicalDeserialize for Secret<S> {
    fn deserialize_with_mode<R: ark_std::io::prelude::Read>(
        reader: R,
        compress: ark_serialize::Compress,
        validate: ark_serialize::Validate,
    ) -> Result<Self, ark_serialize::SerializationError> {
        let scalar = <ScalarField<S> as CanonicalDeserialize>::deserialize_with_mode(
            reader, compress, validate,
        )?;
        Self::from_scalar(scalar).map_err(|_| ark_serialize::SerializationError::InvalidData)
    }
}

impl<S: Suite> ark_serialize::Valid for Secret<S> {
    fn check(&self) -> Result<(), ark_serialize::SerializationError> {
        self.scalar.check()
    }
}

impl<S: Suite> Secret<S> {
    /// Construct a `Secret` from the given scalar.
    ///
    /// Fails with [`Error::WeakScalar`] for the zero scalar.
    pub fn from_scalar(scalar: ScalarField<S>) -> Result<Self, Error> {
        if scalar.is_zero() {
            return Err(Error::WeakScalar);
        }
        Ok(Self { scalar })
    }

    /// Construct a `Secret` deterministically from a seed and key info.
    ///
    /// `DeriveKeyPair` in RFC-9497.
    pub fn from_seed(seed: &[u8], info: &[u8]) -> Result<Self, Error> {
        oprf::derive_key_pair::<S>(seed, info)
    }

    /// Construct a `Secret` using the provided randomness source.
    ///
    /// Samples uniformly in `[1, n-1]`, rejecting zero.
    pub fn from_rand(rng: &mut impl RngCore) -> Self {
        loop {
            let scalar = ScalarField::<S>::rand(rng);
            if !scalar.is_zero() {
                return Self { scalar };
            }
        }
    }

    /// Evaluate a blinded element (`BlindEvaluate` in RFC-9497).
    pub fn evaluate(&self, element: &BlindedElement<S>) -> EvaluatedElement<S> {
        EvaluatedElement(utils::mul_secret::<S>(element.0, self.scalar).into_affine())
    }
}

/// Per-invocation blinding factor, exclusively owned by the client call.
///
/// Uniform in `[1, n-1]`, independent across calls, and discarded after
/// [`oprf::finalize`]. Zeroized on drop.
pub struct BlindingFactor<S: Suite>(pub(crate) ScalarField<S>);

impl<S: Suite> core::fmt::Debug for BlindingFactor<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("BlindingFactor").field(&self.0).finish()
    }
}

impl<S: Suite> Clone for BlindingFactor<S> {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}

impl<S: Suite> PartialEq for BlindingFactor<S> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<S: Suite> Drop for BlindingFactor<S> {
    fn drop(&mut self) {
        self.0.zeroize()
    }
}

impl<S: Suite> BlindingFactor<S> {
    /// Fresh uniform blinding factor, rejecting zero.
    pub fn random(rng: &mut impl RngCore) -> Self {
        loop {
            let scalar = ScalarField::<S>::rand(rng);
            if !scalar.is_zero() {
                return Self(scalar);
            }
        }
    }

    /// Construct from a known scalar.
    ///
    /// Fails with [`Error::WeakScalar`] for the zero scalar. Mostly useful
    /// for reproducing protocol transcripts.
    pub fn from_scalar(scalar: ScalarField<S>) -> Result<Self, Error> {
        if scalar.is_zero() {
            return Err(Error::WeakScalar);
        }
        Ok(Self(scalar))
    }
}

/// Blinded input element, sent from client to server.
///
/// Distinct from [`EvaluatedElement`] at the type level so the two protocol
/// directions cannot be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct BlindedElement<S: Suite>(pub AffinePoint<S>);

/// Evaluated element, sent from server back to client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct EvaluatedElement<S: Suite>(pub AffinePoint<S>);

/// Type aliases for the given suite.
#[macro_export]
macro_rules! suite_types {
    ($suite:ident) => {
        #[allow(dead_code)]
        pub type Secret = $crate::Secret<$suite>;
        #[allow(dead_code)]
        pub type BlindingFactor = $crate::BlindingFactor<$suite>;
        #[allow(dead_code)]
        pub type BlindedElement = $crate::BlindedElement<$suite>;
        #[allow(dead_code)]
        pub type EvaluatedElement = $crate::EvaluatedElement<$suite>;
        #[allow(dead_code)]
        pub type AffinePoint = $crate::AffinePoint<$suite>;
        #[allow(dead_code)]
        pub type ScalarField = $crate::ScalarField<$suite>;
        #[allow(dead_code)]
        pub type BaseField = $crate::BaseField<$suite>;
        #[cfg(feature = "std")]
        #[allow(dead_code)]
        pub type Client = $crate::client::Client<$suite>;
        #[cfg(feature = "std")]
        #[allow(dead_code)]
        pub type Server = $crate::server::Server<$suite>;
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suites::p256::P256Sha256;

    #[test]
    fn secret_rejects_zero_scalar() {
        let zero = ScalarField::<P256Sha256>::zero();
        assert_eq!(
            Secret::<P256Sha256>::from_scalar(zero).unwrap_err(),
            Error::WeakScalar
        );
        assert_eq!(
            BlindingFactor::<P256Sha256>::from_scalar(zero).unwrap_err(),
            Error::WeakScalar
        );
    }

    #[test]
    fn secret_serialization_roundtrip() {
        let rng = &mut ark_std::test_rng();
        let secret = Secret::<P256Sha256>::from_rand(rng);

        let mut buf = Vec::new();
        secret.serialize_compressed(&mut buf).unwrap();
        let secret2 = Secret::<P256Sha256>::deserialize_compressed(&mut &buf[..]).unwrap();
        assert_eq!(secret.scalar, secret2.scalar);
    }
}
