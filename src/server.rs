//! OPRF server component.
//!
//! The server owns the evaluation key for its whole lifetime, keeps no
//! per-client state, and exposes a single [`Evaluator::process`] operation.
//! All linkage between inputs and outputs is carried by the secret scalar
//! and never leaves the server.

use crate::{BlindedElement, Error, Secret, Suite, codec};
use ark_std::rand::RngCore;
use uuid::Uuid;

/// Blinded-element evaluation request.
///
/// The element travels as 33-byte compressed SEC1, lowercase hex.
/// `request_id` is an opaque tracing token; it never enters the
/// computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub hex_coded_ec_point: String,
    pub request_id: String,
}

/// Evaluation response.
///
/// `process_identifier` names the server instance that produced the
/// element, so downstream consumers can namespace outputs by server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub hex_coded_ec_point: String,
    pub process_identifier: String,
}

/// Message channel to an evaluating server.
///
/// In-process deployments implement this directly with [`Server`]; remote
/// deployments adapt whatever transport they use behind it. Errors from
/// the evaluation side propagate to the caller unchanged.
pub trait Evaluator {
    /// Evaluate one blinded element.
    fn process(&self, request: &Request) -> Result<Response, Error>;
}

/// Server of the OPRF protocol.
///
/// Both the secret and the process identifier are fixed at construction;
/// every operation afterwards is read-only, so a single instance can be
/// shared freely across threads.
#[derive(Debug)]
pub struct Server<S: Suite> {
    secret: Secret<S>,
    process_identifier: String,
}

impl<S: Suite> Server<S> {
    /// Server with a freshly generated random key.
    pub fn random(rng: &mut impl RngCore) -> Self {
        Self::from_secret(Secret::from_rand(rng))
    }

    /// Server with a key deterministically derived from `seed` and `info`
    /// (`DeriveKeyPair` in RFC-9497).
    ///
    /// The process identifier is still freshly generated: two servers
    /// derived from the same seed evaluate identically but remain
    /// distinguishable instances.
    pub fn from_seed(seed: &[u8], info: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_secret(Secret::from_seed(seed, info)?))
    }

    /// Server wrapping an existing secret.
    pub fn from_secret(secret: Secret<S>) -> Self {
        Self {
            secret,
            process_identifier: format!("SP:{}", Uuid::new_v4()),
        }
    }

    /// Printable token identifying this server instance in issued keys.
    pub fn process_identifier(&self) -> &str {
        &self.process_identifier
    }
}

impl<S: Suite> Evaluator for Server<S> {
    /// `BlindEvaluate` over the wire encoding.
    ///
    /// Parses and validates the incoming element (on-curve, not the
    /// identity), multiplies it by the secret scalar and returns the
    /// normalised result.
    fn process(&self, request: &Request) -> Result<Response, Error> {
        let element = BlindedElement(codec::point_from_hex::<S>(&request.hex_coded_ec_point)?);
        let evaluated = self.secret.evaluate(&element);
        Ok(Response {
            hex_coded_ec_point: codec::point_to_hex::<S>(&evaluated.0),
            process_identifier: self.process_identifier.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suites::p256::P256Sha256;
    use crate::{BlindingFactor, oprf};

    fn request(hex_coded_ec_point: &str) -> Request {
        Request {
            hex_coded_ec_point: hex_coded_ec_point.into(),
            request_id: "test-request".into(),
        }
    }

    #[test]
    fn process_evaluates_valid_elements() {
        let rng = &mut ark_std::test_rng();
        let server = Server::<P256Sha256>::random(rng);

        let blinding = BlindingFactor::random(rng);
        let blinded = oprf::blind::<P256Sha256>(b"some input", &blinding).unwrap();
        let wire = codec::point_to_hex::<P256Sha256>(&blinded.0);

        let response = server.process(&request(&wire)).unwrap();
        assert_eq!(response.process_identifier, server.process_identifier());
        let evaluated = codec::point_from_hex::<P256Sha256>(&response.hex_coded_ec_point).unwrap();
        assert_eq!(evaluated, server.secret.evaluate(&blinded).0);
    }

    #[test]
    fn process_rejects_malformed_wire_data() {
        let rng = &mut ark_std::test_rng();
        let server = Server::<P256Sha256>::random(rng);

        // Not hex at all.
        assert_eq!(
            server.process(&request("zz")).unwrap_err(),
            Error::InvalidHex
        );
        // Valid hex, wrong length.
        assert_eq!(
            server.process(&request("02ab")).unwrap_err(),
            Error::InvalidHex
        );
        // Identity has no wire encoding.
        assert_eq!(
            server.process(&request("00")).unwrap_err(),
            Error::InvalidHex
        );
        // Right length, but x is not a coordinate of any curve point.
        let off_curve = format!("02{}", "ff".repeat(32));
        assert_eq!(
            server.process(&request(&off_curve)).unwrap_err(),
            Error::OffCurvePoint
        );
    }

    #[test]
    fn process_identifier_shape() {
        let rng = &mut ark_std::test_rng();
        let server = Server::<P256Sha256>::random(rng);
        let other = Server::<P256Sha256>::random(rng);

        assert!(server.process_identifier().starts_with("SP:"));
        assert_ne!(server.process_identifier(), other.process_identifier());
    }

    #[test]
    fn derived_servers_share_evaluation_but_not_identity() {
        let rng = &mut ark_std::test_rng();
        let s1 = Server::<P256Sha256>::from_seed(&[0xa3; 32], b"test key").unwrap();
        let s2 = Server::<P256Sha256>::from_seed(&[0xa3; 32], b"test key").unwrap();

        let blinding = BlindingFactor::random(rng);
        let blinded = oprf::blind::<P256Sha256>(b"input", &blinding).unwrap();
        let wire = codec::point_to_hex::<P256Sha256>(&blinded.0);

        let r1 = s1.process(&request(&wire)).unwrap();
        let r2 = s2.process(&request(&wire)).unwrap();
        assert_eq!(r1.hex_coded_ec_point, r2.hex_coded_ec_point);
        assert_ne!(r1.process_identifier, r2.process_identifier);
    }
}
