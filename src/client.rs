//! OPRF client component.
//!
//! Stateless orchestration of one protocol run: blind, round-trip through
//! an [`Evaluator`], unblind, finalize. The blinding factor never outlives
//! the call.

use core::marker::PhantomData;

use crate::server::{Evaluator, Request};
use crate::{BlindingFactor, Error, EvaluatedElement, Suite, codec, oprf};
use ark_std::rand::RngCore;
use uuid::Uuid;

/// Client of the OPRF protocol.
#[derive(Debug, Default, Copy, Clone)]
pub struct Client<S: Suite>(PhantomData<S>);

impl<S: Suite> Client<S> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Derive the stable identity key for `sensitive_data` against `server`.
    ///
    /// Returns `"<process-identifier>:<hex(output)>"`. The output is
    /// deterministic for a fixed server and input, independent of the
    /// per-call blinding; the server learns nothing about `sensitive_data`.
    ///
    /// Errors surfaced by the evaluator (malformed hex, off-curve points,
    /// protocol violations) propagate unchanged.
    pub fn convert_to_identity_key(
        &self,
        server: &impl Evaluator,
        sensitive_data: &str,
        rng: &mut impl RngCore,
    ) -> Result<String, Error> {
        let input = sensitive_data.as_bytes();

        let blinding = BlindingFactor::<S>::random(rng);
        let blinded = oprf::blind::<S>(input, &blinding)?;

        let request = Request {
            hex_coded_ec_point: codec::point_to_hex::<S>(&blinded.0),
            request_id: Uuid::new_v4().to_string(),
        };
        let response = server.process(&request)?;

        let element = EvaluatedElement(codec::point_from_hex::<S>(&response.hex_coded_ec_point)?);
        let output = oprf::finalize::<S>(input, &blinding, &element)?;

        Ok(format!(
            "{}:{}",
            response.process_identifier,
            hex::encode(output)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{Response, Server};
    use crate::suites::p256::P256Sha256;

    type Client = super::Client<P256Sha256>;

    #[test]
    fn identical_inputs_agree_across_clients() {
        let rng = &mut ark_std::test_rng();
        let server = Server::<P256Sha256>::random(rng);

        let k1 = Client::new()
            .convert_to_identity_key(&server, "alice@example.com", rng)
            .unwrap();
        let k2 = Client::new()
            .convert_to_identity_key(&server, "alice@example.com", rng)
            .unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn distinct_inputs_diverge() {
        let rng = &mut ark_std::test_rng();
        let server = Server::<P256Sha256>::random(rng);
        let client = Client::new();

        let k1 = client
            .convert_to_identity_key(&server, "alice@example.com", rng)
            .unwrap();
        let k2 = client
            .convert_to_identity_key(&server, "bob@example.com", rng)
            .unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn distinct_servers_diverge() {
        let rng = &mut ark_std::test_rng();
        let s1 = Server::<P256Sha256>::random(rng);
        let s2 = Server::<P256Sha256>::random(rng);
        let client = Client::new();

        let k1 = client
            .convert_to_identity_key(&s1, "alice@example.com", rng)
            .unwrap();
        let k2 = client
            .convert_to_identity_key(&s2, "alice@example.com", rng)
            .unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn identity_key_format() {
        let rng = &mut ark_std::test_rng();
        let server = Server::<P256Sha256>::random(rng);

        let key = Client::new()
            .convert_to_identity_key(&server, "alice@example.com", rng)
            .unwrap();

        let (prefix, digest) = key.rsplit_once(':').unwrap();
        assert_eq!(prefix, server.process_identifier());
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
    }

    #[test]
    fn evaluator_errors_propagate() {
        struct Broken;
        impl Evaluator for Broken {
            fn process(&self, _request: &Request) -> Result<Response, Error> {
                Err(Error::OffCurvePoint)
            }
        }
        struct Garbage;
        impl Evaluator for Garbage {
            fn process(&self, _request: &Request) -> Result<Response, Error> {
                Ok(Response {
                    hex_coded_ec_point: "not hex".into(),
                    process_identifier: "SP:bogus".into(),
                })
            }
        }

        let rng = &mut ark_std::test_rng();
        let client = Client::new();
        assert_eq!(
            client.convert_to_identity_key(&Broken, "x", rng).unwrap_err(),
            Error::OffCurvePoint
        );
        assert_eq!(
            client.convert_to_identity_key(&Garbage, "x", rng).unwrap_err(),
            Error::InvalidHex
        );
    }
}
