//! # OPRF P256-SHA256 suite
//!
//! Configuration (RFC-9497 section 4.1):
//!
//! *  `identifier = "P256-SHA256"`.
//!
//! *  The group G is the NIST P-256 elliptic curve, with the finite
//!    field and curve parameters as specified in Section 3.2.1.3 of
//!    [SP-800-186](https://csrc.nist.gov/pubs/sp/800/186/final). For this
//!    group, `Nh = 32`, `cofactor = 1`.
//!
//! *  `HashToGroup` is `hash_to_curve` with the suite
//!    `P256_XMD:SHA-256_SSWU_RO_` from RFC-9380: since `A != 0` the
//!    simplified SWU map targets the curve directly, with `Z = -10` per
//!    RFC-9380 section 8.2.
//!
//! *  `HashToScalar` is `hash_to_field` from RFC-9380 using `L = 48` and
//!    the group order as modulus.
//!
//! *  `SerializeElement` converts a group element to an octet string
//!    according to the compressed encoding of Section 2.3.3 of SECG1,
//!    giving `ptLen = 33`. `DeserializeElement` MUST fail for octet
//!    strings that do not decode to a curve point, and for the identity.
//!
//! *  The hash function `Hash` is SHA-256, with `hLen = 32`.

use crate::{Suite, codec, hash2curve::swu::SwuConfig, suite_types};
use ark_ff::MontFp;
use ark_secp256r1::{Config as P256Config, Fq};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct P256Sha256;

type ThisSuite = P256Sha256;

impl Suite for ThisSuite {
    const SUITE_ID: &'static [u8] = b"P256-SHA256";

    type Config = P256Config;
    type Hasher = sha2::Sha256;
    type Codec = codec::Sec1Codec;
}

impl SwuConfig for P256Config {
    /// RFC-9380 section 8.2: `Z = -10`.
    const Z: Fq = MontFp!(
        "115792089210356248762697446949407573530086143415290314195533631308867097853941"
    );

    /// `sqrt(10)`, since `-Z = 10`.
    const SQRT_RATIO_C2: Fq = MontFp!(
        "98751830959931149098939875837046369164425830923611575093225751906201254478975"
    );
}

suite_types!(ThisSuite);
