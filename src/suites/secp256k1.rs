//! # secp256k1 hash-to-curve target
//!
//! The `secp256k1_XMD:SHA-256_SSWU_RO_` suite from RFC-9380 section 8.7.
//!
//! secp256k1 has `A = 0`, where the simplified SWU map degenerates, so the
//! map runs on a degree-3 isogenous curve `E'` and its output is carried
//! onto secp256k1 by the rational map of RFC-9380 appendix E.1.
//!
//! This module wires up the mapping pipeline only; no OPRF cipher suite is
//! defined over this curve.

use crate::hash2curve::{isogeny::IsogenyMap, swu::SwuConfig};
use ark_ff::MontFp;
use ark_secp256k1::{Config as Secp256k1Config, Fq};

/// `A'` of the isogenous curve `E'` (RFC-9380 appendix E.1).
const ISO_A: Fq = MontFp!(
    "28734576633528757162648956269730739219262246272443394170905244663053633733939"
);

/// `B'` of the isogenous curve `E'`.
const ISO_B: Fq = MontFp!("1771");

// 3-isogeny from E' to secp256k1, coefficients in ascending powers
// (RFC-9380 appendix E.1).
const ISO_X_NUM: &[Fq] = &[
    MontFp!("64328938465175664124206102782604393251816658147578091133031991115504908150983"),
    MontFp!("3540463234204664767867377763959255381561641196938647754971861192896365225345"),
    MontFp!("37676595701789655284650173187508961899444205326770530105295841645151729341026"),
    MontFp!("64328938465175664124206102782604393251816658147578091133031991115504908150924"),
];
const ISO_X_DEN: &[Fq] = &[
    MontFp!("95592507323525948732419199626899895302164312317343489384240252208201861084315"),
    MontFp!("107505182841474506714709588670204841388457878609653642868747406790547894725908"),
    MontFp!("1"),
];
const ISO_Y_NUM: &[Fq] = &[
    MontFp!("34308767181427020866243254817389009734302217678708315270950395261602617680444"),
    MontFp!("90176424683627901097894375140309208301239340832535417794535213712559228940707"),
    MontFp!("18838297850894827642325086593754480949722102663385265052647920822575864670513"),
    MontFp!("21442979488391888041402034260868131083938886049192697044343997038501636050308"),
];
const ISO_Y_DEN: &[Fq] = &[
    MontFp!("115792089237316195423570985008687907853269984665640564039457584007908834670907"),
    MontFp!("55193343495945455350115628863323870199952967620749340073805588608787913909619"),
    MontFp!("45465685024895564648493397996619354229416833248839900263663526177913007417199"),
    MontFp!("1"),
];

impl SwuConfig for Secp256k1Config {
    /// RFC-9380 section 8.7: `Z = -11`.
    const Z: Fq = MontFp!(
        "115792089237316195423570985008687907853269984665640564039457584007908834671652"
    );

    const SWU_A: Fq = ISO_A;
    const SWU_B: Fq = ISO_B;

    /// `sqrt(11)`, since `-Z = 11`.
    const SQRT_RATIO_C2: Fq = MontFp!(
        "22612019078283109002402354608917265420620653587239490778472842791191070919257"
    );

    const ISOGENY: Option<IsogenyMap<Self>> = Some(IsogenyMap {
        x_num: ISO_X_NUM,
        x_den: ISO_X_DEN,
        y_num: ISO_Y_NUM,
        y_den: ISO_Y_DEN,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash2curve::{self, swu};
    use ark_ec::short_weierstrass::SWCurveConfig;
    use ark_ff::{BigInteger, Field, PrimeField};
    use ark_std::vec::Vec;
    use sha2::Sha256;

    fn point_hex(pt: &ark_secp256k1::Affine) -> String {
        let mut buf = Vec::new();
        buf.push(if pt.y.into_bigint().is_odd() { 0x03 } else { 0x02 });
        let mut x = Vec::new();
        use ark_serialize::CanonicalSerialize;
        pt.x.serialize_compressed(&mut x).unwrap();
        x.reverse();
        buf.extend_from_slice(&x);
        hex::encode(buf)
    }

    #[test]
    fn swu_outputs_live_on_the_isogenous_curve() {
        let dst = b"QUUX-V01-CS02-with-secp256k1_XMD:SHA-256_SSWU_RO_";
        let u = hash2curve::hash_to_field::<Fq, Sha256>(b"probe", dst, 2).unwrap();
        for &element in &u {
            let swu::MapToCurve::Isogenous { x, y, map } =
                swu::map_to_curve::<Secp256k1Config>(element)
            else {
                panic!("secp256k1 mapping must go through the isogeny");
            };
            // y^2 = x^3 + A'x + B' on E'.
            assert_eq!(y.square(), x.square() * x + ISO_A * x + ISO_B);
            // And the carried point lands on the target curve.
            let pt = map.apply(x, y);
            assert!(pt.is_on_curve());
        }
    }

    // Vectors from RFC-9380 appendix J.8.1 (secp256k1_XMD:SHA-256_SSWU_RO_).
    #[test]
    fn hash_to_curve_rfc_9380_vectors() {
        let dst = b"QUUX-V01-CS02-with-secp256k1_XMD:SHA-256_SSWU_RO_";
        let cases: &[(&[u8], &str)] = &[
            (
                b"",
                "03c1cae290e291aee617ebaef1be6d73861479c48b841eaba9b7b5852ddfeb1346",
            ),
            (
                b"abc",
                "023377e01eab42db296b512293120c6cee72b6ecf9f9205760bd9ff11fb3cb2c4b",
            ),
            (
                b"abcdef0123456789",
                "02bac54083f293f1fe08e4a70137260aa90783a5cb84d3f35848b324d0674b0e3a",
            ),
        ];
        for (msg, expected) in cases {
            let pt = hash2curve::hash_to_curve::<Secp256k1Config, Sha256>(msg, dst).unwrap();
            assert!(pt.is_on_curve());
            assert_eq!(point_hex(&pt), *expected);
        }
    }

    #[test]
    fn isogenous_curve_differs_from_target() {
        assert_ne!(ISO_A, Secp256k1Config::COEFF_A);
        assert_ne!(ISO_B, Secp256k1Config::COEFF_B);
    }
}
