//! Points and scalars encoding.

use ark_ec::AffineRepr;
use ark_ff::{PrimeField, biginteger::BigInteger};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::string::String;
use ark_std::vec::Vec;

use crate::{AffinePoint, BaseField, Error, ScalarField, Suite};

/// Defines points and scalars encoding format.
pub trait Codec<S: Suite> {
    /// Point compressed encoded length in bytes.
    const POINT_ENCODED_LEN: usize;

    /// Scalar encoded length in bytes.
    const SCALAR_ENCODED_LEN: usize;

    /// Point encode into the given buffer.
    fn point_encode_into(pt: &AffinePoint<S>, buf: &mut Vec<u8>);

    /// Point encode.
    fn point_encode(pt: &AffinePoint<S>) -> Vec<u8> {
        let mut buf = Vec::new();
        Self::point_encode_into(pt, &mut buf);
        buf
    }

    /// Point decode.
    fn point_decode(buf: &[u8]) -> Result<AffinePoint<S>, Error>;

    /// Scalar encode into the given buffer.
    fn scalar_encode_into(sc: &ScalarField<S>, buf: &mut Vec<u8>);

    /// Scalar encode.
    fn scalar_encode(sc: &ScalarField<S>) -> Vec<u8> {
        let mut buf = Vec::new();
        Self::scalar_encode_into(sc, &mut buf);
        buf
    }

    /// Scalar decode.
    fn scalar_decode(buf: &[u8]) -> ScalarField<S>;
}

/// SEC 1 codec (<https://www.secg.org/sec1-v2.pdf>)
///
/// Big endian. Point flags in the leading byte. Compression enabled.
pub struct Sec1Codec;

impl<S: Suite> Codec<S> for Sec1Codec
where
    BaseField<S>: PrimeField,
{
    // SEC1 compressed point: 1 flag byte + base field element in big-endian.
    const POINT_ENCODED_LEN: usize = 1 + (BaseField::<S>::MODULUS_BIT_SIZE as usize + 7) / 8;
    const SCALAR_ENCODED_LEN: usize = (ScalarField::<S>::MODULUS_BIT_SIZE as usize + 7) / 8;

    fn point_encode_into(pt: &AffinePoint<S>, buf: &mut Vec<u8>) {
        if pt.is_zero() {
            buf.push(0x00);
            return;
        }
        let is_odd = pt.y.into_bigint().is_odd();
        buf.push(if is_odd { 0x03 } else { 0x02 });

        let mut tmp = Vec::new();
        pt.x.serialize_compressed(&mut tmp).unwrap();
        tmp.reverse();
        buf.extend_from_slice(&tmp[..]);
    }

    /// Point decode.
    ///
    /// Strict: the input must be exactly [`Self::POINT_ENCODED_LEN`] bytes
    /// with a `0x02`/`0x03` parity flag, the x-coordinate must be a reduced
    /// field element and must have a square right-hand side on the curve.
    /// The point at infinity has no valid encoding here.
    fn point_decode(buf: &[u8]) -> Result<AffinePoint<S>, Error> {
        if buf.len() != <Self as Codec<S>>::POINT_ENCODED_LEN {
            return Err(Error::OffCurvePoint);
        }
        let (&flag, x_bytes) = buf.split_first().ok_or(Error::OffCurvePoint)?;
        if flag != 0x02 && flag != 0x03 {
            return Err(Error::OffCurvePoint);
        }
        let mut tmp = x_bytes.to_vec();
        tmp.reverse();
        let x = BaseField::<S>::deserialize_compressed(&mut &tmp[..])?;

        let (y1, y2) = AffinePoint::<S>::get_ys_from_x_unchecked(x).ok_or(Error::OffCurvePoint)?;
        let y = if ((flag & 0x01) != 0) == y1.into_bigint().is_odd() {
            y1
        } else {
            y2
        };
        Ok(AffinePoint::<S>::new_unchecked(x, y))
    }

    fn scalar_encode_into(sc: &ScalarField<S>, buf: &mut Vec<u8>) {
        let mut tmp = Vec::new();
        sc.serialize_compressed(&mut tmp).unwrap();
        tmp.reverse();
        buf.extend_from_slice(&tmp[..]);
    }

    fn scalar_decode(buf: &[u8]) -> ScalarField<S> {
        ScalarField::<S>::from_be_bytes_mod_order(buf)
    }
}

/// Point encoder wrapper using `Suite::Codec`.
pub fn point_encode<S: Suite>(pt: &AffinePoint<S>) -> Vec<u8> {
    S::Codec::point_encode(pt)
}

/// Point decoder wrapper using `Suite::Codec`.
pub fn point_decode<S: Suite>(buf: &[u8]) -> Result<AffinePoint<S>, Error> {
    S::Codec::point_decode(buf)
}

/// Scalar encoder wrapper using `Suite::Codec`.
pub fn scalar_encode<S: Suite>(sc: &ScalarField<S>) -> Vec<u8> {
    S::Codec::scalar_encode(sc)
}

/// Scalar decoder wrapper using `Suite::Codec`.
pub fn scalar_decode<S: Suite>(buf: &[u8]) -> ScalarField<S> {
    S::Codec::scalar_decode(buf)
}

/// Point encoded as lowercase compressed hex, the protocol wire form.
pub fn point_to_hex<S: Suite>(pt: &AffinePoint<S>) -> String {
    hex::encode(point_encode::<S>(pt))
}

/// Point decoded from its wire form.
///
/// Rejects malformed hex, wrong lengths, off-curve x-coordinates and the
/// point at infinity.
pub fn point_from_hex<S: Suite>(s: &str) -> Result<AffinePoint<S>, Error> {
    let raw = hex::decode(s)?;
    if raw.len() != S::Codec::POINT_ENCODED_LEN {
        return Err(Error::InvalidHex);
    }
    let pt = S::Codec::point_decode(&raw)?;
    if pt.is_zero() {
        return Err(Error::OffCurvePoint);
    }
    Ok(pt)
}
