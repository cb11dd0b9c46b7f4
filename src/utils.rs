//! Common utilities.

use crate::{AffinePoint, Error, ScalarField, Suite};
use ark_ec::AffineRepr;
use ark_std::vec::Vec;
use digest::Digest;

type Projective<S> = <AffinePoint<S> as AffineRepr>::Group;

/// Generic hash wrapper.
#[inline(always)]
pub fn hash<H: Digest>(data: &[u8]) -> digest::Output<H> {
    H::digest(data)
}

/// Big-endian serialization of a non-negative integer into exactly `len`
/// bytes, as defined by I2OSP in RFC-8017 section 4.1.
///
/// Fails when the value does not fit `len` bytes.
pub fn i2osp(value: u64, len: usize) -> Result<Vec<u8>, Error> {
    if len < 8 && value >> (8 * len) != 0 {
        return Err(Error::InvalidLength);
    }
    let be = value.to_be_bytes();
    let mut buf = Vec::with_capacity(len);
    if len > 8 {
        buf.resize(len - 8, 0);
        buf.extend_from_slice(&be);
    } else {
        buf.extend_from_slice(&be[8 - len..]);
    }
    Ok(buf)
}

/// Big-endian interpretation of an octet string, as defined by OS2IP in
/// RFC-8017 section 4.2. Total inverse of [`i2osp`] on its domain.
///
/// Fails when the value does not fit a `u64`.
pub fn os2ip(bytes: &[u8]) -> Result<u64, Error> {
    let mut value: u64 = 0;
    for &byte in bytes {
        value = value
            .checked_mul(256)
            .and_then(|v| v.checked_add(byte as u64))
            .ok_or(Error::InvalidLength)?;
    }
    Ok(value)
}

/// XOR of two equal-length byte strings.
pub fn strxor(a: &[u8], b: &[u8]) -> Result<Vec<u8>, Error> {
    if a.len() != b.len() {
        return Err(Error::InvalidLength);
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect())
}

/// Point scalar multiplication with secret splitting.
///
/// Secret scalar split into the sum of two scalars, which randomly mutate but
/// retain the same sum. Incurs 2x penalty in scalar multiplications, but provides
/// side channel defenses.
#[cfg(feature = "secret-split")]
#[inline(always)]
pub(crate) fn mul_secret<S: Suite>(p: AffinePoint<S>, s: ScalarField<S>) -> Projective<S> {
    use ark_std::UniformRand;
    let mut rng = ark_std::rand::rngs::OsRng;
    let x1 = ScalarField::<S>::rand(&mut rng);
    let x2 = s - x1;
    p * x1 + p * x2
}

/// Point scalar multiplication with no secret splitting.
#[cfg(not(feature = "secret-split"))]
#[inline(always)]
pub(crate) fn mul_secret<S: Suite>(p: AffinePoint<S>, s: ScalarField<S>) -> Projective<S> {
    p * s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i2osp_os2ip_roundtrip() {
        for (value, len) in [(0u64, 1), (1, 1), (255, 1), (256, 2), (65535, 2), (12345, 5)] {
            let buf = i2osp(value, len).unwrap();
            assert_eq!(buf.len(), len);
            assert_eq!(os2ip(&buf).unwrap(), value);
        }
    }

    #[test]
    fn i2osp_rejects_overflowing_values() {
        assert_eq!(i2osp(256, 1), Err(Error::InvalidLength));
        assert_eq!(i2osp(65536, 2), Err(Error::InvalidLength));
        assert_eq!(i2osp(u64::MAX, 7), Err(Error::InvalidLength));
    }

    #[test]
    fn i2osp_pads_wide_outputs() {
        let buf = i2osp(0xff, 12).unwrap();
        assert_eq!(buf, [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff]);
    }

    #[test]
    fn os2ip_rejects_oversized_values() {
        assert!(os2ip(&[1; 9]).is_err());
        // Leading zeroes are fine regardless of width.
        assert_eq!(os2ip(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 7]).unwrap(), 7);
    }

    #[test]
    fn strxor_requires_equal_lengths() {
        assert_eq!(strxor(&[0xf0, 0x0f], &[0xff, 0xff]).unwrap(), [0x0f, 0xf0]);
        assert_eq!(strxor(&[0xf0], &[0xff, 0xff]), Err(Error::InvalidLength));
    }
}
