//! `expand_message_xmd` (RFC-9380 section 5.3.1).
//!
//! Produces a uniformly random byte string from a message and a domain
//! separation tag using a fixed-output hash such as SHA-256.

use crate::{Error, utils};
use ark_std::vec::Vec;
use digest::{Digest, core_api::BlockSizeUser};
use generic_array::typenum::Unsigned;

/// Prefix hashed in front of domain separation tags longer than 255 bytes.
const OVERSIZE_DST_PREFIX: &[u8] = b"H2C-OVERSIZE-DST-";

/// Expand `msg` into `len_in_bytes` uniform bytes under the tag `dst`.
///
/// `len_in_bytes` must be in `[1, 65535]` and may request at most 255
/// digest blocks. The tag must be non-empty; tags longer than 255 bytes
/// are first compressed through the oversize-DST path.
pub fn expand_message_xmd<H: Digest + BlockSizeUser>(
    msg: &[u8],
    dst: &[u8],
    len_in_bytes: usize,
) -> Result<Vec<u8>, Error> {
    let b_in_bytes = <H as Digest>::output_size();
    let r_in_bytes = <H as BlockSizeUser>::BlockSize::USIZE;

    if len_in_bytes == 0 || len_in_bytes > 65535 {
        return Err(Error::InvalidLength);
    }
    let ell = len_in_bytes.div_ceil(b_in_bytes);
    if ell > 255 {
        return Err(Error::InvalidLength);
    }
    if dst.is_empty() {
        return Err(Error::InvalidDst);
    }

    // DST_prime = DST || I2OSP(len(DST), 1), hashing oversized tags first.
    let mut dst_prime = if dst.len() > 255 {
        utils::hash::<H>(&[OVERSIZE_DST_PREFIX, dst].concat()).to_vec()
    } else {
        dst.to_vec()
    };
    dst_prime.push(dst_prime.len() as u8);

    // b_0 = H(Z_pad || msg || l_i_b_str || I2OSP(0, 1) || DST_prime)
    let z_pad = ark_std::vec![0u8; r_in_bytes];
    let b_0 = H::new()
        .chain_update(&z_pad)
        .chain_update(msg)
        .chain_update(utils::i2osp(len_in_bytes as u64, 2)?)
        .chain_update([0u8])
        .chain_update(&dst_prime)
        .finalize();

    let mut b_i = H::new()
        .chain_update(&b_0)
        .chain_update([1u8])
        .chain_update(&dst_prime)
        .finalize();

    let mut uniform = Vec::with_capacity(ell * b_in_bytes);
    uniform.extend_from_slice(&b_i);
    for i in 2..=ell {
        b_i = H::new()
            .chain_update(utils::strxor(&b_0, &b_i)?)
            .chain_update([i as u8])
            .chain_update(&dst_prime)
            .finalize();
        uniform.extend_from_slice(&b_i);
    }
    uniform.truncate(len_in_bytes);
    Ok(uniform)
}
