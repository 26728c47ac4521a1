//! 64-bit FNV-1a, bit-cast to signed two's-complement.
//!
//! Hand-rolled rather than pulled from a hashing crate: the format nails
//! down the exact offset basis and prime, and every index/hash component
//! that embeds this value needs bit-for-bit reproducibility, not just "a
//! good hash". The algorithm is four lines; a dependency buys nothing here.

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// `fnv1a_64` reinterpreted as a signed two's-complement value, since hash
/// keys share the signed int64 lane of `Index`/`IndexCompressed` components.
pub fn fnv_signed(bytes: &[u8]) -> i64 {
    fnv1a_64(bytes) as i64
}
