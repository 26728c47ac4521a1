//! `Index` and `IndexCompressed`: a sorted `(key, position)` mapping with
//! duplicates allowed.

use std::io::Write;

use ziggurat_base::Result;

use crate::component::{Component, ComponentType, Mode};
use crate::ioutil::Sink;
use crate::varint::{encode_varint_block_signed, write_svarint, BLOCK_SENTINEL};

/// Stable sort by key ascending, ties broken by position ascending.
fn sort_pairs(pairs: &mut [(i64, i64)]) {
    pairs.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
}

/// Raw, uncompressed `(key, position)` pairs.
pub struct Index {
    name: String,
    n: i64,
    pairs: Vec<(i64, i64)>,
}

impl Index {
    /// `sorted` mirrors the caller's claim that `pairs` is already in the
    /// sort-contract order (e.g. `StartSort`, built from monotonically
    /// increasing range starts) — when true this constructor must not
    /// resort.
    pub fn new(name: impl Into<String>, n: i64, mut pairs: Vec<(i64, i64)>, sorted: bool) -> Self {
        debug_assert_eq!(pairs.len() as i64, n, "Index pairs length must equal n");
        if !sorted {
            sort_pairs(&mut pairs);
        }
        Index {
            name: name.into(),
            n,
            pairs,
        }
    }

    pub fn pairs(&self) -> &[(i64, i64)] {
        &self.pairs
    }
}

impl Component for Index {
    fn name(&self) -> &str {
        &self.name
    }
    fn component_type(&self) -> ComponentType {
        ComponentType::Index
    }
    fn mode(&self) -> Mode {
        Mode::Uncompressed
    }
    fn params(&self) -> (i64, i64) {
        (self.n, 0)
    }
    fn bytelen(&self) -> i64 {
        16 * self.n
    }
    fn write_data(&self, w: &mut dyn Sink) -> Result<()> {
        for &(k, p) in &self.pairs {
            w.write_all(&k.to_le_bytes())?;
            w.write_all(&p.to_le_bytes())?;
        }
        Ok(())
    }
}

/// Groups already-sorted pairs into blocks of sixteen, letting a block grow
/// past sixteen to keep equal keys together. Only the final block may come
/// back shorter than sixteen.
fn group_into_blocks(data: &[(i64, i64)]) -> Vec<Vec<(i64, i64)>> {
    let mut blocks = Vec::new();
    let mut blen = 0usize;
    let mut bstart = 0usize;
    for i in 0..data.len() {
        if blen < 16 {
            blen += 1;
        } else if data[i].0 == data[i - 1].0 {
            blen += 1;
        } else {
            blocks.push(data[bstart..i].to_vec());
            bstart = i;
            blen = 1;
        }
    }
    if blen != 0 {
        blocks.push(data[bstart..].to_vec());
    }
    blocks
}

/// Block-compressed `(key, position)` index.
pub struct IndexCompressed {
    name: String,
    n: i64,
    encoded: Vec<u8>,
}

impl IndexCompressed {
    pub fn new(name: impl Into<String>, n: i64, mut pairs: Vec<(i64, i64)>, sorted: bool) -> Self {
        debug_assert_eq!(pairs.len() as i64, n, "IndexCompressed pairs length must equal n");
        if !sorted {
            sort_pairs(&mut pairs);
        }

        let raw_blocks = group_into_blocks(&pairs);

        let mut r = 0i64;
        let mut packed_blocks = Vec::with_capacity(raw_blocks.len());
        let mut block_keys = Vec::with_capacity(raw_blocks.len());

        for raw in &raw_blocks {
            r += raw.len().min(16) as i64;

            let block: Vec<(i64, i64)> = if raw.len() < 16 {
                let mut b = raw.clone();
                b.resize(16, (BLOCK_SENTINEL, BLOCK_SENTINEL));
                b
            } else {
                raw.clone()
            };

            block_keys.push(block[0].0);

            let mut keys_delta = Vec::with_capacity(block.len());
            let mut pos_delta = Vec::with_capacity(block.len());
            keys_delta.push(block[0].0);
            pos_delta.push(block[0].1);
            for w in 1..block.len() {
                keys_delta.push(block[w].0 - block[w - 1].0);
                pos_delta.push(block[w].1 - block[w - 1].1);
            }

            let mut packed = Vec::new();
            write_svarint(&mut packed, block.len() as i64 - 16);
            packed.extend(encode_varint_block_signed(&keys_delta));
            packed.extend(encode_varint_block_signed(&pos_delta));
            packed_blocks.push(packed);
        }

        let mr = packed_blocks.len();
        let mut offsets = Vec::with_capacity(mr);
        let mut off = 0i64;
        for b in &packed_blocks {
            offsets.push(off);
            off += b.len() as i64;
        }

        let mut encoded = Vec::with_capacity(8 + mr * 16 + off as usize);
        encoded.extend_from_slice(&r.to_le_bytes());
        for (&k, &o) in block_keys.iter().zip(offsets.iter()) {
            encoded.extend_from_slice(&k.to_le_bytes());
            encoded.extend_from_slice(&o.to_le_bytes());
        }
        for b in &packed_blocks {
            encoded.extend_from_slice(b);
        }

        IndexCompressed {
            name: name.into(),
            n,
            encoded,
        }
    }
}

impl Component for IndexCompressed {
    fn name(&self) -> &str {
        &self.name
    }
    fn component_type(&self) -> ComponentType {
        ComponentType::Index
    }
    fn mode(&self) -> Mode {
        Mode::Compressed
    }
    fn params(&self) -> (i64, i64) {
        (self.n, 2)
    }
    fn bytelen(&self) -> i64 {
        self.encoded.len() as i64
    }
    fn write_data(&self, w: &mut dyn Sink) -> Result<()> {
        w.write_all(&self.encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn sorts_by_key_then_position() {
        let idx = Index::new("I", 3, vec![(5, 0), (1, 2), (1, 1)], false);
        assert_eq!(idx.pairs(), &[(1, 1), (1, 2), (5, 0)]);
    }

    #[test]
    fn sorted_flag_preserves_order() {
        let idx = Index::new("I", 2, vec![(9, 0), (1, 1)], true);
        assert_eq!(idx.pairs(), &[(9, 0), (1, 1)]);
    }

    #[test]
    fn index_bytelen_is_16_per_pair() {
        let idx = Index::new("I", 3, vec![(1, 0), (2, 1), (3, 2)], true);
        assert_eq!(idx.bytelen(), 48);
    }

    #[test]
    fn single_block_no_duplicate_keys() {
        let pairs: Vec<(i64, i64)> = (0..10).map(|i| (i, 9 - i)).collect();
        let ic = IndexCompressed::new("I", 10, pairs, false);
        assert_eq!(&ic.encoded[0..8], &10i64.to_le_bytes());
    }

    #[test]
    fn tied_keys_share_one_block_even_past_sixteen() {
        // 20 pairs, all sharing key 0: must never split a duplicate key
        // across block boundaries.
        let pairs: Vec<(i64, i64)> = (0..20).map(|i| (0, i)).collect();
        let ic = IndexCompressed::new("I", 20, pairs, false);
        // r = min(16, 20) = 16, one block holding all 20.
        let r = i64::from_le_bytes(ic.encoded[0..8].try_into().unwrap());
        assert_eq!(r, 16);
        let mr = (r as usize).div_ceil(16).max(1);
        assert_eq!(mr, 1);
    }

    #[test]
    fn trailing_short_block_padded_with_sentinel() {
        let pairs: Vec<(i64, i64)> = (0..3).map(|i| (i, i)).collect();
        let ic = IndexCompressed::new("I", 3, pairs, false);
        let r = i64::from_le_bytes(ic.encoded[0..8].try_into().unwrap());
        assert_eq!(r, 3);
    }
}
