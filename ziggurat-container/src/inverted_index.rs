//! `InvertedIndex`: per-type postings lists over corpus positions.

use std::io::Write;

use ziggurat_base::Result;

use crate::component::{Component, ComponentType, Mode};
use crate::ioutil::Sink;
use crate::varint::encode_varint_block_unsigned;

pub struct InvertedIndex {
    name: String,
    v: i64,
    /// `(frequency, payload_offset)` per type, in type-id order.
    typeinfo: Vec<(i64, i64)>,
    postings_encoded: Vec<Vec<u8>>,
}

impl InvertedIndex {
    /// `occurrences_by_position[i]` lists the type ids present at corpus
    /// position `i` (a singleton for `IndexedStringVariable`'s `LexIDIndex`,
    /// arbitrary-length for `SetVariable`'s `IDSetIndex`).
    pub fn new(
        name: impl Into<String>,
        v: usize,
        occurrences_by_position: impl IntoIterator<Item = Vec<i64>>,
    ) -> Self {
        let mut postings: Vec<Vec<i64>> = vec![Vec::new(); v];
        for (i, occ) in occurrences_by_position.into_iter().enumerate() {
            for t in occ {
                postings[t as usize].push(i as i64);
            }
        }

        let mut typeinfo = Vec::with_capacity(v);
        let mut postings_encoded = Vec::with_capacity(v);
        let mut offset = 0i64;
        for pl in &postings {
            let mut deltas = Vec::with_capacity(pl.len());
            let mut prev = 0i64;
            for &p in pl {
                deltas.push((p - prev) as u64);
                prev = p;
            }
            let enc = encode_varint_block_unsigned(&deltas);
            typeinfo.push((pl.len() as i64, offset));
            offset += enc.len() as i64;
            postings_encoded.push(enc);
        }

        InvertedIndex {
            name: name.into(),
            v: v as i64,
            typeinfo,
            postings_encoded,
        }
    }
}

impl Component for InvertedIndex {
    fn name(&self) -> &str {
        &self.name
    }
    fn component_type(&self) -> ComponentType {
        ComponentType::InvertedIndex
    }
    fn mode(&self) -> Mode {
        Mode::Compressed
    }
    fn params(&self) -> (i64, i64) {
        (self.v, 0)
    }
    fn bytelen(&self) -> i64 {
        16 * self.v + self.postings_encoded.iter().map(|p| p.len() as i64).sum::<i64>()
    }
    fn write_data(&self, w: &mut dyn Sink) -> Result<()> {
        for &(freq, offset) in &self.typeinfo {
            w.write_all(&freq.to_le_bytes())?;
            w.write_all(&offset.to_le_bytes())?;
        }
        for p in &self.postings_encoded {
            w.write_all(p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn frequency_and_offset_for_repeated_type() {
        // Corpus ["a","b","a"] -> lex ids [0,1,0].
        let ii = InvertedIndex::new("LexIDIndex", 2, vec![vec![0], vec![1], vec![0]]);
        assert_eq!(ii.typeinfo[0].0, 2); // type 0 frequency
        assert_eq!(ii.typeinfo[1].0, 1); // type 1 frequency
        assert_eq!(ii.typeinfo[0].1, 0); // type 0 starts at payload offset 0
    }

    #[test]
    fn frequencies_sum_to_total_occurrences() {
        let ii = InvertedIndex::new("I", 3, vec![vec![0, 1], vec![], vec![2], vec![0]]);
        let total: i64 = ii.typeinfo.iter().map(|t| t.0).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn bytelen_matches_typeinfo_plus_postings() {
        let ii = InvertedIndex::new("I", 2, vec![vec![0], vec![1], vec![0]]);
        let expected = 16 * 2 + ii.postings_encoded.iter().map(Vec::len).sum::<usize>() as i64;
        assert_eq!(ii.bytelen(), expected);
    }
}
