//! `Set`: per-position sets of lexicon ids, blocked in groups of sixteen.

use std::io::Write;

use ziggurat_base::Result;

use crate::component::{Component, ComponentType, Mode};
use crate::ioutil::Sink;
use crate::varint::encode_varint_block_signed;

pub struct Set {
    name: String,
    n: i64,
    p: i64,
    encoded: Vec<u8>,
}

impl Set {
    /// Each entry of `sets` must already be in ascending id order — the
    /// facade that owns the lexicon is responsible for producing it.
    pub fn new(name: impl Into<String>, n: i64, p: i64, sets: &[Vec<i64>]) -> Self {
        debug_assert_eq!(sets.len() as i64, n, "Set sets length must equal n");

        let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(sets.len().div_ceil(16).max(1));
        for chunk in sets.chunks(16) {
            let mut offsets = Vec::with_capacity(16);
            let mut lengths = Vec::with_capacity(16);
            let mut encoded_items = Vec::new();
            let mut itemoffset = 0i64;
            for s in chunk {
                let encoded = encode_varint_block_signed(s);
                offsets.push(itemoffset);
                lengths.push(s.len() as i64);
                itemoffset += encoded.len() as i64;
                encoded_items.extend(encoded);
            }
            while offsets.len() < 16 {
                offsets.push(-1);
                lengths.push(0);
            }

            let mut offsets_delta = Vec::with_capacity(16);
            offsets_delta.push(offsets[0]);
            for i in 1..16 {
                offsets_delta.push(offsets[i] - offsets[i - 1]);
            }

            let mut block = encode_varint_block_signed(&offsets_delta);
            block.extend(encode_varint_block_signed(&lengths));
            block.extend(encoded_items);
            blocks.push(block);
        }

        let m = blocks.len();
        let mut sync = Vec::with_capacity(m);
        if m > 0 {
            let mut off = (m as i64) * 8;
            sync.push(off);
            for b in &blocks[..m - 1] {
                off += b.len() as i64;
                sync.push(off);
            }
        }

        let mut encoded = Vec::with_capacity(sync.len() * 8 + blocks.iter().map(Vec::len).sum::<usize>());
        for s in &sync {
            encoded.extend_from_slice(&s.to_le_bytes());
        }
        for b in &blocks {
            encoded.extend_from_slice(b);
        }

        Set {
            name: name.into(),
            n,
            p,
            encoded,
        }
    }
}

impl Component for Set {
    fn name(&self) -> &str {
        &self.name
    }
    fn component_type(&self) -> ComponentType {
        ComponentType::Set
    }
    fn mode(&self) -> Mode {
        Mode::Compressed
    }
    fn params(&self) -> (i64, i64) {
        (self.n, self.p)
    }
    fn bytelen(&self) -> i64 {
        self.encoded.len() as i64
    }
    fn write_data(&self, w: &mut dyn Sink) -> Result<()> {
        w.write_all(&self.encoded)?;
        Ok(())
    }
}
