//! `Vector`, `VectorComp`, and `VectorDelta`: fixed-width integer matrices
//! in raw, block-compressed, and block-compressed-plus-delta form.

use std::io::Write;

use ziggurat_base::Result;

use crate::component::{Component, ComponentType, Mode};
use crate::ioutil::Sink;
use crate::varint::{encode_varint_block_signed, BLOCK_SIZE};

/// N x d little-endian signed 64-bit integers, row-major by position.
pub struct Vector {
    name: String,
    n: i64,
    d: i64,
    /// Row-major: `data[i * d + j]` is position `i`, column `j`.
    data: Vec<i64>,
}

impl Vector {
    pub fn new(name: impl Into<String>, n: i64, d: i64, data: Vec<i64>) -> Self {
        assert_eq!(data.len() as i64, n * d, "Vector data length must be n*d");
        Vector {
            name: name.into(),
            n,
            d,
            data,
        }
    }
}

impl Component for Vector {
    fn name(&self) -> &str {
        &self.name
    }
    fn component_type(&self) -> ComponentType {
        ComponentType::Vector
    }
    fn mode(&self) -> Mode {
        Mode::Uncompressed
    }
    fn params(&self) -> (i64, i64) {
        (self.n, self.d)
    }
    fn bytelen(&self) -> i64 {
        8 * self.n * self.d
    }
    fn write_data(&self, w: &mut dyn Sink) -> Result<()> {
        for v in &self.data {
            w.write_all(&v.to_le_bytes())?;
        }
        Ok(())
    }
}

/// Splits row-major `(n, d)` data into blocks of up to sixteen rows,
/// padding the final short block with [`varint::BLOCK_SENTINEL`] rows.
fn blocks_of_16(data: &[i64], n: usize, d: usize) -> Vec<Vec<i64>> {
    let mut blocks = Vec::with_capacity(n.div_ceil(BLOCK_SIZE).max(1));
    let mut i = 0;
    while i < n {
        let take = (n - i).min(BLOCK_SIZE);
        let mut block = vec![0i64; BLOCK_SIZE * d];
        for row in 0..BLOCK_SIZE {
            for col in 0..d {
                block[row * d + col] = if row < take {
                    data[(i + row) * d + col]
                } else {
                    crate::varint::BLOCK_SENTINEL
                };
            }
        }
        blocks.push(block);
        i += take;
    }
    blocks
}

fn encode_compressed_blocks(data: &[i64], n: usize, d: usize, delta: bool) -> Vec<u8> {
    let blocks = blocks_of_16(data, n, d);
    let mut encoded_blocks = Vec::with_capacity(blocks.len());
    for block in &blocks {
        let mut cols = Vec::with_capacity(d);
        for col in 0..d {
            let mut column: Vec<i64> = (0..BLOCK_SIZE).map(|row| block[row * d + col]).collect();
            if delta {
                // Column 0 raw, columns 1..15 delta from the previous row.
                // Deltas don't chain across block boundaries.
                for row in (1..BLOCK_SIZE).rev() {
                    column[row] -= column[row - 1];
                }
            }
            cols.push(encode_varint_block_signed(&column));
        }
        encoded_blocks.push(cols.concat());
    }

    let mut sync = Vec::with_capacity(encoded_blocks.len());
    let mut offset = 0i64;
    for b in &encoded_blocks {
        sync.push(offset);
        offset += b.len() as i64;
    }

    let mut out = Vec::with_capacity(sync.len() * 8 + offset as usize);
    for s in &sync {
        out.extend_from_slice(&s.to_le_bytes());
    }
    for b in &encoded_blocks {
        out.extend_from_slice(b);
    }
    out
}

/// Block-compressed vector: each block stores sixteen rows' raw values,
/// varint-encoded per column.
pub struct VectorComp {
    name: String,
    n: i64,
    d: i64,
    encoded: Vec<u8>,
}

impl VectorComp {
    pub fn new(name: impl Into<String>, n: i64, d: i64, data: &[i64]) -> Self {
        assert_eq!(data.len() as i64, n * d, "VectorComp data length must be n*d");
        let encoded = encode_compressed_blocks(data, n as usize, d as usize, false);
        VectorComp {
            name: name.into(),
            n,
            d,
            encoded,
        }
    }
}

impl Component for VectorComp {
    fn name(&self) -> &str {
        &self.name
    }
    fn component_type(&self) -> ComponentType {
        ComponentType::Vector
    }
    fn mode(&self) -> Mode {
        Mode::Compressed
    }
    fn params(&self) -> (i64, i64) {
        (self.n, self.d)
    }
    fn bytelen(&self) -> i64 {
        self.encoded.len() as i64
    }
    fn write_data(&self, w: &mut dyn Sink) -> Result<()> {
        w.write_all(&self.encoded)?;
        Ok(())
    }
}

/// Block-compressed vector with within-block delta coding on columns 1..15.
pub struct VectorDelta {
    name: String,
    n: i64,
    d: i64,
    encoded: Vec<u8>,
}

impl VectorDelta {
    pub fn new(name: impl Into<String>, n: i64, d: i64, data: &[i64]) -> Self {
        assert_eq!(data.len() as i64, n * d, "VectorDelta data length must be n*d");
        let encoded = encode_compressed_blocks(data, n as usize, d as usize, true);
        VectorDelta {
            name: name.into(),
            n,
            d,
            encoded,
        }
    }
}

impl Component for VectorDelta {
    fn name(&self) -> &str {
        &self.name
    }
    fn component_type(&self) -> ComponentType {
        ComponentType::Vector
    }
    fn mode(&self) -> Mode {
        Mode::Delta
    }
    fn params(&self) -> (i64, i64) {
        (self.n, self.d)
    }
    fn bytelen(&self) -> i64 {
        self.encoded.len() as i64
    }
    fn write_data(&self, w: &mut dyn Sink) -> Result<()> {
        w.write_all(&self.encoded)?;
        Ok(())
    }
}
