//! `StringVector`: an N+1 offset table over a NUL-terminated string payload,
//! letting callers seek to string `i` without scanning from the start.

use std::io::Write;

use ziggurat_base::Result;

use crate::component::{Component, ComponentType, Mode};
use crate::ioutil::Sink;

pub struct StringVector {
    name: String,
    n: i64,
    /// `n + 1` offsets into `payload`; `offsets[i]` is the start of string
    /// `i`, `offsets[n]` is the start of the (absent) string past the end,
    /// i.e. `payload.len()`.
    offsets: Vec<i64>,
    payload: Vec<u8>,
}

impl StringVector {
    pub fn new<'a>(name: impl Into<String>, n: i64, strings: impl IntoIterator<Item = &'a [u8]>) -> Self {
        let mut offsets = Vec::with_capacity(n as usize + 1);
        let mut payload = Vec::new();
        let mut count = 0i64;
        offsets.push(0);
        for s in strings {
            payload.extend_from_slice(s);
            payload.push(0);
            offsets.push(payload.len() as i64);
            count += 1;
        }
        debug_assert_eq!(count, n, "StringVector iterator length must equal n");
        StringVector {
            name: name.into(),
            n,
            offsets,
            payload,
        }
    }
}

impl Component for StringVector {
    fn name(&self) -> &str {
        &self.name
    }
    fn component_type(&self) -> ComponentType {
        ComponentType::StringVector
    }
    fn mode(&self) -> Mode {
        Mode::Uncompressed
    }
    fn params(&self) -> (i64, i64) {
        (self.n, 0)
    }
    fn bytelen(&self) -> i64 {
        8 * (self.n + 1) + self.payload.len() as i64
    }
    fn write_data(&self, w: &mut dyn Sink) -> Result<()> {
        for off in &self.offsets {
            w.write_all(&off.to_le_bytes())?;
        }
        w.write_all(&self.payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ioutil::MemSink;
    use test_log::test;

    #[test]
    fn two_strings_offset_table() {
        let sv = StringVector::new("Words", 2, [b"ab".as_slice(), b"c".as_slice()]);
        assert_eq!(sv.offsets, vec![0, 3, 5]);
        assert_eq!(sv.bytelen(), 8 * 3 + 5);
        let mut sink = MemSink::new();
        sv.write_data(&mut sink).unwrap();
        let bytes = sink.into_inner();
        assert_eq!(bytes.len(), sv.bytelen() as usize);
        assert_eq!(i64::from_le_bytes(bytes[0..8].try_into().unwrap()), 0);
        assert_eq!(i64::from_le_bytes(bytes[8..16].try_into().unwrap()), 3);
        assert_eq!(i64::from_le_bytes(bytes[16..24].try_into().unwrap()), 5);
        assert_eq!(&bytes[24..], b"ab\0c\0");
    }

    #[test]
    fn empty_vector_has_single_zero_offset() {
        let sv = StringVector::new("Words", 0, std::iter::empty::<&[u8]>());
        assert_eq!(sv.offsets, vec![0]);
        assert_eq!(sv.bytelen(), 8);
    }
}
