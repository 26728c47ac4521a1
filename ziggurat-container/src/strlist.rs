//! `StringList`: concatenated NUL-terminated UTF-8 strings.

use std::io::Write;

use ziggurat_base::Result;

use crate::component::{Component, ComponentType, Mode};
use crate::ioutil::Sink;

pub struct StringList {
    name: String,
    n: i64,
    encoded: Vec<u8>,
}

impl StringList {
    /// `strings` must yield exactly `n` items; mismatches are a caller bug,
    /// checked by the variable/layer facade that owns the declared `n`
    /// (surfaced as `Error::SizeMismatch`).
    pub fn new<'a>(name: impl Into<String>, n: i64, strings: impl IntoIterator<Item = &'a [u8]>) -> Self {
        let mut encoded = Vec::new();
        let mut count = 0i64;
        for s in strings {
            encoded.extend_from_slice(s);
            encoded.push(0);
            count += 1;
        }
        debug_assert_eq!(count, n, "StringList iterator length must equal n");
        StringList {
            name: name.into(),
            n,
            encoded,
        }
    }

    /// Iterates the NUL-delimited strings back out, used by callers (e.g.
    /// `PlainStringVariable`) that need to derive offsets/hashes from the
    /// same canonical byte image rather than re-deriving them from the
    /// original input (which may have already been consumed).
    pub fn strings(&self) -> impl Iterator<Item = &[u8]> {
        self.encoded.split(|&b| b == 0).take(self.n as usize)
    }
}

impl Component for StringList {
    fn name(&self) -> &str {
        &self.name
    }
    fn component_type(&self) -> ComponentType {
        ComponentType::StringList
    }
    fn mode(&self) -> Mode {
        Mode::Uncompressed
    }
    fn params(&self) -> (i64, i64) {
        (self.n, 0)
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
    use crate::ioutil::MemSink;
    use test_log::test;

    #[test]
    fn single_token_layout() {
        let sl = StringList::new("StringData", 1, [b"cat".as_slice()]);
        assert_eq!(sl.bytelen(), 4);
        let mut sink = MemSink::new();
        sl.write_data(&mut sink).unwrap();
        assert_eq!(sink.into_inner(), b"cat\0");
    }

    #[test]
    fn strings_iterator_round_trips() {
        let sl = StringList::new("StringData", 3, [b"a".as_slice(), b"b".as_slice(), b"a".as_slice()]);
        let back: Vec<&[u8]> = sl.strings().collect();
        assert_eq!(back, vec![b"a".as_slice(), b"b".as_slice(), b"a".as_slice()]);
    }
}
