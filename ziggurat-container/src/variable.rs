//! Variable composites: `ZVc`, `ZVx`, `ZVi`, `ZVs`, `ZVp`.

use std::collections::HashMap;

use uuid::Uuid;
use ziggurat_base::{Error, Result};

use crate::component::Component;
use crate::container::Container;
use crate::hash::fnv_signed;
use crate::index::{Index, IndexCompressed};
use crate::inverted_index::InvertedIndex;
use crate::ioutil::Sink;
use crate::layer::BaseLayer;
use crate::set::Set;
use crate::strvec::StringVector;
use crate::strlist::StringList;
use crate::vector::{Vector, VectorComp, VectorDelta};

/// Picks the on-disk form for an integer stream: plain `Vector` by default,
/// `VectorComp` for varint-packed storage, or `VectorDelta` when the caller
/// knows the values trend monotonically and wants delta compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerEncoding {
    Uncompressed,
    Compressed,
    Delta,
}

/// Every position's string stored verbatim.
pub struct PlainStringVariable {
    uuid: Uuid,
    container: Container,
}

impl PlainStringVariable {
    pub fn build(
        base: &dyn BaseLayer,
        strings: impl IntoIterator<Item = Vec<u8>>,
        compressed: bool,
        uuid: Option<Uuid>,
        comment: &str,
    ) -> Result<Self> {
        let n = base.n();
        let items: Vec<Vec<u8>> = strings.into_iter().collect();
        if items.len() as i64 != n {
            return Err(Error::SizeMismatch { want: n, got: items.len() as i64 });
        }

        let string_data = StringList::new("StringData", n, items.iter().map(Vec::as_slice));

        let mut offsets = Vec::with_capacity(items.len() + 1);
        offsets.push(0i64);
        let mut running = 0i64;
        for s in &items {
            running += s.len() as i64 + 1;
            offsets.push(running);
        }
        let offset_stream: Box<dyn Component> = if compressed {
            Box::new(VectorDelta::new("OffsetStream", n + 1, 1, &offsets))
        } else {
            Box::new(Vector::new("OffsetStream", n + 1, 1, offsets.clone()))
        };

        let hash_pairs: Vec<(i64, i64)> = items
            .iter()
            .enumerate()
            .map(|(i, s)| (fnv_signed(s), i as i64))
            .collect();
        let string_hash: Box<dyn Component> = if compressed {
            Box::new(IndexCompressed::new("StringHash", n, hash_pairs, false))
        } else {
            Box::new(Index::new("StringHash", n, hash_pairs, false))
        };

        let uuid = uuid.unwrap_or_else(Uuid::new_v4);
        let container = Container::new(
            "ZVc",
            uuid,
            Some(base.uuid()),
            None,
            n,
            0,
            comment,
            vec![Box::new(string_data), offset_stream, string_hash],
        )?;

        Ok(PlainStringVariable { uuid, container })
    }

    pub fn write(&self, w: &mut dyn Sink) -> Result<()> {
        self.container.write(w)
    }
}

/// Builds a frequency-ranked lexicon from a resettable two-pass source,
/// ties broken by first-seen order. Two passes over `make_iter` keep peak
/// memory to the lexicon itself rather than the whole corpus.
fn build_lexicon<F, I>(mut make_iter: F) -> (Vec<Vec<u8>>, HashMap<Vec<u8>, i64>, i64)
where
    F: FnMut() -> I,
    I: Iterator<Item = Vec<u8>>,
{
    let mut freq: HashMap<Vec<u8>, i64> = HashMap::new();
    let mut first_seen: Vec<Vec<u8>> = Vec::new();
    let mut count = 0i64;
    for s in make_iter() {
        count += 1;
        let e = freq.entry(s.clone()).or_insert_with(|| {
            first_seen.push(s.clone());
            0
        });
        *e += 1;
    }

    let mut lex_order: Vec<(Vec<u8>, i64)> = first_seen
        .into_iter()
        .map(|s| {
            let f = freq[&s];
            (s, f)
        })
        .collect();
    // Stable sort on frequency descending preserves the first-seen tie
    // order already present in `lex_order`.
    lex_order.sort_by(|a, b| b.1.cmp(&a.1));

    let v = lex_order.len() as i64;
    let mut lex_id: HashMap<Vec<u8>, i64> = HashMap::with_capacity(lex_order.len());
    for (i, (s, _)) in lex_order.iter().enumerate() {
        lex_id.insert(s.clone(), i as i64);
    }
    let lexicon: Vec<Vec<u8>> = lex_order.into_iter().map(|(s, _)| s).collect();

    (lexicon, lex_id, count)
}

/// Lexicon + lex-id stream, with an inverted index over lexicon ids.
pub struct IndexedStringVariable {
    uuid: Uuid,
    container: Container,
}

impl IndexedStringVariable {
    /// `make_iter` must be callable more than once, each time yielding the
    /// same `N` strings in the same order. A caller holding the whole corpus
    /// in memory can satisfy this trivially with `|| items.iter().cloned()`;
    /// a caller backed by a spill file would re-open/seek it on each call.
    pub fn build<F, I>(
        base: &dyn BaseLayer,
        mut make_iter: F,
        compressed: bool,
        uuid: Option<Uuid>,
        comment: &str,
    ) -> Result<Self>
    where
        F: FnMut() -> I,
        I: Iterator<Item = Vec<u8>>,
    {
        let n = base.n();
        let (lexicon, lex_id, count) = build_lexicon(&mut make_iter);
        if count != n {
            return Err(Error::SizeMismatch { want: n, got: count });
        }
        let v = lexicon.len() as i64;

        let lex_component = StringVector::new("Lexicon", v, lexicon.iter().map(Vec::as_slice));
        let hash_pairs: Vec<(i64, i64)> = lexicon
            .iter()
            .enumerate()
            .map(|(i, s)| (fnv_signed(s), i as i64))
            .collect();
        let lex_hash = Index::new("LexHash", v, hash_pairs, false);

        let mut ids: Vec<i64> = Vec::with_capacity(n as usize);
        for s in make_iter() {
            ids.push(lex_id[&s]);
        }

        let lexidstream: Box<dyn Component> = if compressed {
            Box::new(VectorComp::new("LexIDStream", n, 1, &ids))
        } else {
            Box::new(Vector::new("LexIDStream", n, 1, ids.clone()))
        };

        let invidx = InvertedIndex::new("LexIDIndex", v as usize, ids.iter().map(|&id| vec![id]));

        let uuid = uuid.unwrap_or_else(Uuid::new_v4);
        let container = Container::new(
            "ZVx",
            uuid,
            Some(base.uuid()),
            None,
            n,
            v,
            comment,
            vec![
                Box::new(lex_component),
                Box::new(lex_hash),
                lexidstream,
                Box::new(invidx),
            ],
        )?;

        Ok(IndexedStringVariable { uuid, container })
    }

    pub fn write(&self, w: &mut dyn Sink) -> Result<()> {
        self.container.write(w)
    }
}

/// Integer per position, with a value-sorted index.
pub struct IntegerVariable {
    uuid: Uuid,
    container: Container,
}

impl IntegerVariable {
    pub fn build(
        base: &dyn BaseLayer,
        ints: &[i64],
        b: i64,
        encoding: IntegerEncoding,
        uuid: Option<Uuid>,
        comment: &str,
    ) -> Result<Self> {
        let n = base.n();
        if ints.len() as i64 != n {
            return Err(Error::SizeMismatch { want: n, got: ints.len() as i64 });
        }

        let int_stream: Box<dyn Component> = match encoding {
            IntegerEncoding::Uncompressed => Box::new(Vector::new("IntStream", n, 1, ints.to_vec())),
            IntegerEncoding::Compressed => Box::new(VectorComp::new("IntStream", n, 1, ints)),
            IntegerEncoding::Delta => Box::new(VectorDelta::new("IntStream", n, 1, ints)),
        };

        let mut pairs: Vec<(i64, i64)> = ints.iter().enumerate().map(|(i, &v)| (v, i as i64)).collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        let use_compressed_index = encoding != IntegerEncoding::Uncompressed;
        let int_sort: Box<dyn Component> = if use_compressed_index {
            Box::new(IndexCompressed::new("IntSort", n, pairs, true))
        } else {
            Box::new(Index::new("IntSort", n, pairs, true))
        };

        let uuid = uuid.unwrap_or_else(Uuid::new_v4);
        let container = Container::new(
            "ZVi",
            uuid,
            Some(base.uuid()),
            None,
            n,
            b,
            comment,
            vec![int_stream, int_sort],
        )?;

        Ok(IntegerVariable { uuid, container })
    }

    pub fn write(&self, w: &mut dyn Sink) -> Result<()> {
        self.container.write(w)
    }
}

/// Set of lexicon ids per position.
pub struct SetVariable {
    uuid: Uuid,
    container: Container,
}

impl SetVariable {
    pub fn build<F, I>(base: &dyn BaseLayer, mut make_iter: F, uuid: Option<Uuid>, comment: &str) -> Result<Self>
    where
        F: FnMut() -> I,
        I: Iterator<Item = Vec<Vec<u8>>>,
    {
        let n = base.n();

        let mut freq: HashMap<Vec<u8>, i64> = HashMap::new();
        let mut first_seen: Vec<Vec<u8>> = Vec::new();
        let mut count = 0i64;
        for set in make_iter() {
            count += 1;
            for member in &set {
                let e = freq.entry(member.clone()).or_insert_with(|| {
                    first_seen.push(member.clone());
                    0
                });
                *e += 1;
            }
        }
        if count != n {
            return Err(Error::SizeMismatch { want: n, got: count });
        }

        let mut lex_order: Vec<(Vec<u8>, i64)> = first_seen
            .into_iter()
            .map(|s| {
                let f = freq[&s];
                (s, f)
            })
            .collect();
        lex_order.sort_by(|a, b| b.1.cmp(&a.1));
        let v = lex_order.len() as i64;

        let mut lex_id: HashMap<Vec<u8>, i64> = HashMap::with_capacity(lex_order.len());
        for (i, (s, _)) in lex_order.iter().enumerate() {
            lex_id.insert(s.clone(), i as i64);
        }
        let lexicon_strings: Vec<Vec<u8>> = lex_order.into_iter().map(|(s, _)| s).collect();

        let lexicon = StringVector::new("Lexicon", v, lexicon_strings.iter().map(Vec::as_slice));
        let hash_pairs: Vec<(i64, i64)> = lexicon_strings
            .iter()
            .enumerate()
            .map(|(i, s)| (fnv_signed(s), i as i64))
            .collect();
        let lex_hash = Index::new("LexHash", v, hash_pairs, false);

        let mut id_sets: Vec<Vec<i64>> = Vec::with_capacity(n as usize);
        for set in make_iter() {
            let mut ids: Vec<i64> = set.iter().map(|m| lex_id[m]).collect();
            ids.sort_unstable();
            id_sets.push(ids);
        }

        let id_set_stream = Set::new("IDSetStream", n, 1, &id_sets);
        let id_set_index = InvertedIndex::new("IDSetIndex", v as usize, id_sets.clone());

        let uuid = uuid.unwrap_or_else(Uuid::new_v4);
        let container = Container::new(
            "ZVs",
            uuid,
            Some(base.uuid()),
            None,
            n,
            v,
            comment,
            vec![
                Box::new(lexicon),
                Box::new(lex_hash),
                Box::new(id_set_stream),
                Box::new(id_set_index),
            ],
        )?;

        Ok(SetVariable { uuid, container })
    }

    pub fn write(&self, w: &mut dyn Sink) -> Result<()> {
        self.container.write(w)
    }
}

/// Head pointer per position.
pub struct PointerVariable {
    uuid: Uuid,
    container: Container,
}

impl PointerVariable {
    pub fn build(
        base: &dyn BaseLayer,
        heads: &[i64],
        compressed: bool,
        uuid: Option<Uuid>,
        comment: &str,
    ) -> Result<Self> {
        let n = base.n();
        if heads.len() as i64 != n {
            return Err(Error::SizeMismatch { want: n, got: heads.len() as i64 });
        }
        for &h in heads {
            if !(h == -1 || (0 <= h && h < n)) {
                return Err(Error::PointerOutOfRange { head: h, n });
            }
        }

        let head_stream = VectorDelta::new("HeadStream", n, 1, heads);

        let pairs: Vec<(i64, i64)> = heads.iter().enumerate().map(|(i, &h)| (h, i as i64)).collect();
        let head_sort: Box<dyn Component> = if compressed {
            Box::new(IndexCompressed::new("HeadSort", n, pairs, false))
        } else {
            Box::new(Index::new("HeadSort", n, pairs, false))
        };

        let uuid = uuid.unwrap_or_else(Uuid::new_v4);
        let container = Container::new(
            "ZVp",
            uuid,
            Some(base.uuid()),
            None,
            n,
            0,
            comment,
            vec![Box::new(head_stream), head_sort],
        )?;

        Ok(PointerVariable { uuid, container })
    }

    /// Turns a CoNLL-U-style sentence-relative head column into an absolute
    /// corpus position, by adding the offset between this row's head column
    /// and its base (anchor) column.
    pub fn resolve_relative_head(pos: i64, head_col: i64, base_col: i64) -> i64 {
        pos + (head_col - base_col)
    }

    pub fn write(&self, w: &mut dyn Sink) -> Result<()> {
        self.container.write(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ioutil::MemSink;
    use crate::layer::PrimaryLayer;
    use test_log::test;

    #[test]
    fn single_token_plain_string_scenario() {
        let base = PrimaryLayer::new(1, None, "").unwrap();
        let v = PlainStringVariable::build(&base, vec![b"cat".to_vec()], true, None, "").unwrap();
        let mut sink = MemSink::new();
        v.write(&mut sink).unwrap();
        assert!(sink.into_inner().len() > 160);
    }

    #[test]
    fn plain_string_rejects_size_mismatch() {
        let base = PrimaryLayer::new(2, None, "").unwrap();
        let err = PlainStringVariable::build(&base, vec![b"cat".to_vec()], true, None, "").unwrap_err();
        assert!(matches!(err, Error::SizeMismatch { want: 2, got: 1 }));
    }

    #[test]
    fn three_token_indexed_scenario() {
        let base = PrimaryLayer::new(3, None, "").unwrap();
        let items = vec![b"a".to_vec(), b"b".to_vec(), b"a".to_vec()];
        let v = IndexedStringVariable::build(&base, || items.iter().cloned(), true, None, "").unwrap();
        let mut sink = MemSink::new();
        v.write(&mut sink).unwrap();
        assert!(sink.into_inner().len() > 160);
    }

    #[test]
    fn pointer_out_of_range_rejected() {
        let base = PrimaryLayer::new(3, None, "").unwrap();
        let err = PointerVariable::build(&base, &[0, 3, -1], true, None, "").unwrap_err();
        assert!(matches!(err, Error::PointerOutOfRange { head: 3, n: 3 }));
    }

    #[test]
    fn pointer_in_range_accepted() {
        let base = PrimaryLayer::new(3, None, "").unwrap();
        assert!(PointerVariable::build(&base, &[0, 2, -1], true, None, "").is_ok());
    }

    #[test]
    fn resolve_relative_head_computes_absolute_position() {
        assert_eq!(PointerVariable::resolve_relative_head(5, 3, 5), 3);
        assert_eq!(PointerVariable::resolve_relative_head(10, 0, 2), 8);
    }

    #[test]
    fn set_variable_builds_lexicon_and_id_sets() {
        let base = PrimaryLayer::new(3, None, "").unwrap();
        let sets: Vec<Vec<Vec<u8>>> = vec![
            vec![b"a".to_vec(), b"b".to_vec()],
            vec![],
            vec![b"a".to_vec()],
        ];
        let v = SetVariable::build(&base, || sets.iter().cloned(), None, "").unwrap();
        let mut sink = MemSink::new();
        v.write(&mut sink).unwrap();
        assert!(sink.into_inner().len() > 160);
    }

    #[test]
    fn integer_variable_sort_index_orders_by_value_then_position() {
        let base = PrimaryLayer::new(4, None, "").unwrap();
        let v = IntegerVariable::build(&base, &[3, 1, 1, 2], 1, IntegerEncoding::Compressed, None, "").unwrap();
        let mut sink = MemSink::new();
        v.write(&mut sink).unwrap();
        assert!(sink.into_inner().len() > 160);
    }
}
