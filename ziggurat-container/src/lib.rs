// Ziggurat container encoder.
//
// A corpus is a flat sequence of N corpus positions (the primary layer).
// Everything else attaches to that sequence or to a segmentation over it:
//
//   PrimaryLayer        -- declares N, carries no components
//   SegmentationLayer    -- N non-overlapping [start,end) ranges over a base
//   PlainStringVariable  -- verbatim string per position
//   IndexedStringVariable -- lexicon + per-position lexicon id
//   IntegerVariable      -- integer per position, value-sorted index
//   SetVariable          -- set of lexicon ids per position
//   PointerVariable      -- head pointer per position
//
// Each of those is a thin facade that picks the right tuple of Components
// (Vector/VectorComp/VectorDelta, StringList, StringVector, Index/
// IndexCompressed, Set, InvertedIndex) and hands them to a Container, which
// owns the 160-byte header, the Block Offset Map, and 8-byte alignment of
// the data section. See each module for its corner of the format.
//
// The decode side, mutation of existing stores, and VRT ingestion itself
// (line tokenization, XML tag parsing, CLI flags) are out of scope here --
// this crate only defines the two iterator contracts a front-end needs to
// satisfy (`driver::PositionalColumnIter`, `driver::StructuralSpanIter`)
// and the glue that turns already-collected columns/spans into files.

mod component;
mod container;
mod driver;
mod hash;
mod index;
mod inverted_index;
mod ioutil;
mod layer;
mod set;
mod strlist;
mod strvec;
mod variable;
mod varint;
mod vector;

pub use component::{Component, ComponentType, Mode, BOM_ENTRY_LEN, HEADER_LEN};
pub use container::{min_file_size, Container, COMMENT_LEN, MAGIC, VERSION};
pub use driver::{
    encode_corpus, encode_indexed_string_attr, encode_integer_attr, encode_plain_string_attr,
    encode_pointer_attr, encode_primary, encode_set_attr, encode_structural_attr, layer_path,
    parse_int_column, resolve_int_column, variable_path, write_to_file, AnnotationKind,
    AnnotationPlan, AnnotationVariable, AttributePlan, CorpusSources, PAttributeKind,
    PAttributePlan, ParseFailure, PositionalColumnIter, SAttributePlan, SetColumnIter, Span,
    StructuralSpanIter,
};
pub use hash::{fnv1a_64, fnv_signed};
pub use index::{Index, IndexCompressed};
pub use inverted_index::InvertedIndex;
pub use ioutil::{FileSink, MemSink, Sink};
pub use layer::{BaseLayer, PrimaryLayer, SegmentationLayer};
pub use set::Set;
pub use strlist::StringList;
pub use strvec::StringVector;
pub use variable::{
    IndexedStringVariable, IntegerEncoding, IntegerVariable, PlainStringVariable, PointerVariable,
    SetVariable,
};
pub use varint::{
    encode_varint_block_signed, encode_varint_block_unsigned, pad_to_block, write_svarint,
    write_uvarint, zigzag_decode, zigzag_encode, BLOCK_SENTINEL, BLOCK_SIZE,
};
pub use vector::{Vector, VectorComp, VectorDelta};
