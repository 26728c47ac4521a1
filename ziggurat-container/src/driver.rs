//! From a parsed attribute plan and corpus-derived iterators, instantiate
//! layers and variables and write them out.
//!
//! Tokenizing source text and parsing markup into spans is left to the
//! front-end — this module only defines the iterator contracts a front-end
//! must satisfy, plus the glue that turns already-collected columns/spans
//! into container files.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};
use ziggurat_base::{err, Result};

use crate::ioutil::FileSink;
use crate::layer::{BaseLayer, PrimaryLayer, SegmentationLayer};
use crate::variable::{
    IndexedStringVariable, IntegerEncoding, IntegerVariable, PlainStringVariable, PointerVariable, SetVariable,
};

/// Resettable positional column iterator: yields exactly `N` raw column
/// values, one per corpus position. Implementations may be iterated more
/// than once (e.g. `IndexedStringVariable`'s two passes).
pub trait PositionalColumnIter {
    fn reset(&mut self);
    fn next_value(&mut self) -> Option<Vec<u8>>;
}

/// Resettable positional *set* column iterator: yields exactly `N` values,
/// each the (unordered) list of member strings at that corpus position.
/// Mirrors [`PositionalColumnIter`] but for the multi-valued case (e.g. a
/// column packing several tags per token).
pub trait SetColumnIter {
    fn reset(&mut self);
    fn next_set(&mut self) -> Option<Vec<Vec<u8>>>;
}

/// A structural span as yielded by a [`StructuralSpanIter`]: an
/// `[start_cpos, end_cpos)` range plus its tag's key-value annotations.
#[derive(Debug, Clone, Default)]
pub struct Span {
    pub start: i64,
    pub end: i64,
    pub attributes: BTreeMap<String, String>,
}

/// Resettable structural span iterator: yields spans for a single tag name
/// in document order.
pub trait StructuralSpanIter {
    fn reset(&mut self);
    fn next_span(&mut self) -> Option<Span>;
}

/// A cell that failed integer parsing at a given corpus position, so a
/// caller-supplied default can be substituted instead of aborting the whole
/// encode.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub position: i64,
    pub raw: String,
}

/// Declares how one positional attribute column becomes a variable.
pub struct PAttributePlan {
    pub name: String,
    pub kind: PAttributeKind,
    pub compressed: bool,
}

pub enum PAttributeKind {
    Plain,
    Indexed,
    /// `b` is the declared bit-width hint carried in dim2; `delta` selects
    /// `VectorDelta` over `VectorComp` for monotone-friendly columns.
    Integer { b: i64, delta: bool, int_default: Option<i64> },
    /// A per-position set of lexicon members, sourced from a
    /// [`SetColumnIter`] registered under the same name.
    Set,
    /// A per-position head pointer, sourced from an already-resolved
    /// absolute-position integer column (relative heads are turned
    /// absolute beforehand via
    /// [`crate::variable::PointerVariable::resolve_relative_head`]).
    Pointer,
}

/// Picks how one structural-attribute annotation becomes a variable. Mirrors
/// [`PAttributeKind`] minus `Pointer`, which has no meaning for an
/// annotation attached to a span rather than a corpus position.
pub enum AnnotationKind {
    Plain,
    Indexed,
    Integer { b: i64, delta: bool, int_default: Option<i64> },
    /// The annotation's raw text is a `|`-separated list of set members.
    Set,
}

/// Declares one annotation key on a structural attribute and the kind of
/// variable it should become.
pub struct AnnotationPlan {
    pub name: String,
    pub kind: AnnotationKind,
}

/// Declares one structural attribute (tag) and the annotation keys on it
/// that should become their own variables.
pub struct SAttributePlan {
    pub tag: String,
    pub annotations: Vec<AnnotationPlan>,
    pub compressed: bool,
}

pub struct AttributePlan {
    pub n: i64,
    pub primary_comment: String,
    pub p_attrs: Vec<PAttributePlan>,
    pub s_attrs: Vec<SAttributePlan>,
}

/// Builds the primary layer declaring a corpus of `n` positions.
pub fn encode_primary(n: i64, comment: &str) -> Result<PrimaryLayer> {
    debug!(target: "ziggurat", n, "building primary layer");
    PrimaryLayer::new(n, None, comment)
}

/// Buffers a [`PositionalColumnIter`] into memory once (the driver's choice
/// — the core facades accept any resettable source; a memory-resident
/// `Vec` trivially satisfies that via `.iter().cloned()`).
fn collect_column(col: &mut dyn PositionalColumnIter) -> Vec<Vec<u8>> {
    col.reset();
    let mut items = Vec::new();
    while let Some(v) = col.next_value() {
        items.push(v);
    }
    items
}

/// Same idea as [`collect_column`], for the multi-valued set case.
fn collect_set_column(col: &mut dyn SetColumnIter) -> Vec<Vec<Vec<u8>>> {
    col.reset();
    let mut items = Vec::new();
    while let Some(v) = col.next_set() {
        items.push(v);
    }
    items
}

pub fn encode_plain_string_attr(
    base: &PrimaryLayer,
    name: &str,
    col: &mut dyn PositionalColumnIter,
    compressed: bool,
) -> Result<PlainStringVariable> {
    let items = collect_column(col);
    info!(target: "ziggurat", attr = name, n = items.len(), "encoding plain string attribute");
    PlainStringVariable::build(base, items, compressed, None, &format!("p-attr {name}"))
}

pub fn encode_indexed_string_attr(
    base: &PrimaryLayer,
    name: &str,
    col: &mut dyn PositionalColumnIter,
    compressed: bool,
) -> Result<IndexedStringVariable> {
    let items = collect_column(col);
    info!(target: "ziggurat", attr = name, n = items.len(), "encoding indexed string attribute");
    IndexedStringVariable::build(base, || items.iter().cloned(), compressed, None, &format!("p-attr {name}"))
}

/// Resolves a raw integer column, substituting `int_default` for cells that
/// failed to parse, or aborting if no default was given.
pub fn resolve_int_column(
    raw: impl IntoIterator<Item = std::result::Result<i64, ParseFailure>>,
    int_default: Option<i64>,
) -> Result<Vec<i64>> {
    let mut out = Vec::new();
    for cell in raw {
        match cell {
            Ok(v) => out.push(v),
            Err(failure) => match int_default {
                Some(d) => out.push(d),
                None => {
                    return Err(err(format!(
                        "non-integer cell '{}' at position {} and no int_default configured",
                        failure.raw, failure.position
                    )))
                }
            },
        }
    }
    Ok(out)
}

/// Parses a byte-string column to integers, substituting `int_default` for
/// unparseable cells. Locale- and radix-specific cell parsing belongs to
/// the front-end; this just bridges a [`PositionalColumnIter`] to
/// [`resolve_int_column`].
pub fn parse_int_column(col: &mut dyn PositionalColumnIter, int_default: Option<i64>) -> Result<Vec<i64>> {
    let raw = collect_column(col);
    let parsed = raw.into_iter().enumerate().map(|(i, cell)| {
        let text = String::from_utf8_lossy(&cell).into_owned();
        text.parse::<i64>().map_err(|_| ParseFailure { position: i as i64, raw: text })
    });
    resolve_int_column(parsed, int_default)
}

pub fn encode_integer_attr(
    base: &PrimaryLayer,
    name: &str,
    ints: &[i64],
    b: i64,
    delta: bool,
    compressed: bool,
) -> Result<IntegerVariable> {
    info!(target: "ziggurat", attr = name, n = ints.len(), "encoding integer attribute");
    let encoding = match (compressed, delta) {
        (false, _) => IntegerEncoding::Uncompressed,
        (true, false) => IntegerEncoding::Compressed,
        (true, true) => IntegerEncoding::Delta,
    };
    IntegerVariable::build(base, ints, b, encoding, None, &format!("p-attr {name}"))
}

/// One structural-attribute annotation, built as whichever variable kind its
/// [`AnnotationPlan`] requested.
pub enum AnnotationVariable {
    Plain(PlainStringVariable),
    Indexed(IndexedStringVariable),
    Integer(IntegerVariable),
    Set(SetVariable),
}

impl AnnotationVariable {
    pub fn write(&self, w: &mut dyn crate::ioutil::Sink) -> Result<()> {
        match self {
            AnnotationVariable::Plain(v) => v.write(w),
            AnnotationVariable::Indexed(v) => v.write(w),
            AnnotationVariable::Integer(v) => v.write(w),
            AnnotationVariable::Set(v) => v.write(w),
        }
    }
}

/// Splits an annotation's raw text on `|` into its set members, dropping
/// empty segments and surrounding whitespace.
fn parse_set_annotation(raw: &str) -> Vec<Vec<u8>> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.as_bytes().to_vec())
        .collect()
}

/// Collects all spans for a tag, builds the segmentation layer, and builds
/// one variable per declared annotation key over it, in whichever form its
/// [`AnnotationKind`] names.
pub fn encode_structural_attr(
    base: &PrimaryLayer,
    plan: &SAttributePlan,
    spans: &mut dyn StructuralSpanIter,
) -> Result<(SegmentationLayer, Vec<AnnotationVariable>)> {
    spans.reset();
    let mut collected = Vec::new();
    while let Some(span) = spans.next_span() {
        collected.push(span);
    }

    let ranges: Vec<(i64, i64)> = collected.iter().map(|s| (s.start, s.end)).collect();
    info!(target: "ziggurat", tag = plan.tag.as_str(), n = ranges.len(), "encoding structural attribute");
    let seg = SegmentationLayer::build(base, &ranges, plan.compressed, None, &format!("s-attr {}", plan.tag))?;

    let mut annotation_vars = Vec::with_capacity(plan.annotations.len());
    for anno in &plan.annotations {
        let texts: Vec<String> = collected
            .iter()
            .map(|s| s.attributes.get(&anno.name).cloned().unwrap_or_default())
            .collect();
        let comment = format!("s-attr {}_{}", plan.tag, anno.name);

        let v = match &anno.kind {
            AnnotationKind::Plain => {
                let values: Vec<Vec<u8>> = texts.into_iter().map(String::into_bytes).collect();
                AnnotationVariable::Plain(PlainStringVariable::build(&seg, values, plan.compressed, None, &comment)?)
            }
            AnnotationKind::Indexed => {
                let values: Vec<Vec<u8>> = texts.into_iter().map(String::into_bytes).collect();
                AnnotationVariable::Indexed(IndexedStringVariable::build(
                    &seg,
                    || values.iter().cloned(),
                    plan.compressed,
                    None,
                    &comment,
                )?)
            }
            AnnotationKind::Integer { b, delta, int_default } => {
                let parsed = texts.into_iter().enumerate().map(|(i, text)| {
                    text.parse::<i64>().map_err(|_| ParseFailure { position: i as i64, raw: text })
                });
                let ints = resolve_int_column(parsed, *int_default)?;
                let encoding = match (plan.compressed, delta) {
                    (false, _) => IntegerEncoding::Uncompressed,
                    (true, false) => IntegerEncoding::Compressed,
                    (true, true) => IntegerEncoding::Delta,
                };
                AnnotationVariable::Integer(IntegerVariable::build(&seg, &ints, *b, encoding, None, &comment)?)
            }
            AnnotationKind::Set => {
                let sets: Vec<Vec<Vec<u8>>> = texts.iter().map(|t| parse_set_annotation(t)).collect();
                AnnotationVariable::Set(SetVariable::build(&seg, || sets.iter().cloned(), None, &comment)?)
            }
        };
        annotation_vars.push(v);
    }

    Ok((seg, annotation_vars))
}

pub fn encode_set_attr<F, I>(
    base: &PrimaryLayer,
    name: &str,
    make_iter: F,
) -> Result<SetVariable>
where
    F: FnMut() -> I,
    I: Iterator<Item = Vec<Vec<u8>>>,
{
    info!(target: "ziggurat", attr = name, "encoding set attribute");
    SetVariable::build(base, make_iter, None, &format!("p-attr {name}"))
}

pub fn encode_pointer_attr(
    base: &dyn BaseLayer,
    name: &str,
    heads: &[i64],
    compressed: bool,
) -> Result<PointerVariable> {
    info!(target: "ziggurat", attr = name, n = heads.len(), "encoding pointer attribute");
    PointerVariable::build(base, heads, compressed, None, &format!("p-attr {name}"))
}

/// File extension conventions: layers get `.zigl`, variables get `.zigv`.
pub fn layer_path(dir: impl AsRef<Path>, logical_name: &str) -> std::path::PathBuf {
    dir.as_ref().join(format!("{logical_name}.zigl"))
}

pub fn variable_path(dir: impl AsRef<Path>, logical_name: &str) -> std::path::PathBuf {
    dir.as_ref().join(format!("{logical_name}.zigv"))
}

/// Writes any of the facade types to a freshly created file. Left to the
/// caller rather than baked into every facade, since the facades don't know
/// their own logical names (only the driver's `AttributePlan` does).
pub fn write_to_file(write: impl FnOnce(&mut dyn crate::ioutil::Sink) -> Result<()>, path: &Path) -> Result<()> {
    let mut sink = FileSink::create_new(path)?;
    write(&mut sink)?;
    sink.finish()
}

/// Column/span sources the front-end hands the driver, keyed by the name
/// under which they appear in an [`AttributePlan`].
#[derive(Default)]
pub struct CorpusSources<'a> {
    pub p_attr_columns: std::collections::HashMap<String, &'a mut dyn PositionalColumnIter>,
    pub p_attr_set_columns: std::collections::HashMap<String, &'a mut dyn SetColumnIter>,
    pub s_attr_spans: std::collections::HashMap<String, &'a mut dyn StructuralSpanIter>,
}

/// Encodes a full corpus — primary layer, every declared positional
/// attribute, and every declared structural attribute with its
/// annotations — writing one file per layer/variable into `out_dir`.
pub fn encode_corpus(plan: &AttributePlan, sources: &mut CorpusSources, out_dir: &Path) -> Result<()> {
    let primary = encode_primary(plan.n, &plan.primary_comment)?;
    write_to_file(|w| primary.write(w), &layer_path(out_dir, "primary"))?;

    for p in &plan.p_attrs {
        match &p.kind {
            PAttributeKind::Plain => {
                let col = sources
                    .p_attr_columns
                    .get_mut(&p.name)
                    .ok_or_else(|| err(format!("no column source registered for p-attr {}", p.name)))?;
                let v = encode_plain_string_attr(&primary, &p.name, &mut **col, p.compressed)?;
                write_to_file(|w| v.write(w), &variable_path(out_dir, &p.name))?;
            }
            PAttributeKind::Indexed => {
                let col = sources
                    .p_attr_columns
                    .get_mut(&p.name)
                    .ok_or_else(|| err(format!("no column source registered for p-attr {}", p.name)))?;
                let v = encode_indexed_string_attr(&primary, &p.name, &mut **col, p.compressed)?;
                write_to_file(|w| v.write(w), &variable_path(out_dir, &p.name))?;
            }
            PAttributeKind::Integer { b, delta, int_default } => {
                let col = sources
                    .p_attr_columns
                    .get_mut(&p.name)
                    .ok_or_else(|| err(format!("no column source registered for p-attr {}", p.name)))?;
                let ints = parse_int_column(&mut **col, *int_default)?;
                let v = encode_integer_attr(&primary, &p.name, &ints, *b, *delta, p.compressed)?;
                write_to_file(|w| v.write(w), &variable_path(out_dir, &p.name))?;
            }
            PAttributeKind::Set => {
                let set_col = sources
                    .p_attr_set_columns
                    .get_mut(&p.name)
                    .ok_or_else(|| err(format!("no set column source registered for p-attr {}", p.name)))?;
                let v = encode_set_attr(&primary, &p.name, || collect_set_column(&mut **set_col).into_iter())?;
                write_to_file(|w| v.write(w), &variable_path(out_dir, &p.name))?;
            }
            PAttributeKind::Pointer => {
                let col = sources
                    .p_attr_columns
                    .get_mut(&p.name)
                    .ok_or_else(|| err(format!("no column source registered for p-attr {}", p.name)))?;
                let heads = parse_int_column(&mut **col, None)?;
                let v = encode_pointer_attr(&primary, &p.name, &heads, p.compressed)?;
                write_to_file(|w| v.write(w), &variable_path(out_dir, &p.name))?;
            }
        }
    }

    for s in &plan.s_attrs {
        let spans = sources
            .s_attr_spans
            .get_mut(&s.tag)
            .ok_or_else(|| err(format!("no span source registered for s-attr {}", s.tag)))?;
        let (seg, annotation_vars) = encode_structural_attr(&primary, s, &mut **spans)?;
        write_to_file(|w| seg.write(w), &layer_path(out_dir, &s.tag))?;
        for (anno, v) in s.annotations.iter().zip(annotation_vars.iter()) {
            write_to_file(|w| v.write(w), &variable_path(out_dir, &format!("{}_{}", s.tag, anno.name)))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    struct VecColumnIter {
        values: Vec<Vec<u8>>,
        pos: usize,
    }

    impl PositionalColumnIter for VecColumnIter {
        fn reset(&mut self) {
            self.pos = 0;
        }
        fn next_value(&mut self) -> Option<Vec<u8>> {
            let v = self.values.get(self.pos).cloned();
            if v.is_some() {
                self.pos += 1;
            }
            v
        }
    }

    #[test]
    fn collect_column_resets_and_drains() {
        let mut col = VecColumnIter {
            values: vec![b"a".to_vec(), b"b".to_vec()],
            pos: 2, // simulate a previous, already-exhausted pass
        };
        let collected = collect_column(&mut col);
        assert_eq!(collected, vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn resolve_int_column_substitutes_default() {
        let raw = vec![
            Ok(1),
            Err(ParseFailure { position: 1, raw: "x".into() }),
            Ok(3),
        ];
        let resolved = resolve_int_column(raw, Some(0)).unwrap();
        assert_eq!(resolved, vec![1, 0, 3]);
    }

    #[test]
    fn resolve_int_column_aborts_without_default() {
        let raw = vec![Err(ParseFailure { position: 0, raw: "x".into() })];
        assert!(resolve_int_column(raw, None).is_err());
    }

    #[test]
    fn layer_and_variable_paths_use_correct_extensions() {
        let dir = Path::new("/tmp/corpus");
        assert_eq!(layer_path(dir, "s"), Path::new("/tmp/corpus/s.zigl"));
        assert_eq!(variable_path(dir, "word"), Path::new("/tmp/corpus/word.zigv"));
    }

    #[test]
    fn end_to_end_plain_and_indexed_attrs() {
        let primary = encode_primary(3, "").unwrap();
        let mut word_col = VecColumnIter {
            values: vec![b"a".to_vec(), b"b".to_vec(), b"a".to_vec()],
            pos: 0,
        };
        let word_var = encode_indexed_string_attr(&primary, "word", &mut word_col, true).unwrap();
        let mut sink = crate::ioutil::MemSink::new();
        word_var.write(&mut sink).unwrap();
        assert!(sink.into_inner().len() > 160);
    }

    struct VecSetColumnIter {
        values: Vec<Vec<Vec<u8>>>,
        pos: usize,
    }

    impl SetColumnIter for VecSetColumnIter {
        fn reset(&mut self) {
            self.pos = 0;
        }
        fn next_set(&mut self) -> Option<Vec<Vec<u8>>> {
            let v = self.values.get(self.pos).cloned();
            if v.is_some() {
                self.pos += 1;
            }
            v
        }
    }

    struct VecSpanIter {
        spans: Vec<Span>,
        pos: usize,
    }

    impl StructuralSpanIter for VecSpanIter {
        fn reset(&mut self) {
            self.pos = 0;
        }
        fn next_span(&mut self) -> Option<Span> {
            let s = self.spans.get(self.pos).cloned();
            if s.is_some() {
                self.pos += 1;
            }
            s
        }
    }

    #[test]
    fn encode_corpus_writes_primary_p_attr_and_s_attr() {
        let dir = std::env::temp_dir().join(format!("ziggurat-driver-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut word_col: Box<dyn PositionalColumnIter> = Box::new(VecColumnIter {
            values: vec![b"a".to_vec(), b"b".to_vec(), b"a".to_vec(), b"a".to_vec()],
            pos: 0,
        });
        let mut sentence_spans: Box<dyn StructuralSpanIter> = Box::new(VecSpanIter {
            spans: vec![
                Span { start: 0, end: 2, attributes: BTreeMap::from([("id".to_string(), "s1".to_string())]) },
                Span { start: 2, end: 4, attributes: BTreeMap::from([("id".to_string(), "s2".to_string())]) },
            ],
            pos: 0,
        });
        let mut tags_col: Box<dyn SetColumnIter> = Box::new(VecSetColumnIter {
            values: vec![
                vec![b"NOUN".to_vec()],
                vec![b"VERB".to_vec(), b"PAST".to_vec()],
                vec![],
                vec![b"NOUN".to_vec()],
            ],
            pos: 0,
        });
        let mut head_col: Box<dyn PositionalColumnIter> = Box::new(VecColumnIter {
            values: vec![b"1".to_vec(), b"-1".to_vec(), b"1".to_vec(), b"0".to_vec()],
            pos: 0,
        });

        let plan = AttributePlan {
            n: 4,
            primary_comment: String::new(),
            p_attrs: vec![
                PAttributePlan { name: "word".to_string(), kind: PAttributeKind::Indexed, compressed: true },
                PAttributePlan { name: "tags".to_string(), kind: PAttributeKind::Set, compressed: true },
                PAttributePlan { name: "head".to_string(), kind: PAttributeKind::Pointer, compressed: true },
            ],
            s_attrs: vec![SAttributePlan {
                tag: "s".to_string(),
                annotations: vec![AnnotationPlan { name: "id".to_string(), kind: AnnotationKind::Plain }],
                compressed: true,
            }],
        };

        let mut sources = CorpusSources::default();
        sources.p_attr_columns.insert("word".to_string(), word_col.as_mut());
        sources.p_attr_columns.insert("head".to_string(), head_col.as_mut());
        sources.p_attr_set_columns.insert("tags".to_string(), tags_col.as_mut());
        sources.s_attr_spans.insert("s".to_string(), sentence_spans.as_mut());

        encode_corpus(&plan, &mut sources, &dir).unwrap();

        assert!(layer_path(&dir, "primary").exists());
        assert!(variable_path(&dir, "word").exists());
        assert!(variable_path(&dir, "tags").exists());
        assert!(variable_path(&dir, "head").exists());
        assert!(layer_path(&dir, "s").exists());
        assert!(variable_path(&dir, "s_id").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn structural_attr_builds_non_plain_annotation_kinds() {
        let primary = encode_primary(4, "").unwrap();
        let mut spans: Box<dyn StructuralSpanIter> = Box::new(VecSpanIter {
            spans: vec![
                Span {
                    start: 0,
                    end: 2,
                    attributes: BTreeMap::from([
                        ("speaker".to_string(), "alice".to_string()),
                        ("turn".to_string(), "1".to_string()),
                        ("tags".to_string(), "question|polite".to_string()),
                    ]),
                },
                Span {
                    start: 2,
                    end: 4,
                    attributes: BTreeMap::from([
                        ("speaker".to_string(), "alice".to_string()),
                        ("turn".to_string(), "2".to_string()),
                        ("tags".to_string(), "".to_string()),
                    ]),
                },
            ],
            pos: 0,
        });

        let plan = SAttributePlan {
            tag: "u".to_string(),
            annotations: vec![
                AnnotationPlan { name: "speaker".to_string(), kind: AnnotationKind::Indexed },
                AnnotationPlan {
                    name: "turn".to_string(),
                    kind: AnnotationKind::Integer { b: 1, delta: false, int_default: None },
                },
                AnnotationPlan { name: "tags".to_string(), kind: AnnotationKind::Set },
            ],
            compressed: true,
        };

        let (_seg, vars) = encode_structural_attr(&primary, &plan, &mut *spans).unwrap();
        assert_eq!(vars.len(), 3);
        assert!(matches!(vars[0], AnnotationVariable::Indexed(_)));
        assert!(matches!(vars[1], AnnotationVariable::Integer(_)));
        assert!(matches!(vars[2], AnnotationVariable::Set(_)));

        for v in &vars {
            let mut sink = crate::ioutil::MemSink::new();
            v.write(&mut sink).unwrap();
            assert!(sink.into_inner().len() > 160);
        }
    }

    #[test]
    fn parse_set_annotation_trims_and_drops_empty_segments() {
        assert_eq!(parse_set_annotation("a| b |"), vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(parse_set_annotation(""), Vec::<Vec<u8>>::new());
    }
}
