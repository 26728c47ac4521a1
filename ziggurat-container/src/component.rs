//! The [`Component`] trait and the 48-byte Block Offset Map entry format
//! shared by every component family.

use std::io::Write;

use ziggurat_base::Result;

use crate::ioutil::{pad_component_name, Sink};

pub const BOM_ENTRY_LEN: i64 = 48;
pub const HEADER_LEN: i64 = 160;

/// Component type byte, used in both the BOM entry and (implicitly) to
/// pick the right builder. Kept as an enum rather than bare constants so
/// `component_type()` implementations can't typo a byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ComponentType {
    StringList = 0x02,
    StringVector = 0x03,
    Vector = 0x04,
    Set = 0x05,
    Index = 0x06,
    InvertedIndex = 0x07,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Uncompressed = 0x00,
    Compressed = 0x01,
    Delta = 0x02,
}

/// A single typed byte blob inside a container.
///
/// Every implementor must have already computed its full byte length (and
/// for streaming producers, already decided what it will write) before
/// `bytelen` is ever called — the container writer reads `bytelen` to lay
/// out the BOM before any component's data section is written, and the
/// two must agree exactly: whatever `bytelen` reports is exactly how many
/// bytes `write_data` then writes.
pub trait Component {
    fn name(&self) -> &str;
    fn component_type(&self) -> ComponentType;
    fn mode(&self) -> Mode;
    /// `(param1, param2)`, component-specific (typically `(n, d)` or a
    /// kind-specific secondary dimension).
    fn params(&self) -> (i64, i64);
    fn bytelen(&self) -> i64;
    fn write_data(&self, w: &mut dyn Sink) -> Result<()>;
}

/// Writes one 48-byte BOM entry for `c`, already positioned at `offset`
/// with declared `size`.
pub fn write_bom_entry(w: &mut dyn Sink, c: &dyn Component, offset: i64, size: i64) -> Result<()> {
    let name = pad_component_name(c.name())?;
    let (p1, p2) = c.params();

    w.write_all(&[1u8])?; // present
    w.write_all(&[c.component_type() as u8])?;
    w.write_all(&[c.mode() as u8])?;
    w.write_all(&name)?;
    w.write_all(&offset.to_le_bytes())?;
    w.write_all(&size.to_le_bytes())?;
    w.write_all(&p1.to_le_bytes())?;
    w.write_all(&p2.to_le_bytes())?;
    Ok(())
}

/// Offset of the data section given `components` entries in the BOM.
pub fn data_start(components: usize) -> i64 {
    HEADER_LEN + (components as i64) * BOM_ENTRY_LEN
}
