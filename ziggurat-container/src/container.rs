//! The Ziggurat container: fixed header + BOM + 8-byte-aligned data section
//! for up to 255 components.

use std::io::Write;

use uuid::Uuid;
use ziggurat_base::{Error, Result};

use crate::component::{data_start, write_bom_entry, Component, BOM_ENTRY_LEN, HEADER_LEN};
use crate::ioutil::{align_offset, write_zero_padding, Sink};

pub const MAGIC: &[u8; 8] = b"Ziggurat";
pub const VERSION: &[u8; 3] = b"1.0";

/// Comment field width; encoders must keep the pre-pad comment strictly
/// under this so the attribution suffix always fits.
pub const COMMENT_LEN: usize = 72;

const ATTRIBUTION: &[u8] = b" encoded using ziggurat-container";

/// A Ziggurat container: header, BOM, and the aligned data of its
/// components. Immutable once built; `write` is the only thing you can do
/// with one.
pub struct Container {
    container_type: [u8; 3],
    uuid: Uuid,
    base1: Uuid,
    base2: Uuid,
    dim1: i64,
    dim2: i64,
    comment: Vec<u8>,
    components: Vec<Box<dyn Component>>,
}

impl Container {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        container_type: &str,
        uuid: Uuid,
        base1: Option<Uuid>,
        base2: Option<Uuid>,
        dim1: i64,
        dim2: i64,
        comment: &str,
        components: Vec<Box<dyn Component>>,
    ) -> Result<Self> {
        let ct = container_type.as_bytes();
        if !container_type.is_ascii() || ct.len() != 3 {
            return Err(Error::BadContainerType(container_type.to_string()));
        }
        if components.len() > 255 {
            return Err(Error::TooManyComponents(components.len()));
        }

        let mut comment_bytes = comment.as_bytes().to_vec();
        comment_bytes.extend_from_slice(ATTRIBUTION);
        if comment_bytes.len() >= COMMENT_LEN {
            return Err(Error::CommentTooLong);
        }

        Ok(Container {
            container_type: [ct[0], ct[1], ct[2]],
            uuid,
            base1: base1.unwrap_or_else(Uuid::nil),
            base2: base2.unwrap_or_else(Uuid::nil),
            dim1,
            dim2,
            comment: comment_bytes,
            components,
        })
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Per-component `(offset, size)`, in the order components were given.
    /// Each offset is ≥ [`data_start`] and ≡ 0 (mod 8); offsets are
    /// strictly monotonic.
    fn layout(&self) -> Vec<(i64, i64)> {
        let mut layout = Vec::with_capacity(self.components.len());
        let mut offset = data_start(self.components.len());
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                let (prev_offset, prev_size) = layout[i - 1];
                offset = align_offset(prev_offset + prev_size);
            }
            layout.push((offset, c.bytelen()));
        }
        layout
    }

    pub fn write(&self, w: &mut dyn Sink) -> Result<()> {
        w.write_all(MAGIC)?;
        w.write_all(VERSION)?;
        w.write_all(&self.container_type)?;

        let n = self.components.len() as u8;
        w.write_all(&[n, n])?; // allocated, used

        w.write_all(self.uuid.as_bytes())?;
        w.write_all(self.base1.as_bytes())?;
        w.write_all(self.base2.as_bytes())?;

        w.write_all(&self.dim1.to_le_bytes())?;
        w.write_all(&self.dim2.to_le_bytes())?;
        w.write_all(&[0u8; 8])?; // extensions, reserved

        let mut comment_field = [0u8; COMMENT_LEN];
        comment_field[..self.comment.len()].copy_from_slice(&self.comment);
        w.write_all(&comment_field)?;

        let layout = self.layout();
        for (c, &(offset, size)) in self.components.iter().zip(layout.iter()) {
            write_bom_entry(w, c.as_ref(), offset, size)?;
        }

        let mut pos = data_start(self.components.len());
        for (c, &(offset, size)) in self.components.iter().zip(layout.iter()) {
            write_zero_padding(w, (offset - pos) as usize)?;
            c.write_data(w)?;
            pos = offset + size;
        }
        Ok(())
    }
}

/// The minimum possible file size for a container with this many
/// components (header + BOM, with no data yet). Exposed for tests and for
/// callers that want to preflight a file size before writing.
pub fn min_file_size(components: usize) -> i64 {
    HEADER_LEN + (components as i64) * BOM_ENTRY_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ioutil::MemSink;
    use crate::strlist::StringList;
    use test_log::test;

    #[test]
    fn empty_primary_layer_is_160_bytes() {
        let c = Container::new("ZLp", Uuid::nil(), None, None, 0, 0, "", vec![]).unwrap();
        let mut sink = MemSink::new();
        c.write(&mut sink).unwrap();
        let bytes = sink.into_inner();
        assert_eq!(bytes.len(), 160);
        assert_eq!(&bytes[0..8], MAGIC);
        assert_eq!(&bytes[8..11], VERSION);
        assert_eq!(&bytes[11..14], b"ZLp");
        assert_eq!(bytes[14], 0);
        assert_eq!(bytes[15], 0);
    }

    #[test]
    fn bad_container_type_rejected() {
        assert!(Container::new("ZLpp", Uuid::nil(), None, None, 0, 0, "", vec![]).is_err());
        assert!(Container::new("Z", Uuid::nil(), None, None, 0, 0, "", vec![]).is_err());
    }

    #[test]
    fn overlong_comment_rejected() {
        let long = "x".repeat(72);
        assert!(Container::new("ZLp", Uuid::nil(), None, None, 0, 0, &long, vec![]).is_err());
    }

    #[test]
    fn single_component_offsets_are_8_byte_aligned() {
        let component: Box<dyn Component> =
            Box::new(StringList::new("StringData", 1, [b"cat".as_slice()]));
        let c = Container::new("ZVc", Uuid::nil(), None, None, 1, 0, "", vec![component]).unwrap();
        let mut sink = MemSink::new();
        c.write(&mut sink).unwrap();
        let bytes = sink.into_inner();

        let bom_offset = 160;
        let data_offset = i64::from_le_bytes(bytes[bom_offset + 16..bom_offset + 24].try_into().unwrap());
        assert_eq!(data_offset % 8, 0);
        assert_eq!(data_offset, min_file_size(1));
        assert_eq!(&bytes[data_offset as usize..data_offset as usize + 4], b"cat\0");
    }
}
