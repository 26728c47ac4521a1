//! Layer composites: [`PrimaryLayer`] and [`SegmentationLayer`].

use uuid::Uuid;
use ziggurat_base::{err, Error, Result};

use crate::component::Component;
use crate::container::Container;
use crate::index::{Index, IndexCompressed};
use crate::ioutil::Sink;
use crate::vector::VectorDelta;

/// Anything a [`crate::variable`] facade can hang a base-UUID reference off
/// of. Base-layer references are held by UUID value, not by holding the
/// base object itself.
pub trait BaseLayer {
    fn uuid(&self) -> Uuid;
    fn n(&self) -> i64;
}

/// Declares a corpus of `N` positions. Carries zero components — older
/// format drafts carried a Partition Vector here, but this encoder emits
/// none.
pub struct PrimaryLayer {
    uuid: Uuid,
    n: i64,
    container: Container,
}

impl PrimaryLayer {
    pub fn new(n: i64, uuid: Option<Uuid>, comment: &str) -> Result<Self> {
        if n < 0 {
            return Err(err(format!("PrimaryLayer n must be >= 0, got {n}")));
        }
        let uuid = uuid.unwrap_or_else(Uuid::new_v4);
        let container = Container::new("ZLp", uuid, None, None, n, 0, comment, vec![])?;
        Ok(PrimaryLayer { uuid, n, container })
    }

    pub fn write(&self, w: &mut dyn Sink) -> Result<()> {
        self.container.write(w)
    }
}

impl BaseLayer for PrimaryLayer {
    fn uuid(&self) -> Uuid {
        self.uuid
    }
    fn n(&self) -> i64 {
        self.n
    }
}

/// A sequence of `N` non-overlapping, monotonically increasing `[start,
/// end)` ranges over a base layer.
pub struct SegmentationLayer {
    uuid: Uuid,
    n: i64,
    container: Container,
}

impl SegmentationLayer {
    pub fn build(
        base: &dyn BaseLayer,
        ranges: &[(i64, i64)],
        compressed: bool,
        uuid: Option<Uuid>,
        comment: &str,
    ) -> Result<Self> {
        let n = ranges.len() as i64;
        let base_n = base.n();
        let mut prev_end: Option<i64> = None;
        for &(start, end) in ranges {
            if start < 0 || end <= start || end > base_n {
                return Err(Error::BadRange { start, end, n: base_n });
            }
            if let Some(pe) = prev_end {
                if start < pe {
                    return Err(err(format!(
                        "segmentation ranges are not monotonically increasing: start {start} precedes previous end {pe}"
                    )));
                }
            }
            prev_end = Some(end);
        }

        let mut flat = Vec::with_capacity(ranges.len() * 2);
        for &(s, e) in ranges {
            flat.push(s);
            flat.push(e);
        }
        let range_stream: Box<dyn Component> = Box::new(VectorDelta::new("RangeStream", n, 2, &flat));

        let start_pairs: Vec<(i64, i64)> = ranges.iter().enumerate().map(|(i, &(s, _))| (s, i as i64)).collect();
        let end_pairs: Vec<(i64, i64)> = ranges.iter().enumerate().map(|(i, &(_, e))| (e, i as i64)).collect();

        // StartSort is already sorted (ranges are monotonic by start);
        // EndSort is not (end values needn't be monotonic) and must be
        // resorted by the component.
        let start_sort: Box<dyn Component> = if compressed {
            Box::new(IndexCompressed::new("StartSort", n, start_pairs, true))
        } else {
            Box::new(Index::new("StartSort", n, start_pairs, true))
        };
        let end_sort: Box<dyn Component> = if compressed {
            Box::new(IndexCompressed::new("EndSort", n, end_pairs, false))
        } else {
            Box::new(Index::new("EndSort", n, end_pairs, false))
        };

        let uuid = uuid.unwrap_or_else(Uuid::new_v4);
        let container = Container::new(
            "ZLs",
            uuid,
            Some(base.uuid()),
            None,
            n,
            0,
            comment,
            vec![range_stream, start_sort, end_sort],
        )?;

        Ok(SegmentationLayer { uuid, n, container })
    }

    pub fn write(&self, w: &mut dyn Sink) -> Result<()> {
        self.container.write(w)
    }
}

impl BaseLayer for SegmentationLayer {
    fn uuid(&self) -> Uuid {
        self.uuid
    }
    fn n(&self) -> i64 {
        self.n
    }
}
