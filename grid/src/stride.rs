//! Component-based, strided layout of a grid.
//!
//! This is the most general description of where the pixels of a grid live in a buffer. Every
//! axis has its own stride, and so do the channels within a pixel. A packed grid is just the
//! special case where the strides are the running products of the extents. Other strides come up
//! when a buffer is viewed with permuted axes, for example after transposing an array, which is
//! possible without moving a single component.
//!
//! All strides and offsets are counted in components, not in bytes, since a layout is always used
//! together with a slice of one component type.
use crate::region::Region;

/// A simple layout describing pixels as an N-dimensional, strided matrix of components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrideSpec<const D: usize> {
    /// The number of pixels along each axis.
    pub extents: [usize; D],
    /// The number of components to go one pixel along each axis.
    pub strides: [usize; D],
    /// The number of components of a single pixel.
    pub channels: usize,
    /// The number of components to go from one channel of a pixel to the next.
    ///
    /// If this is one, the components of each pixel are contiguous and may be inspected as a
    /// slice. Otherwise any access must loop over the individual components.
    pub component_stride: usize,
    /// Offset of the first component from the start.
    pub offset: usize,
}

/// A validated layout of a strided grid of pixels.
///
/// The invariants are that the whole layout fits into memory, additionally ensuring that all
/// indices within have proper indices into a component slice of at least [`Self::span`] length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StridedLayout<const D: usize> {
    spec: StrideSpec<D>,
    /// The number of pixels, as proof of calculation.
    len: usize,
    /// The total number of components, as proof of calculation basically.
    total: usize,
}

/// Error that occurs when a [`StrideSpec`] is invalid.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct BadStrideError {
    kind: BadStrideKind,
}

#[derive(Debug, thiserror::Error)]
enum BadStrideKind {
    #[error("a pixel must have at least one component")]
    NoChannels,
    #[error("the layout does not fit into the address space")]
    OutOfMemory,
}

/// Iterates all pixel indices of a grid, with axis `0` varying fastest.
#[derive(Clone, Debug)]
pub struct Positions<const D: usize> {
    extents: [usize; D],
    next: Option<[usize; D]>,
}

impl<const D: usize> StrideSpec<D> {
    /// Compare sizes without taking into account the offset or strides.
    pub fn matches(&self, other: &Self) -> bool {
        self.extents == other.extents && self.channels == other.channels
    }

    fn pixel_start(&self, index: &[usize; D]) -> usize {
        index
            .iter()
            .zip(&self.strides)
            .fold(self.offset, |acc, (i, stride)| acc + i * stride)
    }

    fn is_empty(&self) -> bool {
        self.extents.iter().any(|&len| len == 0)
    }

    fn len(&self) -> Option<usize> {
        self.extents
            .iter()
            .try_fold(1usize, |acc, &len| acc.checked_mul(len))
    }

    fn end(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(self.offset);
        }

        let mut relative_past_end = (self.channels - 1)
            .checked_mul(self.component_stride)?
            .checked_add(1)?;

        for (&len, &stride) in self.extents.iter().zip(&self.strides) {
            let max_offset = (len - 1).checked_mul(stride)?;
            relative_past_end = relative_past_end.checked_add(max_offset)?;
        }

        relative_past_end.checked_add(self.offset)
    }
}

impl<const D: usize> StridedLayout<D> {
    /// Try to create a new layout from a specification.
    ///
    /// This fails if the specification does not describe a valid layout: when pixels would have
    /// no components, or when the layout is not expressible on the current architecture.
    pub fn new(spec: StrideSpec<D>) -> Result<Self, BadStrideError> {
        if spec.channels == 0 {
            return Err(BadStrideKind::NoChannels.into());
        }

        let len = spec.len().ok_or(BadStrideKind::OutOfMemory)?;
        let total = spec.end().ok_or(BadStrideKind::OutOfMemory)?;

        Ok(StridedLayout { spec, len, total })
    }

    /// Construct the packed layout of a grid with the given extents.
    ///
    /// Channels are innermost, followed by axis `0`, axis `1`, and so on. There are no gaps
    /// between pixels and the layout starts at offset zero.
    pub fn packed(extents: [usize; D], channels: usize) -> Result<Self, BadStrideError> {
        let mut strides = [0; D];
        let mut running = channels;

        for (stride, &len) in strides.iter_mut().zip(&extents) {
            *stride = running;
            running = running
                .checked_mul(len)
                .ok_or(BadStrideKind::OutOfMemory)?;
        }

        StridedLayout::new(StrideSpec {
            extents,
            strides,
            channels,
            component_stride: 1,
            offset: 0,
        })
    }

    /// The packed layout of a region.
    pub fn with_region(region: &Region<D>, channels: usize) -> Result<Self, BadStrideError> {
        Self::packed(region.size(), channels)
    }

    /// Get the specification of this layout.
    pub fn spec(&self) -> StrideSpec<D> {
        self.spec
    }

    pub fn extents(&self) -> [usize; D] {
        self.spec.extents
    }

    pub fn channels(&self) -> usize {
        self.spec.channels
    }

    /// The number of components a buffer needs to hold all pixels of the layout.
    pub fn span(&self) -> usize {
        self.total
    }

    /// The number of pixels.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether this is exactly the layout returned by [`Self::packed`] for the same extents.
    pub fn is_packed(&self) -> bool {
        StridedLayout::packed(self.spec.extents, self.spec.channels)
            .is_ok_and(|packed| self.same_addresses(&packed))
    }

    /// The index of the first component of a pixel.
    pub fn pixel_start(&self, index: [usize; D]) -> Option<usize> {
        if index.iter().zip(&self.spec.extents).all(|(i, len)| i < len) {
            Some(self.spec.pixel_start(&index))
        } else {
            None
        }
    }

    /// The index of one component of a pixel.
    pub fn component_index(&self, index: [usize; D], channel: usize) -> Option<usize> {
        if channel >= self.spec.channels {
            return None;
        }

        let start = self.pixel_start(index)?;
        Some(start + channel * self.spec.component_stride)
    }

    /// Iterate over all pixel indices in the layout.
    pub fn positions(&self) -> Positions<D> {
        Positions::new(self.spec.extents)
    }

    /// Whether two layouts address the same components, disregarding strides of unit axes.
    fn same_addresses(&self, other: &Self) -> bool {
        let (this, that) = (&self.spec, &other.spec);
        if !this.matches(that) || this.offset != that.offset {
            return false;
        }

        let channels_agree = this.channels == 1 || this.component_stride == that.component_stride;
        let axes_agree = this
            .extents
            .iter()
            .zip(this.strides.iter().zip(&that.strides))
            .all(|(&len, (a, b))| len <= 1 || a == b);

        channels_agree && axes_agree
    }
}

impl<const D: usize> Positions<D> {
    pub fn new(extents: [usize; D]) -> Self {
        let next = if extents.iter().any(|&len| len == 0) {
            None
        } else {
            Some([0; D])
        };

        Positions { extents, next }
    }
}

impl<const D: usize> Iterator for Positions<D> {
    type Item = [usize; D];

    fn next(&mut self) -> Option<[usize; D]> {
        let current = self.next?;
        let mut advanced = current;

        self.next = None;
        for (i, &len) in advanced.iter_mut().zip(&self.extents) {
            *i += 1;
            if *i < len {
                self.next = Some(advanced);
                break;
            }
            *i = 0;
        }

        Some(current)
    }
}

impl From<BadStrideKind> for BadStrideError {
    fn from(kind: BadStrideKind) -> Self {
        BadStrideError { kind }
    }
}

impl<const D: usize> From<&'_ StridedLayout<D>> for StrideSpec<D> {
    fn from(layout: &'_ StridedLayout<D>) -> Self {
        layout.spec()
    }
}

#[test]
fn span_validation() {
    let layout = StridedLayout::packed([30, 20], 1).expect("Valid layout");
    assert_eq!(layout.spec().strides, [1, 30]);
    assert_eq!(layout.span(), 600);
    assert!(layout.is_packed());

    let no_channels = StrideSpec {
        channels: 0,
        ..layout.spec()
    };
    assert!(StridedLayout::new(no_channels).is_err());

    let too_far = StrideSpec {
        strides: [usize::MAX, 1],
        ..layout.spec()
    };
    assert!(StridedLayout::new(too_far).is_err());
    assert!(StridedLayout::packed([usize::MAX, 3], 1).is_err());
}

#[test]
fn transposed_span() {
    let layout = StridedLayout::new(StrideSpec {
        extents: [20, 30],
        strides: [30, 1],
        channels: 1,
        component_stride: 1,
        offset: 0,
    })
    .expect("Valid layout");

    assert_eq!(layout.span(), 600);
    assert_eq!(layout.len(), 600);
    assert!(!layout.is_packed());
    assert_eq!(layout.component_index([1, 2], 0), Some(32));
    assert_eq!(layout.component_index([20, 0], 0), None);
}

#[test]
fn channel_addressing() {
    let layout = StridedLayout::packed([4, 2], 3).expect("Valid layout");
    assert_eq!(layout.spec().strides, [3, 12]);
    assert_eq!(layout.span(), 24);
    assert_eq!(layout.component_index([1, 1], 2), Some(17));
    assert_eq!(layout.component_index([1, 1], 3), None);
}

#[test]
fn unit_axes_are_packed() {
    let layout = StridedLayout::new(StrideSpec {
        extents: [5, 1],
        strides: [1, 99],
        channels: 1,
        component_stride: 7,
        offset: 0,
    })
    .expect("Valid layout");

    assert!(layout.is_packed());
}

#[test]
fn positions_order() {
    let all: Vec<_> = Positions::new([2, 3]).collect();
    assert_eq!(
        all,
        [[0, 0], [1, 0], [0, 1], [1, 1], [0, 2], [1, 2]]
    );

    assert_eq!(Positions::new([4, 0, 2]).count(), 0);
    assert_eq!(Positions::<0>::new([]).count(), 1);
}
