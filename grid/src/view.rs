// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! A borrowed, strided view of pixels.
//!
//! In comparison to the owned [`PixelGrid`], the view does not need to rely on the container and
//! can be constructed from any component slice together with a [`StridedLayout`]. This makes it
//! possible to view a buffer that was allocated by someone else, such as an array library, as a
//! grid without copying it, and with whatever axis order that buffer happens to have.
use core::fmt;

use crate::component::Component;
use crate::error::GridError;
use crate::grid::PixelGrid;
use crate::pixel::PixelKind;
use crate::region::Region;
use crate::stride::{Positions, StrideSpec, StridedLayout};

/// A reference to the components of a strided grid.
///
/// The view aliases the slice it was constructed from for its whole lifetime. It can not outlive
/// that buffer, and the buffer can not be modified while the view exists.
///
/// # Usage
///
/// View a column-major buffer as a 2×3 grid of scalars.
///
/// ```
/// use image_grid::{GridRef, PixelKind, StrideSpec, StridedLayout};
///
/// let data = [0u8, 1, 2, 3, 4, 5];
/// let layout = StridedLayout::new(StrideSpec {
///     extents: [2, 3],
///     strides: [3, 1],
///     channels: 1,
///     component_stride: 1,
///     offset: 0,
/// })
/// .unwrap();
///
/// let view = GridRef::new(PixelKind::Scalar, layout, &data).unwrap();
/// assert_eq!(view.component([1, 0], 0), Some(3));
/// assert_eq!(view.component([0, 2], 0), Some(2));
/// ```
pub struct GridRef<'data, C, const D: usize> {
    layout: StridedLayout<D>,
    kind: PixelKind,
    index: [isize; D],
    data: &'data [C],
}

/// The components of one pixel in a strided view.
#[derive(Clone)]
pub struct Components<'data, C> {
    data: &'data [C],
    next: usize,
    stride: usize,
    remaining: usize,
}

impl<'data, C: Component, const D: usize> GridRef<'data, C, D> {
    /// View a slice under a strided layout.
    ///
    /// The channel count of the layout must be one the pixel kind can hold, and the slice must
    /// cover the whole span of the layout.
    pub fn new(
        kind: PixelKind,
        layout: StridedLayout<D>,
        data: &'data [C],
    ) -> Result<Self, GridError> {
        let channels = layout.channels();
        if kind.accepts(channels) != Some(kind) {
            return Err(GridError::ChannelCount { kind, channels });
        }

        if data.len() < layout.span() {
            return Err(GridError::BufferTooSmall {
                required: layout.span(),
                available: data.len(),
            });
        }

        Ok(GridRef {
            layout,
            kind,
            index: [0; D],
            data,
        })
    }

    /// Set the start index reported by [`Self::region`].
    pub fn with_index(self, index: [isize; D]) -> Self {
        GridRef { index, ..self }
    }

    pub fn region(&self) -> Region<D> {
        Region::new(self.index, self.layout.extents())
    }

    pub fn extents(&self) -> [usize; D] {
        self.layout.extents()
    }

    pub fn kind(&self) -> PixelKind {
        self.kind
    }

    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    pub fn layout(&self) -> StridedLayout<D> {
        self.layout
    }

    pub fn spec(&self) -> StrideSpec<D> {
        self.layout.spec()
    }

    /// The underlying buffer, including components outside the layout.
    pub fn as_slice(&self) -> &'data [C] {
        self.data
    }

    /// The start of the underlying buffer, for identity comparisons.
    pub fn as_ptr(&self) -> *const C {
        self.data.as_ptr()
    }

    /// Read one component of a pixel.
    pub fn component(&self, index: [usize; D], channel: usize) -> Option<C> {
        let at = self.layout.component_index(index, channel)?;
        // Within bounds, as the data covers the span of the layout.
        Some(self.data[at])
    }

    /// Iterate the components of one pixel.
    pub fn pixel(&self, index: [usize; D]) -> Option<Components<'data, C>> {
        let start = self.layout.pixel_start(index)?;
        Some(Components {
            data: self.data,
            next: start,
            stride: self.layout.spec().component_stride,
            remaining: self.layout.channels(),
        })
    }

    pub fn positions(&self) -> Positions<D> {
        self.layout.positions()
    }

    /// Copy the pixels into a packed, owned grid.
    ///
    /// This is the only operation on views that copies. The result has the same region and pixel
    /// kind but the packed layout, regardless of the strides of this view.
    pub fn to_grid(&self) -> Result<PixelGrid<C, D>, GridError> {
        let packed = StridedLayout::with_region(&self.region(), self.channels())?;

        if self.layout.is_packed() {
            let data = self.data[..packed.span()].to_vec();
            return PixelGrid::from_vec(self.kind, self.region(), data);
        }

        let mut data = Vec::with_capacity(packed.span());
        for index in self.positions() {
            // Positions are in packed order, so pushing appends each pixel at its place.
            data.extend(self.pixel(index).into_iter().flatten());
        }

        PixelGrid::from_vec(self.kind, self.region(), data)
    }
}

impl<C, const D: usize> Clone for GridRef<'_, C, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, const D: usize> Copy for GridRef<'_, C, D> {}

impl<C, const D: usize> fmt::Debug for GridRef<'_, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridRef")
            .field("layout", &self.layout)
            .field("kind", &self.kind)
            .field("index", &self.index)
            .field("len", &self.data.len())
            .finish()
    }
}

impl<C: Copy> Iterator for Components<'_, C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        if self.remaining == 0 {
            return None;
        }

        let value = self.data[self.next];
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next += self.stride;
        }

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<C: Copy> ExactSizeIterator for Components<'_, C> {}

#[test]
fn view_validation() {
    let layout = StridedLayout::packed([2, 2], 3).expect("Valid layout");

    let short = [0u8; 11];
    assert!(matches!(
        GridRef::new(PixelKind::Rgb, layout, &short),
        Err(GridError::BufferTooSmall {
            required: 12,
            available: 11
        })
    ));

    let data = [0u8; 12];
    assert!(matches!(
        GridRef::new(PixelKind::Rgba, layout, &data),
        Err(GridError::ChannelCount { channels: 3, .. })
    ));
    assert!(GridRef::new(PixelKind::Rgb, layout, &data).is_ok());
    assert!(GridRef::new(PixelKind::VariableLength(3), layout, &data).is_ok());
}

#[test]
fn grid_copies() {
    let data = [0u8, 1, 2, 3];
    let row_layout = StridedLayout::packed([2, 2], 1).expect("Valid layout");
    let col_layout = StridedLayout::new(StrideSpec {
        strides: [2, 1],
        ..row_layout.spec()
    })
    .expect("Valid layout");

    let rows = GridRef::new(PixelKind::Scalar, row_layout, &data).expect("Valid view");
    let copy = rows.to_grid().expect("Packed copy");
    assert_eq!(copy.as_slice(), Some(&[0u8, 1, 2, 3][..]), "Still in same order");

    let cols = GridRef::new(PixelKind::Scalar, col_layout, &data).expect("Valid view");
    let copy = cols.to_grid().expect("Packed copy");
    assert_eq!(
        copy.as_slice(),
        Some(&[0u8, 2, 1, 3][..]),
        "In transposed matrix order"
    );
}

#[test]
fn strided_channels() {
    // Two pixels, with their channels stored in separate planes.
    let data = [1u16, 2, 10, 20, 100, 200];
    let layout = StridedLayout::new(StrideSpec {
        extents: [2],
        strides: [1],
        channels: 3,
        component_stride: 2,
        offset: 0,
    })
    .expect("Valid layout");

    let view = GridRef::new(PixelKind::Rgb, layout, &data).expect("Valid view");
    let second: Vec<_> = view.pixel([1]).expect("In bounds").collect();
    assert_eq!(second, [2, 20, 200]);

    let packed = view.to_grid().expect("Packed copy");
    assert_eq!(
        packed.as_slice(),
        Some(&[1u16, 10, 100, 2, 20, 200][..])
    );
}
