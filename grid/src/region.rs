//! The index space of a grid.
use core::fmt;

/// A rectangular, D-dimensional region of pixel indices.
///
/// The region consists of a start index and a size per axis. Axis `0` is the fastest varying one
/// in memory, that is the width, followed by the height, the depth, and so on. The start index is
/// metadata only; buffers always begin at the first pixel of the region.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region<const D: usize> {
    index: [isize; D],
    size: [usize; D],
}

impl<const D: usize> Region<D> {
    /// A region starting at `index` with the given `size`.
    pub const fn new(index: [isize; D], size: [usize; D]) -> Self {
        Region { index, size }
    }

    /// A region starting at the origin.
    pub const fn with_size(size: [usize; D]) -> Self {
        Region {
            index: [0; D],
            size,
        }
    }

    /// Change the size along one axis.
    ///
    /// # Panics
    /// When `axis` is not smaller than `D`.
    pub fn set_size(&mut self, axis: usize, len: usize) {
        self.size[axis] = len;
    }

    /// Change the start index along one axis.
    ///
    /// # Panics
    /// When `axis` is not smaller than `D`.
    pub fn set_index(&mut self, axis: usize, start: isize) {
        self.index[axis] = start;
    }

    pub const fn size(&self) -> [usize; D] {
        self.size
    }

    pub const fn index(&self) -> [isize; D] {
        self.index
    }

    /// The number of pixels, or `None` if it is not representable.
    pub fn len(&self) -> Option<usize> {
        self.size
            .iter()
            .try_fold(1usize, |acc, &len| acc.checked_mul(len))
    }

    /// Whether the region has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.size.iter().any(|&len| len == 0)
    }
}

impl<const D: usize> Default for Region<D> {
    fn default() -> Self {
        Region::with_size([0; D])
    }
}

impl<const D: usize> fmt::Debug for Region<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("index", &self.index)
            .field("size", &self.size)
            .finish()
    }
}

#[test]
fn axis_setters() {
    let mut region = Region::<3>::default();
    assert!(region.is_empty());

    region.set_size(0, 30);
    region.set_size(1, 20);
    region.set_size(2, 10);
    region.set_index(1, -4);

    assert_eq!(region.size(), [30, 20, 10]);
    assert_eq!(region.index(), [0, -4, 0]);
    assert_eq!(region.len(), Some(6000));
    assert!(!region.is_empty());
}

#[test]
fn overflowing_len() {
    let region = Region::with_size([usize::MAX, 2]);
    assert_eq!(region.len(), None);
}
