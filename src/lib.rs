// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! # Grid ⇄ ndarray
//!
//! Zero-copy views between pixel grids of `image-grid` and arrays of `ndarray`.
//!
//! The two operations are mirror images of each other:
//!
//! - [`export`] views the buffer of a grid as an array. The array axes are the grid axes in
//!   reverse order, with one more trailing axis for the components of multi-component pixels.
//! - [`import`] views the memory of an array as a grid. It reads the array strides, so a
//!   transposed array becomes a grid with swapped axes, and nothing is copied.
//!
//! Both results borrow the buffer they alias, which ties their lifetime to it.
//!
//! ## Usage
//!
//! ```
//! use grid_ndarray::{export, import};
//! use image_grid::{PixelGrid, PixelKind, Region};
//!
//! let mut grid = PixelGrid::<u8, 2>::new(PixelKind::Scalar, Region::with_size([30, 20]));
//! grid.allocate().unwrap();
//!
//! let array = export(&grid).unwrap();
//! assert_eq!(array.shape(), &[20, 30]);
//!
//! let transposed = import::<_, _, 2>(array.reversed_axes(), PixelKind::Scalar, false).unwrap();
//! assert_eq!(transposed.extents(), [20, 30]);
//! ```
#![deny(unsafe_code)]

mod dynamic;
mod error;
mod export;
mod import;

pub use self::dynamic::{DynArrayView, Element};
pub use self::error::{BridgeError, ShapeReason};
pub use self::export::{export, export_mut, export_view};
pub use self::import::{import, import_dyn, import_pixels};
