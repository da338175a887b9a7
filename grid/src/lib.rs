// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! # Grid
//!
//! N-dimensional pixel grids that can share their buffers.
//!
//! A grid is a region of pixels together with a buffer of components. This crate aims to
//! represent such buffers in a way that they can be handed to, and taken from, other libraries
//! without copying. It acknowledges that the same pixel data is commonly addressed in several
//! competing ways:
//!
//! - As packed pixels, `&[Rgb<u8>]`, with the first axis varying fastest.
//! - As a slice of components, `&[u8]`, with a trailing channel axis.
//! - As a strided array in the opposite axis order, for example by a numeric array library.
//! - As that same array, transposed, where only the strides were permuted.
//!
//! The owned [`PixelGrid`] always stores its pixels packed. The borrowed [`GridRef`] can describe
//! any of the above through a [`StridedLayout`], so that all of them share one allocation.
//!
//! ## Usage
//!
//! ```
//! use image_grid::{compare, ComparisonOptions, PixelGrid, PixelKind, Region};
//!
//! let mut region = Region::<3>::default();
//! region.set_size(0, 30);
//! region.set_size(1, 20);
//! region.set_size(2, 10);
//!
//! let mut grid = PixelGrid::<u8, 3>::new(PixelKind::Scalar, region);
//! grid.allocate().unwrap();
//! grid.shade(|[x, y, z], pixel| pixel[0] = (x + y + z) as u8).unwrap();
//!
//! let copy = grid.view().unwrap().to_grid().unwrap();
//! let result = compare(
//!     &grid.view().unwrap(),
//!     &copy.view().unwrap(),
//!     ComparisonOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(result.total_difference, 0.0);
//! ```
// The only module allowed to be `unsafe` is `pixel`, which asserts `Pod` for its pixel wrappers.
#![deny(unsafe_code)]

mod compare;
mod component;
mod error;
mod grid;
mod pixel;
mod region;
mod stride;
mod view;

pub use self::compare::{compare, Comparison, ComparisonOptions};
pub use self::component::{Component, ComponentKind};
pub use self::error::GridError;
pub use self::grid::PixelGrid;
pub use self::pixel::{Pixel, PixelKind, Rgb, Rgba};
pub use self::region::Region;
pub use self::stride::{BadStrideError, Positions, StrideSpec, StridedLayout};
pub use self::view::{Components, GridRef};
