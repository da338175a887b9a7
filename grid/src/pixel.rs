// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
#![allow(unsafe_code)]

use core::fmt;

use crate::component::Component;

/// The arrangement of components within one pixel.
///
/// A grid stores its pixels as packed components; the kind says how many components form a pixel
/// and how they are to be interpreted. Every kind other than [`PixelKind::Scalar`] is
/// multi-component, which adds a channel axis when the grid is viewed as an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelKind {
    /// One component per pixel.
    Scalar,
    /// A vector of fixed length, known when the pixel type is chosen.
    Vector(usize),
    /// Red, green, and blue components.
    Rgb,
    /// Red, green, blue, and alpha components.
    Rgba,
    /// A vector whose length is chosen at runtime, per grid rather than per type.
    VariableLength(usize),
}

/// A statically typed pixel made of one or more components of the same type.
///
/// The pixel must be exactly `KIND.channels()` components without padding. All implementations in
/// this crate satisfy this by construction, which is what makes it sound to view a packed buffer
/// of components as a slice of pixels.
pub trait Pixel: bytemuck::Pod {
    type Component: Component;

    /// The pixel kind described by this type.
    const KIND: PixelKind;

    /// View the components of this pixel.
    fn components(&self) -> &[Self::Component] {
        bytemuck::cast_slice(core::slice::from_ref(self))
    }

    /// Mutably view the components of this pixel.
    fn components_mut(&mut self) -> &mut [Self::Component] {
        bytemuck::cast_slice_mut(core::slice::from_mut(self))
    }
}

/// An RGB pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(transparent)]
pub struct Rgb<C>(pub [C; 3]);

/// An RGBA pixel, with alpha last.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(transparent)]
pub struct Rgba<C>(pub [C; 4]);

// Both are transparent wrappers around arrays of a `Pod` component, so they inherit its properties.
unsafe impl<C: Component> bytemuck::Zeroable for Rgb<C> {}
unsafe impl<C: Component> bytemuck::Pod for Rgb<C> {}
unsafe impl<C: Component> bytemuck::Zeroable for Rgba<C> {}
unsafe impl<C: Component> bytemuck::Pod for Rgba<C> {}

impl PixelKind {
    /// The number of components in one pixel.
    pub const fn channels(self) -> usize {
        match self {
            PixelKind::Scalar => 1,
            PixelKind::Vector(n) | PixelKind::VariableLength(n) => n,
            PixelKind::Rgb => 3,
            PixelKind::Rgba => 4,
        }
    }

    /// Whether the pixel is viewed with an extra channel axis.
    pub const fn is_multi_component(self) -> bool {
        !matches!(self, PixelKind::Scalar)
    }

    /// Check a component count against this kind.
    ///
    /// Returns the kind a grid with that many components per pixel would have. This is `self` for
    /// all kinds with a fixed count, while a variable length kind adopts the provided count.
    pub fn accepts(self, channels: usize) -> Option<PixelKind> {
        match self {
            PixelKind::VariableLength(_) if channels > 0 => {
                Some(PixelKind::VariableLength(channels))
            }
            PixelKind::VariableLength(_) => None,
            fixed if fixed.channels() == channels => Some(fixed),
            _ => None,
        }
    }

    /// Whether pixels of the static type `P` may be used to access pixels of this kind.
    pub fn is_compatible<P: Pixel>(self) -> bool {
        match (self, P::KIND) {
            (PixelKind::VariableLength(n), PixelKind::Vector(m)) => n == m,
            (this, other) => this == other,
        }
    }
}

impl fmt::Display for PixelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelKind::Scalar => f.write_str("scalar"),
            PixelKind::Vector(n) => write!(f, "vector<{}>", n),
            PixelKind::Rgb => f.write_str("rgb"),
            PixelKind::Rgba => f.write_str("rgba"),
            PixelKind::VariableLength(n) => write!(f, "variable-length<{}>", n),
        }
    }
}

macro_rules! scalar_pixel {
    ($($type:ty),*) => {
        $(
            impl Pixel for $type {
                type Component = $type;
                const KIND: PixelKind = PixelKind::Scalar;
            }
        )*
    }
}

scalar_pixel!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

impl<C: Component, const N: usize> Pixel for [C; N] {
    type Component = C;
    const KIND: PixelKind = PixelKind::Vector(N);
}

impl<C: Component> Pixel for Rgb<C> {
    type Component = C;
    const KIND: PixelKind = PixelKind::Rgb;
}

impl<C: Component> Pixel for Rgba<C> {
    type Component = C;
    const KIND: PixelKind = PixelKind::Rgba;
}

#[test]
fn pixel_components() {
    let mut rgb = Rgb([1u8, 2, 3]);
    assert_eq!(rgb.components(), &[1, 2, 3]);
    rgb.components_mut()[1] = 7;
    assert_eq!(rgb, Rgb([1, 7, 3]));

    let vector = [0.5f32, 1.5, 2.5];
    assert_eq!(vector.components(), &[0.5, 1.5, 2.5]);
    assert_eq!(42u16.components(), &[42]);
}

#[test]
fn kind_acceptance() {
    assert_eq!(PixelKind::Scalar.accepts(1), Some(PixelKind::Scalar));
    assert_eq!(PixelKind::Scalar.accepts(3), None);
    assert_eq!(PixelKind::Rgb.accepts(3), Some(PixelKind::Rgb));
    assert_eq!(PixelKind::Rgba.accepts(3), None);
    assert_eq!(PixelKind::Vector(2).accepts(2), Some(PixelKind::Vector(2)));
    assert_eq!(
        PixelKind::VariableLength(0).accepts(5),
        Some(PixelKind::VariableLength(5))
    );
    assert_eq!(PixelKind::VariableLength(3).accepts(0), None);
}

#[test]
fn kind_compatibility() {
    assert!(PixelKind::Rgba.is_compatible::<Rgba<u8>>());
    assert!(PixelKind::VariableLength(3).is_compatible::<[u8; 3]>());
    assert!(!PixelKind::VariableLength(3).is_compatible::<[u8; 4]>());
    assert!(!PixelKind::Rgb.is_compatible::<[u8; 3]>());
    assert_eq!(<Rgb<f32> as Pixel>::KIND.channels(), 3);
    assert_eq!(PixelKind::Vector(3).to_string(), "vector<3>");
}
