// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
use core::fmt;

/// Describes a numeric sample type that can be stored in a pixel grid.
///
/// A component is plain old data: any byte pattern is a valid value, it has no padding, and it can
/// be reinterpreted from and to packed slices of pixels. This is what allows a grid and an array
/// view to share one buffer. The trait is implemented for the primitive integer and floating point
/// types and should not be implemented elsewhere, since [`ComponentKind`] enumerates all of them.
pub trait Component:
    bytemuck::Pod + PartialEq + fmt::Debug + Default + Send + Sync + 'static
{
    /// The runtime tag of this type.
    const KIND: ComponentKind;

    /// Widen the value for pixel arithmetic.
    fn to_f64(self) -> f64;
}

/// Runtime tag of a [`Component`] type.
///
/// This is the dynamic counterpart of the static type parameter on grids. Use it where the
/// element type of a buffer is only known at runtime and needs to be matched against a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

macro_rules! components {
    ($(($kind:ident, $type:ty, $name:literal)),*) => {
        $(
            impl Component for $type {
                const KIND: ComponentKind = ComponentKind::$kind;

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*

        impl ComponentKind {
            /// The size of one component in bytes.
            pub const fn size(self) -> usize {
                match self {
                    $(ComponentKind::$kind => core::mem::size_of::<$type>(),)*
                }
            }

            /// The name of the Rust type tagged by this kind.
            pub const fn name(self) -> &'static str {
                match self {
                    $(ComponentKind::$kind => $name,)*
                }
            }
        }
    }
}

components!(
    (I8, i8, "i8"),
    (U8, u8, "u8"),
    (I16, i16, "i16"),
    (U16, u16, "u16"),
    (I32, i32, "i32"),
    (U32, u32, "u32"),
    (I64, i64, "i64"),
    (U64, u64, "u64"),
    (F32, f32, "f32"),
    (F64, f64, "f64")
);

impl ComponentKind {
    /// Get the tag of a statically known component type.
    pub const fn of<C: Component>() -> Self {
        C::KIND
    }

    pub const fn is_float(self) -> bool {
        matches!(self, ComponentKind::F32 | ComponentKind::F64)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn kinds_match_types() {
    assert_eq!(ComponentKind::of::<u8>(), ComponentKind::U8);
    assert_eq!(ComponentKind::of::<f32>(), ComponentKind::F32);
    assert_eq!(ComponentKind::U16.size(), 2);
    assert_eq!(ComponentKind::F64.size(), 8);
    assert_eq!(ComponentKind::I64.to_string(), "i64");
    assert!(ComponentKind::F32.is_float());
    assert!(!ComponentKind::U32.is_float());
}

#[test]
fn widening() {
    assert_eq!(200u8.to_f64(), 200.0);
    assert_eq!((-3i16).to_f64(), -3.0);
    assert_eq!(0.5f32.to_f64(), 0.5);
}
