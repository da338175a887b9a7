//! Arrays whose element type is only known at runtime.
use image_grid::{Component, ComponentKind};
use ndarray::ArrayViewD;

use crate::error::BridgeError;

/// An array view tagged with its element type.
///
/// This is for callers that receive arrays from a dynamically typed source and have to select the
/// grid component type at runtime. Match on the variant, or [`downcast`](Self::downcast) to the
/// component type a grid expects.
#[derive(Clone, Debug)]
pub enum DynArrayView<'a> {
    I8(ArrayViewD<'a, i8>),
    U8(ArrayViewD<'a, u8>),
    I16(ArrayViewD<'a, i16>),
    U16(ArrayViewD<'a, u16>),
    I32(ArrayViewD<'a, i32>),
    U32(ArrayViewD<'a, u32>),
    I64(ArrayViewD<'a, i64>),
    U64(ArrayViewD<'a, u64>),
    F32(ArrayViewD<'a, f32>),
    F64(ArrayViewD<'a, f64>),
}

/// A component type that can be stored in a [`DynArrayView`].
///
/// Implemented for every [`Component`].
pub trait Element: Component {
    fn into_dyn(array: ArrayViewD<'_, Self>) -> DynArrayView<'_>;

    /// Unwrap the array if it has this element type, otherwise return it unchanged.
    fn from_dyn(array: DynArrayView<'_>) -> Result<ArrayViewD<'_, Self>, DynArrayView<'_>>;
}

macro_rules! elements {
    ($($kind:ident => $type:ty),*) => {
        impl DynArrayView<'_> {
            /// The element type of the array.
            pub fn component(&self) -> ComponentKind {
                match self {
                    $(DynArrayView::$kind(_) => ComponentKind::$kind,)*
                }
            }

            pub fn shape(&self) -> &[usize] {
                match self {
                    $(DynArrayView::$kind(array) => array.shape(),)*
                }
            }

            pub fn strides(&self) -> &[isize] {
                match self {
                    $(DynArrayView::$kind(array) => array.strides(),)*
                }
            }
        }

        $(
            impl Element for $type {
                fn into_dyn(array: ArrayViewD<'_, Self>) -> DynArrayView<'_> {
                    DynArrayView::$kind(array)
                }

                fn from_dyn(
                    array: DynArrayView<'_>,
                ) -> Result<ArrayViewD<'_, Self>, DynArrayView<'_>> {
                    match array {
                        DynArrayView::$kind(array) => Ok(array),
                        other => Err(other),
                    }
                }
            }
        )*
    }
}

elements!(
    I8 => i8,
    U8 => u8,
    I16 => i16,
    U16 => u16,
    I32 => i32,
    U32 => u32,
    I64 => i64,
    U64 => u64,
    F32 => f32,
    F64 => f64
);

impl<'a> DynArrayView<'a> {
    /// Get the array with its static element type.
    ///
    /// Fails with [`BridgeError::TypeMismatch`] if the element type is not `C`.
    pub fn downcast<C: Element>(self) -> Result<ArrayViewD<'a, C>, BridgeError> {
        C::from_dyn(self).map_err(|array| BridgeError::TypeMismatch {
            expected: C::KIND,
            found: array.component(),
        })
    }
}

impl<'a, C: Element> From<ArrayViewD<'a, C>> for DynArrayView<'a> {
    fn from(array: ArrayViewD<'a, C>) -> Self {
        C::into_dyn(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    #[test]
    fn tags_follow_element_type() {
        let array = ArrayD::<u16>::zeros(vec![3, 4]);
        let tagged = DynArrayView::from(array.view());

        assert_eq!(tagged.component(), ComponentKind::U16);
        assert_eq!(tagged.shape(), &[3, 4]);
        assert_eq!(tagged.strides(), &[4, 1]);
        assert!(tagged.clone().downcast::<u16>().is_ok());
        assert!(matches!(
            tagged.downcast::<f32>(),
            Err(BridgeError::TypeMismatch {
                expected: ComponentKind::F32,
                found: ComponentKind::U16
            })
        ));
    }
}
