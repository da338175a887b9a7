//! Pixel-wise comparison of two grids.
use log::trace;

use crate::component::Component;
use crate::error::GridError;
use crate::view::GridRef;

/// Parameters of a [`compare`] run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonOptions {
    /// Pixels whose difference is at most this value are treated as equal.
    pub difference_threshold: f64,
}

/// The outcome of a [`compare`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Comparison {
    /// Sum of the differences of all pixels above the threshold.
    pub total_difference: f64,
    /// The largest difference of any pixel.
    pub maximum_difference: f64,
    /// The number of pixels above the threshold.
    pub differing_pixels: usize,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        ComparisonOptions {
            difference_threshold: 0.0,
        }
    }
}

impl Comparison {
    /// Whether no pixel differed by more than the threshold.
    pub fn is_identical(&self) -> bool {
        self.differing_pixels == 0
    }
}

/// Compare a test grid against a valid one, pixel by pixel.
///
/// The difference of two pixels is the sum of the absolute differences of their components. Both
/// grids must have the same extents and channel counts but may have arbitrary, different layouts.
pub fn compare<C: Component, const D: usize>(
    valid: &GridRef<'_, C, D>,
    test: &GridRef<'_, C, D>,
    options: ComparisonOptions,
) -> Result<Comparison, GridError> {
    if valid.extents() != test.extents() {
        return Err(GridError::ExtentMismatch {
            left: valid.extents().to_vec(),
            right: test.extents().to_vec(),
        });
    }

    if valid.channels() != test.channels() {
        return Err(GridError::ChannelCount {
            kind: valid.kind(),
            channels: test.channels(),
        });
    }

    let mut result = Comparison::default();
    for index in valid.positions() {
        let (Some(expected), Some(actual)) = (valid.pixel(index), test.pixel(index)) else {
            continue;
        };

        let difference: f64 = expected
            .zip(actual)
            .map(|(a, b)| (a.to_f64() - b.to_f64()).abs())
            .sum();

        result.maximum_difference = result.maximum_difference.max(difference);
        if difference > options.difference_threshold {
            result.total_difference += difference;
            result.differing_pixels += 1;
        }
    }

    trace!(
        "compared grids of extents {:?}: {} differing pixels",
        valid.extents(),
        result.differing_pixels
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelKind;
    use crate::stride::{StrideSpec, StridedLayout};

    fn view<'a>(data: &'a [i16], layout: StridedLayout<2>) -> GridRef<'a, i16, 2> {
        GridRef::new(PixelKind::Scalar, layout, data).expect("Valid view")
    }

    #[test]
    fn identical_across_layouts() {
        let rows = StridedLayout::packed([2, 2], 1).expect("Valid layout");
        let cols = StridedLayout::new(StrideSpec {
            strides: [2, 1],
            ..rows.spec()
        })
        .expect("Valid layout");

        let result = compare(
            &view(&[1, 2, 3, 4], rows),
            &view(&[1, 3, 2, 4], cols),
            ComparisonOptions::default(),
        )
        .expect("Same extents");

        assert!(result.is_identical());
        assert_eq!(result.total_difference, 0.0);
    }

    #[test]
    fn threshold_counts() {
        let layout = StridedLayout::packed([2, 2], 1).expect("Valid layout");
        let valid = view(&[0, 0, 0, 0], layout);
        let test = view(&[1, -5, 0, 2], layout);

        let exact = compare(&valid, &test, ComparisonOptions::default()).expect("Same extents");
        assert_eq!(exact.differing_pixels, 3);
        assert_eq!(exact.total_difference, 8.0);
        assert_eq!(exact.maximum_difference, 5.0);

        let lenient = ComparisonOptions {
            difference_threshold: 1.5,
        };
        let result = compare(&valid, &test, lenient).expect("Same extents");
        assert_eq!(result.differing_pixels, 2);
        assert_eq!(result.total_difference, 7.0);
        assert_eq!(result.maximum_difference, 5.0);
    }

    #[test]
    fn mismatched_extents() {
        let data = [0i16; 6];
        let wide = StridedLayout::packed([3, 2], 1).expect("Valid layout");
        let tall = StridedLayout::packed([2, 3], 1).expect("Valid layout");

        assert!(matches!(
            compare(&view(&data, wide), &view(&data, tall), ComparisonOptions::default()),
            Err(GridError::ExtentMismatch { .. })
        ));
    }
}
