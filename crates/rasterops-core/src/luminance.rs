//! Luminance calculation using ITU-R BT.709 coefficients.
//!
//! Used when converting colour pixels into the grayscale storage formats.

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.0722;

/// Calculate luminance from normalized RGB values (0.0 to 1.0).
///
/// The result is not clamped; out-of-range inputs produce out-of-range luma.
#[inline]
pub fn calculate_luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luminance_pure_white_and_black() {
        assert!((calculate_luminance(1.0, 1.0, 1.0) - 1.0).abs() < 1e-6);
        assert_eq!(calculate_luminance(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_luminance_gray_preserves_value() {
        for v in [0.0f32, 0.25, 0.5, 0.75, 1.0] {
            let lum = calculate_luminance(v, v, v);
            assert!((lum - v).abs() < 1e-6, "Gray {} produced luminance {}", v, lum);
        }
    }

    #[test]
    fn test_luminance_green_dominates() {
        let r = calculate_luminance(1.0, 0.0, 0.0);
        let g = calculate_luminance(0.0, 1.0, 0.0);
        let b = calculate_luminance(0.0, 0.0, 1.0);
        assert!(g > r && r > b);
    }
}
