//! Pure calculation functions for crop and resize dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::pipeline::CropInstruction;

/// Derive the final resize dimensions from the current image size and the
/// configured targets.
///
/// Aspect ratio is always preserved:
/// - one axis given → the other is derived proportionally;
/// - both axes given → the image is scaled to fit within the target box;
/// - neither given → `None`, the resize step stays inert.
///
/// Upsizing is permitted: targets larger than the source produce an
/// enlarged output.
pub fn resize_target(
    current: (u32, u32),
    target_width: Option<u32>,
    target_height: Option<u32>,
) -> Option<(u32, u32)> {
    let (cw, ch) = current;

    let scale = match (target_width, target_height) {
        (Some(w), None) => w as f64 / cw as f64,
        (None, Some(h)) => h as f64 / ch as f64,
        (Some(w), Some(h)) => (w as f64 / cw as f64).min(h as f64 / ch as f64),
        (None, None) => return None,
    };

    // Rounding may collapse a 1px-tall strip to zero; clamp both axes.
    let width = ((cw as f64 * scale).round() as u32).max(1);
    let height = ((ch as f64 * scale).round() as u32).max(1);
    Some((width, height))
}

/// Whether a crop rectangle lies fully inside an image of the given size.
pub fn crop_in_bounds(image: (u32, u32), rect: &CropInstruction) -> bool {
    let (image_width, image_height) = image;
    rect.width > 0
        && rect.height > 0
        && rect.x.checked_add(rect.width).is_some_and(|r| r <= image_width)
        && rect.y.checked_add(rect.height).is_some_and(|b| b <= image_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(width: u32, height: u32, x: u32, y: u32) -> CropInstruction {
        CropInstruction {
            width,
            height,
            x,
            y,
        }
    }

    // =========================================================================
    // resize_target tests
    // =========================================================================

    #[test]
    fn width_only_derives_height_proportionally() {
        // 2000x1500 (4:3) at width 1000 → 1000x750
        assert_eq!(resize_target((2000, 1500), Some(1000), None), Some((1000, 750)));
    }

    #[test]
    fn height_only_derives_width_proportionally() {
        // 1500x2000 (3:4) at height 1000 → 750x1000
        assert_eq!(resize_target((1500, 2000), None, Some(1000)), Some((750, 1000)));
    }

    #[test]
    fn both_axes_fit_within_box() {
        // 200x200 into 100x50 → limited by height → 50x50
        assert_eq!(resize_target((200, 200), Some(100), Some(50)), Some((50, 50)));
        // 800x600 into 400x300 (same ratio) → exact
        assert_eq!(resize_target((800, 600), Some(400), Some(300)), Some((400, 300)));
    }

    #[test]
    fn upsizing_is_permitted() {
        // 500x400 at width 1000 → enlarged to 1000x800
        assert_eq!(resize_target((500, 400), Some(1000), None), Some((1000, 800)));
    }

    #[test]
    fn no_targets_no_resize() {
        assert_eq!(resize_target((800, 600), None, None), None);
    }

    #[test]
    fn derived_axis_rounds_to_nearest() {
        // 3000x2000 at width 1000 → height 666.67 rounds to 667
        assert_eq!(resize_target((3000, 2000), Some(1000), None), Some((1000, 667)));
    }

    #[test]
    fn extreme_downscale_never_collapses_to_zero() {
        // 10000x10 strip at width 10 → derived height rounds to 0, clamped to 1
        assert_eq!(resize_target((10000, 10), Some(10), None), Some((10, 1)));
    }

    // =========================================================================
    // crop_in_bounds tests
    // =========================================================================

    #[test]
    fn rect_inside_image_is_in_bounds() {
        assert!(crop_in_bounds((200, 200), &rect(100, 100, 10, 10)));
        // Exactly flush with the edges
        assert!(crop_in_bounds((200, 200), &rect(200, 200, 0, 0)));
        assert!(crop_in_bounds((200, 200), &rect(50, 50, 150, 150)));
    }

    #[test]
    fn rect_escaping_either_axis_is_out_of_bounds() {
        assert!(!crop_in_bounds((200, 200), &rect(100, 100, 150, 10)));
        assert!(!crop_in_bounds((200, 200), &rect(100, 100, 10, 150)));
        assert!(!crop_in_bounds((200, 200), &rect(201, 10, 0, 0)));
    }

    #[test]
    fn empty_rect_is_out_of_bounds() {
        assert!(!crop_in_bounds((200, 200), &rect(0, 100, 0, 0)));
        assert!(!crop_in_bounds((200, 200), &rect(100, 0, 0, 0)));
    }

    #[test]
    fn overflowing_offsets_do_not_wrap() {
        assert!(!crop_in_bounds((200, 200), &rect(u32::MAX, 10, 2, 0)));
    }
}
