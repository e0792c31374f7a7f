//! Image gravity: preferred placement of images before zoning.

use crate::model::{Element, ForcedPos, Rect};

use super::LayoutConfig;

/// Preferred side of a single image, from its geometry alone.
pub fn image_gravity(rect: &Rect, config: &LayoutConfig) -> ForcedPos {
    if is_full_width(rect, config) {
        return if rect.y < config.gravity_top_max_y {
            ForcedPos::Top
        } else if rect.y > config.full_width_bottom_min_y {
            ForcedPos::Bottom
        } else {
            ForcedPos::Center
        };
    }

    let cx = rect.center_x();
    if cx > config.gravity_right_min_cx {
        ForcedPos::Right
    } else if cx < config.gravity_left_max_cx {
        ForcedPos::Left
    } else if rect.y < config.gravity_top_max_y {
        ForcedPos::Top
    } else if rect.y > config.gravity_bottom_min_y {
        ForcedPos::Bottom
    } else {
        ForcedPos::Center
    }
}

fn is_full_width(rect: &Rect, config: &LayoutConfig) -> bool {
    rect.w > config.full_width_min_w
}

/// Pick the side all columned images should share.
///
/// Right wins unless left outnumbers it by more than `left_majority_margin`.
/// Returns `None` when no image gravitates to a side.
pub fn winning_side(left: usize, right: usize, config: &LayoutConfig) -> Option<ForcedPos> {
    match (left, right) {
        (0, 0) => None,
        (_, 0) => Some(ForcedPos::Left),
        (0, _) => Some(ForcedPos::Right),
        (l, r) if l > r + config.left_majority_margin => Some(ForcedPos::Left),
        _ => Some(ForcedPos::Right),
    }
}

/// Assign `forced_pos` to every image element with known geometry.
///
/// Conflicting left/right images are moved to the winning side, and centered
/// images in the middle band join it too. Full-width images keep their
/// vertical placement. Returns the winning side, if any.
pub fn resolve_gravity(elements: &mut [Element], config: &LayoutConfig) -> Option<ForcedPos> {
    let mut placements: Vec<(usize, Rect, ForcedPos)> = elements
        .iter()
        .enumerate()
        .filter(|(_, el)| el.is_image())
        .filter_map(|(idx, el)| el.geometry().map(|rect| (idx, rect)))
        .map(|(idx, rect)| (idx, rect, image_gravity(&rect, config)))
        .collect();

    let left = placements
        .iter()
        .filter(|(_, _, pos)| *pos == ForcedPos::Left)
        .count();
    let right = placements
        .iter()
        .filter(|(_, _, pos)| *pos == ForcedPos::Right)
        .count();
    let winner = winning_side(left, right, config);

    if let Some(side) = winner {
        for (_, rect, pos) in &mut placements {
            let conflicting = matches!(pos, ForcedPos::Left | ForcedPos::Right);
            let pulled = *pos == ForcedPos::Center
                && !is_full_width(rect, config)
                && rect.y > config.center_pull_min_y
                && rect.y < config.center_pull_max_y;
            if conflicting || pulled {
                *pos = side;
            }
        }
    }

    log::debug!(
        "Image gravity: {} images, left={}, right={}, winner={:?}",
        placements.len(),
        left,
        right,
        winner
    );

    for (idx, _, pos) in placements {
        if let Element::Image { forced_pos, .. } = &mut elements[idx] {
            *forced_pos = Some(pos);
        }
    }

    winner
}
