//! Pointer geometry for window drag, window resize, and desktop icon drag sessions.
//!
//! Every function here is a pure min/max computation; none of them can fail.

use crate::model::{
    PointerPosition, ResizeEdge, Viewport, WindowRect, DRAG_VISIBLE_MARGIN, ICON_DRAG_BOTTOM_RESERVE,
    ICON_DRAG_RIGHT_RESERVE, ICON_FALLBACK_POSITION, ICON_GRID_PX, MIN_WINDOW_HEIGHT,
    MIN_WINDOW_WIDTH,
};

/// Clamps a window top-left so at least [`DRAG_VISIBLE_MARGIN`] pixels stay on screen.
pub fn clamp_window_origin(x: i32, y: i32, viewport: Viewport) -> (i32, i32) {
    let max_x = (viewport.width - DRAG_VISIBLE_MARGIN).max(0);
    let max_y = (viewport.height - DRAG_VISIBLE_MARGIN).max(0);
    (x.clamp(0, max_x), y.clamp(0, max_y))
}

/// Pointer offset from a window's top-left corner, captured at drag start.
pub fn grab_offset(rect: WindowRect, pointer: PointerPosition) -> PointerPosition {
    PointerPosition {
        x: pointer.x - rect.x,
        y: pointer.y - rect.y,
    }
}

/// New window origin for the current pointer during a drag.
pub fn drag_origin(
    grab_offset: PointerPosition,
    pointer: PointerPosition,
    viewport: Viewport,
) -> (i32, i32) {
    clamp_window_origin(
        pointer.x - grab_offset.x,
        pointer.y - grab_offset.y,
        viewport,
    )
}

/// Applies a resize delta for `edge`, flooring the size at the window minimum.
///
/// West and north edges move the origin so the opposite edge stays anchored.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let mut rect = start;
    if edge.east() {
        rect.w = (start.w + dx).max(MIN_WINDOW_WIDTH);
    }
    if edge.west() {
        rect.w = (start.w - dx).max(MIN_WINDOW_WIDTH);
        rect.x = start.x + (start.w - rect.w);
    }
    if edge.south() {
        rect.h = (start.h + dy).max(MIN_WINDOW_HEIGHT);
    }
    if edge.north() {
        rect.h = (start.h - dy).max(MIN_WINDOW_HEIGHT);
        rect.y = start.y + (start.h - rect.h);
    }
    rect
}

/// Live icon position while dragging, kept inside the desktop area.
pub fn icon_drag_position(
    grab_offset: PointerPosition,
    pointer: PointerPosition,
    viewport: Viewport,
) -> (i32, i32) {
    let max_x = (viewport.width - ICON_DRAG_RIGHT_RESERVE).max(0);
    let max_y = (viewport.height - ICON_DRAG_BOTTOM_RESERVE).max(0);
    (
        (pointer.x - grab_offset.x).clamp(0, max_x),
        (pointer.y - grab_offset.y).clamp(0, max_y),
    )
}

fn snap_axis(value: i32) -> i32 {
    let snapped = (value + ICON_GRID_PX / 2).div_euclid(ICON_GRID_PX) * ICON_GRID_PX;
    if snapped == 0 {
        ICON_FALLBACK_POSITION
    } else {
        snapped
    }
}

/// Snaps an icon drop position to the grid. A cell at zero falls back to the margin.
pub fn snap_icon_position(x: i32, y: i32) -> (i32, i32) {
    (snap_axis(x), snap_axis(y))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 1280,
            height: 800,
        }
    }

    #[test]
    fn drag_origin_stays_in_bounds_for_any_pointer() {
        let vp = viewport();
        let grab = PointerPosition { x: 40, y: 12 };
        for px in (-3000..=3000).step_by(97) {
            for py in (-3000..=3000).step_by(89) {
                let (x, y) = drag_origin(grab, PointerPosition { x: px, y: py }, vp);
                assert!((0..=vp.width - 100).contains(&x), "x={x} for pointer {px}");
                assert!((0..=vp.height - 100).contains(&y), "y={y} for pointer {py}");
            }
        }
    }

    #[test]
    fn dragging_off_screen_and_back_has_no_drift() {
        let vp = viewport();
        let rect = WindowRect {
            x: 200,
            y: 150,
            w: 900,
            h: 600,
        };
        let start = PointerPosition { x: 260, y: 165 };
        let grab = grab_offset(rect, start);

        let far = drag_origin(grab, PointerPosition { x: -5000, y: 9000 }, vp);
        assert_eq!(far, (0, vp.height - 100));
        assert_eq!(drag_origin(grab, start, vp), (200, 150));
    }

    #[test]
    fn tiny_viewport_clamps_to_origin() {
        let vp = Viewport {
            width: 60,
            height: 40,
        };
        assert_eq!(clamp_window_origin(500, 500, vp), (0, 0));
        assert_eq!(clamp_window_origin(-5, -5, vp), (0, 0));
    }

    #[test]
    fn east_growth_changes_only_width() {
        let start = WindowRect {
            x: 100,
            y: 100,
            w: 500,
            h: 400,
        };
        assert_eq!(
            resize_rect(start, ResizeEdge::East, 120, 33),
            WindowRect { w: 620, ..start }
        );
    }

    #[test]
    fn west_and_north_keep_opposite_edges_anchored() {
        let start = WindowRect {
            x: 100,
            y: 100,
            w: 500,
            h: 400,
        };
        let rect = resize_rect(start, ResizeEdge::NorthWest, -50, 30);
        assert_eq!(
            rect,
            WindowRect {
                x: 50,
                y: 130,
                w: 550,
                h: 370
            }
        );
        assert_eq!(rect.x + rect.w, start.x + start.w);
        assert_eq!(rect.y + rect.h, start.y + start.h);

        let floored = resize_rect(start, ResizeEdge::West, 10_000, 0);
        assert_eq!(floored.w, MIN_WINDOW_WIDTH);
        assert_eq!(floored.x + floored.w, start.x + start.w);
    }

    #[test]
    fn shrinking_never_breaks_minimum_size() {
        let start = WindowRect {
            x: 300,
            y: 200,
            w: 640,
            h: 480,
        };
        for edge in ResizeEdge::ALL {
            for d in (-4000..=4000).step_by(73) {
                let rect = resize_rect(start, edge, d, d);
                assert!(rect.w >= MIN_WINDOW_WIDTH, "{edge:?} d={d} w={}", rect.w);
                assert!(rect.h >= MIN_WINDOW_HEIGHT, "{edge:?} d={d} h={}", rect.h);
                let rect = resize_rect(start, edge, -d, d);
                assert!(rect.w >= MIN_WINDOW_WIDTH && rect.h >= MIN_WINDOW_HEIGHT);
            }
        }
    }

    #[test]
    fn icon_snap_rounds_to_grid_with_margin_fallback() {
        assert_eq!(snap_icon_position(149, 151), (100, 200));
        assert_eq!(snap_icon_position(10, 49), (20, 20));
        assert_eq!(snap_icon_position(50, 0), (100, 20));
    }

    #[test]
    fn icon_drag_is_clamped_to_desktop_area() {
        let vp = viewport();
        let grab = PointerPosition { x: 10, y: 10 };
        assert_eq!(
            icon_drag_position(grab, PointerPosition { x: 5000, y: 5000 }, vp),
            (1200, 670)
        );
        assert_eq!(
            icon_drag_position(grab, PointerPosition { x: 0, y: 0 }, vp),
            (0, 0)
        );
    }
}
