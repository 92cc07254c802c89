use crate::overlay::buttons::BUTTON_COUNT;
use crate::window_manager::SurfaceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are strictly larger than `min`.
    pub fn exceeds(self, min: Size) -> bool {
        self.width > min.width && self.height > min.height
    }
}

/// Overlay rectangle in global (screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl OverlayRect {
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Fixed dimensions of the right-aligned button column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMetrics {
    pub width: i32,
    pub height: i32,
    pub spacing: i32,
    pub top_margin: i32,
}

impl Default for ButtonMetrics {
    fn default() -> Self {
        Self {
            width: 120,
            height: 40,
            spacing: 10,
            top_margin: 10,
        }
    }
}

impl ButtonMetrics {
    pub fn button_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Result of one geometry pass: where the overlay goes and where each button
/// sits inside it, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    pub rect: OverlayRect,
    pub buttons: [Point; BUTTON_COUNT],
}

/// The overlay covers the render surface exactly, no inset.
pub fn overlay_rect_for_surface(surface: &SurfaceState) -> OverlayRect {
    OverlayRect::from_origin_size(surface.global_top_left, surface.size)
}

/// Button positions relative to the overlay's top-left corner.
///
/// No clamping is applied: an overlay narrower than one button yields a
/// negative `x` and the column renders partly off the overlay.
pub fn button_positions(overlay_size: Size, metrics: &ButtonMetrics) -> [Point; BUTTON_COUNT] {
    let x = overlay_size
        .width
        .saturating_sub(metrics.width)
        .saturating_sub(metrics.spacing);
    let stride = metrics.height.saturating_add(metrics.spacing);
    std::array::from_fn(|i| {
        let y = metrics
            .top_margin
            .saturating_add((i as i32).saturating_mul(stride));
        Point::new(x, y)
    })
}

pub fn compute_layout(surface: &SurfaceState, metrics: &ButtonMetrics) -> OverlayLayout {
    let rect = overlay_rect_for_surface(surface);
    OverlayLayout {
        rect,
        buttons: button_positions(rect.size(), metrics),
    }
}
