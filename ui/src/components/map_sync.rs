use geom::{Bounds, GPSBounds};
use widgetry::EventCtx;

/// On web, tiles come from an external map library drawn underneath the canvas. Keep its camera
/// matching ours.
pub struct MapSync {
    // Avoid syncing when bounds match
    #[allow(unused)]
    bounds: Bounds,
}

impl MapSync {
    pub fn new() -> Self {
        Self {
            bounds: Bounds::new(),
        }
    }

    #[allow(unused)]
    pub fn sync(&mut self, ctx: &EventCtx, gps_bounds: &GPSBounds) {
        #[cfg(target_arch = "wasm32")]
        {
            // This is called for every single event, but the camera hasn't always moved
            let bounds = ctx.canvas.get_screen_bounds();
            if self.bounds == bounds {
                return;
            }
            self.bounds = bounds;

            let pt1 = geom::Pt2D::new(bounds.min_x, bounds.min_y).to_gps(gps_bounds);
            let pt2 = geom::Pt2D::new(bounds.max_x, bounds.max_y).to_gps(gps_bounds);
            crate::sync_map_canvas(pt1.x(), pt1.y(), pt2.x(), pt2.y());
        }
    }
}
