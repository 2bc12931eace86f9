use geom::{Circle, Distance, GPSBounds, Polygon, Pt2D};
use widgetry::{Color, Drawable, EventCtx, GeomBatch, Line, Panel, Widget};

use model::{Frame, Sink};

const BAR_WIDTH: f64 = 300.0;
const BAR_HEIGHT: f64 = 12.0;

pub const NOT_ENOUGH_STOPS: &str = "Not enough stops to plan a route.";

/// Draws each frame: moves the sleigh and rewrites the "progress" part of the panel.
pub struct Presentation<'a, 'b> {
    ctx: &'a mut EventCtx<'b>,
    panel: &'a mut Panel,
    marker: &'a mut Drawable,
    gps_bounds: &'a GPSBounds,
    radius: Distance,
}

impl<'a, 'b> Presentation<'a, 'b> {
    pub fn new(
        ctx: &'a mut EventCtx<'b>,
        panel: &'a mut Panel,
        marker: &'a mut Drawable,
        gps_bounds: &'a GPSBounds,
        radius: Distance,
    ) -> Self {
        Self {
            ctx,
            panel,
            marker,
            gps_bounds,
            radius,
        }
    }
}

impl Sink for Presentation<'_, '_> {
    fn render(&mut self, frame: &Frame) {
        *self.marker = draw_marker(
            self.ctx,
            frame.position.to_pt(self.gps_bounds),
            self.radius,
        );
        let progress = progress_widget(self.ctx, frame);
        self.panel.replace(self.ctx, "progress", progress);
    }

    fn no_movement(&mut self) {
        let status = status_widget(self.ctx, NOT_ENOUGH_STOPS);
        self.panel.replace(self.ctx, "progress", status);
    }
}

pub fn draw_marker(ctx: &mut EventCtx, pos: Pt2D, radius: Distance) -> Drawable {
    let mut batch = GeomBatch::new();
    batch.push(Color::WHITE, Circle::new(pos, radius * 1.3).to_polygon());
    batch.push(Color::hex("#e63946"), Circle::new(pos, radius).to_polygon());
    ctx.upload(batch)
}

pub fn status_widget(ctx: &mut EventCtx, msg: &str) -> Widget {
    Line(msg).into_widget(ctx)
}

fn progress_widget(ctx: &mut EventCtx, frame: &Frame) -> Widget {
    Widget::col(vec![
        Line(&frame.message).into_widget(ctx),
        progress_bar(ctx, frame.progress_percent),
        Line(frame.completion_label()).secondary().into_widget(ctx),
    ])
}

fn progress_bar(ctx: &mut EventCtx, percent: f64) -> Widget {
    let mut batch = GeomBatch::new();
    batch.push(Color::grey(0.3), Polygon::rectangle(BAR_WIDTH, BAR_HEIGHT));
    let filled = BAR_WIDTH * percent.clamp(0.0, 100.0) / 100.0;
    // A sliver narrower than a pixel isn't worth a polygon
    if filled >= 1.0 {
        batch.push(Color::hex("#e63946"), Polygon::rectangle(filled, BAR_HEIGHT));
    }
    Widget::draw_batch(ctx, batch)
}
