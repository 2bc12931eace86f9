use anyhow::Result;
use geom::{Bounds, Circle, Distance, PolyLine, Pt2D};
use widgetry::mapspace::{ObjectID, World};
use widgetry::tools::PopupMsg;
use widgetry::{
    Color, Drawable, EventCtx, GeomBatch, GfxCtx, HorizontalAlignment, Key, Line, Outcome, Panel,
    State, Text, UpdateType, VerticalAlignment, Widget,
};

use route::Route;

use crate::components::{draw_marker, status_widget, FileLoader, Presentation, NOT_ENOUGH_STOPS};
use crate::{App, Transition};

const LOAD_ERROR: &str = "Error loading delivery data. Please check the logs for details.";

/// The map with every stop, the path between them, and the sleigh flying along it.
pub struct Tracker {
    panel: Panel,
    world: World<Obj>,
    marker: Drawable,
    radius: Distance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Obj {
    Stop(usize),
}
impl ObjectID for Obj {}

impl Tracker {
    pub fn new_state(ctx: &mut EventCtx, app: &App) -> Box<dyn State<App>> {
        let radius = marker_radius(&app.bounds);
        let mut state = Self {
            panel: Panel::new_builder(Widget::col(vec![
                Line("Santa Tracker").small_heading().into_widget(ctx),
                Widget::placeholder(ctx, "controls"),
                Widget::placeholder(ctx, "progress"),
            ]))
            .aligned(HorizontalAlignment::Left, VerticalAlignment::Top)
            .build(ctx),
            world: make_world(ctx, app, radius),
            marker: Drawable::empty(ctx),
            radius,
        };
        state.update_controls(ctx, app);
        state.show_initial_status(ctx, app);
        Box::new(state)
    }

    fn update_controls(&mut self, ctx: &mut EventCtx, app: &App) {
        let mut row = Vec::new();
        if let Some(ref driver) = app.driver {
            if driver.animator().route().can_animate() {
                let label = if driver.is_running() {
                    "pause"
                } else {
                    "resume"
                };
                row.push(
                    ctx.style()
                        .btn_plain
                        .text(label)
                        .hotkey(Key::Space)
                        .build_def(ctx),
                );
            }
        }
        row.push(ctx.style().btn_outline.text("Load route").build_def(ctx));
        self.panel.replace(ctx, "controls", Widget::row(row));
    }

    // Until the first tick arrives
    fn show_initial_status(&mut self, ctx: &mut EventCtx, app: &App) {
        if let Some(ref err) = app.load_error {
            warn!("Santa tracking is disabled: {err}");
            let status = status_widget(ctx, LOAD_ERROR);
            self.panel.replace(ctx, "progress", status);
            return;
        }
        let Some(route) = app.route() else {
            return;
        };

        if let Some(first) = route.get(0) {
            self.marker = draw_marker(ctx, first.position().to_pt(&app.gps_bounds), self.radius);
        }

        let msg = if !route.can_animate() {
            NOT_ENOUGH_STOPS.to_string()
        } else if app.driver.as_ref().map(|d| d.is_running()).unwrap_or(false) {
            "Preparing the sleigh...".to_string()
        } else {
            format!("Parked at {}", route.waypoints()[0].city)
        };
        let status = status_widget(ctx, &msg);
        self.panel.replace(ctx, "progress", status);
    }
}

impl State<App> for Tracker {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        ctx.canvas_movement();
        app.map_sync.sync(ctx, &app.gps_bounds);

        if let Outcome::Clicked(x) = self.panel.event(ctx) {
            match x.as_ref() {
                "pause" => {
                    if let Some(ref mut driver) = app.driver {
                        driver.animator_mut().stop();
                    }
                    self.update_controls(ctx, app);
                }
                "resume" => {
                    if let Some(ref mut driver) = app.driver {
                        driver.animator_mut().resume();
                    }
                    self.update_controls(ctx, app);
                }
                "Load route" => {
                    return load_route_file(ctx);
                }
                _ => unreachable!(),
            }
        }

        self.world.event(ctx);

        if let Some(ref mut driver) = app.driver {
            if driver.is_running() {
                if let Some(dt) = ctx.input.nonblocking_is_update_event() {
                    ctx.input.use_update_event();
                    let mut sink = Presentation::new(
                        ctx,
                        &mut self.panel,
                        &mut self.marker,
                        &app.gps_bounds,
                        self.radius,
                    );
                    driver.step(dt, &mut sink);
                }
                ctx.request_update(UpdateType::Game);
            }
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        self.world.draw(g);
        g.redraw(&self.marker);
        self.panel.draw(g);
    }
}

fn load_route_file(ctx: &mut EventCtx) -> Transition {
    Transition::Push(FileLoader::new_state(
        ctx,
        Box::new(
            |ctx: &mut EventCtx, app: &mut App, result: Result<Option<Route>>| match result {
                Ok(Some(route)) => {
                    app.set_route(ctx, route);
                    Transition::Multi(vec![
                        Transition::Pop,
                        Transition::Replace(Tracker::new_state(ctx, app)),
                    ])
                }
                // User didn't pick a file
                Ok(None) => Transition::Pop,
                Err(err) => {
                    Transition::Replace(PopupMsg::new_state(ctx, "Error", vec![err.to_string()]))
                }
            },
        ),
    ))
}

// Map space is in meters, and a route can cover anything from a city to the whole globe
fn marker_radius(bounds: &Bounds) -> Distance {
    let extent = (bounds.max_x - bounds.min_x).max(bounds.max_y - bounds.min_y);
    Distance::meters((0.01 * extent).max(10.0))
}

fn make_world(ctx: &mut EventCtx, app: &App, radius: Distance) -> World<Obj> {
    let mut world = World::bounded(&app.bounds);
    let mut batch = GeomBatch::from(vec![(Color::grey(0.1), app.bounds.get_rectangle())]);

    let route = match app.route() {
        Some(route) => route,
        None => {
            world.draw_master_batch(ctx, batch);
            return world;
        }
    };
    let pts: Vec<Pt2D> = route
        .waypoints()
        .iter()
        .map(|waypoint| waypoint.position().to_pt(&app.gps_bounds))
        .collect();

    if route.can_animate() {
        match PolyLine::new(Pt2D::approx_dedupe(pts.clone(), Distance::meters(1.0))) {
            Ok(pl) => {
                batch.push(
                    Color::hex("#e63946").alpha(0.8),
                    pl.make_polygons(radius * 0.3),
                );
            }
            Err(err) => {
                warn!("Can't draw the path between stops: {err}");
            }
        }
    }
    world.draw_master_batch(ctx, batch);

    // Optimization
    let circle = Circle::new(Pt2D::zero(), radius * 0.6).to_polygon();
    for (idx, (waypoint, pt)) in route.waypoints().iter().zip(pts).enumerate() {
        let mut txt = Text::from(Line(&waypoint.city).small_heading());
        txt.add_line(Line(format!("Host: {}", waypoint.recipient)));
        world
            .add(Obj::Stop(idx))
            .hitbox(circle.translate(pt.x(), pt.y()))
            .draw_color(Color::hex("#06d6a0"))
            .hover_alpha(0.5)
            .tooltip(txt)
            .build(ctx);
    }
    world.initialize_hover(ctx);

    world
}
