#[macro_use]
extern crate log;

mod components;
mod tracker;

use anyhow::Result;
use geom::{Bounds, GPSBounds};
use structopt::StructOpt;
use widgetry::{Color, EventCtx, GfxCtx, Settings, SharedAppState};

use model::{AnimatorConfig, Driver, RouteAnimator};
use route::Route;

use self::components::{MapSync, RouteLoader, RouteSource};

#[derive(StructOpt)]
struct Args {
    /// A path or URL to a JSON list of stops, in the order Santa visits them
    #[structopt(long, default_value = "data/locations.json")]
    route: String,
    /// How many seconds each leg between two stops takes
    #[structopt(long, default_value = "5")]
    segment_secs: f64,
    /// Legs leaving this city are described as departures
    #[structopt(long, default_value = "North Pole")]
    origin_city: String,
    /// Start with the sleigh parked
    #[structopt(long)]
    paused: bool,
}

impl Args {
    fn config(&self) -> Result<AnimatorConfig> {
        let mut config = AnimatorConfig::default()
            .with_segment_secs(self.segment_secs)?
            .with_origin_city(self.origin_city.clone());
        config.looping = !self.paused;
        Ok(config)
    }
}

fn run(settings: Settings) {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());
    let config = args.config().unwrap_or_else(|err| {
        error!("Ignoring bad settings: {err}");
        AnimatorConfig::default()
    });
    let source = RouteSource::parse(&args.route);

    widgetry::run(settings, move |ctx| {
        let app = App::new(ctx, config);
        // The tracker only starts once the route arrives
        let states = vec![RouteLoader::new_state(
            ctx,
            source,
            Box::new(|ctx: &mut EventCtx, app: &mut App, result: Result<Route>| {
                app.on_route_loaded(ctx, result);
                Transition::Replace(tracker::Tracker::new_state(ctx, app))
            }),
        )];
        (app, states)
    });
}

pub fn main() {
    let settings = Settings::new("Santa Tracker");
    run(settings);
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_wasm() {
    run(Settings::new("Santa Tracker").root_dom_element_id("loading".to_string()));
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = window)]
    fn sync_map_canvas(lon1: f64, lat1: f64, lon2: f64, lat2: f64);
}

pub struct App {
    config: AnimatorConfig,
    // None until a route loads
    driver: Option<Driver>,
    load_error: Option<String>,

    gps_bounds: GPSBounds,
    bounds: Bounds,

    map_sync: MapSync,
}

impl SharedAppState for App {
    fn draw_default(&self, g: &mut GfxCtx) {
        // On web, the map library draws tiles underneath
        if cfg!(not(target_arch = "wasm32")) {
            g.clear(Color::BLACK);
        }
    }
}

pub type Transition = widgetry::Transition<App>;

impl App {
    fn new(ctx: &mut EventCtx, config: AnimatorConfig) -> Self {
        let mut app = Self {
            config,
            driver: None,
            load_error: None,
            gps_bounds: GPSBounds::new(),
            bounds: Bounds::new(),
            map_sync: MapSync::new(),
        };
        app.fit_view(ctx, &Route::empty());
        app
    }

    pub fn on_route_loaded(&mut self, ctx: &mut EventCtx, result: Result<Route>) {
        match result {
            Ok(route) => self.set_route(ctx, route),
            Err(err) => {
                error!("Error loading delivery data: {err}");
                self.driver = None;
                self.load_error = Some(err.to_string());
            }
        }
    }

    pub fn set_route(&mut self, ctx: &mut EventCtx, route: Route) {
        route.dump_geojson();
        self.fit_view(ctx, &route);
        self.driver = Some(Driver::new(RouteAnimator::new(route, self.config.clone())));
        self.load_error = None;
    }

    pub fn route(&self) -> Option<&Route> {
        self.driver.as_ref().map(|driver| driver.animator().route())
    }

    fn fit_view(&mut self, ctx: &mut EventCtx, route: &Route) {
        self.gps_bounds = route.gps_bounds();
        self.bounds = self.gps_bounds.to_bounds();

        let bounds = &self.bounds;
        ctx.canvas.map_dims = (bounds.max_x, bounds.max_y);
        let width = (bounds.max_x - bounds.min_x).max(1.0);
        let height = (bounds.max_y - bounds.min_y).max(1.0);
        ctx.canvas.cam_zoom =
            (ctx.canvas.window_width / width).min(ctx.canvas.window_height / height);
        ctx.canvas.center_on_map_pt(bounds.center());
    }
}
