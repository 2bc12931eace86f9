use anyhow::Result;
use widgetry::tools::FutureLoader;
use widgetry::{EventCtx, State, Transition};

use route::Route;

/// Where the list of stops comes from
#[derive(Clone, Debug, PartialEq)]
pub enum RouteSource {
    File(String),
    Url(String),
}

impl RouteSource {
    /// On web, everything is fetched relative to the page.
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://")
            || input.starts_with("https://")
            || cfg!(target_arch = "wasm32")
        {
            RouteSource::Url(input.to_string())
        } else {
            RouteSource::File(input.to_string())
        }
    }

    async fn fetch(self) -> Result<Vec<u8>> {
        match self {
            RouteSource::File(path) => Ok(fs_err::read(path)?),
            RouteSource::Url(url) => abstio::http_get(&url).await,
        }
    }
}

/// Fetches and parses the route once. There's no retry; `on_load` decides what a failure means.
pub struct RouteLoader;

impl RouteLoader {
    pub fn new_state<A: 'static>(
        ctx: &mut EventCtx,
        source: RouteSource,
        on_load: Box<dyn FnOnce(&mut EventCtx, &mut A, Result<Route>) -> Transition<A>>,
    ) -> Box<dyn State<A>> {
        info!("Loading the route from {:?}", source);
        let (_, outer_progress_rx) = futures_channel::mpsc::channel(1);
        let (_, inner_progress_rx) = futures_channel::mpsc::channel(1);
        FutureLoader::<A, Route>::new_state(
            ctx,
            Box::pin(async move {
                let bytes = source.fetch().await?;
                let route = Route::from_json(&bytes)?;
                let wrap: Box<dyn Send + FnOnce(&A) -> Route> = Box::new(move |_: &A| route);
                Ok(wrap)
            }),
            outer_progress_rx,
            inner_progress_rx,
            "Loading the delivery route",
            on_load,
        )
    }
}
