use anyhow::Result;
use widgetry::tools::FutureLoader;
use widgetry::{EventCtx, State, Transition};

use route::Route;

/// Lets the user pick a JSON file of stops. `None` means nothing was chosen.
pub struct FileLoader;

impl FileLoader {
    pub fn new_state<A: 'static>(
        ctx: &mut EventCtx,
        on_load: Box<dyn FnOnce(&mut EventCtx, &mut A, Result<Option<Route>>) -> Transition<A>>,
    ) -> Box<dyn State<A>> {
        let (_, outer_progress_rx) = futures_channel::mpsc::channel(1);
        let (_, inner_progress_rx) = futures_channel::mpsc::channel(1);
        FutureLoader::<A, Option<Route>>::new_state(
            ctx,
            Box::pin(async move {
                let builder = rfd::AsyncFileDialog::new().add_filter("JSON", &["json"]);
                let route = match builder.pick_file().await {
                    Some(file) => Some(Route::from_json(&file.read().await)?),
                    None => None,
                };
                let wrap: Box<dyn Send + FnOnce(&A) -> Option<Route>> =
                    Box::new(move |_: &A| route);
                Ok(wrap)
            }),
            outer_progress_rx,
            inner_progress_rx,
            "Waiting for a route file to be chosen",
            on_load,
        )
    }
}
