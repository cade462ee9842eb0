use std::sync::Arc;

use crate::{
    analysis::AnalysisOptions, api::AppState, error, info, server, spotify::PlaylistSource,
    warning,
};

pub async fn serve(
    source: Arc<dyn PlaylistSource>,
    options: AnalysisOptions,
    address: String,
    open: bool,
) {
    let state = AppState::new(source, options);
    let url = format!("http://{address}/");

    info!("Serving the playlist analyser on {}", url);

    if open {
        if let Err(e) = webbrowser::open(&url) {
            warning!("Cannot open browser. Err: {}", e);
        }
    }

    if let Err(e) = server::start_api_server(state, &address).await {
        error!("Server stopped. Err: {}", e);
    }
}
