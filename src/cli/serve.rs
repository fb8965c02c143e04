use crate::{Res, api::AppState, config::Config, server};

/// Starts the web UI, optionally on a different address than configured.
pub async fn serve(mut config: Config, addr: Option<String>) -> Res<()> {
    if let Some(addr) = addr {
        config.server_addr = addr;
    }

    let state = AppState::new(config)?;
    server::start_api_server(state).await
}
