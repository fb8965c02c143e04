use crate::{config::Config, info, spotify, success, utils, warning};

/// Prints the authorization URL and tries to open it in the default browser.
pub fn auth_url(config: &Config, open_browser: bool) {
    let url = spotify::auth::authorize_url(config, &utils::generate_state());

    info!("Authorize URL:");
    println!("{}", url);

    if !open_browser {
        return;
    }

    match webbrowser::open(&url) {
        Ok(()) => success!("Opened the authorization URL in your default browser."),
        Err(e) => warning!(
            "Could not open browser automatically: {}\nPlease copy the URL above and open it manually.",
            e
        ),
    }
}
