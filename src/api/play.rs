use axum::{Form, extract::State, response::Html};
use serde::Deserialize;

use crate::{
    api::AppState,
    criteria::{CriteriaForm, SelectionCriteria},
    error::{AppError, Result},
    info, pages,
    spotify::{playlists::filter_tracks, search::choose_track},
    warning,
};

#[derive(Debug, Deserialize)]
pub struct DiceForm {
    #[serde(default)]
    pub playlist_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistSearchForm {
    #[serde(default)]
    pub playlist_id: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub track: String,
}

/// Resolves a track for the submitted criteria and plays it.
pub async fn play(
    State(state): State<AppState>,
    Form(form): Form<CriteriaForm>,
) -> Result<Html<String>> {
    let criteria = SelectionCriteria::from_form(&form)?;
    let client = state.spotify().await?;

    info!("Selecting a track for {}", criteria);
    let track = client
        .resolve_track(&criteria, state.config.selection, state.config.market.as_deref())
        .await?;
    let started = client.play_on_active_device(track).await?;

    Ok(Html(pages::now_playing_page(
        &started,
        Some(&criteria.to_string()),
    )))
}

/// Plays a random track of the chosen playlist.
pub async fn dice(
    State(state): State<AppState>,
    Form(form): Form<DiceForm>,
) -> Result<Html<String>> {
    let playlist_id = required_playlist(&form.playlist_id)?;
    let client = state.spotify().await?;

    let tracks = client.playlist_tracks(playlist_id).await?;
    let track = choose_track(&tracks).cloned().ok_or(AppError::PlaylistEmpty)?;

    match client.play_on_active_device(track.clone()).await {
        Ok(started) => Ok(Html(pages::now_playing_page(
            &started,
            Some("Picked at random from your playlist"),
        ))),
        // without a device the pick is shown with its preview or Spotify link
        Err(AppError::NoActiveDevice) => {
            warning!("No active device, showing '{}' without playing it", track.name);
            Ok(Html(pages::picked_track_page(
                &track,
                &AppError::NoActiveDevice.to_string(),
            )))
        }
        Err(e) => Err(e),
    }
}

/// Lists the tracks of a playlist that match the artist, album and name filters.
pub async fn search_playlist(
    State(state): State<AppState>,
    Form(form): Form<PlaylistSearchForm>,
) -> Result<Html<String>> {
    let playlist_id = required_playlist(&form.playlist_id)?;
    let client = state.spotify().await?;

    let tracks = client.playlist_tracks(playlist_id).await?;
    let matches = filter_tracks(&tracks, &form.artist, &form.album, &form.track);

    Ok(Html(pages::playlist_matches_page(&matches)))
}

fn required_playlist(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::Validation("select a playlist first".to_string()));
    }
    Ok(id)
}
