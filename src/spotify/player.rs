use reqwest::StatusCode;

use crate::{
    error::{AppError, Result},
    spotify::client::{SpotifyClient, api_error},
    success,
    types::{Device, DevicesResponse, PlayRequest, PlaybackStarted, Track},
};

impl SpotifyClient {
    /// Devices currently visible to Spotify Connect.
    pub async fn devices(&self) -> Result<Vec<Device>> {
        let res: DevicesResponse = self.get_json("/me/player/devices", &[]).await?;
        Ok(res.devices)
    }

    /// The device playback would start on.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoActiveDevice`] when no device is active. An idle
    /// Spotify app shows up in the list but is not active until something was
    /// played on it, so the user is told to open Spotify instead of the play
    /// request failing silently.
    pub async fn active_device(&self) -> Result<Device> {
        let devices = self.devices().await?;
        pick_active_device(devices).ok_or(AppError::NoActiveDevice)
    }

    /// Starts playback of `uris` on the given device.
    ///
    /// `PUT /me/player/play` answers `204`/`202` on success, `404` when the
    /// device is gone and `403` for accounts without Premium.
    pub async fn start_playback(&self, device_id: Option<&str>, uris: Vec<String>) -> Result<()> {
        let query: Vec<(&str, String)> = device_id
            .map(|id| vec![("device_id", id.to_string())])
            .unwrap_or_default();
        let body = PlayRequest {
            uris,
            position_ms: Some(0),
        };

        let response = self.put_json("/me/player/play", &query, &body).await?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::ACCEPTED | StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(AppError::NoActiveDevice),
            StatusCode::FORBIDDEN => Err(AppError::PremiumRequired),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(api_error(status, &body))
            }
        }
    }

    /// Plays `track` on the active device.
    ///
    /// # Errors
    ///
    /// [`AppError::NoActiveDevice`] if no device is active, before anything
    /// is sent to the player.
    pub async fn play_on_active_device(&self, track: Track) -> Result<PlaybackStarted> {
        let uri = track
            .play_uri()
            .ok_or_else(|| AppError::Validation(format!("'{}' cannot be played", track.name)))?;
        let device = self.active_device().await?;

        self.start_playback(device.id.as_deref(), vec![uri]).await?;
        success!("Playing '{}' on {}", track.name, device.name);

        Ok(PlaybackStarted { track, device })
    }
}

/// First active, unrestricted device.
pub fn pick_active_device(devices: Vec<Device>) -> Option<Device> {
    devices
        .into_iter()
        .find(|d| d.is_active && !d.is_restricted)
}
