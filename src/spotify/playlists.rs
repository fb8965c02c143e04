use crate::{
    error::Result,
    spotify::client::SpotifyClient,
    types::{Paging, Playlist, PlaylistItem, Track},
    utils,
};

const PLAYLIST_PAGE_SIZE: u32 = 50;
const ITEMS_PAGE_SIZE: u32 = 100;
const ITEM_FIELDS: &str =
    "items.track(id,name,uri,preview_url,is_playable,external_urls.spotify,artists(name),album(name)),next,total";

impl SpotifyClient {
    /// All playlists of the current user, following `next` links.
    pub async fn current_user_playlists(&self) -> Result<Vec<Playlist>> {
        let mut page: Paging<Playlist> = self
            .get_json(
                "/me/playlists",
                &[("limit", PLAYLIST_PAGE_SIZE.to_string())],
            )
            .await?;
        let mut playlists = std::mem::take(&mut page.items);

        while let Some(next) = page.next.take() {
            page = self.get_json_url(&next, &[]).await?;
            playlists.append(&mut page.items);
        }

        Ok(playlists)
    }

    /// Every track of a playlist, without removed entries and local files.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>> {
        let path = format!("/playlists/{}/tracks", urlencoding::encode(playlist_id));
        let mut page: Paging<PlaylistItem> = self
            .get_json(
                &path,
                &[
                    ("limit", ITEMS_PAGE_SIZE.to_string()),
                    ("fields", ITEM_FIELDS.to_string()),
                ],
            )
            .await?;
        let mut tracks = collect_tracks(std::mem::take(&mut page.items));

        // `next` already carries limit and fields
        while let Some(next) = page.next.take() {
            page = self.get_json_url(&next, &[]).await?;
            tracks.extend(collect_tracks(std::mem::take(&mut page.items)));
        }

        Ok(tracks)
    }
}

fn collect_tracks(items: Vec<PlaylistItem>) -> Vec<Track> {
    items
        .into_iter()
        .filter_map(|item| item.track)
        .filter(|track| track.id.is_some())
        .collect()
}

/// Tracks whose artist, album and name contain the given filters.
///
/// Matching is case-insensitive; an empty filter matches everything.
pub fn filter_tracks<'a>(
    tracks: &'a [Track],
    artist: &str,
    album: &str,
    name: &str,
) -> Vec<&'a Track> {
    tracks
        .iter()
        .filter(|t| {
            let artist_match = artist.trim().is_empty()
                || t.artists
                    .iter()
                    .any(|a| utils::contains_ignore_case(&a.name, artist));

            artist_match
                && utils::contains_ignore_case(t.album_name(), album)
                && utils::contains_ignore_case(&t.name, name)
        })
        .collect()
}
