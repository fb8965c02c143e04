use rand::seq::IndexedRandom;

use crate::{
    criteria::{SelectionCriteria, SelectionStrategy},
    error::{AppError, Result},
    info,
    spotify::client::SpotifyClient,
    types::{RecommendationsResponse, SearchResponse, Track},
    warning,
};

/// Number of candidates fetched per request; one of them is picked at random.
pub const CANDIDATES: u32 = 20;

impl SpotifyClient {
    /// Searches tracks with Spotify's free text search.
    pub async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        market: Option<&str>,
    ) -> Result<Vec<Track>> {
        let mut params = vec![
            ("q", query.to_string()),
            ("type", "track".to_string()),
            ("limit", limit.clamp(1, 50).to_string()),
        ];
        if let Some(market) = market {
            params.push(("market", market.to_string()));
        }

        let res: SearchResponse = self.get_json("/search", &params).await?;
        Ok(res.tracks.map(|page| page.items).unwrap_or_default())
    }

    /// Tracks from the recommendations endpoint for the given parameters.
    pub async fn recommendations(
        &self,
        params: &[(&str, String)],
        market: Option<&str>,
    ) -> Result<Vec<Track>> {
        let mut params = params.to_vec();
        if let Some(market) = market {
            params.push(("market", market.to_string()));
        }

        let res: RecommendationsResponse = self.get_json("/recommendations", &params).await?;
        Ok(res.tracks)
    }

    /// Turns the selection criteria into one playable track.
    ///
    /// With [`SelectionStrategy::Recommendations`] the recommendations
    /// endpoint is asked first. It is closed for apps registered after late
    /// 2024 (answering 403 or 404), in which case search is used instead.
    /// Search runs the full query and then a relaxed one with only mood and
    /// genre.
    ///
    /// # Errors
    ///
    /// [`AppError::NoTrackFound`] when every attempt came back empty.
    pub async fn resolve_track(
        &self,
        criteria: &SelectionCriteria,
        strategy: SelectionStrategy,
        market: Option<&str>,
    ) -> Result<Track> {
        if strategy == SelectionStrategy::Recommendations {
            match self
                .recommendations(&criteria.recommendation_params(CANDIDATES), market)
                .await
            {
                Ok(tracks) => {
                    if let Some(track) = choose_track(&tracks) {
                        return Ok(track.clone());
                    }
                    info!("No recommendations for {}, falling back to search", criteria);
                }
                Err(AppError::Api { status: 403 | 404, message }) => {
                    warning!(
                        "Recommendations unavailable ({}), falling back to search",
                        message
                    );
                }
                Err(e) => return Err(e),
            }
        }

        let query = criteria.search_query();
        let tracks = self.search_tracks(&query, CANDIDATES, market).await?;
        if let Some(track) = choose_track(&tracks) {
            return Ok(track.clone());
        }

        let relaxed = criteria.relaxed_query();
        if relaxed != query {
            info!("Nothing found for '{}', trying '{}'", query, relaxed);
            let tracks = self.search_tracks(&relaxed, CANDIDATES, market).await?;
            if let Some(track) = choose_track(&tracks) {
                return Ok(track.clone());
            }
        }

        Err(AppError::NoTrackFound)
    }
}

/// Picks a random track that can be played.
///
/// Tracks without an id (local files) or flagged as not playable in the
/// requested market are never chosen.
pub fn choose_track(tracks: &[Track]) -> Option<&Track> {
    let playable: Vec<&Track> = tracks
        .iter()
        .filter(|t| t.id.is_some() && t.is_playable != Some(false))
        .collect();

    playable.choose(&mut rand::rng()).copied()
}
