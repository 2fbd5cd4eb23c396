// src/api/favorites.rs
use serde::Serialize;

use crate::core::ServiceClient;
use crate::error::ApiResult;
use crate::types::{FavoriteSource, FavoriteToggleResponse, FavoritesForJd};

const FAVORITES: &str = "favorites";

#[derive(Serialize)]
struct ToggleFavoriteRequest<'a> {
    candidate_id: &'a str,
    source: FavoriteSource,
    favorite: bool,
}

impl ServiceClient {
    /// Set the favorite flag of a ranked candidate. `candidate_id` is the
    /// profile id for search results and the resume id for resume rankings.
    pub async fn toggle_favorite(
        &self,
        candidate_id: &str,
        source: FavoriteSource,
        favorite: bool,
    ) -> ApiResult<FavoriteToggleResponse> {
        self.post_json(
            "Toggle favorite",
            &[FAVORITES, "toggle"],
            &ToggleFavoriteRequest {
                candidate_id,
                source,
                favorite,
            },
        )
        .await
    }

    /// Favorited candidates of a job description, from both ranking tables.
    pub async fn favorites_for_jd(&self, jd_id: &str) -> ApiResult<FavoritesForJd> {
        self.get_json("Fetch favorites", &[FAVORITES, jd_id], &[])
            .await
    }
}
