//! Handler for the customer-facing labour listing.

use axum::extract::State;
use axum::Json;
use labourhub_core::types::DbId;
use labourhub_db::repositories::UserRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// TODO: replace the placeholder day rate once pricing lands on the profile.
const PLACEHOLDER_PRICE: &str = "₹800/day";

/// Listing image shown for workers who have not uploaded one.
const DEFAULT_LISTING_IMAGE: &str = "uploads/default.png";

/// Listing bio shown for workers who have not filled in their experience.
const DEFAULT_BIO: &str = "Experienced labour";

/// One card in the dashboard's labour listing.
#[derive(Debug, Serialize)]
pub struct LabourListing {
    pub id: DbId,
    pub name: String,
    pub skills: Vec<String>,
    pub availability: String,
    pub image: String,
    pub rating: f64,
    pub price: String,
    pub bio: String,
    pub city: String,
}

/// GET /api/labours
///
/// List every labour account as a dashboard card, newest first.
pub async fn list_labours(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LabourListing>>> {
    let labours = UserRepo::list_labours(&state.pool).await?;

    let listings = labours
        .into_iter()
        .map(|labour| LabourListing {
            id: labour.id,
            name: labour.name,
            skills: labour.skills,
            availability: labour.availability,
            image: labour
                .image
                .unwrap_or_else(|| DEFAULT_LISTING_IMAGE.to_string()),
            rating: labour.rating,
            price: PLACEHOLDER_PRICE.to_string(),
            bio: labour.experience.unwrap_or_else(|| DEFAULT_BIO.to_string()),
            city: labour.city,
        })
        .collect();

    Ok(Json(listings))
}
