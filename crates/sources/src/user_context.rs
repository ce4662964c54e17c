//! Helper functions to build a UserContext from the collaborators
//!
//! The deck needs the user's interests before pods can be filtered, and
//! the user's position before the radius filter can run. Both are fetched
//! exactly once here so the filters never touch the network.

use crate::client::PodSource;
use crate::geolocation::GeolocationProvider;
use crate::types::UserContext;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Build a UserContext for the current user.
///
/// Steps:
/// 1. Fetch interests (required; a failure aborts the build)
/// 2. Ask the geolocation provider for a position (optional; a failure is
///    logged and the radius filter is simply skipped)
/// 3. Attach the configured maximum distance
pub async fn build_user_context(
    source: &dyn PodSource,
    geolocation: &dyn GeolocationProvider,
    max_distance_m: Option<f64>,
) -> Result<UserContext> {
    let interests = source
        .get_user_interests()
        .await
        .context("Failed to fetch user interests")?;
    info!("User tags: {:?}", interests);

    let position = match geolocation.current_position().await {
        Ok(position) => position,
        Err(e) => {
            warn!("Geolocation failed, skipping distance filter: {}", e);
            None
        }
    };

    let mut context = UserContext::new().with_interests(interests);
    context.position = position;
    context.max_distance_m = max_distance_m;
    Ok(context)
}
