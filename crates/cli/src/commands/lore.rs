//! One-shot lookups printed as JSON, for poking at the pipeline without
//! running the server.

use anyhow::Result;
use placelore_service::{HistoryOutcome, PlacesOutcome};

use crate::Services;

pub(crate) async fn history(services: &Services, place: &str) -> Result<()> {
    let outcome = services.history.get_history(place).await?;
    let value = match outcome {
        HistoryOutcome::Stored { location, history } => serde_json::json!({
            "source": "database", "location": location, "history": history
        }),
        HistoryOutcome::Generated { location, history, cached } => serde_json::json!({
            "source": "model", "location": location, "history": history, "cached": cached
        }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub(crate) async fn places(services: &Services, place: &str) -> Result<()> {
    let outcome = services.places.get_places(place).await?;
    let value = match outcome {
        PlacesOutcome::Stored { location, places } => serde_json::json!({
            "source": "database",
            "location": location,
            "historical_places": places.iter().map(|p| serde_json::json!({
                "name": p.name, "description": p.description
            })).collect::<Vec<_>>(),
        }),
        PlacesOutcome::Generated { location, names, cached } => serde_json::json!({
            "source": "model", "location": location,
            "historical_places": names, "cached": cached
        }),
        PlacesOutcome::NoneFound => serde_json::json!({
            "message": "No historical places found."
        }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
