//! Command execution against the hotel repository

use std::path::Path;

use anyhow::Context;
use innkeep_core::{BookingDraft, HotelDraft, HotelPatch, HotelRepository};
use serde_json::{json, Value};
use tracing::info;

use crate::cli::Command;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Run one command, returning the JSON to print
pub fn execute<R: HotelRepository>(repo: &R, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::Create { file } => {
            let draft: HotelDraft = read_json(&file)?;
            let hotel = repo.create_hotel(draft)?;
            info!(hotel_id = %hotel.id, "Created hotel");
            serde_json::to_value(hotel)?
        }
        Command::Get { id } => serde_json::to_value(repo.get_hotel(id)?)?,
        Command::Update { id, file } => {
            let patch: HotelPatch = read_json(&file)?;
            if patch.is_empty() {
                anyhow::bail!("patch in {} changes nothing", file.display());
            }
            serde_json::to_value(repo.update_hotel(id, patch)?)?
        }
        Command::Delete { id } => {
            repo.delete_hotel(id)?;
            json!({ "deleted": id })
        }
        Command::Book { id, file } => {
            let draft: BookingDraft = read_json(&file)?;
            let hotel = repo.add_booking(id, draft)?;
            info!(hotel_id = %id, bookings = hotel.bookings.len(), "Booking added");
            serde_json::to_value(hotel)?
        }
        Command::List { owner } => serde_json::to_value(repo.list_hotels_for_owner(&owner)?)?,
        Command::Bookings { user } => serde_json::to_value(repo.list_bookings_for_user(&user)?)?,
    };

    Ok(output)
}
