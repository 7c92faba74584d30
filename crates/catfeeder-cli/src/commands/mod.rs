pub mod adopt;
pub mod config;
pub mod feed;
pub mod pet;
pub mod session;
pub mod status;

use catfeeder_core::{Database, Event, Pet};
use chrono::{DateTime, Utc};

use crate::render;

pub type CmdResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// The stored pet, or an error pointing the user at onboarding.
pub fn require_pet(db: &Database) -> CmdResult<Pet> {
    db.load_pet()?
        .ok_or_else(|| "no pet yet, adopt one first: catfeeder adopt <NAME>".into())
}

/// Print and drop every spooled alert that has come due.
pub fn deliver_due_alerts(db: &Database, now: DateTime<Utc>, json: bool) -> CmdResult {
    for alert in db.take_due_alerts(now)? {
        let event = Event::AlertDelivered {
            id: alert.id,
            title: alert.title,
            body: alert.body,
            fire_at: alert.fire_at,
        };
        render::print_event(&event, json)?;
    }
    Ok(())
}
