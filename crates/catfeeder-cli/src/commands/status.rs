use catfeeder_core::{peek, Config, Database, Event};
use chrono::Utc;

use super::{deliver_due_alerts, require_pet, CmdResult};
use crate::render;

pub fn run(json: bool) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let pet = require_pet(&db)?;
    let now = Utc::now();

    deliver_due_alerts(&db, now, json)?;

    let snapshot = peek(&db, &config.hunger, now)?;
    if json {
        return render::print_event(&snapshot, true);
    }
    if let Event::StateSnapshot {
        level,
        max_level,
        hungry,
        ..
    } = snapshot
    {
        println!(
            "{}",
            render::pet_line(&pet, level, max_level, hungry, config.ui.bar_width)
        );
    }
    Ok(())
}
