use catfeeder_core::{Caretaker, Config, Database, Event, Notifier, SpoolNotifier};
use chrono::Utc;

use super::{deliver_due_alerts, require_pet, CmdResult};
use crate::render;

pub fn run(times: u32, json: bool) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let pet = require_pet(&db)?;

    deliver_due_alerts(&db, Utc::now(), json)?;

    let notifier = SpoolNotifier::new(&db, config.notifications.permitted);
    let (mut caretaker, resumed) =
        Caretaker::wake(&db, pet, config.hunger.clone(), notifier, Utc::now())?;

    // Sleep even when feeding fails, so the level is not lost.
    let outcome = feed(&mut caretaker, &config, resumed, times, json);
    let slept = caretaker.sleep(Utc::now());
    outcome?;
    if let Some(event) = slept? {
        render::print_event(&event, json)?;
    }
    Ok(())
}

fn feed<N: Notifier>(
    caretaker: &mut Caretaker<'_, N>,
    config: &Config,
    resumed: Option<Event>,
    times: u32,
    json: bool,
) -> CmdResult {
    if let Some(event) = resumed {
        render::print_event(&event, json)?;
    }

    for _ in 0..times {
        let event = caretaker.feed(Utc::now())?;
        render::print_event(&event, json)?;
    }

    if !json {
        println!(
            "{}",
            render::pet_line(
                caretaker.pet(),
                caretaker.level(),
                config.hunger.max_level,
                caretaker.engine().is_hungry(),
                config.ui.bar_width
            )
        );
    }
    Ok(())
}
