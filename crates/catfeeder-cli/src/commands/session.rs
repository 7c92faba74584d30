//! Interactive foreground session: the pet stays on screen, hunger ticks
//! down on a timer and stdin commands feed it or send the app to the
//! background.

use std::time::Duration;

use catfeeder_core::{Caretaker, Config, Database, Event, Notifier, Pet, SpoolNotifier};
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};

use super::{deliver_due_alerts, require_pet, CmdResult};
use crate::render;

const HELP: &str = "commands: feed (f), background (b), resume (r), status (s), quit (q)";

pub fn run() -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let pet = require_pet(&db)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(session(&config, &db, pet))
}

async fn session(config: &Config, db: &Database, pet: Pet) -> CmdResult {
    let notifier = SpoolNotifier::new(db, config.notifications.permitted);
    let (mut caretaker, resumed) =
        Caretaker::wake(db, pet, config.hunger.clone(), notifier, Utc::now())?;
    if let Some(event) = resumed {
        render::print_event(&event, false)?;
    }
    print_pet(&caretaker, config);
    println!("{HELP}");

    // Whatever ends the loop, the level goes back to storage.
    let outcome = drive(&mut caretaker, config, db).await;
    let slept = caretaker.sleep(Utc::now());
    outcome?;
    if let Some(event) = slept? {
        render::print_event(&event, false)?;
    }
    Ok(())
}

async fn drive<N: Notifier>(
    caretaker: &mut Caretaker<'_, N>,
    config: &Config,
    db: &Database,
) -> CmdResult {
    let mut level_rx = caretaker.subscribe();
    level_rx.borrow_and_update();

    let mut ticker = interval(config.hunger.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    let mut alert_poll = interval(Duration::from_secs(1));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick(), if !caretaker.engine().is_backgrounded() => {
                let event = caretaker.tick(Utc::now())?;
                if let Event::Ticked { alerted: true, .. } = event {
                    render::print_event(&event, false)?;
                }
            }
            _ = alert_poll.tick() => {
                deliver_due_alerts(db, Utc::now(), false)?;
            }
            Ok(()) = level_rx.changed() => {
                level_rx.borrow_and_update();
                print_pet(caretaker, config);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { return Ok(()) };
                match line.trim() {
                    "feed" | "f" => {
                        let event = caretaker.feed(Utc::now())?;
                        render::print_event(&event, false)?;
                    }
                    "background" | "b" => {
                        if caretaker.engine().is_backgrounded() {
                            println!("already in the background");
                        } else {
                            let event = caretaker.enter_background(Utc::now())?;
                            render::print_event(&event, false)?;
                        }
                    }
                    "resume" | "r" => match caretaker.resume_foreground(Utc::now())? {
                        Some(event) => {
                            render::print_event(&event, false)?;
                            ticker.reset();
                        }
                        None => println!("already in the foreground"),
                    },
                    "status" | "s" => {
                        render::print_event(&caretaker.snapshot(Utc::now()), false)?;
                    }
                    "quit" | "q" => return Ok(()),
                    "help" | "?" => println!("{HELP}"),
                    "" => {}
                    other => println!("unknown command: {other} ({HELP})"),
                }
            }
            _ = &mut ctrl_c => return Ok(()),
        }
    }
}

fn print_pet<N: Notifier>(caretaker: &Caretaker<'_, N>, config: &Config) {
    println!(
        "{}",
        render::pet_line(
            caretaker.pet(),
            caretaker.level(),
            config.hunger.max_level,
            caretaker.engine().is_hungry(),
            config.ui.bar_width,
        )
    );
}
