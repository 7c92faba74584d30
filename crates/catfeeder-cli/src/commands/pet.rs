use clap::{Subcommand, ValueEnum};
use catfeeder_core::{Avatar, Caretaker, Config, Database, Pet, SpoolNotifier};
use chrono::Utc;

use super::{require_pet, CmdResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum PetAction {
    /// Show the pet record
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename the pet
    Rename {
        name: String,
    },
    /// Change the pet's avatar
    Avatar {
        /// Avatar symbol or name
        avatar: Avatar,
    },
    /// Switch hunger alerts on or off
    Notifications {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// List available avatars
    Avatars,
}

pub fn run(action: PetAction) -> CmdResult {
    match action {
        PetAction::Avatars => {
            for avatar in Avatar::ALL {
                println!("{} {}", avatar.symbol(), avatar.name());
            }
            Ok(())
        }
        PetAction::Show { json } => {
            let db = Database::open()?;
            let pet = require_pet(&db)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pet)?);
            } else {
                println!("{} {}", pet.avatar_symbol, pet.display_name());
                let alerts = if pet.notifications_enabled { "on" } else { "off" };
                println!("alerts: {alerts}");
            }
            Ok(())
        }
        PetAction::Rename { name } => update(|pet| {
            pet.rename(&name)?;
            println!("Renamed to {}", pet.display_name());
            Ok(())
        }),
        PetAction::Avatar { avatar } => update(|pet| {
            pet.avatar_symbol = avatar;
            println!("{} {}", pet.avatar_symbol, pet.display_name());
            Ok(())
        }),
        PetAction::Notifications { state } => update(|pet| {
            pet.notifications_enabled = matches!(state, Toggle::On);
            let alerts = if pet.notifications_enabled { "on" } else { "off" };
            println!("Alerts {alerts}");
            Ok(())
        }),
    }
}

/// Apply a settings change inside a session so pending alerts follow it.
fn update(change: impl FnOnce(&mut Pet) -> CmdResult) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let pet = require_pet(&db)?;

    let notifier = SpoolNotifier::new(&db, config.notifications.permitted);
    let (mut caretaker, _) = Caretaker::wake(&db, pet, config.hunger, notifier, Utc::now())?;

    let mut pet = caretaker.pet().clone();
    let outcome = change(&mut pet).and_then(|()| Ok(caretaker.update_pet(pet)?));
    let slept = caretaker.sleep(Utc::now());
    outcome?;
    slept?;
    Ok(())
}
