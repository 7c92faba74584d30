use clap::Args;
use catfeeder_core::{Avatar, Database, Pet};

use super::CmdResult;

#[derive(Args)]
pub struct AdoptArgs {
    /// The pet's name
    name: String,
    /// Avatar symbol or name (see `catfeeder pet avatars`)
    #[arg(long, default_value = "cat")]
    avatar: Avatar,
    /// Start with hunger alerts switched off
    #[arg(long)]
    no_notifications: bool,
    /// Replace the current pet
    #[arg(long)]
    replace: bool,
}

pub fn run(args: AdoptArgs) -> CmdResult {
    let db = Database::open()?;

    if let Some(existing) = db.load_pet()? {
        if !args.replace {
            return Err(format!(
                "{} {} already lives here (use --replace to adopt a new pet)",
                existing.avatar_symbol,
                existing.display_name()
            )
            .into());
        }
    }

    let mut pet = Pet::new(&args.name, args.avatar)?;
    pet.notifications_enabled = !args.no_notifications;

    db.clear_hunger_state()?;
    db.save_pet(&pet)?;
    tracing::info!(name = %pet.name, avatar = pet.avatar_symbol.name(), "pet adopted");

    println!("Welcome home, {} {}!", pet.avatar_symbol, pet.display_name());
    Ok(())
}
