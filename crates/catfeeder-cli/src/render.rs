//! Terminal rendering of pets and events.

use catfeeder_core::{Event, Pet};

use crate::commands::CmdResult;

/// A fixed-width hunger bar, e.g. `[#####-----]`.
pub fn bar(level: u8, max: u8, width: u32) -> String {
    let width = width.max(1) as usize;
    let filled = if max == 0 {
        0
    } else {
        (usize::from(level) * width + usize::from(max) / 2) / usize::from(max)
    };
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn pet_line(pet: &Pet, level: u8, max: u8, hungry: bool, width: u32) -> String {
    let mut line = format!(
        "{} {}  {} {level}/{max}",
        pet.avatar_symbol,
        pet.display_name(),
        bar(level, max, width)
    );
    if hungry {
        line.push_str("  hungry!");
    }
    line
}

pub fn describe(event: &Event) -> String {
    match event {
        Event::Fed {
            level_before,
            level,
            ..
        } => {
            if level_before == level {
                format!("Already full ({level})")
            } else {
                format!("Fed: {level_before} -> {level}")
            }
        }
        Event::Ticked { level, alerted, .. } => {
            if *alerted {
                format!("Hunger dropped to {level}, alert sent")
            } else {
                format!("Hunger dropped to {level}")
            }
        }
        Event::Backgrounded {
            level,
            alert_in_secs,
            ..
        } => match alert_in_secs {
            Some(secs) => format!("Left alone at {level}, hunger alert in {secs}s"),
            None => format!("Left alone at {level}"),
        },
        Event::Resumed {
            elapsed_secs,
            level_before,
            level,
            ..
        } => format!("Away for {elapsed_secs}s: {level_before} -> {level}"),
        Event::AlertDelivered { title, body, .. } => format!("🔔 {title} {body}"),
        Event::StateSnapshot {
            level,
            max_level,
            hungry,
            ..
        } => {
            if *hungry {
                format!("Hunger {level}/{max_level}, hungry!")
            } else {
                format!("Hunger {level}/{max_level}")
            }
        }
    }
}

pub fn print_event(event: &Event, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(event)?);
    } else {
        println!("{}", describe(event));
    }
    Ok(())
}
