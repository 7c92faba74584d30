//! # CatFeeder Core Library
//!
//! Business logic for a single virtual pet whose hunger decays over time.
//! All operations are available through the standalone CLI binary, which
//! is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Hunger Engine**: a wall-clock-driven state machine. The caller
//!   invokes `tick()` periodically while in the foreground and reports
//!   background/foreground transitions; decay accrued in the background is
//!   reconstructed from elapsed time.
//! - **Notifier**: the alert subsystem as a small capability trait, so the
//!   engine can be driven against a recording fake.
//! - **Storage**: SQLite key-value store and TOML configuration.
//! - **Caretaker**: owns one engine and the active pet for a session.
//!
//! ## Key Components
//!
//! - [`HungerEngine`]: hunger state machine
//! - [`Caretaker`]: session controller wiring the engine to storage
//! - [`Notifier`]: alert capability
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration management

pub mod caretaker;
pub mod error;
pub mod events;
pub mod hunger;
pub mod notify;
pub mod pet;
pub mod storage;

pub use caretaker::{peek, Caretaker};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use hunger::{AlertProfile, BackgroundSnapshot, HungerEngine, HungerRules, HungerState};
pub use notify::{Alert, AlertId, Notifier, PendingAlert, RecordingNotifier, SpoolNotifier};
pub use pet::{Avatar, Pet};
pub use storage::{Config, Database};
