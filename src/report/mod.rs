//! Ordering, rendering and delivery of a run's matches.

mod digest;
mod notifier;
mod reporter;

pub use digest::{no_matches_message, render_digest, render_table, sort_matches};
pub use notifier::{ConsoleNotifier, Notifier, TelegramNotifier};
pub use reporter::{Report, Reporter};
