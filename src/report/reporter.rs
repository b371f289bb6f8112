use std::path::PathBuf;

use crate::{
    config::ScanConfig,
    data::write_matches_csv,
    domain::{SpikeMatch, Timeframe},
    report::{Notifier, render_digest, render_table, sort_matches},
};

/// What the reporter did with a run's matches.
#[derive(Debug)]
pub struct Report {
    pub matches: Vec<SpikeMatch>,
    pub digest: String,
    pub csv_written: bool,
    pub delivered: bool,
}

pub struct Reporter<'a> {
    notifier: &'a dyn Notifier,
    timeframe: Timeframe,
    csv_out: PathBuf,
}

impl<'a> Reporter<'a> {
    pub fn new(notifier: &'a dyn Notifier, config: &ScanConfig) -> Self {
        Self {
            notifier,
            timeframe: config.timeframe,
            csv_out: config.csv_out.clone(),
        }
    }

    /// Sorts, persists (only when non-empty) and sends the digest.
    /// Persistence and delivery failures are logged, never returned.
    pub async fn report(&self, mut matches: Vec<SpikeMatch>) -> Report {
        sort_matches(&mut matches);

        let mut csv_written = false;
        if !matches.is_empty() {
            println!("{}", render_table(&matches));
            match write_matches_csv(&self.csv_out, &matches) {
                Ok(()) => {
                    log::info!("CSV saved: {}", self.csv_out.display());
                    csv_written = true;
                }
                Err(e) => log::error!("Could not save CSV: {:#}", e),
            }
        } else {
            log::info!("No matches.");
        }

        let digest = render_digest(&matches, self.timeframe);
        let delivered = match self.notifier.send(&digest).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Notification failed: {:#}", e);
                false
            }
        };

        Report {
            matches,
            digest,
            csv_written,
            delivered,
        }
    }
}
