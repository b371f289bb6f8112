use {
    crate::domain::SpikeMatch,
    anyhow::{Context, Result},
    std::path::Path,
};

/// Overwrites `path` with one row per match (`symbol,bar_time,close,volume`).
pub fn write_matches_csv(path: &Path, matches: &[SpikeMatch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for m in matches {
        writer.serialize(m)?;
    }
    writer.flush()?;
    Ok(())
}
