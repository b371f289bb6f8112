use {
    crate::{domain::SpikeMatch, domain::Timeframe, utils::TimeUtils},
    tabled::{Table, Tabled},
};

/// Orders matches by bar time, then symbol.
pub fn sort_matches(matches: &mut [SpikeMatch]) {
    matches.sort_by(|a, b| {
        a.bar_time
            .cmp(&b.bar_time)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
}

pub fn no_matches_message(timeframe: Timeframe) -> String {
    format!("📭 No matches in the {} scan.", timeframe)
}

/// One line per match, in the order given.
pub fn render_digest(matches: &[SpikeMatch], timeframe: Timeframe) -> String {
    if matches.is_empty() {
        return no_matches_message(timeframe);
    }

    let mut lines = vec![format!("🔥 {} Early Volume Signals 🔥", timeframe), String::new()];
    lines.extend(
        matches
            .iter()
            .map(|m| format!("{} | Close={} | Vol={}", m.symbol, m.close, m.volume)),
    );
    lines.join("\n")
}

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "Bar time")]
    bar_time: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Volume")]
    volume: String,
}

/// Console table of the matches, for the operator's terminal.
pub fn render_table(matches: &[SpikeMatch]) -> String {
    let rows = matches.iter().map(|m| MatchRow {
        bar_time: TimeUtils::format_display(&m.bar_time),
        symbol: m.symbol.clone(),
        close: m.close.to_string(),
        volume: m.volume.to_string(),
    });
    Table::new(rows).to_string()
}
