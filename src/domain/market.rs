#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    Spot,
    Other,
}

/// One entry of the exchange catalog, fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    pub symbol: String,
    pub quote: String,
    pub active: bool,
    pub kind: InstrumentKind,
}

impl Market {
    pub fn new(
        symbol: impl Into<String>,
        quote: impl Into<String>,
        active: bool,
        kind: InstrumentKind,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            quote: quote.into(),
            active,
            kind,
        }
    }

    pub fn is_scannable_for(&self, quote: &str) -> bool {
        self.active && self.kind == InstrumentKind::Spot && self.quote == quote
    }
}
