use {
    crate::utils::TimeUtils,
    std::str::FromStr,
    strum::IntoEnumIterator,
    strum_macros::EnumIter,
};

/// Fixed candle duration the scan samples at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Default)]
pub enum Timeframe {
    M1,
    M3,
    M5,
    M15,
    M30,
    H1,
    H2,
    #[default]
    H4,
    H6,
    H8,
    H12,
    D1,
    D3,
    W1,
    Mo1,
}

impl Timeframe {
    pub fn interval_ms(&self) -> i64 {
        use TimeUtils as T;
        match self {
            Self::M1 => T::MS_IN_MIN,
            Self::M3 => T::MS_IN_3_MIN,
            Self::M5 => T::MS_IN_5_MIN,
            Self::M15 => T::MS_IN_15_MIN,
            Self::M30 => T::MS_IN_30_MIN,
            Self::H1 => T::MS_IN_H,
            Self::H2 => T::MS_IN_2_H,
            Self::H4 => T::MS_IN_4_H,
            Self::H6 => T::MS_IN_6_H,
            Self::H8 => T::MS_IN_8_H,
            Self::H12 => T::MS_IN_12_H,
            Self::D1 => T::MS_IN_D,
            Self::D3 => T::MS_IN_3_D,
            Self::W1 => T::MS_IN_W,
            Self::Mo1 => T::MS_IN_1_M,
        }
    }

    /// Exchange-style shorthand (e.g. `4h`, `1M`).
    pub fn as_str(&self) -> &'static str {
        TimeUtils::interval_to_string(self.interval_ms())
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedTimeframe(pub String);

impl std::fmt::Display for UnsupportedTimeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Unsupported timeframe: {:?}", self.0)
    }
}

impl std::error::Error for UnsupportedTimeframe {}

impl FromStr for Timeframe {
    type Err = UnsupportedTimeframe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Case matters: `1m` is a minute, `1M` is a month.
        let s = s.trim();
        Self::iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| UnsupportedTimeframe(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_shorthand_it_prints() {
        for tf in Timeframe::iter() {
            assert_eq!(tf.as_str().parse::<Timeframe>(), Ok(tf));
        }
    }

    #[test]
    fn minute_and_month_are_distinct() {
        assert_eq!("1m".parse::<Timeframe>(), Ok(Timeframe::M1));
        assert_eq!("1M".parse::<Timeframe>(), Ok(Timeframe::Mo1));
    }

    #[test]
    fn rejects_unknown_strings() {
        assert!("4H".parse::<Timeframe>().is_err());
        assert!("".parse::<Timeframe>().is_err());
        assert!("90m".parse::<Timeframe>().is_err());
    }

    #[test]
    fn default_is_four_hours() {
        assert_eq!(Timeframe::default().interval_ms(), 4 * 60 * 60 * 1000);
    }
}
