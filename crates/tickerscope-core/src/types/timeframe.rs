//! Bar sampling intervals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sampling interval of a series.
///
/// Serialized with the short names used in configuration (`30m`, `1h`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    #[default]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1w")]
    Weekly,
}

impl Timeframe {
    const ALL: [Timeframe; 7] = [
        Timeframe::Minute1,
        Timeframe::Minute5,
        Timeframe::Minute15,
        Timeframe::Minute30,
        Timeframe::Hour1,
        Timeframe::Daily,
        Timeframe::Weekly,
    ];

    /// Short configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Daily => "1d",
            Timeframe::Weekly => "1w",
        }
    }

    /// The `interval` query value understood by the chart API.
    pub fn chart_interval(&self) -> &'static str {
        match self {
            Timeframe::Hour1 => "60m",
            Timeframe::Weekly => "1wk",
            other => other.as_str(),
        }
    }

    /// Bars shorter than a trading day; their timestamps carry a time of day.
    pub fn is_intraday(&self) -> bool {
        !matches!(self, Timeframe::Daily | Timeframe::Weekly)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    /// Accepts the configuration names and the chart API spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str() == wanted || tf.chart_interval() == wanted)
            .ok_or_else(|| format!("Invalid timeframe: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_and_chart_names() {
        assert_eq!("30m".parse::<Timeframe>().unwrap(), Timeframe::Minute30);
        assert_eq!("60m".parse::<Timeframe>().unwrap(), Timeframe::Hour1);
        assert_eq!(" 1H ".parse::<Timeframe>().unwrap(), Timeframe::Hour1);
        assert_eq!("1wk".parse::<Timeframe>().unwrap(), Timeframe::Weekly);
        assert!("4h".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.to_string().parse::<Timeframe>().unwrap(), tf);
            assert_eq!(tf.chart_interval().parse::<Timeframe>().unwrap(), tf);
            assert_eq!(serde_json::to_string(&tf).unwrap(), format!("\"{}\"", tf));
        }
    }

    #[test]
    fn test_intraday() {
        assert!(Timeframe::Minute30.is_intraday());
        assert!(Timeframe::Hour1.is_intraday());
        assert!(!Timeframe::Daily.is_intraday());
        assert!(!Timeframe::Weekly.is_intraday());
        assert_eq!(Timeframe::default(), Timeframe::Minute30);
    }
}
