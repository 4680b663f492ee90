//! Digit frequency statistics and the derived view model
//!
//! Everything here is pure: the draw layer and the `--json` output both call
//! [`Distribution::compute`] and never look at the raw table themselves.

pub mod snapshot;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Smallest indicator diameter (visual units)
pub const MIN_DIAMETER: f64 = 60.0;
/// Largest indicator diameter (visual units)
pub const MAX_DIAMETER: f64 = 120.0;
/// Diameter growth per percentage point
const DIAMETER_PER_PERCENT: f64 = 0.8;

/// A decimal digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrequencyEntry {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub percentage: f64,
}

#[cfg(test)]
impl FrequencyEntry {
    pub const fn new(count: i64, percentage: f64) -> Self {
        Self { count, percentage }
    }
}

/// Per-digit statistics. Iterates in ascending digit order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable(BTreeMap<Digit, FrequencyEntry>);

impl FrequencyTable {
    /// Entry for `digit`, zeroed when the table has none
    pub fn entry(&self, digit: Digit) -> FrequencyEntry {
        self.0.get(&digit).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Digit, FrequencyEntry)> + '_ {
        self.0.iter().map(|(d, e)| (*d, *e))
    }

    /// Rank the digits present in the table by count.
    ///
    /// The sort is stable, so equal counts keep ascending digit order.
    pub fn ranking(&self) -> Ranking {
        let mut sorted: Vec<(Digit, i64)> = self.iter().map(|(d, e)| (d, e.count)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));

        Ranking {
            most: sorted.first().map(|(d, _)| *d),
            second: sorted.get(1).map(|(d, _)| *d),
            least: sorted.last().map(|(d, _)| *d),
        }
    }
}

impl FromIterator<(Digit, FrequencyEntry)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Digit, FrequencyEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Digits at the notable ranks. `None` when the table is too small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ranking {
    pub most: Option<Digit>,
    pub second: Option<Digit>,
    pub least: Option<Digit>,
}

/// Visual category of a digit, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Active,
    Top,
    Second,
    Bottom,
    Default,
}

impl Category {
    pub fn classify(digit: Digit, ranking: &Ranking, active: Option<Digit>) -> Self {
        if active == Some(digit) {
            Category::Active
        } else if ranking.most == Some(digit) {
            Category::Top
        } else if ranking.second == Some(digit) {
            Category::Second
        } else if ranking.least == Some(digit) {
            Category::Bottom
        } else {
            Category::Default
        }
    }

    /// Legend label; `Default` has none
    pub fn label(self) -> Option<&'static str> {
        match self {
            Category::Top => Some("Most Appearing"),
            Category::Second => Some("2nd Most"),
            Category::Bottom => Some("Least Appearing"),
            Category::Active => Some("Live Digit"),
            Category::Default => None,
        }
    }
}

/// Indicator diameter for a percentage, saturating at both ends
pub fn diameter(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return MIN_DIAMETER;
    }
    (MIN_DIAMETER + percentage * DIAMETER_PER_PERCENT).clamp(MIN_DIAMETER, MAX_DIAMETER)
}

/// Everything needed to draw one digit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DigitView {
    pub digit: Digit,
    pub count: i64,
    pub percentage: f64,
    pub category: Category,
    pub diameter: f64,
}

impl DigitView {
    pub fn is_active(&self) -> bool {
        self.category == Category::Active
    }
}

/// The derived view of a frequency table: one [`DigitView`] per digit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub digits: [DigitView; 10],
}

impl Distribution {
    pub fn compute(table: &FrequencyTable, active: Option<Digit>) -> Self {
        let ranking = table.ranking();
        let digits = std::array::from_fn(|i| {
            let digit = Digit(i as u8);
            let entry = table.entry(digit);
            DigitView {
                digit,
                count: entry.count,
                percentage: entry.percentage,
                category: Category::classify(digit, &ranking, active),
                diameter: diameter(entry.percentage),
            }
        });
        Self { digits }
    }

    /// Digits 0-4 and digits 5-9
    pub fn rows(&self) -> (&[DigitView], &[DigitView]) {
        self.digits.split_at(5)
    }

    pub fn get(&self, digit: Digit) -> &DigitView {
        &self.digits[digit.value() as usize]
    }
}
