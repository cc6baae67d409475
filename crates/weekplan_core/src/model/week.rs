//! Week identity domain model.
//!
//! # Responsibility
//! - Define the closed Mon..Sun weekday domain used by every per-day bucket.
//! - Identify one displayed week as a `(year, month, week_number)` triple.
//! - Provide the collision-free `PeriodKey` encoding used for store lookups.
//!
//! # Invariants
//! - Weekday order is `Mon < Tue < .. < Sun`, so day-keyed maps iterate in
//!   week order.
//! - Two `WeekInfo` values derive equal keys iff all three fields are equal.
//! - The string encoding round-trips through `FromStr` for every key with an
//!   in-range month and a nonzero week number.
//!
//! # See also
//! - docs/architecture/week-resolution.md

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed weekday domain for planner buckets.
///
/// The planner always displays a full Monday-start week. Using an enum
/// instead of dynamic day labels closes the 7-slot domain at the type level:
/// there is no way to address an eighth bucket or to misspell a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All weekdays in week order, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Zero-based position within the Monday-start week (`Mon == 0`).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Weekday::index`]; `None` for positions past Sunday.
    pub fn from_index(index: usize) -> Option<Weekday> {
        Self::ALL.get(index).copied()
    }

    /// Stable lowercase string id used in key-value log lines and wire data.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
            Self::Sun => "sun",
        }
    }

    /// Three-letter display label for column headers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Mon => "MON",
            Self::Tue => "TUE",
            Self::Wed => "WED",
            Self::Thu => "THU",
            Self::Fri => "FRI",
            Self::Sat => "SAT",
            Self::Sun => "SUN",
        }
    }

    /// One-letter display label for narrow habit-grid headers.
    ///
    /// Duplicates (`T`, `S`) are intentional; narrow headers rely on column
    /// position, not uniqueness.
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Mon => "M",
            Self::Tue => "T",
            Self::Wed => "W",
            Self::Thu => "T",
            Self::Fri => "F",
            Self::Sat => "S",
            Self::Sun => "S",
        }
    }

    /// Maps the calendar weekday of a concrete date into the planner domain.
    pub fn from_chrono(day: chrono::Weekday) -> Weekday {
        match day {
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
            chrono::Weekday::Sun => Self::Sun,
        }
    }
}

/// Identity of one displayed week.
///
/// Produced by week resolution; `month` is the calendar month that owns the
/// week under the majority-of-days rule and `week_number` is the 1-based
/// index among the weeks that month owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekInfo {
    /// Calendar year of the owning month.
    pub year: i32,
    /// Owning calendar month, `1..=12`.
    pub month: u32,
    /// 1-based week index within the owning month.
    pub week_number: u32,
}

impl WeekInfo {
    /// Creates a week identity from raw components.
    ///
    /// Components are not range-checked here; resolution only ever produces
    /// valid triples, and date-deriving calls validate caller-supplied ones.
    pub fn new(year: i32, month: u32, week_number: u32) -> Self {
        Self {
            year,
            month,
            week_number,
        }
    }

    /// Derives the store key for this week.
    pub fn key(&self) -> PeriodKey {
        PeriodKey::new(self.year, self.month, self.week_number)
    }
}

/// Store key for one planner period (one displayed week).
///
/// The key is structural: equality and ordering come from the three numeric
/// fields, so differently-shaped triples can never collide the way naive
/// string concatenation would (`(20, 1, 23)` vs `(2, 0, 123)`). The string
/// form exists only for display and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
    pub week_number: u32,
}

impl PeriodKey {
    /// Creates a key from raw components.
    pub fn new(year: i32, month: u32, week_number: u32) -> Self {
        Self {
            year,
            month,
            week_number,
        }
    }

    /// Returns the week identity this key encodes.
    pub fn week_info(&self) -> WeekInfo {
        WeekInfo::new(self.year, self.month, self.week_number)
    }
}

impl From<WeekInfo> for PeriodKey {
    fn from(value: WeekInfo) -> Self {
        value.key()
    }
}

impl Display for PeriodKey {
    /// Canonical encoding `YYYY-MM-wWW`, zero-padded.
    ///
    /// The `w` marker keeps the final field self-describing. Year and week
    /// fields widen past their canonical padding when a value needs more
    /// digits, and parsing accepts the wider forms, so every key with an
    /// in-range month and a nonzero week survives the round trip.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-w{:02}",
            self.year, self.month, self.week_number
        )
    }
}

impl FromStr for PeriodKey {
    type Err = PeriodKeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Split from the right so a negative year keeps its sign with the
        // year field instead of producing an empty leading segment.
        let mut parts = value.rsplitn(3, '-');
        let week_part = parts.next();
        let month_part = parts.next();
        let year_part = parts.next();
        let (Some(week_part), Some(month_part), Some(year_part)) =
            (week_part, month_part, year_part)
        else {
            return Err(PeriodKeyParseError::Malformed(value.to_string()));
        };

        let week_digits = week_part
            .strip_prefix('w')
            .ok_or_else(|| PeriodKeyParseError::Malformed(value.to_string()))?;

        let year = parse_year_field(year_part)
            .ok_or_else(|| PeriodKeyParseError::Malformed(value.to_string()))?;
        let month = parse_month_field(month_part)
            .ok_or_else(|| PeriodKeyParseError::Malformed(value.to_string()))?;
        let week_number = parse_week_field(week_digits)
            .ok_or_else(|| PeriodKeyParseError::Malformed(value.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(PeriodKeyParseError::MonthOutOfRange(month));
        }
        if week_number == 0 {
            return Err(PeriodKeyParseError::WeekOutOfRange(week_number));
        }

        Ok(Self::new(year, month, week_number))
    }
}

impl Serialize for PeriodKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Month field: exactly two ASCII digits; the range check follows parsing.
fn parse_month_field(raw: &str) -> Option<u32> {
    if raw.len() != 2 || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Week field: two or more ASCII digits, zero-padded to width two. Week
/// numbers past 99 print wider than the padding and parse back unchanged.
fn parse_week_field(raw: &str) -> Option<u32> {
    if raw.len() < 2 || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Year field: at least four characters, optional leading minus sign.
fn parse_year_field(raw: &str) -> Option<i32> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if raw.len() < 4 || digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Parse errors for the canonical period-key string encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodKeyParseError {
    /// Input does not match the `YYYY-MM-wWW` layout.
    Malformed(String),
    /// Month component outside `1..=12`.
    MonthOutOfRange(u32),
    /// Week component is zero; resolution never produces week 0.
    WeekOutOfRange(u32),
}

impl Display for PeriodKeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => {
                write!(f, "period key `{value}` does not match YYYY-MM-wWW")
            }
            Self::MonthOutOfRange(month) => {
                write!(f, "period key month {month} is outside 1..=12")
            }
            Self::WeekOutOfRange(week) => {
                write!(f, "period key week number {week} must be >= 1")
            }
        }
    }
}

impl Error for PeriodKeyParseError {}

#[cfg(test)]
mod tests {
    use super::{PeriodKey, PeriodKeyParseError, WeekInfo, Weekday};

    #[test]
    fn weekday_order_matches_week_order() {
        let mut sorted = Weekday::ALL;
        sorted.sort();
        assert_eq!(sorted, Weekday::ALL);
        assert!(Weekday::Mon < Weekday::Sun);
    }

    #[test]
    fn weekday_index_round_trips() {
        for (position, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(day.index(), position);
            assert_eq!(Weekday::from_index(position), Some(*day));
        }
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn weekday_labels_follow_display_convention() {
        assert_eq!(Weekday::Mon.label(), "MON");
        assert_eq!(Weekday::Sun.label(), "SUN");
        let short: Vec<&str> = Weekday::ALL.iter().map(|day| day.short_label()).collect();
        assert_eq!(short, ["M", "T", "W", "T", "F", "S", "S"]);
    }

    #[test]
    fn weekday_maps_from_calendar_weekday() {
        assert_eq!(Weekday::from_chrono(chrono::Weekday::Mon), Weekday::Mon);
        assert_eq!(Weekday::from_chrono(chrono::Weekday::Sun), Weekday::Sun);
    }

    #[test]
    fn key_equality_follows_field_equality() {
        let a = WeekInfo::new(2024, 8, 2).key();
        let b = PeriodKey::new(2024, 8, 2);
        let c = PeriodKey::new(2024, 8, 3);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn key_encoding_round_trips() {
        let key = PeriodKey::new(2024, 8, 2);
        let text = key.to_string();
        assert_eq!(text, "2024-08-w02");
        assert_eq!(text.parse::<PeriodKey>().unwrap(), key);
    }

    #[test]
    fn key_encoding_disambiguates_concatenation_collisions() {
        // Naive `year-month-week` concatenation would collide "20-1-23"
        // with "2-0-123"; the canonical layout rejects both raw forms.
        assert!(matches!(
            "20-1-23".parse::<PeriodKey>(),
            Err(PeriodKeyParseError::Malformed(_))
        ));
        assert!(matches!(
            "2-0-123".parse::<PeriodKey>(),
            Err(PeriodKeyParseError::Malformed(_))
        ));
        let padded = PeriodKey::new(20, 1, 23);
        assert_eq!(padded.to_string(), "0020-01-w23");
        assert_eq!(padded.to_string().parse::<PeriodKey>().unwrap(), padded);
    }

    #[test]
    fn key_parse_rejects_out_of_range_components() {
        assert_eq!(
            "2024-13-w01".parse::<PeriodKey>(),
            Err(PeriodKeyParseError::MonthOutOfRange(13))
        );
        assert_eq!(
            "2024-12-w00".parse::<PeriodKey>(),
            Err(PeriodKeyParseError::WeekOutOfRange(0))
        );
    }

    #[test]
    fn key_parse_rejects_malformed_layouts() {
        for raw in ["", "2024-08", "2024-08-02", "2024-8-w02", "2024-08-w2", "2024-08-wxx"] {
            assert!(
                matches!(
                    raw.parse::<PeriodKey>(),
                    Err(PeriodKeyParseError::Malformed(_))
                ),
                "`{raw}` should be rejected as malformed"
            );
        }
    }

    #[test]
    fn key_encoding_widens_past_the_canonical_padding() {
        // Resolution never numbers past week 5; hand-built keys may.
        let wide = PeriodKey::new(2024, 1, 100);
        assert_eq!(wide.to_string(), "2024-01-w100");
        assert_eq!(wide.to_string().parse::<PeriodKey>().unwrap(), wide);
        // The year field has always widened the same way.
        let far = PeriodKey::new(123_456, 12, 2);
        assert_eq!(far.to_string(), "123456-12-w02");
        assert_eq!(far.to_string().parse::<PeriodKey>().unwrap(), far);
        // Extra zero padding normalizes on the way in.
        assert_eq!(
            "2024-01-w010".parse::<PeriodKey>().unwrap(),
            PeriodKey::new(2024, 1, 10)
        );
    }

    #[test]
    fn key_parse_supports_negative_years() {
        let key = PeriodKey::new(-4, 1, 1);
        assert_eq!(key.to_string(), "-004-01-w01");
        assert_eq!(key.to_string().parse::<PeriodKey>().unwrap(), key);
    }
}
