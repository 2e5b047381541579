//! Party identifiers, issue-space coordinates, and per-party tables.
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::constants::{POSITION_LOWER_BOUND, POSITION_UPPER_BOUND};

/// Number of parties in the fixed party set.
pub const PARTY_COUNT: usize = 6;

/// Fixed, ordered party set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyId {
    Cdu,
    Spd,
    Afd,
    Fdp,
    Greens,
    Left,
}

impl PartyId {
    /// Every party in table order.
    pub const ALL: [Self; PARTY_COUNT] = [
        Self::Cdu,
        Self::Spd,
        Self::Afd,
        Self::Fdp,
        Self::Greens,
        Self::Left,
    ];

    /// Position of this party in fixed-size tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Cdu => 0,
            Self::Spd => 1,
            Self::Afd => 2,
            Self::Fdp => 3,
            Self::Greens => 4,
            Self::Left => 5,
        }
    }

    /// Stable machine label, matching the serde representation.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cdu => "cdu",
            Self::Spd => "spd",
            Self::Afd => "afd",
            Self::Fdp => "fdp",
            Self::Greens => "greens",
            Self::Left => "left",
        }
    }

    /// Human-facing party name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Cdu => "CDU/CSU",
            Self::Spd => "SPD",
            Self::Afd => "AfD",
            Self::Fdp => "FDP",
            Self::Greens => "Greens",
            Self::Left => "Left",
        }
    }

    /// Parse a survey label, accepting the common spellings.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "cdu" | "csu" | "cdu/csu" | "union" => Some(Self::Cdu),
            "spd" => Some(Self::Spd),
            "afd" => Some(Self::Afd),
            "fdp" => Some(Self::Fdp),
            "greens" | "grüne" | "gruene" | "die grünen" | "bündnis 90/die grünen" => {
                Some(Self::Greens)
            }
            "left" | "linke" | "die linke" => Some(Self::Left),
            _ => None,
        }
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A voter's self-reported party attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affiliation {
    Affiliated(PartyId),
    Floating,
}

impl Affiliation {
    /// Parse a survey label; the "no party" sentinel spellings map to `Floating`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "" | "none" | "no party" | "no_party" | "keine" | "keine partei" => {
                Some(Self::Floating)
            }
            _ => PartyId::parse(&normalized).map(Self::Affiliated),
        }
    }

    #[must_use]
    pub const fn party(self) -> Option<PartyId> {
        match self {
            Self::Affiliated(party) => Some(party),
            Self::Floating => None,
        }
    }

    #[must_use]
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Floating)
    }
}

/// A point in the (economic, social) issue space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub econ: f64,
    pub social: f64,
}

impl Position {
    #[must_use]
    pub const fn new(econ: f64, social: f64) -> Self {
        Self { econ, social }
    }

    #[must_use]
    pub fn squared_distance(self, other: Self) -> f64 {
        let de = self.econ - other.econ;
        let ds = self.social - other.social;
        de.mul_add(de, ds * ds)
    }

    /// Euclidean distance.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.squared_distance(other).sqrt()
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.econ.is_finite() && self.social.is_finite()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.econ, self.social)
    }
}

/// Per-axis box constraint on party positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            lower: POSITION_LOWER_BOUND,
            upper: POSITION_UPPER_BOUND,
        }
    }
}

impl Bounds {
    /// Project a position into the box. NaN coordinates are left untouched so
    /// callers can still detect them.
    #[must_use]
    pub fn clamp(self, position: Position) -> Position {
        Position {
            econ: position.econ.clamp(self.lower, self.upper),
            social: position.social.clamp(self.lower, self.upper),
        }
    }

    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        crate::numbers::within(position.econ, self.lower, self.upper)
            && crate::numbers::within(position.social, self.lower, self.upper)
    }
}

/// Fixed-size table with one entry per party, indexed by `PartyId`.
///
/// Serialized as a map keyed by party label; every party must be present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartyTable<T>([T; PARTY_COUNT]);

/// Positions of every party in the issue space.
pub type PartyPositions = PartyTable<Position>;

/// Expected vote share per party.
pub type VoteShares = PartyTable<f64>;

impl<T> PartyTable<T> {
    #[must_use]
    pub const fn new(values: [T; PARTY_COUNT]) -> Self {
        Self(values)
    }

    pub fn from_fn(mut f: impl FnMut(PartyId) -> T) -> Self {
        Self(std::array::from_fn(|idx| f(PartyId::ALL[idx])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartyId, &T)> {
        PartyId::ALL.into_iter().zip(self.0.iter())
    }

    #[must_use]
    pub const fn as_array(&self) -> &[T; PARTY_COUNT] {
        &self.0
    }
}

impl<T: Copy> PartyTable<T> {
    /// Copy of this table with one entry replaced.
    #[must_use]
    pub fn with(mut self, party: PartyId, value: T) -> Self {
        self.0[party.index()] = value;
        self
    }
}

impl<T> Index<PartyId> for PartyTable<T> {
    type Output = T;

    fn index(&self, party: PartyId) -> &T {
        &self.0[party.index()]
    }
}

impl<T> IndexMut<PartyId> for PartyTable<T> {
    fn index_mut(&mut self, party: PartyId) -> &mut T {
        &mut self.0[party.index()]
    }
}

impl<T: Serialize> Serialize for PartyTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PARTY_COUNT))?;
        for (party, value) in self.iter() {
            map.serialize_entry(&party, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PartyTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = BTreeMap::<PartyId, T>::deserialize(deserializer)?;
        let mut values = Vec::with_capacity(PARTY_COUNT);
        for party in PartyId::ALL {
            let value = entries
                .remove(&party)
                .ok_or_else(|| D::Error::custom(format!("missing entry for party `{party}`")))?;
            values.push(value);
        }
        let values: [T; PARTY_COUNT] = values
            .try_into()
            .map_err(|_| D::Error::custom("party table has the wrong number of entries"))?;
        Ok(Self(values))
    }
}

/// Reference platform positions used when no configuration overrides them.
#[must_use]
pub const fn default_baselines() -> PartyPositions {
    PartyTable::new([
        Position::new(2.5, 3.5),
        Position::new(-3.0, -1.5),
        Position::new(4.0, 8.0),
        Position::new(5.5, -1.0),
        Position::new(-3.5, -6.0),
        Position::new(-7.5, -4.0),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_table_order() {
        for (idx, party) in PartyId::ALL.into_iter().enumerate() {
            assert_eq!(party.index(), idx);
        }
    }

    #[test]
    fn parses_aliases_and_sentinel() {
        assert_eq!(PartyId::parse("CDU/CSU"), Some(PartyId::Cdu));
        assert_eq!(PartyId::parse(" Grüne "), Some(PartyId::Greens));
        assert_eq!(PartyId::parse("Die Linke"), Some(PartyId::Left));
        assert_eq!(PartyId::parse("pirates"), None);
        assert_eq!(Affiliation::parse("No Party"), Some(Affiliation::Floating));
        assert_eq!(Affiliation::parse(""), Some(Affiliation::Floating));
        assert_eq!(
            Affiliation::parse("spd"),
            Some(Affiliation::Affiliated(PartyId::Spd))
        );
        assert!(Affiliation::parse("pirates").is_none());
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert!((a.squared_distance(b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn bounds_clamp_and_contain() {
        let bounds = Bounds::default();
        let clamped = bounds.clamp(Position::new(12.0, -15.0));
        assert_eq!(clamped, Position::new(10.0, -10.0));
        assert!(bounds.contains(clamped));
        assert!(!bounds.contains(Position::new(f64::NAN, 0.0)));
    }

    #[test]
    fn party_table_serializes_as_map() {
        let shares = VoteShares::from_fn(|party| f64::from(u8::try_from(party.index()).unwrap()));
        let json = serde_json::to_string(&shares).unwrap();
        assert!(json.contains("\"greens\":4.0"));
        let back: VoteShares = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shares);
    }

    #[test]
    fn party_table_rejects_missing_party() {
        let err = serde_json::from_str::<VoteShares>(r#"{"cdu": 0.5, "spd": 0.5}"#).unwrap_err();
        assert!(err.to_string().contains("missing entry"));
    }

    #[test]
    fn with_replaces_single_entry() {
        let positions = default_baselines().with(PartyId::Spd, Position::new(1.0, 1.0));
        assert_eq!(positions[PartyId::Spd], Position::new(1.0, 1.0));
        assert_eq!(positions[PartyId::Cdu], default_baselines()[PartyId::Cdu]);
    }
}
