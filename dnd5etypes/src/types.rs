use derive_more::{Add, Display, Sub};
use num_traits::Saturating;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
  #[error("{key:?} is not a valid {kind} key")]
  UnknownKey { kind: &'static str, key: String },
  #[error("The {kind} table has no entry for {key:?}")]
  MissingEntry { kind: &'static str, key: &'static str },
  #[error("Level {level} is outside of 1..={max}")]
  LevelOutOfRange { level: u32, max: u32 },
  #[error("Spell level {0} has no spell slots; slots exist for levels 1..=9")]
  SpellLevelOutOfRange(u8),
  #[error("There is no spell level {0}; spell levels run from 0 (cantrips) to 9")]
  UnknownSpellLevel(u8),
  #[error("The {kind} table has {len} entries, more than a level number can index")]
  TableTooLarge { kind: &'static str, len: usize },
  #[error("{0} is not a valid challenge rating")]
  InvalidChallengeRating(f32),
}

/// Experience points.
#[derive(
  Add,
  Sub,
  Display,
  Clone,
  Copy,
  Eq,
  PartialEq,
  Ord,
  PartialOrd,
  Debug,
  Hash,
  Default,
  Serialize,
  Deserialize,
  TS,
)]
pub struct Xp(pub u32);

impl Saturating for Xp {
  fn saturating_add(self, other: Self) -> Self { Xp(self.0.saturating_add(other.0)) }
  fn saturating_sub(self, other: Self) -> Self { Xp(self.0.saturating_sub(other.0)) }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn xp_saturates() {
    assert_eq!(Xp(5).saturating_sub(Xp(10)), Xp(0));
    assert_eq!(Xp(u32::MAX).saturating_add(Xp(1)), Xp(u32::MAX));
    assert_eq!(Xp(300) + Xp(600), Xp(900));
  }

  #[test]
  fn xp_serializes_as_number() {
    assert_eq!(serde_json::to_string(&Xp(2700)).unwrap(), "2700");
    assert_eq!(serde_json::from_str::<Xp>("355000").unwrap(), Xp(355000));
  }

  #[test]
  fn lookup_error_messages() {
    let e = LookupError::UnknownKey { kind: "currency", key: "zz".to_string() };
    assert_eq!(e.to_string(), "\"zz\" is not a valid currency key");
    assert_eq!(
      LookupError::LevelOutOfRange { level: 21, max: 20 }.to_string(),
      "Level 21 is outside of 1..=20"
    );
    assert_eq!(
      LookupError::UnknownSpellLevel(10).to_string(),
      "There is no spell level 10; spell levels run from 0 (cantrips) to 9"
    );
    assert_eq!(
      LookupError::SpellLevelOutOfRange(0).to_string(),
      "Spell level 0 has no spell slots; slots exist for levels 1..=9"
    );
  }
}
