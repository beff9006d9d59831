//! Level-indexed numeric tables: spell slots, character experience and challenge rating
//! experience.

use num_traits::Saturating;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use dnd5etypes::{LookupError, SpellLevel, Xp};

pub const MAX_CHARACTER_LEVEL: u8 = 20;
pub const MAX_SPELL_LEVEL: u8 = 9;
pub const MAX_CHALLENGE_RATING: u8 = 30;

const FULL_CASTER_SLOTS: [[u8; MAX_SPELL_LEVEL as usize]; MAX_CHARACTER_LEVEL as usize] = [
  [2, 0, 0, 0, 0, 0, 0, 0, 0],
  [3, 0, 0, 0, 0, 0, 0, 0, 0],
  [4, 2, 0, 0, 0, 0, 0, 0, 0],
  [4, 3, 0, 0, 0, 0, 0, 0, 0],
  [4, 3, 2, 0, 0, 0, 0, 0, 0],
  [4, 3, 3, 0, 0, 0, 0, 0, 0],
  [4, 3, 3, 1, 0, 0, 0, 0, 0],
  [4, 3, 3, 2, 0, 0, 0, 0, 0],
  [4, 3, 3, 3, 1, 0, 0, 0, 0],
  [4, 3, 3, 3, 2, 0, 0, 0, 0],
  [4, 3, 3, 3, 2, 1, 0, 0, 0],
  [4, 3, 3, 3, 2, 1, 0, 0, 0],
  [4, 3, 3, 3, 2, 1, 1, 0, 0],
  [4, 3, 3, 3, 2, 1, 1, 0, 0],
  [4, 3, 3, 3, 2, 1, 1, 1, 0],
  [4, 3, 3, 3, 2, 1, 1, 1, 0],
  [4, 3, 3, 3, 2, 1, 1, 1, 1],
  [4, 3, 3, 3, 3, 1, 1, 1, 1],
  [4, 3, 3, 3, 3, 2, 1, 1, 1],
  [4, 3, 3, 3, 3, 2, 2, 1, 1],
];

const CHARACTER_EXP_LEVELS: [u32; MAX_CHARACTER_LEVEL as usize] = [
  0, 300, 900, 2700, 6500, 14000, 23000, 34000, 48000, 64000, 85000, 100000, 120000, 140000,
  165000, 195000, 225000, 265000, 305000, 355000,
];

const CR_EXP_LEVELS: [u32; MAX_CHALLENGE_RATING as usize + 1] = [
  10, 200, 450, 700, 1100, 1800, 2300, 2900, 3900, 5000, 5900, 7200, 8400, 10000, 11500, 13000,
  15000, 18000, 20000, 22000, 25000, 33000, 41000, 50000, 62000, 75000, 90000, 105000, 120000,
  135000, 155000,
];

fn level_index(level: u8, rows: usize) -> Result<usize, LookupError> {
  if level == 0 || usize::from(level) > rows {
    let max = u32::try_from(rows).unwrap_or(u32::MAX);
    return Err(LookupError::LevelOutOfRange { level: u32::from(level), max });
  }
  Ok(usize::from(level) - 1)
}

/// A count of table rows as a level number.
fn as_level(kind: &'static str, len: usize) -> Result<u8, LookupError> {
  u8::try_from(len).map_err(|_| LookupError::TableTooLarge { kind, len })
}

/// Spell slots for a full spellcaster: one row per character level, one column per spell level
/// (1st through 9th).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct SpellSlotTable(pub Vec<Vec<u8>>);

impl SpellSlotTable {
  pub fn full_caster() -> SpellSlotTable {
    SpellSlotTable(FULL_CASTER_SLOTS.iter().map(|row| row.to_vec()).collect())
  }

  /// Pad short rows with zeroes so every row has a column for each spell level. The host writes
  /// rows only as long as the highest available spell level.
  pub fn normalize(&mut self) {
    for row in self.0.iter_mut() {
      if row.len() < usize::from(MAX_SPELL_LEVEL) {
        row.resize(usize::from(MAX_SPELL_LEVEL), 0);
      }
    }
  }

  pub fn rows(&self) -> &[Vec<u8>] { &self.0 }

  pub fn row(&self, level: u8) -> Result<&[u8], LookupError> {
    Ok(&self.0[level_index(level, self.0.len())?])
  }

  /// Slots of `spell_level` available at character `level`.
  pub fn slots(&self, level: u8, spell_level: u8) -> Result<u8, LookupError> {
    if spell_level == 0 || spell_level > MAX_SPELL_LEVEL {
      return Err(LookupError::SpellLevelOutOfRange(spell_level));
    }
    let row = self.row(level)?;
    Ok(row.get(usize::from(spell_level) - 1).copied().unwrap_or(0))
  }

  /// The highest spell level with at least one slot at character `level`.
  pub fn max_spell_level(&self, level: u8) -> Result<Option<SpellLevel>, LookupError> {
    let row = self.row(level)?;
    match row.iter().rposition(|slots| *slots > 0) {
      Some(idx) => Ok(Some(SpellLevel::from_level(as_level("SPELL_SLOT_TABLE", idx + 1)?)?)),
      None => Ok(None),
    }
  }
}

/// Experience required to reach each character level; entry 0 is level 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ExperienceTable(pub Vec<Xp>);

impl ExperienceTable {
  pub fn standard() -> ExperienceTable {
    ExperienceTable(CHARACTER_EXP_LEVELS.iter().map(|xp| Xp(*xp)).collect())
  }

  pub fn max_level(&self) -> Result<u8, LookupError> { as_level("CHARACTER_EXP_LEVELS", self.0.len()) }

  pub fn xp_for_level(&self, level: u8) -> Result<Xp, LookupError> {
    Ok(self.0[level_index(level, self.0.len())?])
  }

  /// The level a character with `xp` experience has reached.
  pub fn level_for_xp(&self, xp: Xp) -> Result<u8, LookupError> {
    let reached = self.0.iter().take_while(|threshold| **threshold <= xp).count();
    as_level("CHARACTER_EXP_LEVELS", reached.max(1))
  }

  /// Experience still needed to reach the level after `level`, or `None` at the top level.
  pub fn xp_to_next_level(&self, level: u8, current: Xp) -> Result<Option<Xp>, LookupError> {
    level_index(level, self.0.len())?;
    Ok(self.0.get(usize::from(level)).map(|next| next.saturating_sub(current)))
  }
}

/// Experience awarded for defeating a creature, indexed by challenge rating 0 through 30.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ChallengeXp(pub Vec<Xp>);

impl ChallengeXp {
  pub fn standard() -> ChallengeXp { ChallengeXp(CR_EXP_LEVELS.iter().map(|xp| Xp(*xp)).collect()) }

  /// Fractional challenge ratings below 1 award their share of the CR 1 value, never less than
  /// the CR 0 value.
  pub fn xp_for_cr(&self, cr: f32) -> Result<Xp, LookupError> {
    if !cr.is_finite() || cr < 0.0 {
      return Err(LookupError::InvalidChallengeRating(cr));
    }
    if cr < 1.0 {
      let floor = self.0.first().copied().ok_or(LookupError::InvalidChallengeRating(cr))?;
      if cr == 0.0 {
        return Ok(floor);
      }
      let one = self.0.get(1).copied().ok_or(LookupError::InvalidChallengeRating(cr))?;
      let share = (f64::from(one.0) * f64::from(cr)).round() as u32;
      return Ok(Xp(share).max(floor));
    }
    if cr.fract() != 0.0 {
      return Err(LookupError::InvalidChallengeRating(cr));
    }
    self.0.get(cr as usize).copied().ok_or(LookupError::InvalidChallengeRating(cr))
  }
}
