use serde::{Deserialize, Serialize};
use ts_rs::TS;

use dnd5etypes::{Ability, ActorFlag, CharacterFlag, ConfigKey, FlagSection, Skill, Table};

/// The value type a character flag holds on the sheet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, TS)]
pub enum FlagType {
  Boolean,
  Number,
}

/// Sheet configuration for an optional character flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
pub struct CharacterFlagConfig {
  pub name: String,
  pub hint: String,
  pub section: FlagSection,
  #[serde(rename = "type")]
  pub flag_type: FlagType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub placeholder: Option<i32>,
  /// Skills the flag applies to (the Observant feat).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub skills: Option<Vec<Skill>>,
  /// Abilities the flag applies to (Remarkable Athlete).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub abilities: Option<Vec<Ability>>,
}

impl CharacterFlagConfig {
  fn boolean(flag: CharacterFlag, hint: &str, section: FlagSection) -> CharacterFlagConfig {
    CharacterFlagConfig {
      name: flag.label().to_string(),
      hint: hint.to_string(),
      section,
      flag_type: FlagType::Boolean,
      placeholder: None,
      skills: None,
      abilities: None,
    }
  }

  fn number(flag: CharacterFlag, hint: &str, placeholder: i32) -> CharacterFlagConfig {
    CharacterFlagConfig {
      flag_type: FlagType::Number,
      placeholder: Some(placeholder),
      ..CharacterFlagConfig::boolean(flag, hint, FlagSection::Feats)
    }
  }
}

pub fn default_character_flags() -> Table<CharacterFlag, CharacterFlagConfig> {
  use CharacterFlag::*;
  use FlagSection::*;
  vec![
    (DiamondSoul, CharacterFlagConfig::boolean(DiamondSoul, "Proficiency in all saving throws.", Feats)),
    (
      ElvenAccuracy,
      CharacterFlagConfig::boolean(
        ElvenAccuracy,
        "Roll an extra d20 with advantage to Dex, Int, Wis, or Cha.",
        RacialTraits,
      ),
    ),
    (
      HalflingLucky,
      CharacterFlagConfig::boolean(HalflingLucky, "Critical Failures are rerolled once.", RacialTraits),
    ),
    (
      InitiativeAdv,
      CharacterFlagConfig::boolean(InitiativeAdv, "Provided by feats or magical items.", Feats),
    ),
    (InitiativeAlert, CharacterFlagConfig::boolean(InitiativeAlert, "Provides +5 to Initiative.", Feats)),
    (
      JackOfAllTrades,
      CharacterFlagConfig::boolean(
        JackOfAllTrades,
        "Half-Proficiency to ability checks in which you are not already Proficient.",
        Feats,
      ),
    ),
    (
      ObservantFeat,
      CharacterFlagConfig {
        skills: Some(vec![Skill::Perception, Skill::Investigation]),
        ..CharacterFlagConfig::boolean(
          ObservantFeat,
          "Provides a +5 to passive Perception and Investigation.",
          Feats,
        )
      },
    ),
    (
      PowerfulBuild,
      CharacterFlagConfig::boolean(PowerfulBuild, "Provides increased carrying capacity.", RacialTraits),
    ),
    (
      ReliableTalent,
      CharacterFlagConfig::boolean(
        ReliableTalent,
        "Rolls of 9 or less are set to 10 for Proficient checks.",
        Feats,
      ),
    ),
    (
      RemarkableAthlete,
      CharacterFlagConfig {
        abilities: Some(vec![Ability::Strength, Ability::Dexterity, Ability::Constitution]),
        ..CharacterFlagConfig::boolean(
          RemarkableAthlete,
          "Half-Proficiency (rounded-up) to physical Ability Checks and Initiative.",
          Feats,
        )
      },
    ),
    (
      WeaponCriticalThreshold,
      CharacterFlagConfig::number(
        WeaponCriticalThreshold,
        "An expanded critical hit threshold for weapon attacks.",
        20,
      ),
    ),
    (
      SpellCriticalThreshold,
      CharacterFlagConfig::number(
        SpellCriticalThreshold,
        "An expanded critical hit threshold for spell attacks.",
        20,
      ),
    ),
    (
      MeleeCriticalDamageDice,
      CharacterFlagConfig::number(
        MeleeCriticalDamageDice,
        "Number of additional weapon damage dice rolled on a melee critical hit.",
        0,
      ),
    ),
  ]
  .into_iter()
  .collect()
}

/// Polymorph bookkeeping flags followed by every configured character flag.
pub fn allowed_actor_flags(flags: &Table<CharacterFlag, CharacterFlagConfig>) -> Vec<ActorFlag> {
  let mut allowed = vec![ActorFlag::IsPolymorphed, ActorFlag::OriginalActor];
  allowed.extend(flags.keys().map(|flag| ActorFlag::from(*flag)));
  allowed
}
