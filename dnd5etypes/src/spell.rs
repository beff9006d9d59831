//! Spellcasting enumerations.

use crate::{config_key, ConfigKey, LookupError};

config_key! {
  pub enum SpellComponent("spell component") {
    Verbal = "V" => "Verbal",
    Somatic = "S" => "Somatic",
    Material = "M" => "Material",
  }
}

config_key! {
  pub enum SpellSchool("spell school") {
    Abjuration = "abj" => "Abjuration",
    Conjuration = "con" => "Conjuration",
    Divination = "div" => "Divination",
    Enchantment = "enc" => "Enchantment",
    Evocation = "evo" => "Evocation",
    Illusion = "ill" => "Illusion",
    Necromancy = "nec" => "Necromancy",
    Transmutation = "trs" => "Transmutation",
  }
}

config_key! {
  /// Spell levels. The key is the level number; cantrips are level 0.
  pub enum SpellLevel("spell level") {
    Cantrip = "0" => "Cantrip",
    First = "1" => "1st Level",
    Second = "2" => "2nd Level",
    Third = "3" => "3rd Level",
    Fourth = "4" => "4th Level",
    Fifth = "5" => "5th Level",
    Sixth = "6" => "6th Level",
    Seventh = "7" => "7th Level",
    Eighth = "8" => "8th Level",
    Ninth = "9" => "9th Level",
  }
}

impl SpellLevel {
  pub fn level(&self) -> u8 {
    match self {
      SpellLevel::Cantrip => 0,
      SpellLevel::First => 1,
      SpellLevel::Second => 2,
      SpellLevel::Third => 3,
      SpellLevel::Fourth => 4,
      SpellLevel::Fifth => 5,
      SpellLevel::Sixth => 6,
      SpellLevel::Seventh => 7,
      SpellLevel::Eighth => 8,
      SpellLevel::Ninth => 9,
    }
  }

  pub fn from_level(level: u8) -> Result<SpellLevel, LookupError> {
    SpellLevel::all()
      .get(usize::from(level))
      .copied()
      .ok_or(LookupError::UnknownSpellLevel(level))
  }
}

config_key! {
  pub enum SpellPreparation("spell preparation mode") {
    Prepared = "prepared" => "Prepared",
    Pact = "pact" => "Pact Magic",
    Always = "always" => "Always Prepared",
    AtWill = "atwill" => "At-Will",
    Innate = "innate" => "Innate Spellcasting",
  }
}

config_key! {
  /// Spellcaster progressions a class can follow.
  pub enum SpellProgression("spellcasting progression") {
    None = "none" => "None",
    Full = "full" => "Full Caster",
    Half = "half" => "Half Caster",
    Third = "third" => "Third Caster",
    Pact = "pact" => "Pact Magic",
    Artificer = "artificer" => "Artificer",
  }
}

config_key! {
  /// How spell damage scaling is computed.
  pub enum SpellScaling("spell scaling mode") {
    None = "none" => "None",
    Cantrip = "cantrip" => "Cantrip",
    Level = "level" => "Level",
  }
}

#[cfg(test)]
mod test {
  use strum::IntoEnumIterator;

  use crate::{ConfigKey, LookupError, SpellLevel};

  #[test]
  fn spell_level_keys_are_levels() {
    for level in SpellLevel::iter() {
      assert_eq!(level.key(), level.level().to_string());
      assert_eq!(SpellLevel::from_level(level.level()).unwrap(), level);
    }
  }

  #[test]
  fn spell_level_out_of_range() {
    assert_eq!(SpellLevel::from_level(10), Err(LookupError::UnknownSpellLevel(10)));
  }
}
