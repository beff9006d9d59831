//! Schema conformance checks: every table covers its enumeration and dependent tables agree with
//! the tables they depend on.

use std::collections::HashSet;

use thiserror::Error;
use tracing::warn;

use dnd5etypes::*;

use crate::{
  config::{ConfigError, Dnd5eConfig},
  flags::{allowed_actor_flags, FlagType},
  progression::{MAX_CHALLENGE_RATING, MAX_CHARACTER_LEVEL, MAX_SPELL_LEVEL},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
  #[error("{table} is missing entries for {keys:?}")]
  MissingKeys { table: &'static str, keys: Vec<&'static str> },
  #[error("{table} has an entry for {key:?} that {source_table} does not define")]
  NotInSource { table: &'static str, source_table: &'static str, key: String },
  #[error("attunement code {0} is not one of the attunement types")]
  UnknownAttunementCode(u8),
  #[error("attunement types reuse code {0}")]
  DuplicateAttunementCode(u8),
  #[error("converting {0} into itself eventually")]
  CurrencyCycle(&'static str),
  #[error("{table} entry {key:?} must be positive")]
  NotPositive { table: &'static str, key: String },
  #[error("{table} must have {expected} rows, found {actual}")]
  WrongRowCount { table: &'static str, expected: usize, actual: usize },
  #[error("{table} row {row} must have {expected} columns, found {actual}")]
  WrongColumnCount { table: &'static str, row: usize, expected: usize, actual: usize },
  #[error("{table} must be increasing, but entry {index} is not")]
  NotIncreasing { table: &'static str, index: usize },
  #[error("{0} must start at zero")]
  NonZeroStart(&'static str),
  #[error("{0} must not be empty")]
  Empty(&'static str),
  #[error("{table} lists {key:?} more than once")]
  Duplicate { table: &'static str, key: &'static str },
  #[error("allowedActorFlags must be the character flags plus isPolymorphed and originalActor")]
  ActorFlagsMismatch,
  #[error("character flag {0:?} is a Boolean flag but has a placeholder")]
  BooleanPlaceholder(&'static str),
  #[error("class {class:?} names level {level}, outside of 1..=20")]
  FeatureLevelOutOfRange { class: &'static str, level: u8 },
}

fn check_total<K: ConfigKey, V>(
  table: &'static str, entries: &Table<K, V>, violations: &mut Vec<SchemaViolation>,
) {
  let missing = entries.missing_keys();
  if !missing.is_empty() {
    violations.push(SchemaViolation::MissingKeys {
      table,
      keys: missing.iter().map(|k| k.key()).collect(),
    });
  }
}

/// Every key of `subset` must have an entry in `source`, after mapping it into the source's key
/// type.
fn check_superset<K, V, S, W>(
  table: &'static str, subset: &Table<K, V>, source_table: &'static str, source: &Table<S, W>,
  violations: &mut Vec<SchemaViolation>,
) where
  K: ConfigKey,
  S: ConfigKey + From<K>,
{
  for key in subset.keys() {
    if !source.contains_key(&S::from(*key)) {
      violations.push(SchemaViolation::NotInSource {
        table,
        source_table,
        key: key.key().to_string(),
      });
    }
  }
}

fn check_unique<K: ConfigKey>(table: &'static str, keys: &[K], violations: &mut Vec<SchemaViolation>) {
  let mut seen = HashSet::new();
  for key in keys {
    if !seen.insert(*key) {
      violations.push(SchemaViolation::Duplicate { table, key: key.key() });
    }
  }
}

fn check_label_tables(config: &Dnd5eConfig, v: &mut Vec<SchemaViolation>) {
  check_total("abilities", &config.abilities, v);
  check_total("abilityAbbreviations", &config.ability_abbreviations, v);
  check_total("alignments", &config.alignments, v);
  check_total("attunements", &config.attunements, v);
  check_total("weaponProficiencies", &config.weapon_proficiencies, v);
  check_total("toolProficiencies", &config.tool_proficiencies, v);
  check_total("timePeriods", &config.time_periods, v);
  check_total("abilityActivationTypes", &config.ability_activation_types, v);
  check_total("abilityConsumptionTypes", &config.ability_consumption_types, v);
  check_total("actorSizes", &config.actor_sizes, v);
  check_total("itemActionTypes", &config.item_action_types, v);
  check_total("itemCapacityTypes", &config.item_capacity_types, v);
  check_total("limitedUsePeriods", &config.limited_use_periods, v);
  check_total("equipmentTypes", &config.equipment_types, v);
  check_total("armorProficiencies", &config.armor_proficiencies, v);
  check_total("consumableTypes", &config.consumable_types, v);
  check_total("currencies", &config.currencies, v);
  check_total("damageTypes", &config.damage_types, v);
  check_total("damageResistanceTypes", &config.damage_resistance_types, v);
  check_total("movementTypes", &config.movement_types, v);
  check_total("movementUnits", &config.movement_units, v);
  check_total("distanceUnits", &config.distance_units, v);
  check_total("targetTypes", &config.target_types, v);
  check_total("healingTypes", &config.healing_types, v);
  check_total("senses", &config.senses, v);
  check_total("skills", &config.skills, v);
  check_total("spellPreparationModes", &config.spell_preparation_modes, v);
  check_total("spellProgression", &config.spell_progression, v);
  check_total("spellScalingModes", &config.spell_scaling_modes, v);
  check_total("weaponTypes", &config.weapon_types, v);
  check_total("weaponProperties", &config.weapon_properties, v);
  check_total("spellComponents", &config.spell_components, v);
  check_total("spellSchools", &config.spell_schools, v);
  check_total("spellLevels", &config.spell_levels, v);
  check_total("spellScrollIds", &config.spell_scroll_ids, v);
  check_total("polymorphSettings", &config.polymorph_settings, v);
  check_total("proficiencyLevels", &config.proficiency_levels, v);
  check_total("cover", &config.cover, v);
  check_total("conditionTypes", &config.condition_types, v);
  check_total("languages", &config.languages, v);
  check_total("classFeatures", &config.class_features, v);
  check_total("characterFlags", &config.character_flags, v);
}

fn check_attunements(config: &Dnd5eConfig, v: &mut Vec<SchemaViolation>) {
  let codes = config.attunement_types.codes();
  let mut seen = HashSet::new();
  for code in codes {
    if !seen.insert(code) {
      v.push(SchemaViolation::DuplicateAttunementCode(code));
    }
  }
  for attunement in config.attunements.keys() {
    if !codes.contains(&attunement.code()) {
      v.push(SchemaViolation::UnknownAttunementCode(attunement.code()));
    }
  }
}

fn check_currencies(config: &Dnd5eConfig, v: &mut Vec<SchemaViolation>) {
  for (from, conversion) in &config.currency_conversion {
    if !config.currencies.contains_key(&conversion.into) {
      v.push(SchemaViolation::NotInSource {
        table: "currencyConversion",
        source_table: "currencies",
        key: conversion.into.key().to_string(),
      });
    }
    if conversion.each == 0 {
      v.push(SchemaViolation::NotPositive { table: "currencyConversion", key: from.key().to_string() });
    }
    // Walk the chain; revisiting the start means it never terminates.
    let mut current = conversion.into;
    for _ in 0..Currency::all().len() {
      if current == *from {
        v.push(SchemaViolation::CurrencyCycle(from.key()));
        break;
      }
      match config.currency_conversion.get(&current) {
        Some(next) => current = next.into,
        None => break,
      }
    }
  }
}

fn check_sizes_and_targets(config: &Dnd5eConfig, v: &mut Vec<SchemaViolation>) {
  check_total("tokenSizes", &config.token_sizes, v);
  for (size, scale) in &config.token_sizes {
    if !(*scale > 0.0) {
      v.push(SchemaViolation::NotPositive { table: "tokenSizes", key: size.key().to_string() });
    }
  }
  for target in config.area_target_types.keys() {
    if !target.is_area() || !config.target_types.contains_key(target) {
      v.push(SchemaViolation::NotInSource {
        table: "areaTargetTypes",
        source_table: "targetTypes",
        key: target.key().to_string(),
      });
    }
  }
  check_superset("movementUnits", &config.movement_units, "distanceUnits", &config.distance_units, v);
  check_superset(
    "damageTypes",
    &config.damage_types,
    "damageResistanceTypes",
    &config.damage_resistance_types,
    v,
  );
}

fn check_spellcasting(config: &Dnd5eConfig, v: &mut Vec<SchemaViolation>) {
  for mode in &config.spell_upcast_modes {
    if !config.spell_preparation_modes.contains_key(mode) {
      v.push(SchemaViolation::NotInSource {
        table: "spellUpcastModes",
        source_table: "spellPreparationModes",
        key: mode.key().to_string(),
      });
    }
  }
  check_unique("spellUpcastModes", &config.spell_upcast_modes, v);
  check_superset("spellScrollIds", &config.spell_scroll_ids, "spellLevels", &config.spell_levels, v);

  let rows = config.spell_slot_table.rows();
  if rows.len() != usize::from(MAX_CHARACTER_LEVEL) {
    v.push(SchemaViolation::WrongRowCount {
      table: "SPELL_SLOT_TABLE",
      expected: usize::from(MAX_CHARACTER_LEVEL),
      actual: rows.len(),
    });
  }
  for (idx, row) in rows.iter().enumerate() {
    if row.len() != usize::from(MAX_SPELL_LEVEL) {
      v.push(SchemaViolation::WrongColumnCount {
        table: "SPELL_SLOT_TABLE",
        row: idx + 1,
        expected: usize::from(MAX_SPELL_LEVEL),
        actual: row.len(),
      });
    }
  }
}

fn check_experience(config: &Dnd5eConfig, v: &mut Vec<SchemaViolation>) {
  let levels = &config.character_exp_levels.0;
  if levels.len() != usize::from(MAX_CHARACTER_LEVEL) {
    v.push(SchemaViolation::WrongRowCount {
      table: "CHARACTER_EXP_LEVELS",
      expected: usize::from(MAX_CHARACTER_LEVEL),
      actual: levels.len(),
    });
  }
  if levels.first().map_or(false, |xp| xp.0 != 0) {
    v.push(SchemaViolation::NonZeroStart("CHARACTER_EXP_LEVELS"));
  }
  for (idx, pair) in levels.windows(2).enumerate() {
    if pair[1] <= pair[0] {
      v.push(SchemaViolation::NotIncreasing { table: "CHARACTER_EXP_LEVELS", index: idx + 1 });
    }
  }

  let crs = &config.cr_exp_levels.0;
  if crs.len() != usize::from(MAX_CHALLENGE_RATING) + 1 {
    v.push(SchemaViolation::WrongRowCount {
      table: "CR_EXP_LEVELS",
      expected: usize::from(MAX_CHALLENGE_RATING) + 1,
      actual: crs.len(),
    });
  }
  for (idx, pair) in crs.windows(2).enumerate() {
    if pair[1] < pair[0] {
      v.push(SchemaViolation::NotIncreasing { table: "CR_EXP_LEVELS", index: idx + 1 });
    }
  }
}

fn check_flags_and_features(config: &Dnd5eConfig, v: &mut Vec<SchemaViolation>) {
  if config.hit_die_types.is_empty() {
    v.push(SchemaViolation::Empty("hitDieTypes"));
  }
  check_unique("hitDieTypes", &config.hit_die_types, v);

  let expected: HashSet<ActorFlag> =
    allowed_actor_flags(&config.character_flags).into_iter().collect();
  let actual: HashSet<ActorFlag> = config.allowed_actor_flags.iter().copied().collect();
  if expected != actual {
    v.push(SchemaViolation::ActorFlagsMismatch);
  }
  check_unique("allowedActorFlags", &config.allowed_actor_flags, v);

  for (flag, flag_config) in &config.character_flags {
    if flag_config.flag_type == FlagType::Boolean && flag_config.placeholder.is_some() {
      v.push(SchemaViolation::BooleanPlaceholder(flag.key()));
    }
  }

  for (class, features) in &config.class_features {
    for level in features.levels() {
      if level == 0 || level > MAX_CHARACTER_LEVEL {
        v.push(SchemaViolation::FeatureLevelOutOfRange { class: class.key(), level });
      }
    }
  }

  let encumbrance = &config.encumbrance;
  for (key, value) in [
    ("currencyPerWeight", encumbrance.currency_per_weight),
    ("strMultiplier", encumbrance.str_multiplier),
    ("vehicleWeightMultiplier", encumbrance.vehicle_weight_multiplier),
  ] {
    if value == 0 {
      v.push(SchemaViolation::NotPositive { table: "encumbrance", key: key.to_string() });
    }
  }
}

impl Dnd5eConfig {
  /// Every way this configuration fails to conform to its schema.
  pub fn violations(&self) -> Vec<SchemaViolation> {
    let mut violations = vec![];
    check_label_tables(self, &mut violations);
    check_attunements(self, &mut violations);
    check_currencies(self, &mut violations);
    check_sizes_and_targets(self, &mut violations);
    check_spellcasting(self, &mut violations);
    check_experience(self, &mut violations);
    check_flags_and_features(self, &mut violations);
    violations
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    let violations = self.violations();
    if violations.is_empty() {
      return Ok(());
    }
    warn!(event = "config-invalid", count = violations.len());
    Err(ConfigError::Invalid(violations))
  }
}

#[cfg(test)]
mod test {
  use dnd5etypes::*;

  use super::*;
  use crate::{flags::CharacterFlagConfig, progression::SpellSlotTable};

  fn assert_violation(config: &Dnd5eConfig, expected: SchemaViolation) {
    let violations = config.violations();
    assert!(violations.contains(&expected), "{:?} not in {:?}", expected, violations);
  }

  #[test]
  fn default_config_is_valid() {
    assert_eq!(Dnd5eConfig::default().violations(), vec![]);
    Dnd5eConfig::default().validate().expect("Default config must validate");
  }

  #[test]
  fn missing_labels() {
    let mut config = Dnd5eConfig::default();
    config.skills = vec![(Skill::Stealth, "Stealth".to_string())].into_iter().collect();
    match config.validate() {
      Err(ConfigError::Invalid(violations)) => {
        assert_eq!(violations.len(), 1);
        match &violations[0] {
          SchemaViolation::MissingKeys { table, keys } => {
            assert_eq!(*table, "skills");
            assert_eq!(keys.len(), 17);
            assert!(!keys.contains(&"ste"));
          }
          x => panic!("Unexpected violation: {:?}", x),
        }
      }
      x => panic!("Unexpected result: {:?}", x),
    }
  }

  #[test]
  fn distance_units_must_include_movement_units() {
    let mut config = Dnd5eConfig::default();
    config.distance_units = DistanceUnit::all()
      .iter()
      .filter(|u| **u != DistanceUnit::Miles)
      .map(|u| (*u, u.label().to_string()))
      .collect();
    assert_violation(
      &config,
      SchemaViolation::NotInSource {
        table: "movementUnits",
        source_table: "distanceUnits",
        key: "mi".to_string(),
      },
    );
  }

  #[test]
  fn attunement_codes() {
    let mut config = Dnd5eConfig::default();
    config.attunement_types.attuned = 1;
    assert_violation(&config, SchemaViolation::DuplicateAttunementCode(1));
    assert_violation(&config, SchemaViolation::UnknownAttunementCode(2));
  }

  #[test]
  fn currency_cycles() {
    let mut config = Dnd5eConfig::default();
    config
      .currency_conversion
      .insert(Currency::Platinum, CurrencyConversion { into: Currency::Copper, each: 1 });
    assert_violation(&config, SchemaViolation::CurrencyCycle("pp"));
    assert_violation(&config, SchemaViolation::CurrencyCycle("cp"));
  }

  #[test]
  fn zero_conversion() {
    let mut config = Dnd5eConfig::default();
    config
      .currency_conversion
      .insert(Currency::Copper, CurrencyConversion { into: Currency::Silver, each: 0 });
    assert_violation(
      &config,
      SchemaViolation::NotPositive { table: "currencyConversion", key: "cp".to_string() },
    );
  }

  #[test]
  fn area_targets_must_be_areas() {
    let mut config = Dnd5eConfig::default();
    config.area_target_types.insert(TargetType::Ally, TemplateShape::Circle);
    assert_violation(
      &config,
      SchemaViolation::NotInSource {
        table: "areaTargetTypes",
        source_table: "targetTypes",
        key: "ally".to_string(),
      },
    );
  }

  #[test]
  fn slot_table_dimensions() {
    let mut config = Dnd5eConfig::default();
    let mut rows = SpellSlotTable::full_caster().0;
    rows.pop();
    rows[0].truncate(1);
    config.spell_slot_table = SpellSlotTable(rows);
    assert_violation(
      &config,
      SchemaViolation::WrongRowCount { table: "SPELL_SLOT_TABLE", expected: 20, actual: 19 },
    );
    assert_violation(
      &config,
      SchemaViolation::WrongColumnCount { table: "SPELL_SLOT_TABLE", row: 1, expected: 9, actual: 1 },
    );
  }

  #[test]
  fn experience_must_increase() {
    let mut config = Dnd5eConfig::default();
    config.character_exp_levels.0[3] = Xp(900);
    assert_violation(
      &config,
      SchemaViolation::NotIncreasing { table: "CHARACTER_EXP_LEVELS", index: 3 },
    );
    config.character_exp_levels.0[0] = Xp(1);
    assert_violation(&config, SchemaViolation::NonZeroStart("CHARACTER_EXP_LEVELS"));
  }

  #[test]
  fn token_sizes_must_be_positive() {
    let mut config = Dnd5eConfig::default();
    config.token_sizes.insert(Size::Medium, 0.0);
    assert_violation(&config, SchemaViolation::NotPositive { table: "tokenSizes", key: "med".to_string() });
    config.token_sizes.insert(Size::Medium, 1.0);
    config.token_sizes.insert(Size::Huge, f32::NAN);
    assert_violation(&config, SchemaViolation::NotPositive { table: "tokenSizes", key: "huge".to_string() });
  }

  #[test]
  fn upcast_modes_come_from_preparation_modes() {
    let mut config = Dnd5eConfig::default();
    config.spell_preparation_modes = config
      .spell_preparation_modes
      .iter()
      .filter(|(mode, _)| **mode != SpellPreparation::Pact)
      .map(|(mode, label)| (*mode, label.clone()))
      .collect();
    assert_violation(
      &config,
      SchemaViolation::NotInSource {
        table: "spellUpcastModes",
        source_table: "spellPreparationModes",
        key: "pact".to_string(),
      },
    );

    let mut config = Dnd5eConfig::default();
    config.spell_upcast_modes.push(SpellPreparation::Always);
    assert_violation(&config, SchemaViolation::Duplicate { table: "spellUpcastModes", key: "always" });
  }

  #[test]
  fn challenge_xp_shape() {
    let mut config = Dnd5eConfig::default();
    config.cr_exp_levels.0.pop();
    assert_violation(
      &config,
      SchemaViolation::WrongRowCount { table: "CR_EXP_LEVELS", expected: 31, actual: 30 },
    );

    let mut config = Dnd5eConfig::default();
    config.cr_exp_levels.0[5] = Xp(1);
    assert_violation(&config, SchemaViolation::NotIncreasing { table: "CR_EXP_LEVELS", index: 5 });
    config.cr_exp_levels.0[5] = config.cr_exp_levels.0[4];
    assert_eq!(config.violations(), vec![]);
  }

  #[test]
  fn encumbrance_must_be_positive() {
    let mut config = Dnd5eConfig::default();
    config.encumbrance.str_multiplier = 0;
    assert_violation(
      &config,
      SchemaViolation::NotPositive { table: "encumbrance", key: "strMultiplier".to_string() },
    );
    config.encumbrance.vehicle_weight_multiplier = 0;
    assert_eq!(config.violations().len(), 2);
  }

  #[test]
  fn actor_flags_follow_character_flags() {
    let mut config = Dnd5eConfig::default();
    config.allowed_actor_flags.retain(|f| *f != ActorFlag::OriginalActor);
    assert_violation(&config, SchemaViolation::ActorFlagsMismatch);
  }

  #[test]
  fn boolean_flags_have_no_placeholder() {
    let mut config = Dnd5eConfig::default();
    let lucky = config.character_flags.lookup(&CharacterFlag::HalflingLucky).unwrap().clone();
    config
      .character_flags
      .insert(CharacterFlag::HalflingLucky, CharacterFlagConfig { placeholder: Some(1), ..lucky });
    assert_violation(&config, SchemaViolation::BooleanPlaceholder("halflingLucky"));
  }

  #[test]
  fn hit_dice_must_be_unique() {
    let mut config = Dnd5eConfig::default();
    config.hit_die_types.push(HitDie::D8);
    assert_violation(&config, SchemaViolation::Duplicate { table: "hitDieTypes", key: "d8" });
    config.hit_die_types.clear();
    assert_violation(&config, SchemaViolation::Empty("hitDieTypes"));
  }

  #[test]
  fn feature_levels_in_range() {
    let mut config = Dnd5eConfig::default();
    let mut fighter = config.class_features.lookup(&ClassId::Fighter).unwrap().clone();
    fighter.features.insert(21, vec!["epic-boon".to_string()]);
    config.class_features.insert(ClassId::Fighter, fighter);
    assert_violation(
      &config,
      SchemaViolation::FeatureLevelOutOfRange { class: "fighter", level: 21 },
    );
  }
}
