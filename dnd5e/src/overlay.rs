//! Partial configurations supplied by content modules and merged over the defaults.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use dnd5etypes::*;

use crate::{
  class_features::ClassFeatures,
  config::{AttunementTypes, ConfigError, Dnd5eConfig},
  flags::CharacterFlagConfig,
  progression::{ChallengeXp, ExperienceTable, SpellSlotTable},
};

/// Encumbrance settings where each value is optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EncumbranceOverlay {
  pub currency_per_weight: Option<u32>,
  pub str_multiplier: Option<u32>,
  pub vehicle_weight_multiplier: Option<u32>,
}

/// A partial `Dnd5eConfig`. Tables merge entry by entry; lists and level tables replace the
/// whole value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverlay {
  #[serde(rename = "ASCII")]
  pub ascii: Option<String>,
  pub abilities: Option<LabelTable<Ability>>,
  pub ability_abbreviations: Option<LabelTable<Ability>>,
  pub alignments: Option<LabelTable<Alignment>>,
  pub attunement_types: Option<AttunementTypes>,
  pub attunements: Option<LabelTable<Attunement>>,
  pub weapon_proficiencies: Option<LabelTable<WeaponProficiency>>,
  pub tool_proficiencies: Option<LabelTable<ToolProficiency>>,
  pub time_periods: Option<LabelTable<TimePeriod>>,
  pub ability_activation_types: Option<LabelTable<ActivationType>>,
  pub ability_consumption_types: Option<LabelTable<ConsumeType>>,
  pub actor_sizes: Option<LabelTable<Size>>,
  pub token_sizes: Option<Table<Size, f32>>,
  pub item_action_types: Option<LabelTable<ActionType>>,
  pub item_capacity_types: Option<LabelTable<CapacityType>>,
  pub limited_use_periods: Option<LabelTable<UsePeriod>>,
  pub equipment_types: Option<LabelTable<EquipmentType>>,
  pub armor_proficiencies: Option<LabelTable<ArmorProficiency>>,
  #[serde(alias = "comsumableTypes")]
  pub consumable_types: Option<LabelTable<ConsumableType>>,
  pub currencies: Option<LabelTable<Currency>>,
  pub currency_conversion: Option<Table<Currency, CurrencyConversion>>,
  pub damage_types: Option<LabelTable<DamageType>>,
  pub damage_resistance_types: Option<LabelTable<DamageResistanceType>>,
  pub movement_types: Option<LabelTable<MovementType>>,
  pub movement_units: Option<LabelTable<MovementUnit>>,
  pub distance_units: Option<LabelTable<DistanceUnit>>,
  pub encumbrance: Option<EncumbranceOverlay>,
  pub target_types: Option<LabelTable<TargetType>>,
  pub area_target_types: Option<Table<TargetType, TemplateShape>>,
  pub healing_types: Option<LabelTable<HealingType>>,
  pub hit_die_types: Option<Vec<HitDie>>,
  pub senses: Option<LabelTable<Sense>>,
  pub skills: Option<LabelTable<Skill>>,
  pub spell_preparation_modes: Option<LabelTable<SpellPreparation>>,
  pub spell_upcast_modes: Option<Vec<SpellPreparation>>,
  pub spell_progression: Option<LabelTable<SpellProgression>>,
  pub spell_scaling_modes: Option<LabelTable<SpellScaling>>,
  pub weapon_types: Option<LabelTable<WeaponType>>,
  pub weapon_properties: Option<LabelTable<WeaponProperty>>,
  pub spell_components: Option<LabelTable<SpellComponent>>,
  pub spell_schools: Option<LabelTable<SpellSchool>>,
  pub spell_levels: Option<LabelTable<SpellLevel>>,
  pub spell_scroll_ids: Option<LabelTable<SpellLevel>>,
  #[serde(rename = "SPELL_SLOT_TABLE")]
  pub spell_slot_table: Option<SpellSlotTable>,
  pub polymorph_settings: Option<LabelTable<PolymorphSetting>>,
  pub proficiency_levels: Option<LabelTable<ProficiencyLevel>>,
  pub cover: Option<LabelTable<Cover>>,
  pub condition_types: Option<LabelTable<ConditionType>>,
  pub languages: Option<LabelTable<Language>>,
  #[serde(rename = "CHARACTER_EXP_LEVELS")]
  pub character_exp_levels: Option<ExperienceTable>,
  #[serde(rename = "CR_EXP_LEVELS")]
  pub cr_exp_levels: Option<ChallengeXp>,
  pub class_features: Option<ClassFeatures>,
  pub character_flags: Option<Table<CharacterFlag, CharacterFlagConfig>>,
  pub allowed_actor_flags: Option<Vec<ActorFlag>>,
}

impl ConfigOverlay {
  pub fn from_yaml_str(yaml: &str) -> Result<ConfigOverlay, ConfigError> { Ok(serde_yaml::from_str(yaml)?) }

  pub fn from_json_str(json: &str) -> Result<ConfigOverlay, ConfigError> { Ok(serde_json::from_str(json)?) }
}

fn merge<K: ConfigKey, V>(
  name: &'static str, target: &mut Table<K, V>, overlay: Option<Table<K, V>>, touched: &mut Vec<&'static str>,
) {
  if let Some(entries) = overlay {
    debug!(event = "overlay-merge", table = name, entries = entries.len());
    target.extend(entries);
    touched.push(name);
  }
}

fn replace<T>(name: &'static str, target: &mut T, overlay: Option<T>, touched: &mut Vec<&'static str>) {
  if let Some(value) = overlay {
    debug!(event = "overlay-replace", table = name);
    *target = value;
    touched.push(name);
  }
}

impl Dnd5eConfig {
  /// Merge an overlay into a copy of this configuration and check the result. The original is
  /// left untouched, so a rejected overlay leaves nothing half-applied.
  #[tracing::instrument(skip_all)]
  pub fn apply_overlay(&self, overlay: ConfigOverlay) -> Result<Dnd5eConfig, ConfigError> {
    let mut config = self.clone();
    let touched = config.merge_overlay(overlay);
    config.validate()?;
    info!(event = "overlay-applied", tables = ?touched);
    Ok(config)
  }

  /// Merge without validating. Returns the host names of the fields the overlay touched.
  ///
  /// Label and structured tables merge entry by entry. Class features merge one level deeper:
  /// the levels and subclasses an overlay names replace the existing ones and the rest are kept.
  /// Lists, `encumbrance` values and the level tables are replaced whole.
  pub fn merge_overlay(&mut self, overlay: ConfigOverlay) -> Vec<&'static str> {
    let mut t = vec![];
    let o = overlay;
    replace("ASCII", &mut self.ascii, o.ascii, &mut t);
    merge("abilities", &mut self.abilities, o.abilities, &mut t);
    merge("abilityAbbreviations", &mut self.ability_abbreviations, o.ability_abbreviations, &mut t);
    merge("alignments", &mut self.alignments, o.alignments, &mut t);
    replace("attunementTypes", &mut self.attunement_types, o.attunement_types, &mut t);
    merge("attunements", &mut self.attunements, o.attunements, &mut t);
    merge("weaponProficiencies", &mut self.weapon_proficiencies, o.weapon_proficiencies, &mut t);
    merge("toolProficiencies", &mut self.tool_proficiencies, o.tool_proficiencies, &mut t);
    merge("timePeriods", &mut self.time_periods, o.time_periods, &mut t);
    merge(
      "abilityActivationTypes",
      &mut self.ability_activation_types,
      o.ability_activation_types,
      &mut t,
    );
    merge(
      "abilityConsumptionTypes",
      &mut self.ability_consumption_types,
      o.ability_consumption_types,
      &mut t,
    );
    merge("actorSizes", &mut self.actor_sizes, o.actor_sizes, &mut t);
    merge("tokenSizes", &mut self.token_sizes, o.token_sizes, &mut t);
    merge("itemActionTypes", &mut self.item_action_types, o.item_action_types, &mut t);
    merge("itemCapacityTypes", &mut self.item_capacity_types, o.item_capacity_types, &mut t);
    merge("limitedUsePeriods", &mut self.limited_use_periods, o.limited_use_periods, &mut t);
    merge("equipmentTypes", &mut self.equipment_types, o.equipment_types, &mut t);
    merge("armorProficiencies", &mut self.armor_proficiencies, o.armor_proficiencies, &mut t);
    merge("consumableTypes", &mut self.consumable_types, o.consumable_types, &mut t);
    merge("currencies", &mut self.currencies, o.currencies, &mut t);
    merge("currencyConversion", &mut self.currency_conversion, o.currency_conversion, &mut t);
    merge("damageTypes", &mut self.damage_types, o.damage_types, &mut t);
    merge(
      "damageResistanceTypes",
      &mut self.damage_resistance_types,
      o.damage_resistance_types,
      &mut t,
    );
    merge("movementTypes", &mut self.movement_types, o.movement_types, &mut t);
    merge("movementUnits", &mut self.movement_units, o.movement_units, &mut t);
    merge("distanceUnits", &mut self.distance_units, o.distance_units, &mut t);
    if let Some(encumbrance) = o.encumbrance {
      let target = &mut self.encumbrance;
      target.currency_per_weight =
        encumbrance.currency_per_weight.unwrap_or(target.currency_per_weight);
      target.str_multiplier = encumbrance.str_multiplier.unwrap_or(target.str_multiplier);
      target.vehicle_weight_multiplier =
        encumbrance.vehicle_weight_multiplier.unwrap_or(target.vehicle_weight_multiplier);
      t.push("encumbrance");
    }
    merge("targetTypes", &mut self.target_types, o.target_types, &mut t);
    merge("areaTargetTypes", &mut self.area_target_types, o.area_target_types, &mut t);
    merge("healingTypes", &mut self.healing_types, o.healing_types, &mut t);
    replace("hitDieTypes", &mut self.hit_die_types, o.hit_die_types, &mut t);
    merge("senses", &mut self.senses, o.senses, &mut t);
    merge("skills", &mut self.skills, o.skills, &mut t);
    merge(
      "spellPreparationModes",
      &mut self.spell_preparation_modes,
      o.spell_preparation_modes,
      &mut t,
    );
    replace("spellUpcastModes", &mut self.spell_upcast_modes, o.spell_upcast_modes, &mut t);
    merge("spellProgression", &mut self.spell_progression, o.spell_progression, &mut t);
    merge("spellScalingModes", &mut self.spell_scaling_modes, o.spell_scaling_modes, &mut t);
    merge("weaponTypes", &mut self.weapon_types, o.weapon_types, &mut t);
    merge("weaponProperties", &mut self.weapon_properties, o.weapon_properties, &mut t);
    merge("spellComponents", &mut self.spell_components, o.spell_components, &mut t);
    merge("spellSchools", &mut self.spell_schools, o.spell_schools, &mut t);
    merge("spellLevels", &mut self.spell_levels, o.spell_levels, &mut t);
    merge("spellScrollIds", &mut self.spell_scroll_ids, o.spell_scroll_ids, &mut t);
    replace("SPELL_SLOT_TABLE", &mut self.spell_slot_table, o.spell_slot_table, &mut t);
    self.spell_slot_table.normalize();
    merge("polymorphSettings", &mut self.polymorph_settings, o.polymorph_settings, &mut t);
    merge("proficiencyLevels", &mut self.proficiency_levels, o.proficiency_levels, &mut t);
    merge("cover", &mut self.cover, o.cover, &mut t);
    merge("conditionTypes", &mut self.condition_types, o.condition_types, &mut t);
    merge("languages", &mut self.languages, o.languages, &mut t);
    replace("CHARACTER_EXP_LEVELS", &mut self.character_exp_levels, o.character_exp_levels, &mut t);
    replace("CR_EXP_LEVELS", &mut self.cr_exp_levels, o.cr_exp_levels, &mut t);
    if let Some(classes) = o.class_features {
      debug!(event = "overlay-merge", table = "classFeatures", entries = classes.len());
      for (class, set) in classes {
        match self.class_features.get_mut(&class) {
          Some(existing) => existing.merge(set),
          None => {
            self.class_features.insert(class, set);
          }
        }
      }
      t.push("classFeatures");
    }
    merge("characterFlags", &mut self.character_flags, o.character_flags, &mut t);
    replace("allowedActorFlags", &mut self.allowed_actor_flags, o.allowed_actor_flags, &mut t);
    t
  }
}

#[cfg(test)]
mod test {
  use dnd5etypes::*;
  use maplit::btreemap;

  use super::*;
  use crate::{class_features::ClassFeatureSet, validate::SchemaViolation};

  #[test]
  fn relabels_entries() {
    let overlay = ConfigOverlay::from_yaml_str(
      "
currencies:
  gp: Crowns
  sp: Shillings
encumbrance:
  strMultiplier: 20
",
    )
    .unwrap();
    let config = Dnd5eConfig::default().apply_overlay(overlay).unwrap();
    assert_eq!(config.currencies.label(&Currency::Gold).unwrap(), "Crowns");
    assert_eq!(config.currencies.label(&Currency::Copper).unwrap(), "Copper");
    assert_eq!(config.encumbrance.str_multiplier, 20);
    assert_eq!(config.encumbrance.currency_per_weight, 50);
  }

  #[test]
  fn merge_reports_touched_tables() {
    let overlay = ConfigOverlay::from_json_str(
      r#"{"comsumableTypes": {"wand": "Stick"}, "SPELL_SLOT_TABLE": [[2],[3],[4,2],[4,3],[4,3,2],[4,3,3],[4,3,3,1],[4,3,3,2],[4,3,3,3,1],[4,3,3,3,2],[4,3,3,3,2,1],[4,3,3,3,2,1],[4,3,3,3,2,1,1],[4,3,3,3,2,1,1],[4,3,3,3,2,1,1,1],[4,3,3,3,2,1,1,1],[4,3,3,3,2,1,1,1,1],[4,3,3,3,3,1,1,1,1],[4,3,3,3,3,2,1,1,1],[4,3,3,3,3,2,2,1,1]]}"#,
    )
    .unwrap();
    let mut config = Dnd5eConfig::default();
    let touched = config.merge_overlay(overlay);
    assert_eq!(touched, vec!["consumableTypes", "SPELL_SLOT_TABLE"]);
    assert_eq!(config.consumable_types.label(&ConsumableType::Wand).unwrap(), "Stick");
    let expected =
      Dnd5eConfig { consumable_types: config.consumable_types.clone(), ..Dnd5eConfig::default() };
    assert_eq!(config, expected);
  }

  #[test]
  fn rejects_unknown_keys_and_fields() {
    assert!(ConfigOverlay::from_yaml_str("currencies:\n  zz: Zorkmids\n").is_err());
    assert!(ConfigOverlay::from_yaml_str("notATable: 1\n").is_err());
  }

  #[test]
  fn rejects_misspelt_nested_fields() {
    match ConfigOverlay::from_yaml_str("encumbrance:\n  strMultiplyer: 20\n") {
      Err(ConfigError::Yaml(e)) => assert!(e.to_string().contains("strMultiplyer")),
      x => panic!("Unexpected result: {:?}", x),
    }
    let nested = [
      "currencyConversion:\n  cp: {into: sp, each: 10, rate: 2}\n",
      "attunementTypes: {NONE: 0, REQUIRED: 1, ATTUNED: 2, BONDED: 3}\n",
      "characterFlags:\n  diamondSoul: {name: D, hint: H, section: Feats, type: Boolean, icon: x}\n",
      "classFeatures:\n  fighter:\n    subclasses:\n      champion: {label: C, source: S, feats: {}}\n",
    ];
    for yaml in nested {
      assert!(ConfigOverlay::from_yaml_str(yaml).is_err(), "accepted {}", yaml);
    }
  }

  #[test]
  fn rejects_invalid_results() {
    let overlay = ConfigOverlay {
      currency_conversion: Some(
        vec![(Currency::Platinum, CurrencyConversion { into: Currency::Copper, each: 100 })]
          .into_iter()
          .collect(),
      ),
      ..Default::default()
    };
    let base = Dnd5eConfig::default();
    match base.apply_overlay(overlay) {
      Err(ConfigError::Invalid(violations)) => {
        assert!(violations.contains(&SchemaViolation::CurrencyCycle("pp")))
      }
      x => panic!("Unexpected result: {:?}", x),
    }
    assert_eq!(base, Dnd5eConfig::default());
  }

  #[test]
  fn adds_class_features() {
    let mut fighter = ClassFeatureSet::default();
    fighter.features = btreemap! { 1 => vec!["Compendium.my-module.features.second-wind".to_string()] };
    let overlay = ConfigOverlay {
      class_features: Some(vec![(ClassId::Fighter, fighter)].into_iter().collect()),
      ..Default::default()
    };
    let config = Dnd5eConfig::default().apply_overlay(overlay).unwrap();
    let fighter = config.class_features.lookup(&ClassId::Fighter).unwrap();
    assert_eq!(fighter.features_at(1, None).unwrap(), vec!["Compendium.my-module.features.second-wind"]);
    assert_eq!(fighter.subclasses["champion"].source, "PHB pg. 72");
  }
}
