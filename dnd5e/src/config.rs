use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use ts_rs::TS;

use dnd5etypes::*;

use crate::{
  class_features::{default_class_features, ClassFeatures},
  flags::{allowed_actor_flags, default_character_flags, CharacterFlagConfig},
  progression::{ChallengeXp, ExperienceTable, SpellSlotTable},
  validate::SchemaViolation,
};

/// The process-wide default configuration, built on first access.
pub static DND5E: Lazy<Dnd5eConfig> = Lazy::new(Dnd5eConfig::default);

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("There is no table named {0:?}")]
  UnknownTable(String),
  #[error("The {table} table has no entry {key:?}")]
  UnknownEntry { table: String, key: String },
  #[error("The {0} field is not a table")]
  NotATable(String),
  #[error(transparent)]
  Lookup(#[from] LookupError),
  #[error("Invalid configuration: {}", describe(.0))]
  Invalid(Vec<SchemaViolation>),
  #[error("Couldn't parse YAML: {0}")]
  Yaml(#[from] serde_yaml::Error),
  #[error("Couldn't parse JSON: {0}")]
  Json(#[from] serde_json::Error),
}

fn describe(violations: &[SchemaViolation]) -> String {
  violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; ")
}

/// The attunement code assigned to each attunement state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
pub struct AttunementTypes {
  #[serde(rename = "NONE")]
  pub none: u8,
  #[serde(rename = "REQUIRED")]
  pub required: u8,
  #[serde(rename = "ATTUNED")]
  pub attuned: u8,
}

impl AttunementTypes {
  pub fn codes(&self) -> [u8; 3] { [self.none, self.required, self.attuned] }
}

impl Default for AttunementTypes {
  fn default() -> AttunementTypes {
    AttunementTypes {
      none: Attunement::NotRequired.code(),
      required: Attunement::Required.code(),
      attuned: Attunement::Attuned.code(),
    }
  }
}

/// Numbers feeding encumbrance calculation. Content modules may retune these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Encumbrance {
  pub currency_per_weight: u32,
  pub str_multiplier: u32,
  pub vehicle_weight_multiplier: u32,
}

impl Default for Encumbrance {
  fn default() -> Encumbrance {
    Encumbrance { currency_per_weight: 50, str_multiplier: 15, vehicle_weight_multiplier: 2000 }
  }
}

/// Every enumeration and lookup table the host reads, under the host's field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Dnd5eConfig {
  #[serde(rename = "ASCII")]
  pub ascii: String,

  #[ts(type = "Record<Ability, string>")]
  pub abilities: LabelTable<Ability>,
  #[ts(type = "Record<Ability, string>")]
  pub ability_abbreviations: LabelTable<Ability>,
  #[ts(type = "Record<Alignment, string>")]
  pub alignments: LabelTable<Alignment>,

  pub attunement_types: AttunementTypes,
  #[ts(type = "Record<Attunement, string>")]
  pub attunements: LabelTable<Attunement>,

  #[ts(type = "Record<WeaponProficiency, string>")]
  pub weapon_proficiencies: LabelTable<WeaponProficiency>,
  #[ts(type = "Record<ToolProficiency, string>")]
  pub tool_proficiencies: LabelTable<ToolProficiency>,

  #[ts(type = "Record<TimePeriod, string>")]
  pub time_periods: LabelTable<TimePeriod>,
  #[ts(type = "Record<ActivationType, string>")]
  pub ability_activation_types: LabelTable<ActivationType>,
  #[ts(type = "Record<ConsumeType, string>")]
  pub ability_consumption_types: LabelTable<ConsumeType>,

  #[ts(type = "Record<Size, string>")]
  pub actor_sizes: LabelTable<Size>,
  #[ts(type = "Record<Size, number>")]
  pub token_sizes: Table<Size, f32>,

  #[ts(type = "Record<ActionType, string>")]
  pub item_action_types: LabelTable<ActionType>,
  #[ts(type = "Record<CapacityType, string>")]
  pub item_capacity_types: LabelTable<CapacityType>,
  #[ts(type = "Record<UsePeriod, string>")]
  pub limited_use_periods: LabelTable<UsePeriod>,
  #[ts(type = "Record<EquipmentType, string>")]
  pub equipment_types: LabelTable<EquipmentType>,
  #[ts(type = "Record<ArmorProficiency, string>")]
  pub armor_proficiencies: LabelTable<ArmorProficiency>,
  #[serde(alias = "comsumableTypes")]
  #[ts(type = "Record<ConsumableType, string>")]
  pub consumable_types: LabelTable<ConsumableType>,

  #[ts(type = "Record<Currency, string>")]
  pub currencies: LabelTable<Currency>,
  #[ts(type = "Partial<Record<Currency, CurrencyConversion>>")]
  pub currency_conversion: Table<Currency, CurrencyConversion>,

  #[ts(type = "Record<DamageType, string>")]
  pub damage_types: LabelTable<DamageType>,
  #[ts(type = "Record<DamageResistanceType, string>")]
  pub damage_resistance_types: LabelTable<DamageResistanceType>,

  #[ts(type = "Record<MovementType, string>")]
  pub movement_types: LabelTable<MovementType>,
  #[ts(type = "Record<MovementUnit, string>")]
  pub movement_units: LabelTable<MovementUnit>,
  #[ts(type = "Record<DistanceUnit, string>")]
  pub distance_units: LabelTable<DistanceUnit>,

  pub encumbrance: Encumbrance,

  #[ts(type = "Record<TargetType, string>")]
  pub target_types: LabelTable<TargetType>,
  #[ts(type = "Partial<Record<TargetType, TemplateShape>>")]
  pub area_target_types: Table<TargetType, TemplateShape>,

  #[ts(type = "Record<HealingType, string>")]
  pub healing_types: LabelTable<HealingType>,
  pub hit_die_types: Vec<HitDie>,

  #[ts(type = "Record<Sense, string>")]
  pub senses: LabelTable<Sense>,
  #[ts(type = "Record<Skill, string>")]
  pub skills: LabelTable<Skill>,

  #[ts(type = "Record<SpellPreparation, string>")]
  pub spell_preparation_modes: LabelTable<SpellPreparation>,
  pub spell_upcast_modes: Vec<SpellPreparation>,
  #[ts(type = "Record<SpellProgression, string>")]
  pub spell_progression: LabelTable<SpellProgression>,
  #[ts(type = "Record<SpellScaling, string>")]
  pub spell_scaling_modes: LabelTable<SpellScaling>,

  #[ts(type = "Record<WeaponType, string>")]
  pub weapon_types: LabelTable<WeaponType>,
  #[ts(type = "Record<WeaponProperty, string>")]
  pub weapon_properties: LabelTable<WeaponProperty>,

  #[ts(type = "Record<SpellComponent, string>")]
  pub spell_components: LabelTable<SpellComponent>,
  #[ts(type = "Record<SpellSchool, string>")]
  pub spell_schools: LabelTable<SpellSchool>,
  #[ts(type = "Record<SpellLevel, string>")]
  pub spell_levels: LabelTable<SpellLevel>,
  #[ts(type = "Record<SpellLevel, string>")]
  pub spell_scroll_ids: LabelTable<SpellLevel>,
  #[serde(rename = "SPELL_SLOT_TABLE")]
  pub spell_slot_table: SpellSlotTable,

  #[ts(type = "Record<PolymorphSetting, string>")]
  pub polymorph_settings: LabelTable<PolymorphSetting>,
  #[ts(type = "Record<ProficiencyLevel, string>")]
  pub proficiency_levels: LabelTable<ProficiencyLevel>,
  #[ts(type = "Record<Cover, string>")]
  pub cover: LabelTable<Cover>,

  #[ts(type = "Record<ConditionType, string>")]
  pub condition_types: LabelTable<ConditionType>,
  #[ts(type = "Record<Language, string>")]
  pub languages: LabelTable<Language>,

  #[serde(rename = "CHARACTER_EXP_LEVELS")]
  pub character_exp_levels: ExperienceTable,
  #[serde(rename = "CR_EXP_LEVELS")]
  pub cr_exp_levels: ChallengeXp,

  #[ts(type = "Record<ClassId, ClassFeatureSet>")]
  pub class_features: ClassFeatures,
  #[ts(type = "Record<CharacterFlag, CharacterFlagConfig>")]
  pub character_flags: Table<CharacterFlag, CharacterFlagConfig>,
  pub allowed_actor_flags: Vec<ActorFlag>,
}

const ASCII: &str = r"_______________________________
______      ______ _____ _____
|  _  \___  |  _  \  ___|  ___|
| | | ( _ ) | | | |___ \|___ \
| | | / _ \/\ | | |   \ \   \ \
| |/ / (_>  < |/ //\__/ /\__/ /
|___/ \___/\/___/ \____/\____/
_______________________________";

const SPELL_SCROLL_IDS: [(SpellLevel, &str); 10] = [
  (SpellLevel::Cantrip, "Compendium.dnd5e.items.rQ6sO7HDWzqMhSI3"),
  (SpellLevel::First, "Compendium.dnd5e.items.9GSfMg0VOA2b4uFN"),
  (SpellLevel::Second, "Compendium.dnd5e.items.XdDp6CKh9qEvPTuS"),
  (SpellLevel::Third, "Compendium.dnd5e.items.hqVKZie7x9w3Kqds"),
  (SpellLevel::Fourth, "Compendium.dnd5e.items.DM7hzgL836ZyUFB1"),
  (SpellLevel::Fifth, "Compendium.dnd5e.items.wa1VF8TXHmkrrR35"),
  (SpellLevel::Sixth, "Compendium.dnd5e.items.tI3rWx4bxefNCexS"),
  (SpellLevel::Seventh, "Compendium.dnd5e.items.mtyw4NS1s7j2EJaD"),
  (SpellLevel::Eighth, "Compendium.dnd5e.items.aOrinPg7yuDZEuWr"),
  (SpellLevel::Ninth, "Compendium.dnd5e.items.O4YbkJkLlnsgUszZ"),
];

impl Default for Dnd5eConfig {
  fn default() -> Dnd5eConfig {
    let character_flags = default_character_flags();
    Dnd5eConfig {
      ascii: ASCII.to_string(),
      abilities: LabelTable::labels(),
      ability_abbreviations: Ability::all().iter().map(|a| (*a, a.key().to_string())).collect(),
      alignments: LabelTable::labels(),
      attunement_types: AttunementTypes::default(),
      attunements: LabelTable::labels(),
      weapon_proficiencies: LabelTable::labels(),
      tool_proficiencies: LabelTable::labels(),
      time_periods: LabelTable::labels(),
      ability_activation_types: LabelTable::labels(),
      ability_consumption_types: LabelTable::labels(),
      actor_sizes: LabelTable::labels(),
      token_sizes: vec![
        (Size::Tiny, 0.5),
        (Size::Small, 1.0),
        (Size::Medium, 1.0),
        (Size::Large, 2.0),
        (Size::Huge, 3.0),
        (Size::Gargantuan, 4.0),
      ]
      .into_iter()
      .collect(),
      item_action_types: LabelTable::labels(),
      item_capacity_types: LabelTable::labels(),
      limited_use_periods: LabelTable::labels(),
      equipment_types: LabelTable::labels(),
      armor_proficiencies: LabelTable::labels(),
      consumable_types: LabelTable::labels(),
      currencies: LabelTable::labels(),
      currency_conversion: vec![
        (Currency::Copper, CurrencyConversion { into: Currency::Silver, each: 10 }),
        (Currency::Silver, CurrencyConversion { into: Currency::Electrum, each: 5 }),
        (Currency::Electrum, CurrencyConversion { into: Currency::Gold, each: 2 }),
        (Currency::Gold, CurrencyConversion { into: Currency::Platinum, each: 10 }),
      ]
      .into_iter()
      .collect(),
      damage_types: LabelTable::labels(),
      damage_resistance_types: LabelTable::labels(),
      movement_types: LabelTable::labels(),
      movement_units: LabelTable::labels(),
      distance_units: LabelTable::labels(),
      encumbrance: Encumbrance::default(),
      target_types: LabelTable::labels(),
      area_target_types: TargetType::all()
        .iter()
        .filter_map(|t| t.template_shape().map(|shape| (*t, shape)))
        .collect(),
      healing_types: LabelTable::labels(),
      hit_die_types: HitDie::all().to_vec(),
      senses: LabelTable::labels(),
      skills: LabelTable::labels(),
      spell_preparation_modes: LabelTable::labels(),
      spell_upcast_modes: vec![
        SpellPreparation::Always,
        SpellPreparation::Pact,
        SpellPreparation::Prepared,
      ],
      spell_progression: LabelTable::labels(),
      spell_scaling_modes: LabelTable::labels(),
      weapon_types: LabelTable::labels(),
      weapon_properties: LabelTable::labels(),
      spell_components: LabelTable::labels(),
      spell_schools: LabelTable::labels(),
      spell_levels: LabelTable::labels(),
      spell_scroll_ids: SPELL_SCROLL_IDS.iter().map(|(l, id)| (*l, id.to_string())).collect(),
      spell_slot_table: SpellSlotTable::full_caster(),
      polymorph_settings: LabelTable::labels(),
      proficiency_levels: LabelTable::labels(),
      cover: LabelTable::labels(),
      condition_types: LabelTable::labels(),
      languages: LabelTable::labels(),
      character_exp_levels: ExperienceTable::standard(),
      cr_exp_levels: ChallengeXp::standard(),
      class_features: default_class_features(),
      allowed_actor_flags: allowed_actor_flags(&character_flags),
      character_flags,
    }
  }
}

impl Dnd5eConfig {
  /// Parse a complete configuration, as the host would serialize it, and check it.
  pub fn from_json_str(json: &str) -> Result<Dnd5eConfig, ConfigError> {
    let mut config: Dnd5eConfig = serde_json::from_str(json)?;
    config.spell_slot_table.normalize();
    config.validate()?;
    Ok(config)
  }

  /// The host field names of every table, in sorted order.
  pub fn table_names(&self) -> Result<Vec<String>, ConfigError> {
    match serde_json::to_value(self)? {
      Value::Object(fields) => Ok(fields.keys().cloned().collect()),
      _ => Ok(vec![]),
    }
  }

  /// A whole field, looked up by its host name.
  pub fn table_value(&self, table: &str) -> Result<Value, ConfigError> {
    match serde_json::to_value(self)? {
      Value::Object(mut fields) => {
        fields.remove(table).ok_or_else(|| ConfigError::UnknownTable(table.to_string()))
      }
      _ => Err(ConfigError::UnknownTable(table.to_string())),
    }
  }

  /// Look up one entry of a field by host field name and key string. List fields are indexed by
  /// position.
  pub fn lookup_value(&self, table: &str, key: &str) -> Result<Value, ConfigError> {
    let missing = || ConfigError::UnknownEntry { table: table.to_string(), key: key.to_string() };
    match self.table_value(table)? {
      Value::Object(mut entries) => entries.remove(key).ok_or_else(missing),
      Value::Array(mut items) => {
        let idx: usize = key.parse().map_err(|_| missing())?;
        if idx < items.len() {
          Ok(items.swap_remove(idx))
        } else {
          Err(missing())
        }
      }
      _ => Err(ConfigError::NotATable(table.to_string())),
    }
  }

  /// How many coins of `from` make one coin of `to`, following the upward conversion chain.
  /// `None` if `to` is not reachable from `from`.
  pub fn conversion_rate(&self, from: Currency, to: Currency) -> Option<u32> {
    let mut rate = 1u32;
    let mut current = from;
    // A chain can visit each denomination at most once.
    for _ in 0..Currency::all().len() {
      if current == to {
        return Some(rate);
      }
      let step = self.currency_conversion.get(&current)?;
      rate = rate.checked_mul(step.each)?;
      current = step.into;
    }
    None
  }

  pub fn spell_slots(&self, level: u8, spell_level: u8) -> Result<u8, LookupError> {
    self.spell_slot_table.slots(level, spell_level)
  }

  pub fn xp_for_level(&self, level: u8) -> Result<Xp, LookupError> {
    self.character_exp_levels.xp_for_level(level)
  }

  pub fn level_for_xp(&self, xp: Xp) -> Result<u8, LookupError> {
    self.character_exp_levels.level_for_xp(xp)
  }

  pub fn xp_for_cr(&self, cr: f32) -> Result<Xp, LookupError> { self.cr_exp_levels.xp_for_cr(cr) }

  /// The template shape for an area target type, if it has one.
  pub fn area_template(&self, target: TargetType) -> Option<TemplateShape> {
    self.area_target_types.get(&target).copied()
  }

  /// The label for an attunement code, as stored on items.
  pub fn attunement_label(&self, code: u8) -> Result<&str, LookupError> {
    let attunement = Attunement::all()
      .iter()
      .find(|a| a.code() == code)
      .ok_or_else(|| LookupError::UnknownKey { kind: Attunement::KIND, key: code.to_string() })?;
    self.attunements.label(attunement)
  }

  pub fn character_flag(&self, flag: CharacterFlag) -> Result<&CharacterFlagConfig, LookupError> {
    self.character_flags.lookup(&flag)
  }
}
