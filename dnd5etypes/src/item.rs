//! Enumerations describing items, equipment and damage.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config_key;

config_key! {
  /// Item attunement states. The key is the numeric attunement code.
  pub enum Attunement("attunement") {
    NotRequired = "0" => "None",
    Required = "1" => "Attunement Required",
    Attuned = "2" => "Attuned",
  }
}

impl Attunement {
  pub fn code(&self) -> u8 {
    match self {
      Attunement::NotRequired => 0,
      Attunement::Required => 1,
      Attunement::Attuned => 2,
    }
  }
}

config_key! {
  pub enum WeaponProficiency("weapon proficiency") {
    Simple = "sim" => "Simple Weapons",
    Martial = "mar" => "Martial Weapons",
  }
}

config_key! {
  pub enum ToolProficiency("tool proficiency") {
    Artisan = "art" => "Artisan's Tools",
    Disguise = "disg" => "Disguise Kit",
    Forgery = "forg" => "Forgery Kit",
    Gaming = "game" => "Gaming Set",
    Herbalism = "herb" => "Herbalism Kit",
    Musical = "music" => "Musical Instrument",
    Navigator = "navg" => "Navigator's Tools",
    Poisoner = "pois" => "Poisoner's Kit",
    Thieves = "thief" => "Thieves' Tools",
    Vehicle = "vehicle" => "Vehicle (Land or Water)",
  }
}

config_key! {
  /// How an item's action resolves.
  pub enum ActionType("item action type") {
    MeleeWeaponAttack = "mwak" => "Melee Weapon Attack",
    RangedWeaponAttack = "rwak" => "Ranged Weapon Attack",
    MeleeSpellAttack = "msak" => "Melee Spell Attack",
    RangedSpellAttack = "rsak" => "Ranged Spell Attack",
    SavingThrow = "save" => "Saving Throw",
    Healing = "heal" => "Healing",
    AbilityCheck = "abil" => "Ability Check",
    Utility = "util" => "Utility",
    Other = "other" => "Other",
  }
}

impl ActionType {
  pub fn is_attack(&self) -> bool {
    matches!(
      self,
      ActionType::MeleeWeaponAttack
        | ActionType::RangedWeaponAttack
        | ActionType::MeleeSpellAttack
        | ActionType::RangedSpellAttack
    )
  }
}

config_key! {
  /// How a container's capacity is measured.
  pub enum CapacityType("item capacity type") {
    Items = "items" => "Items",
    Weight = "weight" => "Weight",
  }
}

config_key! {
  /// Armor, clothing and other objects a character can wear.
  pub enum EquipmentType("equipment type") {
    Light = "light" => "Light Armor",
    Medium = "medium" => "Medium Armor",
    Heavy = "heavy" => "Heavy Armor",
    Bonus = "bonus" => "Magical Bonus",
    Natural = "natural" => "Natural Armor",
    Shield = "shield" => "Shield",
    Clothing = "clothing" => "Clothing",
    Trinket = "trinket" => "Trinket",
    Vehicle = "vehicle" => "Vehicle Equipment",
  }
}

config_key! {
  pub enum ArmorProficiency("armor proficiency") {
    Light = "lgt" => "Light Armor",
    Medium = "med" => "Medium Armor",
    Heavy = "hvy" => "Heavy Armor",
    Shields = "shl" => "Shields",
  }
}

config_key! {
  pub enum ConsumableType("consumable type") {
    Ammo = "ammo" => "Ammunition",
    Potion = "potion" => "Potion",
    Poison = "poison" => "Poison",
    Food = "food" => "Food",
    Scroll = "scroll" => "Scroll",
    Wand = "wand" => "Wand",
    Rod = "rod" => "Rod",
    Trinket = "trinket" => "Trinket",
  }
}

config_key! {
  pub enum WeaponType("weapon type") {
    SimpleMelee = "simpleM" => "Simple Melee",
    SimpleRanged = "simpleR" => "Simple Ranged",
    MartialMelee = "martialM" => "Martial Melee",
    MartialRanged = "martialR" => "Martial Ranged",
    Natural = "natural" => "Natural",
    Improvised = "improv" => "Improvised",
    Siege = "siege" => "Siege Weapon",
  }
}

impl WeaponType {
  /// The weapon proficiency covering this weapon type, if any.
  pub fn proficiency(&self) -> Option<WeaponProficiency> {
    match self {
      WeaponType::SimpleMelee | WeaponType::SimpleRanged => Some(WeaponProficiency::Simple),
      WeaponType::MartialMelee | WeaponType::MartialRanged => Some(WeaponProficiency::Martial),
      WeaponType::Natural | WeaponType::Improvised | WeaponType::Siege => None,
    }
  }
}

config_key! {
  pub enum WeaponProperty("weapon property") {
    Adamantine = "ada" => "Adamantine",
    Ammunition = "amm" => "Ammunition",
    Finesse = "fin" => "Finesse",
    Firearm = "fir" => "Firearm",
    Focus = "foc" => "Focus",
    Heavy = "hvy" => "Heavy",
    Light = "lgt" => "Light",
    Loading = "lod" => "Loading",
    Magical = "mgc" => "Magical",
    Reach = "rch" => "Reach",
    Reload = "rel" => "Reload",
    Returning = "ret" => "Returning",
    Silvered = "sil" => "Silvered",
    Special = "spc" => "Special",
    Thrown = "thr" => "Thrown",
    TwoHanded = "two" => "Two-Handed",
    Versatile = "ver" => "Versatile",
  }
}

config_key! {
  /// Currency denominations, highest first.
  pub enum Currency("currency") {
    Platinum = "pp" => "Platinum",
    Gold = "gp" => "Gold",
    Electrum = "ep" => "Electrum",
    Silver = "sp" => "Silver",
    Copper = "cp" => "Copper",
  }
}

/// An upward conversion rule: `each` coins of one denomination make one coin of `into`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
pub struct CurrencyConversion {
  pub into: Currency,
  pub each: u32,
}

config_key! {
  pub enum DamageType("damage type") {
    Acid = "acid" => "Acid",
    Bludgeoning = "bludgeoning" => "Bludgeoning",
    Cold = "cold" => "Cold",
    Fire = "fire" => "Fire",
    Force = "force" => "Force",
    Lightning = "lightning" => "Lightning",
    Necrotic = "necrotic" => "Necrotic",
    Piercing = "piercing" => "Piercing",
    Poison = "poison" => "Poison",
    Psychic = "psychic" => "Psychic",
    Radiant = "radiant" => "Radiant",
    Slashing = "slashing" => "Slashing",
    Thunder = "thunder" => "Thunder",
  }
}

config_key! {
  /// Damage types that resistances, immunities and vulnerabilities can name: every damage type
  /// plus nonmagical physical damage.
  pub enum DamageResistanceType("damage resistance type") {
    Acid = "acid" => "Acid",
    Bludgeoning = "bludgeoning" => "Bludgeoning",
    Cold = "cold" => "Cold",
    Fire = "fire" => "Fire",
    Force = "force" => "Force",
    Lightning = "lightning" => "Lightning",
    Necrotic = "necrotic" => "Necrotic",
    Piercing = "piercing" => "Piercing",
    Poison = "poison" => "Poison",
    Psychic = "psychic" => "Psychic",
    Radiant = "radiant" => "Radiant",
    Slashing = "slashing" => "Slashing",
    Thunder = "thunder" => "Thunder",
    Physical = "physical" => "Bludgeoning, Piercing, and Slashing from Nonmagical Attacks",
  }
}

impl From<DamageType> for DamageResistanceType {
  fn from(damage: DamageType) -> DamageResistanceType {
    match damage {
      DamageType::Acid => DamageResistanceType::Acid,
      DamageType::Bludgeoning => DamageResistanceType::Bludgeoning,
      DamageType::Cold => DamageResistanceType::Cold,
      DamageType::Fire => DamageResistanceType::Fire,
      DamageType::Force => DamageResistanceType::Force,
      DamageType::Lightning => DamageResistanceType::Lightning,
      DamageType::Necrotic => DamageResistanceType::Necrotic,
      DamageType::Piercing => DamageResistanceType::Piercing,
      DamageType::Poison => DamageResistanceType::Poison,
      DamageType::Psychic => DamageResistanceType::Psychic,
      DamageType::Radiant => DamageResistanceType::Radiant,
      DamageType::Slashing => DamageResistanceType::Slashing,
      DamageType::Thunder => DamageResistanceType::Thunder,
    }
  }
}

config_key! {
  pub enum HealingType("healing type") {
    Healing = "healing" => "Healing",
    TempHp = "temphp" => "Healing (Temporary)",
  }
}
