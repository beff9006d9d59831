//! Enumerations describing creatures and characters.

use crate::config_key;

config_key! {
  /// The six ability scores.
  pub enum Ability("ability") {
    Strength = "str" => "Strength",
    Dexterity = "dex" => "Dexterity",
    Constitution = "con" => "Constitution",
    Intelligence = "int" => "Intelligence",
    Wisdom = "wis" => "Wisdom",
    Charisma = "cha" => "Charisma",
  }
}

config_key! {
  pub enum Alignment("alignment") {
    LawfulGood = "lg" => "Lawful Good",
    NeutralGood = "ng" => "Neutral Good",
    ChaoticGood = "cg" => "Chaotic Good",
    LawfulNeutral = "ln" => "Lawful Neutral",
    TrueNeutral = "tn" => "True Neutral",
    ChaoticNeutral = "cn" => "Chaotic Neutral",
    LawfulEvil = "le" => "Lawful Evil",
    NeutralEvil = "ne" => "Neutral Evil",
    ChaoticEvil = "ce" => "Chaotic Evil",
  }
}

config_key! {
  /// Creature sizes.
  pub enum Size("creature size") {
    Tiny = "tiny" => "Tiny",
    Small = "sm" => "Small",
    Medium = "med" => "Medium",
    Large = "lg" => "Large",
    Huge = "huge" => "Huge",
    Gargantuan = "grg" => "Gargantuan",
  }
}

config_key! {
  pub enum Skill("skill") {
    Acrobatics = "acr" => "Acrobatics",
    AnimalHandling = "ani" => "Animal Handling",
    Arcana = "arc" => "Arcana",
    Athletics = "ath" => "Athletics",
    Deception = "dec" => "Deception",
    History = "his" => "History",
    Insight = "ins" => "Insight",
    Intimidation = "itm" => "Intimidation",
    Investigation = "inv" => "Investigation",
    Medicine = "med" => "Medicine",
    Nature = "nat" => "Nature",
    Perception = "prc" => "Perception",
    Performance = "prf" => "Performance",
    Persuasion = "per" => "Persuasion",
    Religion = "rel" => "Religion",
    SleightOfHand = "slt" => "Sleight of Hand",
    Stealth = "ste" => "Stealth",
    Survival = "sur" => "Survival",
  }
}

impl Skill {
  /// The ability a skill checks by default.
  pub fn default_ability(&self) -> Ability {
    match self {
      Skill::Athletics => Ability::Strength,
      Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
      Skill::Arcana
      | Skill::History
      | Skill::Investigation
      | Skill::Nature
      | Skill::Religion => Ability::Intelligence,
      Skill::AnimalHandling
      | Skill::Insight
      | Skill::Medicine
      | Skill::Perception
      | Skill::Survival => Ability::Wisdom,
      Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
        Ability::Charisma
      }
    }
  }
}

config_key! {
  /// Sensory perception types an actor may have.
  pub enum Sense("sense") {
    Blindsight = "blindsight" => "Blindsight",
    Darkvision = "darkvision" => "Darkvision",
    Tremorsense = "tremorsense" => "Tremorsense",
    Truesight = "truesight" => "Truesight",
  }
}

config_key! {
  pub enum MovementType("movement type") {
    Burrow = "burrow" => "Burrow",
    Climb = "climb" => "Climb",
    Fly = "fly" => "Fly",
    Swim = "swim" => "Swim",
    Walk = "walk" => "Walk",
  }
}

config_key! {
  pub enum ConditionType("condition") {
    Blinded = "blinded" => "Blinded",
    Charmed = "charmed" => "Charmed",
    Deafened = "deafened" => "Deafened",
    Diseased = "diseased" => "Diseased",
    Exhaustion = "exhaustion" => "Exhaustion",
    Frightened = "frightened" => "Frightened",
    Grappled = "grappled" => "Grappled",
    Incapacitated = "incapacitated" => "Incapacitated",
    Invisible = "invisible" => "Invisible",
    Paralyzed = "paralyzed" => "Paralyzed",
    Petrified = "petrified" => "Petrified",
    Poisoned = "poisoned" => "Poisoned",
    Prone = "prone" => "Prone",
    Restrained = "restrained" => "Restrained",
    Stunned = "stunned" => "Stunned",
    Unconscious = "unconscious" => "Unconscious",
  }
}

config_key! {
  pub enum Language("language") {
    Common = "common" => "Common",
    Aarakocra = "aarakocra" => "Aarakocra",
    Abyssal = "abyssal" => "Abyssal",
    Aquan = "aquan" => "Aquan",
    Auran = "auran" => "Auran",
    Celestial = "celestial" => "Celestial",
    DeepSpeech = "deep" => "Deep Speech",
    Draconic = "draconic" => "Draconic",
    Druidic = "druidic" => "Druidic",
    Dwarvish = "dwarvish" => "Dwarvish",
    Elvish = "elvish" => "Elvish",
    Giant = "giant" => "Giant",
    Gith = "gith" => "Gith",
    Gnomish = "gnomish" => "Gnomish",
    Goblin = "goblin" => "Goblin",
    Gnoll = "gnoll" => "Gnoll",
    Halfling = "halfling" => "Halfling",
    Ignan = "ignan" => "Ignan",
    Infernal = "infernal" => "Infernal",
    Orc = "orc" => "Orc",
    Primordial = "primordial" => "Primordial",
    Sylvan = "sylvan" => "Sylvan",
    Terran = "terran" => "Terran",
    ThievesCant = "cant" => "Thieves' Cant",
    Undercommon = "undercommon" => "Undercommon",
  }
}

config_key! {
  /// Skill, ability and tool proficiency levels. The key is the proficiency multiplier.
  pub enum ProficiencyLevel("proficiency level") {
    NotProficient = "0" => "Not Proficient",
    Proficient = "1" => "Proficient",
    HalfProficient = "0.5" => "Half Proficient",
    Expertise = "2" => "Expertise",
  }
}

impl ProficiencyLevel {
  pub fn multiplier(&self) -> f32 {
    match self {
      ProficiencyLevel::NotProficient => 0.0,
      ProficiencyLevel::HalfProficient => 0.5,
      ProficiencyLevel::Proficient => 1.0,
      ProficiencyLevel::Expertise => 2.0,
    }
  }
}

config_key! {
  /// The amount of cover an object provides. When several apply, the highest wins.
  pub enum Cover("cover") {
    NoCover = "0" => "No Cover",
    Half = "0.5" => "Half Cover",
    ThreeQuarters = "0.75" => "Three-Quarters Cover",
    Total = "1" => "Total Cover",
  }
}

impl Cover {
  pub fn fraction(&self) -> f32 {
    match self {
      Cover::NoCover => 0.0,
      Cover::Half => 0.5,
      Cover::ThreeQuarters => 0.75,
      Cover::Total => 1.0,
    }
  }
}

config_key! {
  pub enum PolymorphSetting("polymorph setting") {
    KeepPhysical = "keepPhysical" => "Keep Physical Ability Scores",
    KeepMental = "keepMental" => "Keep Mental Ability Scores",
    KeepSaves = "keepSaves" => "Keep Saving Throw Proficiencies",
    KeepSkills = "keepSkills" => "Keep Skill Proficiencies",
    MergeSaves = "mergeSaves" => "Merge Saving Throw Proficiencies",
    MergeSkills = "mergeSkills" => "Merge Skill Proficiencies",
    KeepClass = "keepClass" => "Keep Proficiency Bonus",
    KeepFeats = "keepFeats" => "Keep Features",
    KeepSpells = "keepSpells" => "Keep Spells",
    KeepItems = "keepItems" => "Keep Equipment",
    KeepBio = "keepBio" => "Keep Biography",
    KeepVision = "keepVision" => "Keep Vision",
  }
}

config_key! {
  /// Hit dice denominations a class can use.
  pub enum HitDie("hit die") {
    D6 = "d6" => "d6",
    D8 = "d8" => "d8",
    D10 = "d10" => "d10",
    D12 = "d12" => "d12",
  }
}

impl HitDie {
  pub fn faces(&self) -> u8 {
    match self {
      HitDie::D6 => 6,
      HitDie::D8 => 8,
      HitDie::D10 => 10,
      HitDie::D12 => 12,
    }
  }
}

config_key! {
  pub enum ClassId("class") {
    Barbarian = "barbarian" => "Barbarian",
    Bard = "bard" => "Bard",
    Cleric = "cleric" => "Cleric",
    Druid = "druid" => "Druid",
    Fighter = "fighter" => "Fighter",
    Monk = "monk" => "Monk",
    Paladin = "paladin" => "Paladin",
    Ranger = "ranger" => "Ranger",
    Rogue = "rogue" => "Rogue",
    Sorcerer = "sorcerer" => "Sorcerer",
    Warlock = "warlock" => "Warlock",
    Wizard = "wizard" => "Wizard",
  }
}

config_key! {
  /// Optional character flags which modify how rolls and checks are computed.
  pub enum CharacterFlag("character flag") {
    DiamondSoul = "diamondSoul" => "Diamond Soul",
    ElvenAccuracy = "elvenAccuracy" => "Elven Accuracy",
    HalflingLucky = "halflingLucky" => "Halfling Lucky",
    InitiativeAdv = "initiativeAdv" => "Advantage on Initiative",
    InitiativeAlert = "initiativeAlert" => "Alert Feat",
    JackOfAllTrades = "jackOfAllTrades" => "Jack of all Trades",
    ObservantFeat = "observantFeat" => "Observant Feat",
    PowerfulBuild = "powerfulBuild" => "Powerful Build",
    ReliableTalent = "reliableTalent" => "Reliable Talent",
    RemarkableAthlete = "remarkableAthlete" => "Remarkable Athlete",
    WeaponCriticalThreshold = "weaponCriticalThreshold" => "Weapon Critical Hit Threshold",
    SpellCriticalThreshold = "spellCriticalThreshold" => "Spell Critical Hit Threshold",
    MeleeCriticalDamageDice = "meleeCriticalDamageDice" => "Melee Critical Damage Dice",
  }
}

config_key! {
  /// The sheet section a character flag is listed under.
  pub enum FlagSection("flag section") {
    Feats = "Feats" => "Feats",
    RacialTraits = "RacialTraits" => "Racial Traits",
  }
}

config_key! {
  /// Every flag an actor is allowed to carry: the character flags plus polymorph bookkeeping.
  pub enum ActorFlag("actor flag") {
    IsPolymorphed = "isPolymorphed" => "Is Polymorphed",
    OriginalActor = "originalActor" => "Original Actor",
    DiamondSoul = "diamondSoul" => "Diamond Soul",
    ElvenAccuracy = "elvenAccuracy" => "Elven Accuracy",
    HalflingLucky = "halflingLucky" => "Halfling Lucky",
    InitiativeAdv = "initiativeAdv" => "Advantage on Initiative",
    InitiativeAlert = "initiativeAlert" => "Alert Feat",
    JackOfAllTrades = "jackOfAllTrades" => "Jack of all Trades",
    ObservantFeat = "observantFeat" => "Observant Feat",
    PowerfulBuild = "powerfulBuild" => "Powerful Build",
    ReliableTalent = "reliableTalent" => "Reliable Talent",
    RemarkableAthlete = "remarkableAthlete" => "Remarkable Athlete",
    WeaponCriticalThreshold = "weaponCriticalThreshold" => "Weapon Critical Hit Threshold",
    SpellCriticalThreshold = "spellCriticalThreshold" => "Spell Critical Hit Threshold",
    MeleeCriticalDamageDice = "meleeCriticalDamageDice" => "Melee Critical Damage Dice",
  }
}

impl From<CharacterFlag> for ActorFlag {
  fn from(flag: CharacterFlag) -> ActorFlag {
    match flag {
      CharacterFlag::DiamondSoul => ActorFlag::DiamondSoul,
      CharacterFlag::ElvenAccuracy => ActorFlag::ElvenAccuracy,
      CharacterFlag::HalflingLucky => ActorFlag::HalflingLucky,
      CharacterFlag::InitiativeAdv => ActorFlag::InitiativeAdv,
      CharacterFlag::InitiativeAlert => ActorFlag::InitiativeAlert,
      CharacterFlag::JackOfAllTrades => ActorFlag::JackOfAllTrades,
      CharacterFlag::ObservantFeat => ActorFlag::ObservantFeat,
      CharacterFlag::PowerfulBuild => ActorFlag::PowerfulBuild,
      CharacterFlag::ReliableTalent => ActorFlag::ReliableTalent,
      CharacterFlag::RemarkableAthlete => ActorFlag::RemarkableAthlete,
      CharacterFlag::WeaponCriticalThreshold => ActorFlag::WeaponCriticalThreshold,
      CharacterFlag::SpellCriticalThreshold => ActorFlag::SpellCriticalThreshold,
      CharacterFlag::MeleeCriticalDamageDice => ActorFlag::MeleeCriticalDamageDice,
    }
  }
}
