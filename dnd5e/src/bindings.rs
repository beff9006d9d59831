use std::io::{self, Write};

use ts_rs::TS;

use dnd5etypes as T;

use crate::{
  class_features::{ClassFeatureSet, Subclass},
  config::{AttunementTypes, Dnd5eConfig, Encumbrance},
  flags::{CharacterFlagConfig, FlagType},
  progression::{ChallengeXp, ExperienceTable, SpellSlotTable},
};

/// TypeScript declarations for every type the host reads out of the configuration.
pub fn typescript_decls() -> Vec<String> {
  vec![
    <T::Ability as TS>::decl(),
    <T::Alignment as TS>::decl(),
    <T::Size as TS>::decl(),
    <T::Skill as TS>::decl(),
    <T::Sense as TS>::decl(),
    <T::MovementType as TS>::decl(),
    <T::ConditionType as TS>::decl(),
    <T::Language as TS>::decl(),
    <T::ProficiencyLevel as TS>::decl(),
    <T::Cover as TS>::decl(),
    <T::PolymorphSetting as TS>::decl(),
    <T::HitDie as TS>::decl(),
    <T::ClassId as TS>::decl(),
    <T::CharacterFlag as TS>::decl(),
    <T::FlagSection as TS>::decl(),
    <T::ActorFlag as TS>::decl(),
    <T::Attunement as TS>::decl(),
    <T::WeaponProficiency as TS>::decl(),
    <T::ToolProficiency as TS>::decl(),
    <T::ActionType as TS>::decl(),
    <T::CapacityType as TS>::decl(),
    <T::EquipmentType as TS>::decl(),
    <T::ArmorProficiency as TS>::decl(),
    <T::ConsumableType as TS>::decl(),
    <T::WeaponType as TS>::decl(),
    <T::WeaponProperty as TS>::decl(),
    <T::Currency as TS>::decl(),
    <T::CurrencyConversion as TS>::decl(),
    <T::DamageType as TS>::decl(),
    <T::DamageResistanceType as TS>::decl(),
    <T::HealingType as TS>::decl(),
    <T::TimePeriod as TS>::decl(),
    <T::ActivationType as TS>::decl(),
    <T::ConsumeType as TS>::decl(),
    <T::UsePeriod as TS>::decl(),
    <T::TargetType as TS>::decl(),
    <T::TemplateShape as TS>::decl(),
    <T::SpellComponent as TS>::decl(),
    <T::SpellSchool as TS>::decl(),
    <T::SpellLevel as TS>::decl(),
    <T::SpellPreparation as TS>::decl(),
    <T::SpellProgression as TS>::decl(),
    <T::SpellScaling as TS>::decl(),
    <T::MovementUnit as TS>::decl(),
    <T::DistanceUnit as TS>::decl(),
    <T::Xp as TS>::decl(),
    <AttunementTypes as TS>::decl(),
    <Encumbrance as TS>::decl(),
    <SpellSlotTable as TS>::decl(),
    <ExperienceTable as TS>::decl(),
    <ChallengeXp as TS>::decl(),
    <FlagType as TS>::decl(),
    <CharacterFlagConfig as TS>::decl(),
    <Subclass as TS>::decl(),
    <ClassFeatureSet as TS>::decl(),
    <Dnd5eConfig as TS>::decl(),
  ]
}

/// Write every declaration as an exported TypeScript type.
pub fn write_bindings<W: Write>(out: &mut W) -> io::Result<()> {
  for decl in typescript_decls().iter() {
    out.write_all(b"export ")?;
    out.write_all(decl.as_bytes())?;
    out.write_all(b"\n\n")?;
  }
  Ok(())
}
