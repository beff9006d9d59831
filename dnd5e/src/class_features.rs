use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use dnd5etypes::{ClassId, LookupError, Table};

use crate::progression::MAX_CHARACTER_LEVEL;

/// Feature identifiers granted at each class level. Identifiers are compendium references owned
/// by the host, so the defaults leave these empty and content modules fill them in.
pub type FeaturesByLevel = BTreeMap<u8, Vec<String>>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
pub struct Subclass {
  pub label: String,
  pub source: String,
  #[serde(default)]
  #[ts(type = "Record<number, Array<string>>")]
  pub features: FeaturesByLevel,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
pub struct ClassFeatureSet {
  #[serde(default)]
  #[ts(type = "Record<string, Subclass>")]
  pub subclasses: BTreeMap<String, Subclass>,
  #[serde(default)]
  #[ts(type = "Record<number, Array<string>>")]
  pub features: FeaturesByLevel,
}

impl ClassFeatureSet {
  fn with_subclass(slug: &str, label: &str, source: &str) -> ClassFeatureSet {
    let subclass =
      Subclass { label: label.to_string(), source: source.to_string(), features: BTreeMap::new() };
    ClassFeatureSet {
      subclasses: BTreeMap::from([(slug.to_string(), subclass)]),
      features: BTreeMap::new(),
    }
  }

  /// Merge `other` over this set. Levels and subclasses it names replace ours; the rest are kept.
  pub fn merge(&mut self, other: ClassFeatureSet) {
    self.features.extend(other.features);
    self.subclasses.extend(other.subclasses);
  }

  /// Every feature granted at exactly `level`, class features first, then the subclass's.
  pub fn features_at(&self, level: u8, subclass: Option<&str>) -> Result<Vec<&str>, LookupError> {
    if level == 0 || level > MAX_CHARACTER_LEVEL {
      return Err(LookupError::LevelOutOfRange {
        level: u32::from(level),
        max: u32::from(MAX_CHARACTER_LEVEL),
      });
    }
    let mut features: Vec<&str> =
      self.features.get(&level).into_iter().flatten().map(String::as_str).collect();
    if let Some(slug) = subclass {
      let subclass = self
        .subclasses
        .get(slug)
        .ok_or_else(|| LookupError::UnknownKey { kind: "subclass", key: slug.to_string() })?;
      features.extend(subclass.features.get(&level).into_iter().flatten().map(String::as_str));
    }
    Ok(features)
  }

  /// Every level named in this set, including subclass levels.
  pub fn levels(&self) -> impl Iterator<Item = u8> + '_ {
    self
      .features
      .keys()
      .chain(self.subclasses.values().flat_map(|subclass| subclass.features.keys()))
      .copied()
  }
}

pub type ClassFeatures = Table<ClassId, ClassFeatureSet>;

/// Each class with its System Reference Document subclass.
pub fn default_class_features() -> ClassFeatures {
  use ClassId::*;
  vec![
    (Barbarian, ClassFeatureSet::with_subclass("path-of-the-berserker", "Path of the Berserker", "PHB pg. 49")),
    (Bard, ClassFeatureSet::with_subclass("college-of-lore", "College of Lore", "PHB pg. 54")),
    (Cleric, ClassFeatureSet::with_subclass("life-domain", "Life Domain", "PHB pg. 60")),
    (Druid, ClassFeatureSet::with_subclass("circle-of-the-land", "Circle of the Land", "PHB pg. 68")),
    (Fighter, ClassFeatureSet::with_subclass("champion", "Champion", "PHB pg. 72")),
    (Monk, ClassFeatureSet::with_subclass("way-of-the-open-hand", "Way of the Open Hand", "PHB pg. 79")),
    (Paladin, ClassFeatureSet::with_subclass("oath-of-devotion", "Oath of Devotion", "PHB pg. 85")),
    (Ranger, ClassFeatureSet::with_subclass("hunter", "Hunter", "PHB pg. 93")),
    (Rogue, ClassFeatureSet::with_subclass("thief", "Thief", "PHB pg. 97")),
    (Sorcerer, ClassFeatureSet::with_subclass("draconic-bloodline", "Draconic Bloodline", "PHB pg. 102")),
    (Warlock, ClassFeatureSet::with_subclass("the-fiend", "The Fiend", "PHB pg. 109")),
    (Wizard, ClassFeatureSet::with_subclass("school-of-evocation", "School of Evocation", "PHB pg. 117")),
  ]
  .into_iter()
  .collect()
}

#[cfg(test)]
mod test {
  use dnd5etypes::{ClassId, LookupError};
  use maplit::btreemap;

  use super::*;

  fn t_fighter() -> ClassFeatureSet {
    let mut set = default_class_features().lookup(&ClassId::Fighter).unwrap().clone();
    set.features = btreemap! {
      1 => vec!["fighting-style".to_string(), "second-wind".to_string()],
      2 => vec!["action-surge".to_string()],
    };
    set.subclasses.get_mut("champion").unwrap().features = btreemap! {
      3 => vec!["improved-critical".to_string()],
    };
    set
  }

  #[test]
  fn defaults_cover_every_class() {
    let features = default_class_features();
    assert!(features.is_total());
    let wizard = features.lookup(&ClassId::Wizard).unwrap();
    assert_eq!(wizard.subclasses["school-of-evocation"].source, "PHB pg. 117");
  }

  #[test]
  fn features_at_level() {
    let fighter = t_fighter();
    assert_eq!(fighter.features_at(1, None).unwrap(), vec!["fighting-style", "second-wind"]);
    assert_eq!(fighter.features_at(3, Some("champion")).unwrap(), vec!["improved-critical"]);
    assert_eq!(fighter.features_at(4, Some("champion")).unwrap(), Vec::<&str>::new());
    assert_eq!(fighter.levels().collect::<Vec<_>>(), vec![1, 2, 3]);
  }

  #[test]
  fn features_at_errors() {
    let fighter = t_fighter();
    assert_eq!(
      fighter.features_at(21, None),
      Err(LookupError::LevelOutOfRange { level: 21, max: 20 })
    );
    match fighter.features_at(3, Some("battle-master")) {
      Err(LookupError::UnknownKey { key, .. }) => assert_eq!(key, "battle-master"),
      x => panic!("Unexpected result: {:?}", x),
    }
  }

  #[test]
  fn merge_keeps_unnamed_levels_and_subclasses() {
    let mut fighter = t_fighter();
    let mut added = ClassFeatureSet::default();
    added.features = btreemap! { 2 => vec!["tactical-mind".to_string()] };
    added.subclasses = btreemap! {
      "battle-master".to_string() => Subclass {
        label: "Battle Master".to_string(),
        source: "PHB pg. 73".to_string(),
        features: btreemap! { 3 => vec!["combat-superiority".to_string()] },
      },
    };
    fighter.merge(added);
    assert_eq!(fighter.features_at(1, None).unwrap(), vec!["fighting-style", "second-wind"]);
    assert_eq!(fighter.features_at(2, None).unwrap(), vec!["tactical-mind"]);
    assert_eq!(fighter.features_at(3, Some("champion")).unwrap(), vec!["improved-critical"]);
    assert_eq!(
      fighter.features_at(3, Some("battle-master")).unwrap(),
      vec!["combat-superiority"]
    );
  }

  #[test]
  fn rejects_unknown_fields() {
    let result = serde_json::from_str::<ClassFeatureSet>(r#"{"feature": {"1": ["rage"]}}"#);
    assert!(result.is_err());
  }

  #[test]
  fn deserializes_level_keys() {
    let set: ClassFeatureSet =
      serde_json::from_str(r#"{"features": {"1": ["rage"]}, "subclasses": {}}"#).unwrap();
    assert_eq!(set.features_at(1, None).unwrap(), vec!["rage"]);
  }
}
