use std::{
  collections::{btree_map, BTreeMap},
  fmt,
  iter::FromIterator,
};

use serde::{de, ser};

use crate::{ConfigKey, LookupError};

/// A lookup table over a closed key enumeration.
///
/// Entries are kept in key declaration order, and the table serializes as a plain map from key
/// strings to values, which is the shape the host reads.
#[derive(Clone, PartialEq, Eq)]
pub struct Table<K: ConfigKey, V> {
  entries: BTreeMap<K, V>,
}

/// The common case: a display label for every key.
pub type LabelTable<K> = Table<K, String>;

impl<K: ConfigKey, V> Table<K, V> {
  pub fn new() -> Table<K, V> { Table { entries: BTreeMap::new() } }

  pub fn get(&self, key: &K) -> Option<&V> { self.entries.get(key) }

  /// Look up a key, failing if this table has no entry for it.
  pub fn lookup(&self, key: &K) -> Result<&V, LookupError> {
    self.entries.get(key).ok_or(LookupError::MissingEntry { kind: K::KIND, key: key.key() })
  }

  /// Look up a raw key string. Strings outside the enumeration are `UnknownKey`.
  pub fn lookup_str(&self, key: &str) -> Result<&V, LookupError> { self.lookup(&K::from_key(key)?) }

  pub fn get_mut(&mut self, key: &K) -> Option<&mut V> { self.entries.get_mut(key) }

  pub fn insert(&mut self, key: K, value: V) -> Option<V> { self.entries.insert(key, value) }

  pub fn contains_key(&self, key: &K) -> bool { self.entries.contains_key(key) }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn keys(&self) -> impl Iterator<Item = &K> { self.entries.keys() }

  pub fn values(&self) -> impl Iterator<Item = &V> { self.entries.values() }

  pub fn iter(&self) -> btree_map::Iter<'_, K, V> { self.entries.iter() }

  /// Keys of the enumeration with no entry in this table.
  pub fn missing_keys(&self) -> Vec<K> {
    K::all().iter().filter(|k| !self.entries.contains_key(k)).copied().collect()
  }

  /// Whether every key of the enumeration has an entry.
  pub fn is_total(&self) -> bool { self.entries.len() == K::all().len() }

  /// Merge another table over this one, replacing entries that exist in both.
  pub fn extend(&mut self, other: Table<K, V>) { self.entries.extend(other.entries) }
}

impl<K: ConfigKey> Table<K, String> {
  /// A table holding the default label of every key.
  pub fn labels() -> LabelTable<K> { K::all().iter().map(|k| (*k, k.label().to_string())).collect() }

  /// Like `lookup`, but as a `&str`.
  pub fn label(&self, key: &K) -> Result<&str, LookupError> { self.lookup(key).map(String::as_str) }
}

impl<K: ConfigKey, V> Default for Table<K, V> {
  fn default() -> Table<K, V> { Table::new() }
}

impl<K: ConfigKey, V: fmt::Debug> fmt::Debug for Table<K, V> {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> { self.entries.fmt(f) }
}

impl<K: ConfigKey, V> FromIterator<(K, V)> for Table<K, V> {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Table { entries: BTreeMap::from_iter(iter) }
  }
}

impl<'a, K: ConfigKey, V> IntoIterator for &'a Table<K, V> {
  type Item = (&'a K, &'a V);
  type IntoIter = btree_map::Iter<'a, K, V>;
  fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

impl<K: ConfigKey, V> IntoIterator for Table<K, V> {
  type Item = (K, V);
  type IntoIter = btree_map::IntoIter<K, V>;
  fn into_iter(self) -> Self::IntoIter { self.entries.into_iter() }
}

impl<K, V> ser::Serialize for Table<K, V>
where
  K: ConfigKey + ser::Serialize,
  V: ser::Serialize,
{
  fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
  where
    S: ser::Serializer,
  {
    self.entries.serialize(s)
  }
}

impl<'de, K, V> de::Deserialize<'de> for Table<K, V>
where
  K: ConfigKey + de::Deserialize<'de>,
  V: de::Deserialize<'de>,
{
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: de::Deserializer<'de>,
  {
    let entries: BTreeMap<K, V> = de::Deserialize::deserialize(deserializer)?;
    Ok(Table { entries })
  }
}

#[cfg(test)]
mod test {
  use crate::{ConfigKey, Currency, LabelTable, LookupError, Size, Table};

  #[test]
  fn labels_are_total() {
    let table = LabelTable::<Currency>::labels();
    assert!(table.is_total());
    assert_eq!(table.missing_keys(), vec![]);
    assert_eq!(table.label(&Currency::Gold).unwrap(), "Gold");
  }

  #[test]
  fn lookup_str_unknown_key() {
    let table = LabelTable::<Currency>::labels();
    match table.lookup_str("zz") {
      Err(LookupError::UnknownKey { kind, key }) => {
        assert_eq!(kind, Currency::KIND);
        assert_eq!(key, "zz");
      }
      x => panic!("Unexpected result: {:?}", x),
    }
  }

  #[test]
  fn lookup_missing_entry() {
    let table: Table<Size, f32> = vec![(Size::Medium, 1.0)].into_iter().collect();
    assert_eq!(table.lookup_str("med").unwrap(), &1.0);
    assert_eq!(
      table.lookup(&Size::Huge),
      Err(LookupError::MissingEntry { kind: Size::KIND, key: "huge" })
    );
    assert!(!table.is_total());
    assert_eq!(table.missing_keys().len(), Size::all().len() - 1);
  }

  #[test]
  fn extend_replaces_entries() {
    let mut table = LabelTable::<Currency>::labels();
    let overlay: LabelTable<Currency> =
      vec![(Currency::Gold, "Crowns".to_string())].into_iter().collect();
    table.extend(overlay);
    assert_eq!(table.label(&Currency::Gold).unwrap(), "Crowns");
    assert_eq!(table.label(&Currency::Silver).unwrap(), "Silver");
    assert!(table.is_total());
  }

  #[test]
  fn edits_and_drains_entries() {
    let mut table: Table<Size, f32> = vec![(Size::Small, 1.0), (Size::Tiny, 0.5)].into_iter().collect();
    if let Some(scale) = table.get_mut(&Size::Small) {
      *scale = 0.8;
    }
    assert!(table.get_mut(&Size::Huge).is_none());
    assert_eq!(table.iter().next(), Some((&Size::Tiny, &0.5)));
    let entries: Vec<(Size, f32)> = table.into_iter().collect();
    assert_eq!(entries, vec![(Size::Tiny, 0.5), (Size::Small, 0.8)]);
  }

  #[test]
  fn serializes_as_key_map_in_declaration_order() {
    let table = LabelTable::<Currency>::labels();
    assert_eq!(
      serde_json::to_string(&table).unwrap(),
      r#"{"pp":"Platinum","gp":"Gold","ep":"Electrum","sp":"Silver","cp":"Copper"}"#
    );
  }

  #[test]
  fn deserializes_partial_maps() {
    let table: LabelTable<Currency> = serde_yaml::from_str("gp: Crowns\ncp: Pennies\n").unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.missing_keys(), vec![Currency::Platinum, Currency::Electrum, Currency::Silver]);
  }

  #[test]
  fn rejects_keys_outside_the_enumeration() {
    let result = serde_json::from_str::<LabelTable<Currency>>(r#"{"zz":"Zorkmids"}"#);
    assert!(result.is_err());
  }
}
