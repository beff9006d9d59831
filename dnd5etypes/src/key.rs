use std::{fmt::Debug, hash::Hash, str::FromStr};

use crate::LookupError;

/// A closed enumeration of string keys for one rules category (damage types, skills, ...).
///
/// Implementations are generated by `config_key!`, which keeps the key string, the serde
/// representation, the `FromStr`/`Display` impls and the default label in one place.
pub trait ConfigKey: Copy + Eq + Ord + Hash + Debug + FromStr + 'static {
  /// A human name for the enumeration, used in error messages.
  const KIND: &'static str;

  /// Every key, in declaration order.
  fn all() -> &'static [Self];

  /// The key string the host uses for this value.
  fn key(&self) -> &'static str;

  /// The default English label.
  fn label(&self) -> &'static str;

  fn from_key(key: &str) -> Result<Self, LookupError> {
    key
      .parse::<Self>()
      .map_err(|_| LookupError::UnknownKey { kind: Self::KIND, key: key.to_string() })
  }
}

/// Declare a `ConfigKey` enumeration.
///
/// ```ignore
/// config_key! {
///   /// Doc comment for the enum
///   pub enum Currency("currency") {
///     Platinum = "pp" => "Platinum",
///     Gold = "gp" => "Gold",
///   }
/// }
/// ```
#[macro_export]
macro_rules! config_key {
  (
    $(#[$meta:meta])*
    $vis:vis enum $name:ident($kind:literal) {
      $($(#[$vmeta:meta])* $variant:ident = $key:literal => $label:literal),+ $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(
      Clone,
      Copy,
      Debug,
      Eq,
      PartialEq,
      Ord,
      PartialOrd,
      Hash,
      ::serde::Serialize,
      ::serde::Deserialize,
      ::ts_rs::TS,
      ::strum::EnumString,
      ::strum::Display,
      ::strum::EnumIter,
      ::strum::EnumCount,
    )]
    $vis enum $name {
      $(
        $(#[$vmeta])*
        #[serde(rename = $key)]
        #[strum(serialize = $key)]
        $variant,
      )+
    }

    impl $crate::key::ConfigKey for $name {
      const KIND: &'static str = $kind;

      fn all() -> &'static [$name] { &[$($name::$variant),+] }

      fn key(&self) -> &'static str {
        match self {
          $($name::$variant => $key,)+
        }
      }

      fn label(&self) -> &'static str {
        match self {
          $($name::$variant => $label,)+
        }
      }
    }
  };
}
