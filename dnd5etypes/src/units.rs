//! Units of measure for movement and range.

use uom::si::{
  f64::Length,
  length::{foot, mile},
};

use crate::config_key;

config_key! {
  /// Units for movement distances. Imperial by default.
  pub enum MovementUnit("movement unit") {
    Feet = "ft" => "Feet",
    Miles = "mi" => "Miles",
  }
}

impl MovementUnit {
  pub fn to_length(&self, amount: f64) -> Length {
    match self {
      MovementUnit::Feet => Length::new::<foot>(amount),
      MovementUnit::Miles => Length::new::<mile>(amount),
    }
  }

  pub fn measure(&self, length: Length) -> f64 {
    match self {
      MovementUnit::Feet => length.get::<foot>(),
      MovementUnit::Miles => length.get::<mile>(),
    }
  }

  /// Convert an amount in this unit into another movement unit.
  pub fn convert(&self, amount: f64, to: MovementUnit) -> f64 { to.measure(self.to_length(amount)) }
}

config_key! {
  /// Units for the range of an action or effect: the special ranges plus every movement unit.
  pub enum DistanceUnit("distance unit") {
    None = "none" => "None",
    Self_ = "self" => "Self",
    Touch = "touch" => "Touch",
    Special = "spec" => "Special",
    Any = "any" => "Any",
    Feet = "ft" => "Feet",
    Miles = "mi" => "Miles",
  }
}

impl DistanceUnit {
  /// The movement unit this distance unit measures in, if it is a measurable distance.
  pub fn movement_unit(&self) -> Option<MovementUnit> {
    match self {
      DistanceUnit::Feet => Some(MovementUnit::Feet),
      DistanceUnit::Miles => Some(MovementUnit::Miles),
      _ => None,
    }
  }
}

impl From<MovementUnit> for DistanceUnit {
  fn from(unit: MovementUnit) -> DistanceUnit {
    match unit {
      MovementUnit::Feet => DistanceUnit::Feet,
      MovementUnit::Miles => DistanceUnit::Miles,
    }
  }
}

#[cfg(test)]
mod test {
  use strum::IntoEnumIterator;
  use uom::si::length::meter;

  use crate::{ConfigKey, DistanceUnit, MovementUnit};

  #[test]
  fn distance_units_include_movement_units() {
    for unit in MovementUnit::iter() {
      let distance = DistanceUnit::from(unit);
      assert_eq!(distance.key(), unit.key());
      assert_eq!(distance.label(), unit.label());
      assert_eq!(distance.movement_unit(), Some(unit));
    }
    assert_eq!(DistanceUnit::Touch.movement_unit(), None);
  }

  #[test]
  fn feet_to_miles() {
    let miles = MovementUnit::Feet.convert(5280.0, MovementUnit::Miles);
    assert!((miles - 1.0).abs() < 1e-9);
    let meters = MovementUnit::Feet.to_length(30.0).get::<meter>();
    assert!((meters - 9.144).abs() < 1e-9);
  }
}
