//! How features, items and spells are activated, how long they last and what they target.

use crate::config_key;

config_key! {
  /// Lengths of time which can occur.
  pub enum TimePeriod("time period") {
    Instantaneous = "inst" => "Instantaneous",
    Turn = "turn" => "Turns",
    Round = "round" => "Rounds",
    Minute = "minute" => "Minutes",
    Hour = "hour" => "Hours",
    Day = "day" => "Days",
    Month = "month" => "Months",
    Year = "year" => "Years",
    Permanent = "perm" => "Permanent",
    Special = "spec" => "Special",
  }
}

config_key! {
  /// Ways an ability can be activated.
  pub enum ActivationType("activation type") {
    None = "none" => "None",
    Action = "action" => "Action",
    Bonus = "bonus" => "Bonus Action",
    Reaction = "reaction" => "Reaction",
    Minute = "minute" => "Minutes",
    Hour = "hour" => "Hours",
    Day = "day" => "Days",
    Special = "special" => "Special",
    Legendary = "legendary" => "Legendary Action",
    Lair = "lair" => "Lair Action",
    Crew = "crew" => "Crew Action",
  }
}

config_key! {
  /// What an ability consumes when used.
  pub enum ConsumeType("consumption type") {
    Ammo = "ammo" => "Ammunition",
    Attribute = "attribute" => "Attribute",
    Material = "material" => "Material",
    Charges = "charges" => "Charges",
  }
}

config_key! {
  /// Periods over which limited uses recover.
  pub enum UsePeriod("limited use period") {
    ShortRest = "sr" => "Short Rest",
    LongRest = "lr" => "Long Rest",
    Day = "day" => "Day",
    Charges = "charges" => "Charges",
  }
}

config_key! {
  /// Single or area targets an ability can have.
  pub enum TargetType("target type") {
    None = "none" => "None",
    Self_ = "self" => "Self",
    Creature = "creature" => "Creature",
    Ally = "ally" => "Ally",
    Enemy = "enemy" => "Enemy",
    Object = "object" => "Object",
    Space = "space" => "Space",
    Radius = "radius" => "Radius",
    Sphere = "sphere" => "Sphere",
    Cylinder = "cylinder" => "Cylinder",
    Cone = "cone" => "Cone",
    Square = "square" => "Square",
    Cube = "cube" => "Cube",
    Line = "line" => "Line",
    Wall = "wall" => "Wall",
  }
}

impl TargetType {
  /// Whether this target type produces an area of effect template.
  pub fn is_area(&self) -> bool { self.template_shape().is_some() }

  /// The template shape drawn for an area target.
  pub fn template_shape(&self) -> Option<TemplateShape> {
    match self {
      TargetType::Cone => Some(TemplateShape::Cone),
      TargetType::Cube | TargetType::Square => Some(TemplateShape::Rect),
      TargetType::Cylinder | TargetType::Radius | TargetType::Sphere => Some(TemplateShape::Circle),
      TargetType::Line | TargetType::Wall => Some(TemplateShape::Ray),
      _ => None,
    }
  }
}

config_key! {
  /// Measured template shapes the host can draw.
  pub enum TemplateShape("template shape") {
    Circle = "circle" => "Circle",
    Cone = "cone" => "Cone",
    Rect = "rect" => "Rectangle",
    Ray = "ray" => "Ray",
  }
}
