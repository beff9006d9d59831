// 5e rules configuration: the canonical tables, progression lookups, overlays and validation.
pub mod bindings;
pub mod class_features;
pub mod config;
pub mod flags;
pub mod overlay;
pub mod progression;
pub mod validate;

pub use config::{AttunementTypes, ConfigError, Dnd5eConfig, Encumbrance, DND5E};
pub use overlay::ConfigOverlay;
pub use validate::SchemaViolation;
