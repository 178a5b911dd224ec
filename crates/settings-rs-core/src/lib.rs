//! Hierarchical, dot-path addressable settings.
//!
//! This crate owns the settings value model, dot-path navigation, the
//! mutable/immutable store with per-key validators and a lookup cache, typed
//! coercion, source factories, and the structured-literal/JSON/YAML codecs.

pub mod codec;
mod coercion;
mod error;
mod factory;
pub mod path;
mod store;
mod validator;
mod value;

/// Codec selection for file persistence.
pub use codec::{Codec, Format};
/// Typed reads.
pub use coercion::{ValueKind, coerce};
/// Public error type returned by settings operations.
pub use error::SettingsError;
/// Construction sources.
pub use factory::{EnvProvider, ProcessEnv, SettingsSource};
/// The settings store.
pub use store::Settings;
/// Validator capability and registry.
pub use validator::{Validator, ValidatorRegistry};
/// Value model.
pub use value::{SettingsTree, Value};
