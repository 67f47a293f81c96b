//! User settings: the preference model and its persisted store.

pub mod model;
pub mod store;

pub use model::{Quality, SaveLocation, Settings, SettingsPatch, Theme};
pub use store::SettingsStore;
