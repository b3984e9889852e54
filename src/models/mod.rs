pub mod channel_models;
pub mod config_models;
pub mod editor_models;
pub mod judge_models;
pub mod language_models;
