pub mod channel_services;

pub mod editor_services;

pub mod helper_services;

pub mod judge_services;
pub mod language_services;
