#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod app_composite;
pub mod config;
pub mod language;
pub mod logger;
pub mod nlu;
pub mod providers;
pub mod translation;
pub mod transport;
pub mod turn;
