#![deny(warnings)]

pub mod clipboard;
pub mod config;
pub mod language;
pub mod translate;
pub mod ui;
