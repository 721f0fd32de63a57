//! langgap - fill missing keys in PHP translation files
//!
//! langgap compares a baseline language file of
//! `$GLOBALS['translations']['en']['key'] = 'value';` assignments with one or
//! more target language files, machine-translates the keys a target lacks and
//! appends them to the target file. Translations are remembered in
//! `trCache.json` so repeated runs never ask for the same string twice.
//!
//! ## Module Structure
//!
//! - `cache`: Persistent translation cache (`trCache.json`)
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Line pattern, language packs, diff and merge engine
//! - `error`: Library error type
//! - `issues`: Issue types reported during a run
//! - `translator`: Machine translation backends
//! - `utils`: Shared utility functions

pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod issues;
pub mod translator;
pub mod utils;
