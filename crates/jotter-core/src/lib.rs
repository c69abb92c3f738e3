//! jotter-core - Core library for Jotter
//!
//! This crate contains the note, category and preference models, the SQLite
//! store, and the screen controllers every Jotter front end drives.

pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod reactive;
pub mod services;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteId};
