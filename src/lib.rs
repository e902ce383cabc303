//! updateflow - review how an application upload impacts device workflows
//!
//! The library holds the catalog, impact resolution, navigation state machine
//! and session store; the binary adds the terminal front end and CLI.

pub mod app;
pub mod catalog;
pub mod config;
pub mod impact;
pub mod logging;
pub mod navigation;
pub mod selection;
pub mod session;
pub mod ui;
pub mod version;
