//! # SiteWise
//!
//! A terminal building assistant: model floors, restrooms, corridors and
//! lifts by chatting with it, and attach 2D maps and fixture photos to each
//! component.
//!
//! ## Features
//!
//! - Regex command grammar ("add 2 floors", "rename restroom 1 on floor 2 to Main")
//! - Several buildings per collection, one active at a time
//! - State mirrored to JSON blobs after every change
//! - Layout editor and chat transcript in the terminal
//! - Export to CSV and JSON
//!
//! ## Example
//!
//! ```no_run
//! use sitewise::session::Session;
//! use sitewise::store::MemoryStore;
//! use std::time::Duration;
//!
//! let mut session = Session::new(MemoryStore::default(), Duration::ZERO);
//! session.send_message("create default building");
//! let reply = session.send_message("add 2 floors").unwrap_or_default();
//! println!("{reply}");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod session;
pub mod store;
pub mod ui;
pub mod upload;
