//! Interactive search screen.
//!
//! ```text
//! ┌────────────────────────────────┐
//! │   Anime                        │  alphabetical remainder,
//! │   Hiking                       │  growing upward
//! │ ▌ Gaming                       │  top candidate
//! │   5 results (84.2ms)           │
//! │   [↑↓ select] [Enter copy] ... │
//! │   [Copied: Gaming]             │  toast
//! │ ▌ ga█                          │  input
//! │                                │  keyboard lift
//! └────────────────────────────────┘
//! ```

mod app;
mod input;
mod presentation;
mod ui;

pub use app::run;
