//! # CLI Module
//!
//! User-facing commands of the playlist analyser. Each command drives the
//! library through [`crate::tasks`] and reports through the colored output
//! macros, tables and spinners.
//!
//! - [`list_playlists`] - table of a user's public playlists
//! - [`analyse`] - top artists and duplicate tracks, as tables or JSON
//! - [`console`] - interactive prompt loop
//! - [`serve`] - web front end
//!
//! ```bash
//! playlyzer playlists --user spotify --max-playlists 5
//! playlyzer analyse --user spotify --mode dup --ignore-album
//! playlyzer console
//! playlyzer serve --open
//! ```
//!
//! Fatal failures end the process through `error!`; the console loop reports
//! them with `warning!` and keeps asking.

mod analyse;
mod console;
mod output;
mod playlists;
mod serve;

pub use analyse::analyse;
pub use console::{console, prompt_error};
pub use output::{print_json, print_playlists, print_report};
pub use playlists::list_playlists;
pub use serve::serve;
