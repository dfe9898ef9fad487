// Library root
// ------------
// A small blocking client for the Timeular time-tracking API. The binary
// (`main.rs`) wires these modules into a command-line tool.
//
// Module responsibilities:
// - `time_range`: turns a local wall-clock interval into the UTC path the
//   time-entries endpoint expects.
// - `api`: sign-in, logout and entry retrieval over HTTP.
// - `config` / `logging`: environment configuration and the log file.
// - `cli` / `ui`: argument parsing and the interactive prompts.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod time_range;
pub mod ui;

pub use api::{Credentials, SignInResponse, TimeEntry, TimeularClient};
pub use error::{DstTransition, Error, Result};
pub use time_range::{entry_by_timestamp_url, TimeRange};
