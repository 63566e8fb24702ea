//! CLI command handlers.

mod config;
mod download;
mod list;
mod search;

pub(crate) use config::run_config_show_command;
pub(crate) use download::{run_all_command, run_game_command};
pub(crate) use list::run_list_command;
pub(crate) use search::run_search_command;
