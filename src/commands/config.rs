//! Config command handler: show effective configuration.

use crate::app::config_runtime::Settings;
use crate::app_config::LoadedConfig;

pub(crate) fn run_config_show_command(settings: &Settings, loaded_config: &LoadedConfig) {
    for line in config_lines(settings, loaded_config) {
        println!("{line}");
    }
}

fn config_lines(settings: &Settings, loaded_config: &LoadedConfig) -> Vec<String> {
    let resolved_path = loaded_config.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    let config_file = if loaded_config.loaded_from_file {
        "loaded"
    } else {
        "not found (using defaults)"
    };

    vec![
        format!("config_path = {resolved_path}"),
        format!("config_file = {config_file}"),
        format!("base_url = {}", settings.base_url),
        format!("timeout_secs = {}", settings.timeout.as_secs()),
        format!("pacing_ms = {}", settings.pacing.as_millis()),
        format!("output_dir = {}", settings.output_dir.display()),
        format!("format = {}", settings.format),
        format!("verbosity = {}", settings.verbosity.as_str()),
    ]
}
