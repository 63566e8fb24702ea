//! List command handler: show the numbered source menu.

use quizdl_core::SourceRegistry;

use crate::output;

pub(crate) fn run_list_command(registry: &SourceRegistry) {
    output::print_lines(&output::list_lines(registry));
}
