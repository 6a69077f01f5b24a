//! rMachLogger main entrypoint.

use rmachlogger::run;
use rmachlogger::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
