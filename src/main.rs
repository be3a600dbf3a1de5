//! clubday main entrypoint.

use clubday::run;
use clubday::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        // A malformed log line is reported as the bare line itself.
        match e.offending_line() {
            Some(line) => println!("{line}"),
            None => error(format!("Error: {e}")),
        }
        std::process::exit(1);
    }
}
