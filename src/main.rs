//! `issue-tracker` - minimal issue-tracking REST service
//!
//! Projects and their issues live in memory for the life of the process.

use issue_tracker::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
