//! Console rendering of notices, field feedback and delete confirmation.

use bkm_core::actions::{Confirm, Notice, Notifier};
use bkm_core::validate::FormCheck;
use std::io::{self, BufRead, Write};

/// Prints notices: successes to stdout, rejections to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::Added { id, name } => println!("Added bookmark {id}: {name}"),
            Notice::Deleted { id, name } => println!("Deleted bookmark {id}: {name}"),
            Notice::DuplicateRejected { url } => {
                eprintln!("Duplicate URL: {url} is already bookmarked.")
            }
            Notice::InvalidInput {
                name_valid,
                url_valid,
            } => {
                eprintln!("Invalid input. Please follow these rules:");
                eprint!(
                    "{}",
                    render_form_check(&FormCheck {
                        name_valid: *name_valid,
                        url_valid: *url_valid,
                    })
                );
            }
            Notice::StorageReset { reason, preserved } => {
                eprintln!("Stored bookmarks were unreadable and have been reset ({reason}).");
                if let Some(p) = preserved {
                    eprintln!("The old data was kept at {p}.");
                }
            }
        }
    }
}

/// One line per field, marked ok/invalid with the rule it must satisfy.
pub fn render_form_check(check: &FormCheck) -> String {
    let mark = |ok: bool| if ok { "ok" } else { "invalid" };
    format!(
        "  [{}] name: at least 3 characters, letters, digits or _ separated by spaces\n  [{}] url: a valid site address, e.g. example.com/page\n",
        mark(check.name_valid),
        mark(check.url_valid)
    )
}

/// Prompts on stdin; anything but y/yes declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm_delete(&mut self, name: &str) -> bool {
        print!("You are about to delete \"{name}\". Are you sure? [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => is_yes(&line),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
