//! Terminal rendering of submit effects.

use std::io::{self, IsTerminal, Write};

use teaspoon_core::SubmitUi;

/// Alerts go to stderr; a navigation prints the absolute page URL on stdout.
#[derive(Debug, Clone)]
pub struct TerminalUi {
    base_url: String,
}

impl TerminalUi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl SubmitUi for TerminalUi {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn navigate(&self, target: &str) {
        println!("{}", page_url(&self.base_url, target));
    }

    fn set_busy(&self, busy: bool) {
        let mut stderr = io::stderr();
        if !stderr.is_terminal() {
            return;
        }
        let _ = if busy {
            write!(stderr, "Posting...")
        } else {
            write!(stderr, "\r\x1b[2K")
        };
        let _ = stderr.flush();
    }
}

/// Join a server base URL and a page path, or pass an absolute target through.
pub fn page_url(base_url: &str, target: &str) -> String {
    if teaspoon_core::util::is_http_url(target) {
        return target.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if target.starts_with('/') {
        format!("{base}{target}")
    } else {
        format!("{base}/{target}")
    }
}
