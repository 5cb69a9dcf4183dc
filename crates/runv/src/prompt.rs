use console::Term;
use runv_install::Confirm;

/// Asks on the terminal. Without one (piped stdin, CI) every answer is "no".
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub fn new() -> Self { Self { term: Term::stderr() } }
}

impl Confirm for TermPrompt {
    fn confirm(&self, prompt: &str) -> bool {
        if !self.term.features().is_attended() {
            tracing::debug!("not a terminal, declining: {prompt}");
            return false;
        }
        if self.term.write_str(&format!("runv: {prompt} (y/N) ")).is_err() {
            return false;
        }
        self.term.read_line().map(|answer| is_yes(&answer)).unwrap_or(false)
    }
}

fn is_yes(answer: &str) -> bool { matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") }
