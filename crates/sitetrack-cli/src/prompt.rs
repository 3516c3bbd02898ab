//! Terminal confirmation prompt

use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Ask a yes/no question, defaulting to no.
///
/// Without a TTY on stdin the answer is always no, so piped invocations
/// never block.
pub fn confirm(question: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
