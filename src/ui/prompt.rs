use std::io::{self, BufRead, IsTerminal};

use inquire::Text;

use crate::error::Result;

/// Label shown when asking for the ticket.
pub const TICKET_PROMPT: &str = "Enter the Jira ticket name";

/// Asks for the Jira ticket id.
///
/// Uses an interactive `inquire` prompt on a terminal; otherwise reads one
/// line from stdin so the tool can be scripted. The answer is trimmed and
/// may be empty.
pub fn prompt_ticket() -> Result<String> {
    if io::stdin().is_terminal() {
        let answer = Text::new(&format!("{}:", TICKET_PROMPT)).prompt()?;
        return Ok(answer.trim().to_string());
    }

    eprint!("{}: ", TICKET_PROMPT);
    read_ticket(io::stdin().lock())
}

/// Reads the ticket id from the first line of `reader`.
pub fn read_ticket(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
