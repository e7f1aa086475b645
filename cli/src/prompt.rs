//! Line-oriented prompts for the interactive commands.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use toolbelt::{HostCheck, PasswordPolicy};

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` without a newline and read one answer line.
    ///
    /// Returns `None` once input is exhausted.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask a y/n question; only `y` (any case) counts as yes.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(question)?;
        Ok(answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y")))
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Line printed after a host check.
pub fn host_report(host: &str, port: u16, reachable: bool) -> String {
    let outcome = if reachable { "successful" } else { "failed" };
    format!("Connection to {}:{} {}", host, port, outcome)
}

/// Probe hosts until the user types `done` or input ends.
pub fn host_check_loop<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> io::Result<()> {
    loop {
        let Some(host) = prompter.ask("Enter name of host (or 'done'): ")? else {
            return Ok(());
        };
        let host = host.trim().to_string();
        if host.eq_ignore_ascii_case("done") {
            return Ok(());
        }

        let Some(port) = prompter.ask("Enter port number: ")? else {
            return Ok(());
        };
        let Ok(port) = port.trim().parse::<u16>() else {
            prompter.say("Port and timeout must be numbers")?;
            continue;
        };
        let Some(timeout) = prompter.ask("Enter timeout value: ")? else {
            return Ok(());
        };
        let Ok(timeout) = timeout.trim().parse::<u64>() else {
            prompter.say("Port and timeout must be numbers")?;
            continue;
        };

        let check = HostCheck::new(host.as_str(), port).with_timeout(Duration::from_secs(timeout));
        let reachable = match check.check() {
            Ok(_) => true,
            Err(e) => {
                log::debug!("{}", e);
                false
            }
        };
        prompter.say(host_report(&host, port, reachable))?;
    }
}

/// Ask for a length and character classes, then print a password.
///
/// Returns the password, or `None` if input ended first.
pub fn password_prompt<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> io::Result<Option<String>> {
    let length = loop {
        let Some(answer) = prompter.ask("How many characters should your secure password have? ")?
        else {
            return Ok(None);
        };
        let Ok(length) = answer.trim().parse::<usize>() else {
            prompter.say("Please enter a whole number")?;
            continue;
        };
        match PasswordPolicy::new(length).validate() {
            Ok(()) => break length,
            Err(e) => prompter.say(e)?,
        }
    };

    let policy = PasswordPolicy::new(length)
        .with_uppercase(prompter.confirm("Include uppercase? (y/n): ")?)
        .with_digits(prompter.confirm("Include numbers? (y/n): ")?)
        .with_symbols(prompter.confirm("Include symbols? (y/n): ")?);

    match policy.generate() {
        Ok(password) => {
            prompter.say(format!("This is your new secure password: {}", password))?;
            Ok(Some(password))
        }
        Err(e) => {
            prompter.say(&e)?;
            Ok(None)
        }
    }
}
