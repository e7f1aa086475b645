//! Interactive PDF-to-CSV session.
//!
//! A [`Session`] remembers the selected PDF and the last extracted table.
//! [`run`] drives it from typed commands, one per line.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use toolbelt::render::{self, ExportOptions};
use toolbelt::{normalize, Extractor, TabularResult};

use crate::prompt::Prompter;

/// Rows shown in the preview after a successful extraction.
pub const PREVIEW_ROWS: usize = 10;

/// File name used by `save` without an argument.
pub const DEFAULT_OUTPUT: &str = "extracted_data.csv";

/// Outcome of one session step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success(String),
    Failure(String),
    Working(String),
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success(_))
    }

    /// The status line with terminal colors.
    pub fn painted(&self) -> String {
        match self {
            Status::Success(_) => self.to_string().green().to_string(),
            Status::Failure(_) => self.to_string().red().to_string(),
            Status::Working(_) => self.to_string().blue().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success(msg) => write!(f, "✅ {}", msg),
            Status::Failure(msg) => write!(f, "❌ {}", msg),
            Status::Working(msg) => write!(f, "⏳ {}", msg),
        }
    }
}

/// Selected input and extracted data.
pub struct Session {
    extractor: Extractor,
    export_options: ExportOptions,
    pdf_path: Option<PathBuf>,
    data: Option<TabularResult>,
}

impl Session {
    pub fn new(extractor: Extractor, export_options: ExportOptions) -> Self {
        Self {
            extractor,
            export_options,
            pdf_path: None,
            data: None,
        }
    }

    /// Choose the PDF to work on; drops any previously extracted data.
    pub fn select<P: AsRef<Path>>(&mut self, path: P) -> Status {
        let path = path.as_ref();
        if !path.is_file() {
            return Status::Failure(format!("File not found: {}", path.display()));
        }
        self.pdf_path = Some(path.to_path_buf());
        self.data = None;
        Status::Success(format!("Selected: {}", file_name(path)))
    }

    /// Extract the selected PDF and keep the result for `save`.
    pub fn extract(&mut self) -> Status {
        let Some(path) = &self.pdf_path else {
            return Status::Failure("Please select a PDF file first".to_string());
        };

        let extraction = match self.extractor.extract(path) {
            Ok(extraction) => extraction,
            Err(e) => return Status::Failure(format!("Error: {}", e)),
        };
        if extraction.is_empty() {
            return Status::Failure("No data found in PDF".to_string());
        }

        match normalize(&extraction) {
            Some(result) if !result.is_empty() => {
                let (rows, columns) = result.shape();
                self.data = Some(result);
                Status::Success(format!("Extracted {} rows × {} columns", rows, columns))
            }
            _ => Status::Failure("Could not parse data from PDF".to_string()),
        }
    }

    /// Write the extracted data as CSV.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Status {
        match render::export(self.data.as_ref(), path, &self.export_options) {
            Ok(written) => Status::Success(format!("Saved to: {}", file_name(&written))),
            Err(e) => Status::Failure(format!("Save error: {}", e)),
        }
    }

    /// Aligned text of the first rows, if something was extracted.
    pub fn preview(&self) -> Option<String> {
        self.data
            .as_ref()
            .map(|data| render::preview(data, PREVIEW_ROWS))
    }

    /// One line describing the selection and extraction state.
    pub fn describe(&self) -> String {
        let selected = match &self.pdf_path {
            Some(path) => format!("Selected: {}", file_name(path)),
            None => "No file selected".to_string(),
        };
        match &self.data {
            Some(data) => {
                let (rows, columns) = data.shape();
                format!("{} ({} rows × {} columns ready)", selected, rows, columns)
            }
            None => selected,
        }
    }
}

/// A parsed command line.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Select(&'a str),
    Extract,
    Preview,
    Save(&'a str),
    Status,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "select" | "open" if !rest.is_empty() => Command::Select(rest),
        "extract" => Command::Extract,
        "preview" => Command::Preview,
        "save" | "export" => Command::Save(if rest.is_empty() { DEFAULT_OUTPUT } else { rest }),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line),
    }
}

const HELP: &str = "\
Commands:
  select <path>   choose the PDF to extract
  extract         extract tables (or text) from the selected PDF
  preview         show the first rows of the extracted data
  save [path]     write the data as CSV (default: extracted_data.csv)
  status          show what is selected
  help            show this list
  quit            leave";

/// Read commands until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    prompter.say("PDF to CSV Extractor".bold())?;
    prompter.say("Type 'help' for commands.")?;

    while let Some(line) = prompter.ask("> ")? {
        match parse_command(&line) {
            Command::Select(path) => prompter.say(session.select(path).painted())?,
            Command::Extract => {
                prompter.say(Status::Working("Extracting data...".to_string()).painted())?;
                let status = session.extract();
                prompter.say(status.painted())?;
                if let (true, Some(preview)) = (status.is_success(), session.preview()) {
                    prompter.say(format!("Preview:\n{}", preview.trim_end()))?;
                }
            }
            Command::Preview => match session.preview() {
                Some(preview) => prompter.say(preview.trim_end())?,
                None => prompter.say("Nothing extracted yet".yellow())?,
            },
            Command::Save(path) => prompter.say(session.save(path).painted())?,
            Command::Status => prompter.say(session.describe())?,
            Command::Help => prompter.say(HELP)?,
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(line) => {
                prompter.say(format!("Unknown command: {} (try 'help')", line).yellow())?
            }
        }
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new(Extractor::new(), ExportOptions::default())
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("select  a b.pdf "), Command::Select("a b.pdf"));
        assert_eq!(parse_command("EXTRACT"), Command::Extract);
        assert_eq!(parse_command("save"), Command::Save(DEFAULT_OUTPUT));
        assert_eq!(parse_command("save out.csv"), Command::Save("out.csv"));
        assert_eq!(parse_command("   "), Command::Empty);
        assert_eq!(parse_command("select"), Command::Unknown("select"));
        assert_eq!(parse_command("q!"), Command::Unknown("q!"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Success("ok".into()).to_string(), "✅ ok");
        assert_eq!(Status::Failure("no".into()).to_string(), "❌ no");
        assert_eq!(Status::Working("wait".into()).to_string(), "⏳ wait");
    }

    #[test]
    fn test_extract_requires_selection() {
        let mut session = session();
        assert_eq!(
            session.extract(),
            Status::Failure("Please select a PDF file first".into())
        );
    }

    #[test]
    fn test_select_missing_file() {
        let mut session = session();
        let status = session.select("/no/such/file.pdf");
        assert!(matches!(status, Status::Failure(msg) if msg.starts_with("File not found")));
        assert_eq!(session.describe(), "No file selected");
    }

    #[test]
    fn test_extract_non_pdf_reports_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, "just text").unwrap();

        let mut session = session();
        assert_eq!(session.select(&path), Status::Success("Selected: notes.pdf".into()));
        let status = session.extract();
        assert!(matches!(status, Status::Failure(msg) if msg.starts_with("Error: ")));
    }

    #[test]
    fn test_save_without_data() {
        let dir = TempDir::new().unwrap();
        let status = session().save(dir.path().join("out"));
        assert_eq!(status, Status::Failure("Save error: No data to export".into()));
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_run_loop() {
        let input = "help\nextract\nfrobnicate\nstatus\nquit\nextract\n";
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let mut session = session();
        run(&mut session, &mut prompter).unwrap();

        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert!(out.contains("select <path>"));
        assert_eq!(out.matches("Please select a PDF file first").count(), 1);
        assert!(out.contains("Unknown command: frobnicate"));
        assert!(out.contains("No file selected"));
    }
}
