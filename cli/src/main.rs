//! toolbelt CLI - PDF table extraction and small network/password utilities

mod prompt;
mod shell;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use toolbelt::render::{self, ExportOptions, JsonFormat};
use toolbelt::{ExportError, ExtractOptions, Extractor, HostCheck, PageSelection, PasswordPolicy};

use prompt::Prompter;
use shell::Session;

#[derive(Parser)]
#[command(name = "toolbelt")]
#[command(version)]
#[command(about = "Extract PDF tables to CSV, check TCP hosts, generate passwords", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the first table of a PDF as CSV
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Text written for empty cells
        #[arg(long, value_name = "TEXT", default_value = "")]
        na_rep: String,

        /// Field delimiter
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Output JSON instead of CSV
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Print an aligned preview of the first N rows
        #[arg(long, value_name = "N")]
        preview: Option<usize>,

        /// Abort on the first unreadable page instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Interactive select / extract / save session
    Shell {
        /// Field delimiter used by `save`
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },

    /// Check whether a TCP port accepts connections
    CheckHost {
        /// Host name or address (prompts in a loop if omitted)
        #[arg(value_name = "HOST", requires = "port")]
        host: Option<String>,

        /// TCP port
        #[arg(value_name = "PORT")]
        port: Option<u16>,

        /// Connection timeout in seconds
        #[arg(short, long, value_name = "SECS", default_value_t = 5)]
        timeout: u64,
    },

    /// Generate a random password
    #[command(alias = "pw")]
    Password {
        /// Password length, 10 to 32 (prompts if omitted)
        #[arg(short, long)]
        length: Option<usize>,

        /// Include uppercase letters
        #[arg(short, long)]
        uppercase: bool,

        /// Include digits
        #[arg(short, long)]
        numbers: bool,

        /// Include symbols
        #[arg(short, long)]
        symbols: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            pages,
            na_rep,
            delimiter,
            json,
            compact,
            preview,
            strict,
        }) => cmd_extract(ExtractArgs {
            input: &input,
            output: output.as_deref(),
            pages: pages.as_deref(),
            na_rep,
            delimiter,
            json,
            compact,
            preview,
            strict,
        }),
        Some(Commands::Shell { delimiter }) => cmd_shell(delimiter),
        Some(Commands::CheckHost {
            host,
            port,
            timeout,
        }) => cmd_check_host(host.as_deref(), port, timeout),
        Some(Commands::Password {
            length,
            uppercase,
            numbers,
            symbols,
        }) => cmd_password(length, uppercase, numbers, symbols),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: toolbelt <COMMAND>".yellow());
            println!("       toolbelt --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

struct ExtractArgs<'a> {
    input: &'a Path,
    output: Option<&'a Path>,
    pages: Option<&'a str>,
    na_rep: String,
    delimiter: char,
    json: bool,
    compact: bool,
    preview: Option<usize>,
    strict: bool,
}

fn cmd_extract(args: ExtractArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = args.pages {
        PageSelection::parse(p)?
    } else {
        PageSelection::All
    };

    let mut options = ExtractOptions::new().with_pages(page_selection);
    if !args.strict {
        options = options.lenient();
    }
    let export_options = ExportOptions::new()
        .with_delimiter(delimiter_byte(args.delimiter)?)
        .with_na_rep(args.na_rep);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Extracting {}...", args.input.display()));
    let extracted = Extractor::with_options(options).run(args.input);
    spinner.finish_and_clear();

    let result = extracted?.ok_or(ExportError::NoData)?;
    let (rows, columns) = result.shape();

    if let Some(limit) = args.preview {
        println!("{}", "Preview:".cyan().bold());
        print!("{}", render::preview(&result, limit));
        if args.output.is_none() {
            return Ok(());
        }
    }

    let json_format = args.json.then_some(if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    });

    match (args.output, json_format) {
        (Some(path), Some(format)) => {
            let written = render::export_json(&result, path, format)?;
            println!("{} {}", "Saved to".green(), written.display());
        }
        (Some(path), None) => {
            let written = render::export(Some(&result), path, &export_options)?;
            println!(
                "{} Extracted {} rows × {} columns",
                "✅".green(),
                rows,
                columns
            );
            println!("{} {}", "Saved to".green(), written.display());
        }
        (None, Some(format)) => println!("{}", render::to_json(&result, format)?),
        (None, None) => print!("{}", render::to_csv_string(&result, &export_options)?),
    }

    Ok(())
}

fn delimiter_byte(delimiter: char) -> Result<u8, String> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| format!("Delimiter must be a single ASCII character, got {:?}", delimiter))
}

fn cmd_shell(delimiter: char) -> Result<(), Box<dyn std::error::Error>> {
    let export_options = ExportOptions::new().with_delimiter(delimiter_byte(delimiter)?);
    let extractor = Extractor::with_options(ExtractOptions::new().lenient());
    let mut session = Session::new(extractor, export_options);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    shell::run(&mut session, &mut prompter)?;
    Ok(())
}

fn cmd_check_host(
    host: Option<&str>,
    port: Option<u16>,
    timeout: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(host), Some(port)) = (host, port) else {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        prompt::host_check_loop(&mut prompter)?;
        return Ok(());
    };

    let addr = HostCheck::new(host, port)
        .with_timeout(Duration::from_secs(timeout))
        .check()?;
    log::debug!("Accepted by {}", addr);
    println!("{}", prompt::host_report(host, port, true).green());
    Ok(())
}

fn cmd_password(
    length: Option<usize>,
    uppercase: bool,
    numbers: bool,
    symbols: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(length) = length else {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        prompt::password_prompt(&mut prompter)?;
        return Ok(());
    };

    let password = PasswordPolicy::new(length)
        .with_uppercase(uppercase)
        .with_digits(numbers)
        .with_symbols(symbols)
        .generate()?;
    println!("This is your new secure password: {}", password);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "toolbelt".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF table extraction, host checks and password generation");
}
