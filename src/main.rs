//! gotoxy - cursor position and terminal size from the command line
//!
//! # Quick Start
//!
//! ```text
//! gotoxy pos                 # print "x y"
//! gotoxy goto 10 5           # move the cursor
//! gotoxy size                # print "columns lines"
//! gotoxy resize 120 40       # resize the terminal
//! ```
//!
//! Logs go to `~/.gotoxy/gotoxy.log` because stdout carries escape sequences.

use std::env;
use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gotoxy::config::Config;
use gotoxy::{Terminal, VERSION};

/// Command selected on the command line
#[derive(Debug, PartialEq)]
enum Command {
    Pos,
    Goto(String, String),
    Size,
    Resize(String, String),
}

/// Parsed command line
#[derive(Debug)]
struct Args {
    command: Command,
    config_path: Option<PathBuf>,
}

fn print_version() {
    eprintln!("gotoxy {}", VERSION);
}

fn print_help() {
    eprintln!("gotoxy {} - Cursor position and terminal size control", VERSION);
    eprintln!();
    eprintln!("Usage: gotoxy [OPTIONS] <COMMAND>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  pos                   Print the cursor position (x y, zero-based)");
    eprintln!("  goto <X> <Y>          Move the cursor");
    eprintln!("  size                  Print the terminal size (columns lines)");
    eprintln!("  resize <COLS> <LINES> Resize the terminal");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <PATH>   Use an alternate configuration file");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Coordinates range from 0 to 32767 on the Windows console");
    eprintln!("and from 0 to 65535 elsewhere.");
    eprintln!();
    eprintln!("Configuration: ~/.gotoxy/config.toml");
    eprintln!("Log level override: GOTOXY_LOG=debug");
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut config_path = None;
    let mut positional: Vec<&str> = Vec::new();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing config path".to_string());
                }
                config_path = Some(PathBuf::from(&args[i]));
            }
            arg => positional.push(arg),
        }
        i += 1;
    }

    let command = match positional.as_slice() {
        ["pos"] => Command::Pos,
        ["size"] => Command::Size,
        ["goto", x, y] => Command::Goto(x.to_string(), y.to_string()),
        ["resize", columns, lines] => Command::Resize(columns.to_string(), lines.to_string()),
        ["goto", ..] => return Err("Usage: gotoxy goto <X> <Y>".to_string()),
        ["resize", ..] => return Err("Usage: gotoxy resize <COLS> <LINES>".to_string()),
        [] => return Err("Missing command".to_string()),
        [other, ..] => return Err(format!("Unknown command: {}. Use -h for help.", other)),
    };

    Ok(Args { command, config_path })
}

/// Log to file; stdout belongs to the terminal
fn init_logging(config: &Config) {
    let log_path = config.log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_env("GOTOXY_LOG")
            .or_else(|_| EnvFilter::try_new(&config.log.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn run(command: &Command) -> gotoxy::Result<()> {
    let terminal = Terminal::global()?;
    info!("{:?} on {}", command, terminal.platform().name());

    match command {
        Command::Pos => {
            let pos = terminal.cursor_position()?;
            println!("{}", pos);
        }
        Command::Goto(x, y) => {
            terminal.set_cursor_position_str(x, y)?;
        }
        Command::Size => {
            let size = terminal.terminal_size()?;
            println!("{}", size);
        }
        Command::Resize(columns, lines) => {
            terminal.set_terminal_size_str(columns, lines)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let config = match args.config_path {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };
    init_logging(&config);

    info!("gotoxy {} starting...", VERSION);

    if let Err(e) = run(&args.command) {
        error!("{:?} failed: {}", args.command, e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("gotoxy")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_args(&argv(&["pos"])).unwrap().command, Command::Pos);
        assert_eq!(parse_args(&argv(&["size"])).unwrap().command, Command::Size);
        assert_eq!(
            parse_args(&argv(&["goto", "3", "4"])).unwrap().command,
            Command::Goto("3".to_string(), "4".to_string())
        );
        assert_eq!(
            parse_args(&argv(&["resize", "120", "40"])).unwrap().command,
            Command::Resize("120".to_string(), "40".to_string())
        );
    }

    #[test]
    fn test_parse_config_flag() {
        let args = parse_args(&argv(&["-c", "/tmp/x.toml", "size"])).unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("/tmp/x.toml")));
        assert!(parse_args(&argv(&["size", "--config"])).is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&argv(&[])).is_err());
        assert!(parse_args(&argv(&["goto", "1"])).is_err());
        assert!(parse_args(&argv(&["resize"])).is_err());
        assert!(parse_args(&argv(&["jump"])).is_err());
    }
}
