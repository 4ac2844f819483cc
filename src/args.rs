use std::env;
use std::path::PathBuf;

pub const VERSION_DISPLAY: &str = env!("SCREEN_MATCH_VERSION_DISPLAY");
pub const BUILD_YEAR: &str = env!("SCREEN_MATCH_BUILD_YEAR");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Overlay,
    Headless,
    ListDisplays,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub mode: Mode,
    /// Base directory for template folders, config file and typing resource
    pub base_dir: PathBuf,
    /// Explicit template paths (legacy single-tier mode); empty means folder discovery
    pub templates: Vec<PathBuf>,
    pub debug_mode: bool,
    pub timeout_secs: Option<u64>,
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

impl Args {
    /// Parse the process arguments
    pub fn parse() -> Result<Command, String> {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from<I, S>(args: I) -> Result<Command, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mode = Mode::Overlay;
        let mut base_dir: Option<PathBuf> = None;
        let mut templates = Vec::new();
        let mut debug_mode = false;
        let mut timeout_secs: Option<u64> = None;

        for arg in args {
            let arg = arg.as_ref();
            if arg == "--help" || arg == "-h" {
                return Ok(Command::Help);
            } else if arg == "--version" || arg == "-v" {
                return Ok(Command::Version);
            } else if arg == "--debug" {
                debug_mode = true;
            } else if arg == "--headless" {
                mode = Mode::Headless;
            } else if arg == "--list-displays" {
                mode = Mode::ListDisplays;
            } else if let Some(val) = arg.strip_prefix("--dir=") {
                if val.is_empty() {
                    return Err("Empty --dir value".to_string());
                }
                base_dir = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--timeout=") {
                match val.parse::<u64>() {
                    Ok(secs) => timeout_secs = Some(secs),
                    Err(_) => return Err(format!("Invalid timeout value: {}", val)),
                }
            } else if arg.starts_with('-') && arg.len() > 1 {
                return Err(format!("Unknown argument: {}", arg));
            } else {
                templates.push(PathBuf::from(arg));
            }
        }

        Ok(Command::Run(Args {
            mode,
            base_dir: base_dir.unwrap_or_else(|| PathBuf::from(".")),
            templates,
            debug_mode,
            timeout_secs,
        }))
    }
}

pub fn version_line() -> String {
    format!("Screen Match Run v{}", VERSION_DISPLAY)
}

pub fn print_help() {
    println!("🤖 Screen Match Run - multi-monitor template clicker");
    println!();
    println!("USAGE:");
    println!("    screen-match-run [FLAGS] [TEMPLATE...]");
    println!();
    println!("ARGS:");
    println!("    TEMPLATE...         Image files to search for, clicked then followed by 'y'");
    println!("                        (without them, Folder_Type_A and Folder_Type_Y are watched)");
    println!();
    println!("FLAGS:");
    println!("    --dir=PATH          Base directory for template folders, screen-match.toml and typing.txt");
    println!("    --headless          Run without the overlay; stop with Ctrl+C");
    println!("    --list-displays     Print the detected monitors and exit");
    println!("    --debug             Enable debug logging");
    println!("    --timeout=N         Auto-exit after N seconds (for testing)");
    println!("    --help, -h          Show this help message");
    println!("    --version, -v       Show version information");
    println!();
    println!("HOTKEYS (overlay):");
    println!("    F8 (hold)           Show cursor position and monitor");
    println!("    Ctrl+Shift+C        Copy cursor position to the clipboard");
    println!("    F9 / F10            Start / cancel typing typing.txt");
    println!("    Esc                 Quit");
    println!();
    println!("EXIT CODES:");
    println!("    0 ran, 1 configuration or argument error, 2 no monitors detected");
}
