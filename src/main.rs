use screen_match_run::args::{self, Args, Command, Mode};
use screen_match_run::automation::{
    ScanConfig, SessionSummary, StopSignal, Toast, TypingController, create_event_channel, spawn_scan_worker,
};
use screen_match_run::display::{ScreenSource, XcapScreen};
use screen_match_run::gui::{self, OverlayContext, Shutdown, hotkeys};
use screen_match_run::template_matching::TemplateCatalog;
use screen_match_run::{AutomationError, AutomationResult};
use std::process::ExitCode;
use std::time::Duration;

const EXIT_CONFIG: u8 = 1;
const EXIT_NO_DISPLAYS: u8 = 2;
const STARTUP_TOAST_MS: u64 = 9000;

fn main() -> ExitCode {
    let args = match Args::parse() {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            args::print_help();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("{} (c) {}", args::version_line(), args::BUILD_YEAR);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            args::print_help();
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    init_logging(args.debug_mode);

    let config = match ScanConfig::load(&args.base_dir) {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let mut screen = XcapScreen::new();
    if args.mode == Mode::ListDisplays {
        return list_displays(&mut screen);
    }
    match screen.enumerate_required() {
        Ok(topology) => log::info!("🖥️ {} monitor(s) detected", topology.len()),
        Err(e) => {
            log::error!("❌ {}", e);
            return ExitCode::from(EXIT_NO_DISPLAYS);
        }
    }

    let catalog = build_catalog(&args, &config);
    log::info!("🚀 {} watching: {}", args::version_line(), catalog.describe_locations());

    match args.mode {
        Mode::Headless => exit_code(gui::run_headless(config, catalog, args.timeout_secs)),
        Mode::Overlay | Mode::ListDisplays => run_with_overlay(&args, config, catalog),
    }
}

fn init_logging(debug_mode: bool) {
    let level = if debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn build_catalog(args: &Args, config: &ScanConfig) -> TemplateCatalog {
    if args.templates.is_empty() {
        TemplateCatalog::Folders {
            base_dir: args.base_dir.clone(),
            groups: config.groups.clone(),
        }
    } else {
        TemplateCatalog::Explicit {
            paths: args.templates.clone(),
            post_action: config.legacy_post_action.clone(),
        }
    }
}

fn list_displays(screen: &mut XcapScreen) -> ExitCode {
    match screen.enumerate_required() {
        Ok(topology) => {
            for (idx, rect) in topology.displays().iter().enumerate() {
                println!(
                    "#{}: {}x{} at ({}, {})",
                    idx + 1,
                    rect.width,
                    rect.height,
                    rect.origin_x,
                    rect.origin_y
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::from(EXIT_NO_DISPLAYS)
        }
    }
}

fn run_with_overlay(args: &Args, config: ScanConfig, catalog: TemplateCatalog) -> ExitCode {
    let (events, receiver) = create_event_channel();
    let stop = StopSignal::new();
    let typing = match TypingController::new(&config, &args.base_dir, events.clone()) {
        Ok(typing) => typing,
        Err(e) => {
            log::error!("❌ {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    let shutdown = Shutdown::new(stop.clone(), Some(typing.clone()));

    events.toast(Toast::info(
        format!("{} · {}", args::version_line(), hotkeys::instructions()),
        STARTUP_TOAST_MS,
    ));
    let worker = match spawn_scan_worker(config.clone(), catalog, events, stop) {
        Ok(worker) => worker,
        Err(e) => {
            log::error!("❌ {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    if let Some(secs) = args.timeout_secs {
        let timer = shutdown.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs(secs));
            log::info!("⏰ Timeout reached, stopping");
            timer.trigger();
        });
    }

    gui::run_overlay(OverlayContext::new(config, typing, shutdown.clone(), receiver));

    shutdown.trigger();
    let result = worker.join().map_err(|_| AutomationError::WorkerPanicked {
        name: screen_match_run::automation::WORKER_THREAD_NAME,
    });
    exit_code(result.and_then(|inner| inner))
}

fn exit_code(result: AutomationResult<SessionSummary>) -> ExitCode {
    match result {
        Ok(summary) => {
            log::info!(
                "✅ Done: {} windows, {} passes, {} hits, {} alerts",
                summary.windows,
                summary.passes,
                summary.hits,
                summary.alerts
            );
            ExitCode::SUCCESS
        }
        Err(e) if e.is_fatal() => {
            log::error!("❌ {}", e);
            ExitCode::from(EXIT_NO_DISPLAYS)
        }
        Err(e) => {
            log::error!("❌ {}", e);
            ExitCode::from(EXIT_CONFIG)
        }
    }
}
