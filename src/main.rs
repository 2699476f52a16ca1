use fjira::app::App;
use fjira::settings::{self, Settings};
use fjira::tui::{CrosstermEvents, TerminalScreen};

mod demo;
mod logging;

fn main() {
    let logging = logging::init();

    let settings = load_settings();

    let screen = match TerminalScreen::new() {
        Ok(screen) => screen,
        Err(err) => {
            tracing::error!(error = %err, "terminal initialization failed");
            eprintln!("fjira: cannot initialize terminal: {err}");
            exit_with_logs(logging);
        }
    };

    let restorer = screen.restorer();
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restorer.restore();
        tracing::error!(panic = %panic_info, "panic");
        default_hook(panic_info);
    }));

    let app = match App::new(Box::new(screen), settings) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(error = %err, "runtime initialization failed");
            eprintln!("fjira: {err}");
            exit_with_logs(logging);
        }
    };

    demo::install(&app);

    if let Err(err) = app.start(CrosstermEvents) {
        tracing::error!(error = %err, "runtime failed");
        eprintln!("fjira: {err}");
        exit_with_logs(logging);
    }
}

fn exit_with_logs(logging: Option<logging::LoggingGuard>) -> ! {
    if let Some(guard) = &logging {
        eprintln!("fjira: logs in {}", guard.log_dir().display());
    }
    drop(logging);
    std::process::exit(1);
}

fn load_settings() -> Settings {
    if let Err(err) = settings::ensure_settings_file() {
        tracing::warn!(error = %err, "cannot write default settings");
    }
    match settings::load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "using default settings");
            Settings::default()
        }
    }
}
