use std::fs;
use std::io::Read;
use std::process::ExitCode;

use quickpaste::app::error::{AppError, Result};
use quickpaste::app::state::Presenter;
use quickpaste::app::{Action, AppState, HttpStore, SyntectHighlighter};
use quickpaste::settings::AppSettings;

/// Presenter for terminal use: errors go to stderr, navigation goes to
/// the default browser, everything layout-related is a no-op.
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn set_title(&mut self, _title: &str) {}

    fn push_location(&mut self, _path: &str) {}

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }

    fn show_document(&mut self, _html: &str, _line_count: usize) {}

    fn show_editor(&mut self, _text: &str) {}

    fn update_actions(&mut self, _enabled: &[Action]) {}

    fn open_url(&mut self, url: &str) {
        if let Err(e) = open::that(url) {
            eprintln!("Failed to open {}: {}", url, e);
        }
    }
}

fn usage() -> String {
    "usage: quickpaste save [FILE]     save FILE (or stdin) and print its URL\n\
     \x20      quickpaste load KEY[.ext]  fetch a document and print its text\n\
     \x20      quickpaste open KEY[.ext]  open a document page in the browser"
        .to_string()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn build_state(settings: AppSettings) -> AppState {
    let store = HttpStore::new(settings.server_url.clone());
    AppState::new(
        settings,
        Box::new(store),
        Box::new(SyntectHighlighter::new()),
        Box::new(ConsolePresenter),
    )
}

fn run(args: &[String]) -> Result<bool> {
    let settings = AppSettings::load();
    let command = args.first().map(String::as_str);

    match command {
        Some("save") => {
            let text = read_input(args.get(1).map(String::as_str))?;
            let mut state = build_state(settings);
            state.save_current(&text);
            match state.document_url() {
                Some(url) => {
                    println!("{}", url);
                    Ok(true)
                }
                // The presenter already reported why.
                None => Ok(false),
            }
        }
        Some("load") => {
            let key = args
                .get(1)
                .ok_or_else(|| AppError::Usage(usage()))?;
            let mut state = build_state(settings);
            state.load_document(key);
            if state.model().is_locked() {
                print!("{}", state.model().document().data());
                Ok(true)
            } else {
                eprintln!("error: no document at '{}'", key);
                Ok(false)
            }
        }
        Some("open") => {
            let key = args
                .get(1)
                .ok_or_else(|| AppError::Usage(usage()))?;
            let url = format!("{}/{}", settings.server_url.trim_end_matches('/'), key);
            ConsolePresenter.open_url(&url);
            Ok(true)
        }
        _ => Err(AppError::Usage(usage())),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
