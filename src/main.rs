// Defensive programming lints - prevent panics and unsafe patterns
#![deny(clippy::indexing_slicing)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::fallible_impl_from)]
#![warn(clippy::wildcard_enum_match_arm)]
#![warn(clippy::fn_params_excessive_bools)]
// Idiomatic Rust lints
#![warn(clippy::needless_return)]
#![warn(clippy::let_and_return)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::explicit_iter_loop)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod app;
mod logging;
mod ui;

use app::App;
use color_eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use menu_selector::InputEvent;
use menu_selector::config::Config;
use menu_selector::graphics::FontFace;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::{io, time::Duration};

/// Size of the image written by `render`
const EXPORT_SIZE: (u32, u32) = (480, 240);

fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let config = Config::load()?;
    logging::init_logging(&Config::log_dir()?, &config.log_level)?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        return handle_cli_args(&args, &config);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // The terminal gives one pixel per column and two per row
    let size = terminal.size()?;
    let res = App::new(
        &config,
        FontFace::Small,
        (u32::from(size.width), u32::from(size.height) * 2),
    )
    .and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "Menu exited with an error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn handle_cli_args(args: &[String], config: &Config) -> Result<()> {
    let cmd = args
        .get(1)
        .ok_or_else(|| color_eyre::eyre::eyre!("No command provided"))?;
    let program_name = args.first().map_or("menu-selector", String::as_str);

    match cmd.as_str() {
        "--help" | "-h" => print_help(program_name),
        "--version" | "-v" => println!("menu-selector v{}", env!("CARGO_PKG_VERSION")),
        "render" => {
            let path = args
                .get(2)
                .ok_or_else(|| color_eyre::eyre::eyre!("Usage: {program_name} render <file.png>"))?;
            export_png(config, Path::new(path))?;
            println!("Menu written to {path}");
        }
        "config" => println!("{}", Config::config_path()?.display()),
        cmd_str => {
            eprintln!("Unknown command: {}", cmd_str);
            eprintln!("Run with --help for available commands.");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_help(program_name: &str) {
    println!("menu-selector - selector widget demo");
    println!();
    println!("Usage: {} [command]", program_name);
    println!();
    println!("Commands:");
    println!("  render <file.png>  - Draw the configured menu to a PNG image");
    println!("  config             - Print the config file path");
    println!("  --help             - Show this help");
    println!("  --version          - Show version");
    println!();
    println!("Run without arguments to start interactive mode.");
    println!("Set MENU_SELECTOR_LOG to override the log filter.");
}

/// Renders the menu headless, selection on the first selector
fn export_png(config: &Config, path: &Path) -> Result<()> {
    let status = Rc::new(RefCell::new(String::new()));
    let mut menu = app::build_menu(config, config.font, EXPORT_SIZE, &status)?;
    menu.draw().save_png(path)?;
    tracing::info!(path = %path.display(), "Menu exported");
    Ok(())
}

fn is_quit(key: &KeyEvent, config_close: KeyCode) -> bool {
    key.code == config_close
        || key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let close_key = app.menu_close_key();
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.should_quit {
            break;
        }

        // Gather every pending event into one batch for the menu
        let mut batch = Vec::new();
        let mut timeout = Duration::from_millis(100);
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            let ev = event::read()?;
            if let Event::Key(key) = &ev
                && key.kind == KeyEventKind::Press
                && is_quit(key, close_key)
            {
                app.should_quit = true;
                break;
            }
            if let Some(input) = InputEvent::from_terminal(&ev, ui::CELL_SIZE) {
                batch.push(input);
            }
        }
        app.handle_events(&batch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(is_quit(&esc, KeyCode::Esc));
        assert!(is_quit(&ctrl_c, KeyCode::Esc));
        assert!(!is_quit(&plain_c, KeyCode::Esc));
        assert!(!is_quit(&esc, KeyCode::Backspace));
    }
}
