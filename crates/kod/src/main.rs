use std::{fmt::Display, fs::OpenOptions, process};

use anyhow::Result;
use env_logger::{Env, Target};
use kod_edit::{Buffer, Editor, EditorConfig};
use kod_window::{CrosstermEvents, CrosstermScreen};

const LOG_FILE: &str = "out.log";

fn init_logging() -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn open_arg_file() -> Buffer {
    match std::env::args().nth(1) {
        Some(path) => Buffer::open(&path).unwrap_or_else(|err| {
            log::warn!("{err}, starting with an empty buffer");
            Buffer::new_named(&path)
        }),
        None => Buffer::new(),
    }
}

// the terminal is already restored at this point, so stdout is safe to use
#[allow(clippy::print_stdout)]
fn exit_with_error<E: Display>(err: E) -> ! {
    println!("{err}");
    process::exit(1);
}

fn main() {
    // a missing log file must not keep the editor from starting
    if let Err(err) = init_logging() {
        eprintln!("unable to log to {LOG_FILE}, logging disabled: {err:#}");
    }

    let buffer = open_arg_file();
    let screen = CrosstermScreen::new().unwrap_or_else(|err| exit_with_error(err));

    let mut editor = Editor::new(Box::new(screen), buffer, EditorConfig::default());
    let result = editor.run(CrosstermEvents::new());
    drop(editor);

    if let Err(err) = result {
        exit_with_error(err);
    }
}
