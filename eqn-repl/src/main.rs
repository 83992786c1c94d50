mod error;
mod session;

use log::debug;
use rustyline::{error::ReadlineError, DefaultEditor};
use session::{Command, Session};
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};

/// Runs one line of input in the session, printing the result or reporting the failure.
fn run_line(line: &str, session: &mut Session) {
    if line.trim().is_empty() {
        return;
    }

    let command = Command::parse(line);
    debug!("running {:?}", command);
    match session.run(&command) {
        Ok(output) => println!("{}", output),
        Err(err) => err.report_to_stderr(command.source()),
    }
}

/// Runs every line of the given source in one session.
fn run_source(source: &str) {
    let mut session = Session::new();
    for line in source.lines() {
        run_line(line, &mut session);
    }
}

/// Reads a line from the editor and runs it, keeping it in the history.
fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
    let input = rl.readline("> ")?;
    if input.trim().is_empty() {
        return Ok(());
    }

    rl.add_history_entry(&input)?;
    run_line(&input, session);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        match fs::read_to_string(&filename) {
            Ok(source) => run_source(&source),
            Err(err) => {
                eprintln!("{}: {}", filename, err);
                return ExitCode::FAILURE;
            },
        }
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut source = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut source) {
            eprintln!("stdin: {}", err);
            return ExitCode::FAILURE;
        }
        run_source(&source);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        };
        let mut session = Session::new();

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    ExitCode::SUCCESS
}
