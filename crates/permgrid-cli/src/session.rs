//! The interactive menu session.
//!
//! A plain stdin loop: show the options, read a choice, prompt for a file
//! path where one is needed. Reader failures print and return to the
//! menu; nothing here aborts the process.

use std::io::{self, Write};

use anyhow::Result;

use permgrid_matrix::MatrixStore;

use crate::reader::{self, ReaderError};
use crate::render;

const MENU: &[&str] = &[
    "1 - Load entries",
    "2 - Print matrix",
    "3 - Update matrix",
    "4 - Evaluate requests",
    "5 - Exit",
    "6 - Print access lists",
];

/// Run the menu loop until exit is chosen or input ends.
pub fn run(store: &mut MatrixStore) -> Result<()> {
    let stdin = io::stdin();
    loop {
        println!();
        println!("Options:");
        for item in MENU {
            println!("{item}");
        }
        let Some(choice) = prompt(&stdin, "Choose option (1-6): ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                if let Some(path) = prompt_path(&stdin)? {
                    load(store, &path);
                }
            }
            "2" => print!("{}", render::render_matrix(store)),
            "3" => {
                if let Some(path) = prompt_path(&stdin)? {
                    update(store, &path);
                }
            }
            "4" => {
                if let Some(path) = prompt_path(&stdin)? {
                    evaluate(store, &path);
                }
            }
            "5" => return Ok(()),
            "6" => print!("{}", render::render_access_lists(store)),
            other => println!("Unknown option: {other}"),
        }
    }
}

/// Print a prompt and read one trimmed line; `None` at end of input.
fn prompt(stdin: &io::Stdin, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_path(stdin: &io::Stdin) -> Result<Option<String>> {
    prompt(stdin, "Enter the filepath: ")
}

fn load(store: &mut MatrixStore, path: &str) {
    match reader::read_access_records(path) {
        Ok(records) => store.load(records),
        Err(err) => report_reader_error(err),
    }
}

fn update(store: &mut MatrixStore, path: &str) {
    match reader::read_update_records(path) {
        Ok(records) => {
            let report = store.update(records);
            for failure in &report.failures {
                println!("record {}: {}", failure.index + 1, failure.reason);
            }
        }
        Err(err) => report_reader_error(err),
    }
}

fn evaluate(store: &MatrixStore, path: &str) {
    match reader::read_requests(path) {
        Ok(requests) => {
            for request in &requests {
                let verdict = store.evaluate(request);
                println!("{}", render::render_verdict(request, verdict));
            }
        }
        Err(err) => report_reader_error(err),
    }
}

fn report_reader_error(err: ReaderError) {
    println!("Error: {err}");
}
