//! Interactive command handler
//!
//! Reads one command per line and dispatches it to the controller, so the
//! terminal plays the role of pointer events on the grid.

use super::{confirm, open_controller, TITLE};
use malla::config::Config;
use malla::core::completion::Toggled;
use malla::core::controller::{Controller, Event, Outcome};
use malla::core::render::{GridRenderer, RenderContext, TextRenderer};
use malla::core::storage::FileStore;
use malla::{debug, error};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Commands:
  click CODE    toggle CODE and select it (click again to deselect)
  hover CODE    highlight CODE's prerequisites and dependents
  leave         end the hover highlight
  outside       clear the selection
  show          print the grid
  clear         forget every completed course
  help          this text
  quit          exit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Forward to the controller
    Event(Event),
    /// Print the grid
    Show,
    /// Print the help text
    Help,
    /// Leave the loop
    Quit,
    /// Blank line
    Nothing,
}

/// Parse one line of input
pub fn parse_line(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Input::Nothing);
    };
    let argument = words.next();
    let code = |name: &str| {
        argument
            .map(str::to_string)
            .ok_or_else(|| format!("'{name}' needs a course code"))
    };
    match command.to_ascii_lowercase().as_str() {
        "click" | "c" => Ok(Input::Event(Event::Click(code("click")?))),
        "hover" | "h" => Ok(Input::Event(Event::Hover(code("hover")?))),
        "leave" | "l" => Ok(Input::Event(Event::HoverEnd)),
        "outside" | "o" => Ok(Input::Event(Event::ClickOutside)),
        "clear" => Ok(Input::Event(Event::ClearAll)),
        "show" | "s" => Ok(Input::Show),
        "help" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

fn print_grid(controller: &Controller<FileStore>) {
    let ctx = RenderContext::new(TITLE, controller.grid());
    match TextRenderer::new().render(&ctx) {
        Ok(text) => print!("{text}"),
        Err(e) => eprintln!("✗ Failed to render grid: {e}"),
    }
}

fn report(controller: &Controller<FileStore>, outcome: &Outcome) {
    match outcome {
        Outcome::Toggled { code, toggled } => {
            let name = controller.catalog().get(code).map_or("", |c| c.name.as_str());
            match toggled {
                Toggled::Completed => println!("✓ {code} {name}: completed"),
                Toggled::Uncompleted => println!("✓ {code} {name}: no longer completed"),
            }
        }
        Outcome::Blocked(reason) => println!("✗ {reason}"),
        Outcome::Ignored => println!("✗ Unknown course"),
        Outcome::Cleared => println!("✓ Cleared all completed courses"),
        Outcome::Highlighted => {}
    }
    match controller.focus() {
        Some(code) => {
            let grid = controller.grid();
            let prereqs: Vec<&str> = grid
                .cells()
                .filter(|c| c.highlight.prerequisite)
                .map(|c| c.code.as_str())
                .collect();
            let unlocks: Vec<&str> = grid
                .cells()
                .filter(|c| c.highlight.unlocks)
                .map(|c| c.code.as_str())
                .collect();
            println!(
                "  [{code}] prerequisites: {} | unlocks: {}",
                if prereqs.is_empty() { "-".to_string() } else { prereqs.join(", ") },
                if unlocks.is_empty() { "-".to_string() } else { unlocks.join(", ") }
            );
        }
        None => println!("  (nothing selected)"),
    }
}

/// Run the event loop until `quit` or end of input.
pub fn run(config: &Config) -> i32 {
    let mut controller = match open_controller(config) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return 1;
        }
    };

    print_grid(&controller);
    println!("\nType 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("malla> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("Failed to read input: {e}");
                return 1;
            }
        }

        let input = match parse_line(&line) {
            Ok(input) => input,
            Err(msg) => {
                println!("✗ {msg}");
                continue;
            }
        };
        debug!("Input: {input:?}");

        match input {
            Input::Nothing => {}
            Input::Quit => break,
            Input::Help => println!("{HELP}"),
            Input::Show => print_grid(&controller),
            Input::Event(Event::ClearAll)
                if !confirm("Are you sure you want to clear all completed courses?") =>
            {
                println!("✗ Clear cancelled");
            }
            Input::Event(event) => match controller.dispatch(event) {
                Ok(outcome) => report(&controller, &outcome),
                Err(e) => {
                    error!("{e}");
                    println!("✗ {e}");
                }
            },
        }
    }
    0
}
