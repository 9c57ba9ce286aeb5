//! REPL (Read-Eval-Print Loop) for interactive refinement

use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use reedline::{
    DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal,
};
use refiner_application::{RefinementSession, SessionError, StepOutput};
use refiner_domain::Query;
use thiserror::Error;
use tracing::warn;

const HISTORY_SIZE: usize = 500;

#[derive(Error, Debug)]
pub enum ReplError {
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// What the user typed, once commands are told apart from choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Choice(String),
    Help,
    Queries,
    Quit,
    Empty,
}

/// Interactive refinement REPL
pub struct RefineRepl {
    session: RefinementSession,
    config: ReplConfig,
    category: Option<String>,
    options: Vec<String>,
}

impl RefineRepl {
    pub fn new(session: RefinementSession, config: ReplConfig) -> Self {
        Self {
            session,
            config,
            category: None,
            options: Vec::new(),
        }
    }

    /// Answers the category prompt up front.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The session, e.g. to read the chosen category after `run`
    pub fn session(&self) -> &RefinementSession {
        &self.session
    }

    /// Run the interactive REPL
    ///
    /// Returns the finished queries when the user chooses `完了`, or `None`
    /// when the session is abandoned.
    pub fn run(&mut self) -> Result<Option<Vec<(String, Query)>>, ReplError> {
        let mut line_editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("refine".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();
        let mut output = self.session.step(None)?;
        if let Some(category) = self.category.take() {
            output = match self.session.step(Some(&category)) {
                Ok(next) => next,
                Err(e) => {
                    println!("{} {}", "Error:".red().bold(), e);
                    output
                }
            };
        }

        loop {
            if let Some(queries) = self.show(output) {
                return Ok(Some(queries));
            }

            let line = match line_editor.read_line(&prompt)? {
                Signal::Success(buffer) => buffer,
                Signal::CtrlC => {
                    println!("^C");
                    output = self.session.step(None)?;
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    return Ok(None);
                }
            };

            output = match parse_input(&self.options, &line) {
                ReplInput::Empty => self.session.step(None)?,
                ReplInput::Quit => {
                    println!("Bye!");
                    return Ok(None);
                }
                ReplInput::Help => {
                    Self::print_help();
                    self.session.step(None)?
                }
                ReplInput::Queries => {
                    print!("{}", ConsoleFormatter::queries(self.session.queries()));
                    self.session.step(None)?
                }
                ReplInput::Choice(choice) => self.choose(&choice)?,
            };
        }
    }

    fn choose(&mut self, choice: &str) -> Result<StepOutput, ReplError> {
        let before = self.session.queries().len();
        match self.session.step(Some(choice)) {
            Ok(output) => {
                if self.config.show_queries && self.session.queries().len() != before {
                    print!("{}", ConsoleFormatter::queries(self.session.queries()));
                }
                Ok(output)
            }
            Err(SessionError::Completed) => Err(SessionError::Completed.into()),
            Err(e) => {
                println!("{} {}", "Error:".red().bold(), e);
                Ok(self.session.step(None)?)
            }
        }
    }

    /// Prints a prompt, or returns the queries when the session is complete.
    fn show(&mut self, output: StepOutput) -> Option<Vec<(String, Query)>> {
        match output {
            StepOutput::Prompt { title, options } => {
                print!("{}", ConsoleFormatter::prompt(&title, &options));
                self.options = options;
                None
            }
            StepOutput::Complete(queries) => Some(queries),
        }
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.config.history_file else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_SIZE, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History disabled: {}", e);
                editor
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│         attr-refiner - Refinement           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Type an option number or its label. /help for commands.");
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  <n> or <label>    - Choose an option");
        println!("  /queries, /q      - Show finished queries");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit      - Abandon the session");
        println!();
    }
}

/// Interprets a line: commands, option numbers (1-based) or labels.
pub fn parse_input(options: &[String], line: &str) -> ReplInput {
    let line = line.trim();
    match line {
        "" => ReplInput::Empty,
        "/quit" | "/exit" => ReplInput::Quit,
        "/help" | "/h" | "/?" => ReplInput::Help,
        "/queries" | "/q" => ReplInput::Queries,
        _ => {
            // a label that is itself a number ("2020") wins over the index
            if options.iter().any(|o| o == line) {
                return ReplInput::Choice(line.to_string());
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => {
                    ReplInput::Choice(options[n - 1].clone())
                }
                _ => ReplInput::Choice(line.to_string()),
            }
        }
    }
}
