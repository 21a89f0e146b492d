use std::mem::take;

use crossterm::style::Stylize;

use super::builtins::{self, BuiltinAction};
use super::executable::{pipe, Executable, Sink, Source, Status};
use super::terminal::OutputProcessing;
use crate::errors::ShellError;
use crate::eval::{Operator, Tokens};
use crate::state::Configuration;

/// What the read-eval loop should do after a line has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading lines; carries the status of the last command that ran
    Continue(Status),
    /// The `exit` builtin was run
    Exit,
}

/// Runs the commands of a tokenized line, wiring pipes and redirections between them
pub struct Executor {
    show_errors: bool,
    short_circuit: bool,
}

impl Executor {
    pub fn new(config: &Configuration) -> Self {
        Self {
            show_errors: config.show_errors,
            short_circuit: config.short_circuit,
        }
    }

    /// Scans the tokens left to right, running each command as soon as the operator that ends it
    /// is reached
    /// An operator that is the last token of the line is treated as an ordinary word
    pub fn run(&self, tokens: &Tokens) -> Outcome {
        if tokens.is_empty() {
            return Outcome::Continue(Status::SUCCESS);
        }

        log::debug!("Running tokens: {:?}", tokens);
        let _terminal = OutputProcessing::suspend();
        let mut pipeline = Pipeline::new(self);
        let mut segment: Vec<&str> = Vec::new();
        let mut cursor = 0;

        while let Some(token) = tokens.get(cursor) {
            let at_end = tokens.get(cursor + 1).is_none();

            match Operator::parse(token) {
                Some(Operator::RedirectIn) => {
                    log::debug!("Input redirection is not supported, skipping `<`");
                }
                Some(Operator::And) if !at_end => {
                    let outcome = pipeline.finish(&take(&mut segment), Sink::Inherit);
                    match outcome {
                        Outcome::Exit => return outcome,
                        Outcome::Continue(status) if self.short_circuit && !status.success() => {
                            log::info!("Skipping the rest of the line after {:?}", status);
                            return outcome;
                        }
                        Outcome::Continue(_) => (),
                    }
                }
                Some(Operator::Pipe) if !at_end => pipeline.pipe(&take(&mut segment)),
                Some(Operator::RedirectOut) if !at_end => {
                    // The target is consumed along with the operator
                    cursor += 1;
                    let target = tokens.get(cursor).unwrap_or_default();
                    if let Outcome::Exit = pipeline.redirect(&take(&mut segment), target) {
                        return Outcome::Exit;
                    }
                }
                _ => segment.push(token),
            }

            cursor += 1;
        }

        pipeline.finish(&segment, Sink::Inherit)
    }

    // Prints and logs the error of a failed command
    fn report(&self, error: &ShellError) {
        log::warn!("{}", error);
        if self.show_errors {
            eprintln!("{}", error.to_string().red());
        }
    }
}

/// The state carried between the commands of one line
/// Producers writing into a pipe are only waited for once the command reading from them has
/// been spawned, so a full pipe can never stall the line
struct Pipeline<'a> {
    executor: &'a Executor,
    input: Source,
    producers: Vec<Executable>,
    status: Status,
}

impl<'a> Pipeline<'a> {
    fn new(executor: &'a Executor) -> Self {
        Self {
            executor,
            input: Source::Inherit,
            producers: Vec::new(),
            status: Status::SUCCESS,
        }
    }

    /// Starts a command whose output feeds the next command's input
    fn pipe(&mut self, argv: &[&str]) {
        // * An empty command passes the pending input straight on to the next command
        if argv.is_empty() {
            return;
        }

        let (read_end, write_end) = match pipe() {
            Ok(ends) => ends,
            Err(e) => return self.fail(e),
        };

        match Executable::spawn(argv, take(&mut self.input), Sink::Pipe(write_end)) {
            Ok(producer) => self.producers.push(producer),
            Err(e) => self.fail(e),
        }

        // * Even if the producer failed to start, its consumer reads from the (now empty) pipe
        // * rather than from the terminal
        self.input = Source::Pipe(read_end);
    }

    /// Runs a command with its output appended to `target`
    fn redirect(&mut self, argv: &[&str], target: &str) -> Outcome {
        if argv.is_empty() {
            return self.finish(argv, Sink::Inherit);
        }

        match Sink::append_to(target) {
            Ok(file) => self.finish(argv, file),
            Err(e) => {
                self.input = Source::Inherit;
                self.wait_producers();
                self.fail(e);
                Outcome::Continue(self.status)
            }
        }
    }

    /// Runs the last command of a pipeline and waits for the whole pipeline to complete
    fn finish(&mut self, argv: &[&str], output: Sink) -> Outcome {
        let input = take(&mut self.input);

        let Some(name) = argv.first() else {
            drop(input);
            self.wait_producers();
            return Outcome::Continue(self.status);
        };

        // Builtins must run in this process, which is only possible when nothing needs
        // to capture their output
        if let Some(builtin) = builtins::resolve(name).filter(|_| output.is_inherit()) {
            drop(input);
            self.wait_producers();
            return match builtin.run(argv) {
                Ok(BuiltinAction::Exit) => Outcome::Exit,
                Ok(BuiltinAction::Continue) => {
                    self.status = Status::SUCCESS;
                    Outcome::Continue(self.status)
                }
                Err(e) => {
                    self.fail(e);
                    Outcome::Continue(self.status)
                }
            };
        }

        let consumer = Executable::spawn(argv, input, output);
        self.wait_producers();
        match consumer.and_then(Executable::wait) {
            Ok(status) => self.status = status,
            Err(e) => self.fail(e),
        }

        Outcome::Continue(self.status)
    }

    // Waits for every producer in the order they were started
    fn wait_producers(&mut self) {
        for producer in self.producers.drain(..) {
            let name = producer.name().to_string();
            match producer.wait() {
                Ok(status) => log::debug!("Producer {} finished: {:?}", name, status),
                Err(e) => self.executor.report(&e),
            }
        }
    }

    fn fail(&mut self, error: ShellError) {
        self.executor.report(&error);
        self.status = Status::Exited(error.exit_code());
    }
}

impl Drop for Pipeline<'_> {
    fn drop(&mut self) {
        self.wait_producers();
    }
}
