//! Terminal front end for a [`Session`].
//!
//! Each input line is one user action: moving the length slider, flipping a
//! checkbox, pressing "generate" or "copy". Rendering is done by [`Renderer`],
//! which subscribes to the session like any other observer.

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use tracing::{debug, warn};

use crate::{
    clipboard::Clipboard,
    err::{Error, Result},
    generator::{ConstraintUpdate, Constraints, Length, PasswordGenerator},
    session::{GeneratedPassword, Observer, Session},
};

const PROMPT: &str = "> ";

// Command

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Copy,
    /// `None` toggles.
    Digits(Option<bool>),
    Generate,
    Help,
    Length(Length),
    Quit,
    Set(ConstraintUpdate),
    Show,
    /// `None` toggles.
    Symbols(Option<bool>),
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        match name {
            "copy" | "c" => Ok(Self::Copy),
            "digits" | "d" => Ok(Self::Digits(optional_flag("digits", &args)?)),
            "generate" | "new" | "g" => Ok(Self::Generate),
            "help" | "h" | "?" => Ok(Self::Help),
            "length" | "l" => {
                let value = args.first().ok_or(Error::MissingArgument("length"))?;
                Ok(Self::Length(parse_length(value)?))
            }
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "set" => parse_update(&args).map(Self::Set),
            "show" | "s" => Ok(Self::Show),
            "symbols" | "y" => Ok(Self::Symbols(optional_flag("symbols", &args)?)),
            _ => Err(Error::UnknownCommand(line.trim().into())),
        }
    }
}

// Renderer

/// Prints the password every time the session changes.
pub struct Renderer<W: Write>(W);

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self(out)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> Observer for Renderer<W> {
    fn notify(&mut self, constraints: &Constraints, password: &GeneratedPassword) {
        if let Err(err) = render(&mut self.0, constraints, password) {
            warn!("failed to render password: {err}");
        }
    }
}

// Functions

/// Reads commands from `input` until `quit` or EOF.
pub fn run<GENERATOR, CLIPBOARD, R, W>(
    session: &mut Session<GENERATOR, CLIPBOARD>,
    input: R,
    out: &mut W,
) -> Result
where
    GENERATOR: PasswordGenerator,
    CLIPBOARD: Clipboard,
    R: BufRead,
    W: Write,
{
    prompt(out)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt(out)?;
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => {
                debug!("quit requested");
                return Ok(());
            }
            Ok(cmd) => execute(session, cmd, out)?,
            Err(err) => writeln!(out, "{err}")?,
        }
        prompt(out)?;
    }
    debug!("input closed");
    Ok(())
}

/// Prints one password and optionally copies it.
///
/// After a successful copy this waits for a line on `input`: on X11 the
/// clipboard contents are served by this process and vanish once it exits.
pub fn print_once<GENERATOR, CLIPBOARD, R, W>(
    session: &mut Session<GENERATOR, CLIPBOARD>,
    copy: bool,
    mut input: R,
    out: &mut W,
) -> Result
where
    GENERATOR: PasswordGenerator,
    CLIPBOARD: Clipboard,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", session.password().value())?;
    if !copy {
        return Ok(());
    }
    if session.copy().is_err() {
        writeln!(out, "Couldn't copy to clipboard.")?;
        return Ok(());
    }
    write!(out, "Copied. Press Enter to exit, the clipboard may be emptied afterwards.")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    debug!("one-shot session ended");
    Ok(())
}

pub fn execute<GENERATOR, CLIPBOARD, W>(
    session: &mut Session<GENERATOR, CLIPBOARD>,
    cmd: Command,
    out: &mut W,
) -> Result
where
    GENERATOR: PasswordGenerator,
    CLIPBOARD: Clipboard,
    W: Write,
{
    match cmd {
        Command::Copy => {
            if session.copy().is_err() {
                writeln!(out, "Couldn't copy to clipboard.")?;
            }
        }
        Command::Digits(Some(flag)) => {
            session.set_digits(flag);
        }
        Command::Digits(None) => {
            session.toggle_digits();
        }
        Command::Generate => session.regenerate(),
        Command::Help => print_usage(out)?,
        Command::Length(length) => {
            session.set_length(length);
        }
        Command::Quit => {}
        Command::Set(update) => {
            session.apply(update);
        }
        Command::Show => render(out, session.constraints(), session.password())?,
        Command::Symbols(Some(flag)) => {
            session.set_symbols(flag);
        }
        Command::Symbols(None) => {
            session.toggle_symbols();
        }
    }
    Ok(())
}

pub fn print_usage<W: Write>(out: &mut W) -> Result {
    write!(
        out,
        "Commands:\n\
            \tlength <6-24>                                   Set the password length\n\
            \tdigits [on|off]                                 Include digits (toggles without argument)\n\
            \tsymbols [on|off]                                Include symbols (toggles without argument)\n\
            \tset [length=N] [digits=on|off] [symbols=on|off] Change several options at once\n\
            \tnew | generate                                  Generate a new password\n\
            \tcopy                                            Copy the password to the clipboard\n\
            \tshow                                            Print the current password\n\
            \tquit | exit                                     Leave\n"
    )?;
    Ok(())
}

pub fn render<W: Write>(
    out: &mut W,
    constraints: &Constraints,
    password: &GeneratedPassword,
) -> Result {
    let mark = if password.copied() { "  [copied]" } else { "" };
    writeln!(out, "{}{mark}", password.value())?;
    writeln!(out, "({constraints})")?;
    out.flush()?;
    Ok(())
}

fn optional_flag(field: &'static str, args: &[&str]) -> Result<Option<bool>> {
    args.first().map(|value| parse_flag(field, value)).transpose()
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "y" | "1" => Ok(true),
        "off" | "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(Error::InvalidValue {
            field,
            value: value.into(),
        }),
    }
}

fn parse_length(value: &str) -> Result<Length> {
    let value: u32 = value.parse().map_err(|_| Error::InvalidValue {
        field: "length",
        value: value.into(),
    })?;
    Length::new(value)
}

fn parse_update(args: &[&str]) -> Result<ConstraintUpdate> {
    let mut update = ConstraintUpdate::default();
    for arg in args {
        let (key, value) = arg.split_once('=').ok_or(Error::InvalidValue {
            field: "set",
            value: (*arg).into(),
        })?;
        match key {
            "length" => update.length = Some(parse_length(value)?),
            "digits" => update.include_digits = Some(parse_flag("digits", value)?),
            "symbols" => update.include_symbols = Some(parse_flag("symbols", value)?),
            _ => {
                return Err(Error::InvalidValue {
                    field: "set",
                    value: (*arg).into(),
                })
            }
        }
    }
    if update.is_empty() {
        return Err(Error::MissingArgument("set"));
    }
    Ok(update)
}

fn prompt<W: Write>(out: &mut W) -> Result {
    write!(out, "{PROMPT}")?;
    out.flush()?;
    Ok(())
}

// Tests
