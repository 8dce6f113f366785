use tracing::{debug, info, instrument, warn};

use crate::{
    clipboard::Clipboard,
    err::Result,
    generator::{ConstraintUpdate, Constraints, Length, PasswordGenerator},
};

// Traits

/// Receives the session state after every completed update.
#[cfg_attr(test, mockall::automock)]
pub trait Observer {
    fn notify(&mut self, constraints: &Constraints, password: &GeneratedPassword);
}

// GeneratedPassword

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedPassword {
    value: String,
    copied: bool,
}

impl GeneratedPassword {
    fn new(value: String) -> Self {
        Self {
            value,
            copied: false,
        }
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

// Session

pub struct Session<GENERATOR: PasswordGenerator, CLIPBOARD: Clipboard> {
    clipboard: CLIPBOARD,
    constraints: Constraints,
    generator: GENERATOR,
    observers: Vec<Box<dyn Observer>>,
    password: GeneratedPassword,
}

impl<GENERATOR: PasswordGenerator, CLIPBOARD: Clipboard> Session<GENERATOR, CLIPBOARD> {
    /// Starts a session and generates its first password.
    pub fn new(constraints: Constraints, generator: GENERATOR, clipboard: CLIPBOARD) -> Self {
        let password = GeneratedPassword::new(generator.generate(&constraints));
        debug!(%constraints, "session started");
        Self {
            clipboard,
            constraints,
            generator,
            observers: vec![],
            password,
        }
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn password(&self) -> &GeneratedPassword {
        &self.password
    }

    /// Registers `observer` and immediately hands it the current state.
    pub fn subscribe(&mut self, mut observer: Box<dyn Observer>) {
        observer.notify(&self.constraints, &self.password);
        self.observers.push(observer);
    }

    /// Applies one combined change. Regenerates once if anything changed.
    #[instrument(skip(self))]
    pub fn apply(&mut self, update: ConstraintUpdate) -> bool {
        if !self.constraints.apply(update) {
            debug!("constraints unchanged");
            return false;
        }
        info!(constraints = %self.constraints, "constraints changed");
        self.replace_password();
        true
    }

    pub fn set_length(&mut self, length: Length) -> bool {
        self.apply(ConstraintUpdate {
            length: Some(length),
            ..Default::default()
        })
    }

    pub fn set_digits(&mut self, include_digits: bool) -> bool {
        self.apply(ConstraintUpdate {
            include_digits: Some(include_digits),
            ..Default::default()
        })
    }

    pub fn set_symbols(&mut self, include_symbols: bool) -> bool {
        self.apply(ConstraintUpdate {
            include_symbols: Some(include_symbols),
            ..Default::default()
        })
    }

    pub fn toggle_digits(&mut self) -> bool {
        self.set_digits(!self.constraints.include_digits)
    }

    pub fn toggle_symbols(&mut self) -> bool {
        self.set_symbols(!self.constraints.include_symbols)
    }

    /// Generates a new password with the current constraints.
    #[instrument(skip(self))]
    pub fn regenerate(&mut self) {
        debug!("regeneration requested");
        self.replace_password();
    }

    /// Writes the current password to the clipboard. `copied` is only set once the write succeeded.
    #[instrument(skip(self))]
    pub fn copy(&mut self) -> Result {
        if let Err(err) = self.clipboard.write(&self.password.value) {
            warn!("failed to copy password: {err}");
            return Err(err);
        }
        self.password.copied = true;
        info!("password copied");
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.notify(&self.constraints, &self.password);
        }
    }

    fn replace_password(&mut self) {
        // copied is reset by construction, together with the value
        self.password = GeneratedPassword::new(self.generator.generate(&self.constraints));
        self.notify();
    }
}

// Tests
