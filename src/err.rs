// Types

pub type Result<VALUE = ()> = std::result::Result<VALUE, Error>;

// Error

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error("i/o error: {0}")]
    Io(
        #[from]
        #[source]
        std::io::Error,
    ),
    #[error("invalid value `{value}` for `{field}`")]
    InvalidValue { field: &'static str, value: String },
    #[error("length must be between 6 and 24, got {0}")]
    LengthOutOfRange(u32),
    #[error("missing argument for `{0}`")]
    MissingArgument(&'static str),
    #[error("settings error: {0}")]
    Settings(
        #[from]
        #[source]
        serde_json::Error,
    ),
    #[error("unknown command `{0}`, try `help`")]
    UnknownCommand(String),
}
