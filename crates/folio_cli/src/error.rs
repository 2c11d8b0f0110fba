use folio_core::{CacheError, ConfigError, DbError, EditorError, LoggingError, SourceError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Top-level command failure, printed as `error: ...`.
#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Logging(LoggingError),
    Db(DbError),
    Cache(CacheError),
    Source(SourceError),
    Editor(EditorError),
    Io(std::io::Error),
    Usage(String),
}

pub type CliResult<T> = Result<T, CliError>;

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Cache(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Editor(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Usage(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Cache(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Editor(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Usage(_) => None,
        }
    }
}

macro_rules! impl_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for CliError {
                fn from(value: $source) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    ConfigError => Config,
    LoggingError => Logging,
    DbError => Db,
    CacheError => Cache,
    SourceError => Source,
    EditorError => Editor,
    std::io::Error => Io,
);
