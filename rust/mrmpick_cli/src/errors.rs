use mrmpick::MrmPickError;

#[derive(Debug)]
pub enum CliError {
    Config {
        source: String,
    },
    ParseError {
        msg: String,
    },
    Io {
        source: String,
        path: Option<String>,
    },
    Processing {
        group_id: Option<String>,
        source: String,
    },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config { source } => write!(f, "Error interpreting the config: {}", source),
            CliError::ParseError { msg } => write!(f, "Error parsing config: {}", msg),
            CliError::Io { source, path } => {
                if let Some(path) = path {
                    write!(f, "Error reading file {}: {}", path, source)
                } else {
                    write!(f, "Error reading file: {}", source)
                }
            }
            CliError::Processing { group_id, source } => match group_id {
                Some(id) => write!(f, "Error picking group {}: {}", id, source),
                None => write!(f, "Error picking: {}", source),
            },
        }
    }
}

impl From<MrmPickError> for CliError {
    fn from(e: MrmPickError) -> Self {
        match e {
            MrmPickError::ConfigError(e) => CliError::Config {
                source: e.to_string(),
            },
            other => CliError::Processing {
                group_id: None,
                source: other.to_string(),
            },
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        CliError::Io {
            source: e.to_string(),
            path: None,
        }
    }
}
