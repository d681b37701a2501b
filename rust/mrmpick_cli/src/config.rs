use mrmpick::PickerConfig;
use serde::{
    Deserialize,
    Serialize,
};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::errors::CliError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub input: Option<InputConfig>,
    #[serde(default)]
    pub picking: PickerConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum InputConfig {
    /// A JSON array of transition groups.
    #[serde(rename = "json")]
    Json { path: PathBuf },
}

impl InputConfig {
    pub fn path(&self) -> &PathBuf {
        match self {
            InputConfig::Json { path } => path,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub directory: PathBuf,
    #[serde(default)]
    pub full_output: bool,
}

impl Config {
    pub fn from_file(path: &PathBuf) -> Result<Self, CliError> {
        let file = std::fs::File::open(path).map_err(|e| CliError::Io {
            source: e.to_string(),
            path: Some(path.to_string_lossy().to_string()),
        })?;
        serde_json::from_reader(file).map_err(|e| CliError::ParseError { msg: e.to_string() })
    }

    /// Command line arguments take precedence over the config file.
    pub fn apply_cli_args(&mut self, args: &Cli) -> Result<(), CliError> {
        if let Some(input_file) = &args.input_file {
            self.input = Some(InputConfig::Json {
                path: input_file.clone(),
            });
        }
        if let Some(output_dir) = &args.output_dir {
            self.output = Some(OutputConfig {
                directory: output_dir.clone(),
                full_output: args.full_output,
            });
        } else if let Some(output) = self.output.as_mut() {
            output.full_output |= args.full_output;
        }

        if self.input.is_none() {
            return Err(CliError::Config {
                source: "No input provided, please provide one in either the config file or with the --input-file flag".to_string(),
            });
        }
        if self.output.is_none() {
            return Err(CliError::Config {
                source: "No output directory provided, please provide one in either the config file or with the --output-dir flag".to_string(),
            });
        }
        self.picking
            .validate()
            .map_err(|e| CliError::Config { source: e.to_string() })
    }
}
