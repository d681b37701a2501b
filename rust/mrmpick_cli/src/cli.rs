use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Path to the JSON file with the transition groups (will over-write the config file)
    #[arg(short, long)]
    pub input_file: Option<PathBuf>,

    /// Path to the output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also write the traces of every group next to its features
    #[arg(short, long)]
    pub full_output: bool,
}
