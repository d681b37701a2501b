/// Helper to generate and check input files.
///
/// `sample` writes a few synthetic transition groups to stdout, which is
/// handy to try out the picker settings. `parse` reads an input file and
/// prints a summary of it.
use clap::{
    Parser,
    Subcommand,
};
use mrmpick::{
    Chromatogram,
    PickerConfig,
    TransitionGroup,
};
use serde_json::to_string_pretty;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: SubCommands,
}

#[derive(Subcommand)]
enum SubCommands {
    Sample {
        #[arg(short, long, default_value_t = 3)]
        num_groups: usize,
    },
    /// Prints the default picking configuration.
    SampleConfig,
    Parse {
        #[arg(short, long)]
        input_file: String,
    },
}

fn gaussian_trace(apex: f64, height: f64, sigma: f64, seed: usize) -> Chromatogram {
    Chromatogram::from_pairs((0..300).map(|i| {
        let x = 1000.0 + 2.0 * i as f64;
        let signal = height * (-(x - apex).powi(2) / (2.0 * sigma * sigma)).exp();
        // Deterministic jitter so that the baseline is not flat.
        let noise = ((i * (7 + 2 * seed) + seed * 13) % 11) as f64 * 5.0;
        (x, signal + noise)
    }))
}

fn sample_groups(num_groups: usize) -> Vec<TransitionGroup> {
    (0..num_groups)
        .map(|g| {
            let apex = 1200.0 + 60.0 * g as f64;
            let mut group = TransitionGroup::new(format!("SAMPLEPEPTIDE{}/2", g));
            for k in 0..4 {
                let height = 10_000.0 / (k + 1) as f64;
                group.add_transition(
                    format!("{}_y{}", g, k + 3),
                    Some(400.0 + 100.0 * k as f64),
                    gaussian_trace(apex, height, 8.0, k),
                );
            }
            // A smaller interfering peak in one of the traces.
            group.add_transition(
                format!("{}_b2", g),
                Some(250.0),
                gaussian_trace(apex + 150.0, 3_000.0, 6.0, 5),
            );
            group.add_precursor(
                format!("{}_Precursor_i0", g),
                Some(600.0 + g as f64),
                gaussian_trace(apex, 50_000.0, 9.0, 6),
            );
            group
        })
        .collect()
}

fn parse_input(input_file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::open(input_file)?;
    let groups: Vec<TransitionGroup> = serde_json::from_reader(std::io::BufReader::new(file))?;
    for group in groups.iter() {
        group.check_consistent()?;
        println!(
            "{}: {} transitions, {} precursors, {} features",
            group.group_id,
            group.transitions.len(),
            group.precursors.len(),
            group.features.len()
        );
    }
    println!("Parsed {} groups", groups.len());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        SubCommands::Sample { num_groups } => {
            println!("{}", to_string_pretty(&sample_groups(*num_groups))?);
        }
        SubCommands::SampleConfig => {
            println!("{}", to_string_pretty(&PickerConfig::default())?);
        }
        SubCommands::Parse { input_file } => parse_input(input_file)?,
    }
    Ok(())
}
