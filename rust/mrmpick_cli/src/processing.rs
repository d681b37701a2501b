use super::config::OutputConfig;
use super::errors::CliError;
use indicatif::{
    ParallelProgressIterator,
    ProgressStyle,
};
use mrmpick::{
    MrmFeature,
    TransitionGroup,
    TransitionGroupPicker,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{
    Path,
    PathBuf,
};
use std::time::Instant;
use tracing::{
    debug,
    error,
    info,
};

/// One line of the feature table.
#[derive(Debug, Serialize)]
struct FeatureRow<'a> {
    group_id: &'a str,
    feature_id: u64,
    apex_position: f64,
    left: f64,
    right: f64,
    intensity: f64,
    total_xic: f64,
    peak_apices_sum: f64,
    quality: Option<f64>,
    outlier: Option<&'a str>,
    num_sub_features: usize,
}

impl<'a> From<&'a MrmFeature> for FeatureRow<'a> {
    fn from(f: &'a MrmFeature) -> Self {
        Self {
            group_id: &f.group_id,
            feature_id: f.id,
            apex_position: f.apex_position,
            left: f.left,
            right: f.right,
            intensity: f.intensity,
            total_xic: f.total_xic,
            peak_apices_sum: f.peak_apices_sum,
            quality: f.quality,
            outlier: f.outlier.as_deref(),
            num_sub_features: f.sub_features.len() + f.precursor_sub_features.len(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GroupFeatures<'a> {
    group_id: &'a str,
    features: &'a [MrmFeature],
}

fn io_error(e: impl ToString, path: &Path) -> CliError {
    CliError::Io {
        source: e.to_string(),
        path: Some(path.to_string_lossy().to_string()),
    }
}

pub fn read_groups(path: &PathBuf) -> Result<Vec<TransitionGroup>, CliError> {
    let file = std::fs::File::open(path).map_err(|e| io_error(e, path))?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| CliError::ParseError {
        msg: format!("{} in {}", e, path.display()),
    })
}

/// Picks every group in parallel. Returns the number of groups that failed;
/// their errors are logged and their features left empty.
pub fn pick_groups(picker: &TransitionGroupPicker, groups: &mut [TransitionGroup]) -> usize {
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    )
    .unwrap();
    groups
        .par_iter_mut()
        .progress_with_style(style)
        .map(|group| match picker.pick_transition_group(group) {
            Ok(()) => {
                debug!(
                    "Group {}: {} features",
                    group.group_id,
                    group.features.len()
                );
                0
            }
            Err(e) => {
                error!("Failed to pick group {}: {}", group.group_id, e);
                1
            }
        })
        .sum()
}

pub fn write_feature_table(groups: &[TransitionGroup], path: &Path) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| io_error(e, path))?;
    for feature in groups.iter().flat_map(|g| g.features.iter()) {
        writer.serialize(FeatureRow::from(feature))?;
    }
    writer.flush().map_err(|e| io_error(e, path))?;
    Ok(())
}

pub fn write_json(
    groups: &[TransitionGroup],
    path: &Path,
    full_output: bool,
) -> Result<(), CliError> {
    let file = std::fs::File::create(path).map_err(|e| io_error(e, path))?;
    let writer = std::io::BufWriter::new(file);
    let res = if full_output {
        serde_json::to_writer_pretty(writer, groups)
    } else {
        let slim: Vec<GroupFeatures> = groups
            .iter()
            .map(|g| GroupFeatures {
                group_id: &g.group_id,
                features: &g.features,
            })
            .collect();
        serde_json::to_writer_pretty(writer, &slim)
    };
    res.map_err(|e| io_error(e, path))
}

pub fn process_file(
    path: &PathBuf,
    picker: &TransitionGroupPicker,
    output: &OutputConfig,
) -> Result<(), CliError> {
    let start = Instant::now();
    let mut groups = read_groups(path)?;
    info!(
        "Loaded {} transition groups from {} in {:?}",
        groups.len(),
        path.display(),
        start.elapsed()
    );

    let pick_start = Instant::now();
    let num_failed = pick_groups(picker, &mut groups);
    let num_features: usize = groups.iter().map(|g| g.features.len()).sum();
    info!(
        "Picked {} features in {} groups ({} failed) in {:?}",
        num_features,
        groups.len(),
        num_failed,
        pick_start.elapsed()
    );

    let table_path = output.directory.join("features.tsv");
    write_feature_table(&groups, &table_path)?;
    let json_path = output.directory.join("features.json");
    write_json(&groups, &json_path, output.full_output)?;
    println!(
        "Wrote {} features to {} and {}",
        num_features,
        table_path.display(),
        json_path.display()
    );
    println!("Finished processing in {:?}", start.elapsed());
    Ok(())
}
