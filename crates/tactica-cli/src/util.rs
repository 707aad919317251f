use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use tactica_core::UnitState;
use tactica_evaluator::behavior_weights::BehaviorWeights;
use tracing::debug;

use crate::model::{
    calibration_record::CheckpointDocument,
    scenario::{ReplayFile, Scenario},
};

/// Writes `value` as pretty-printed JSON to `path`, or to stdout when no path is given.
pub fn write_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let (mut writer, dest): (Box<dyn Write>, String) = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            (Box::new(BufWriter::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdout().lock()), "stdout".to_owned()),
    };

    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {dest}"))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to finish writing {dest}"))?;
    debug!(output = %dest, "wrote JSON output");

    Ok(())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;
    debug!(kind = file_kind, path = %path.display(), "read JSON file");

    Ok(value)
}

pub fn read_scenario_file<P>(path: P) -> anyhow::Result<Scenario>
where
    P: AsRef<Path>,
{
    read_json_file("scenario", path)
}

pub fn read_units_file<P>(path: P) -> anyhow::Result<Vec<UnitState>>
where
    P: AsRef<Path>,
{
    read_json_file("units", path)
}

pub fn read_replay_file<P>(path: P) -> anyhow::Result<ReplayFile>
where
    P: AsRef<Path>,
{
    read_json_file("replay", path)
}

/// Reads weights from either a calibration record or a bare checkpoint.
pub fn read_weights_file<P>(path: P) -> anyhow::Result<BehaviorWeights>
where
    P: AsRef<Path>,
{
    let document: CheckpointDocument = read_json_file("checkpoint", path)?;
    Ok(document.checkpoint().to_weights())
}

/// Returns a seeded generator, drawing a fresh seed when none is given.
pub fn seeded_rng(seed: Option<u64>) -> (Pcg32, u64) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    (Pcg32::seed_from_u64(seed), seed)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_write_json_to_file_ends_with_newline() {
        let path = std::env::temp_dir().join(format!("tactica-util-{}.json", std::process::id()));
        write_json(&[1, 2, 3], Some(&path)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(text.ends_with("]\n"));
        let values: Vec<u32> = serde_json::from_str(&text).unwrap();
        assert_eq!(values, [1, 2, 3]);
    }

    #[test]
    fn test_write_json_reports_unwritable_path() {
        let path = std::env::temp_dir().join("tactica-missing-dir").join("out.json");
        let err = write_json(&0, Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create output file"));
    }
}
