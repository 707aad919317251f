use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tactica_evaluator::behavior_weights::Weight;
use tactica_training::Checkpoint;

/// A saved weight vector together with how and when it was produced.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalibrationRecord {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    /// Objective value of the checkpoint; absent for untrained vectors
    pub fitness: Option<f32>,
    pub checkpoint: Checkpoint,
}

impl CalibrationRecord {
    pub fn new(name: impl Into<String>, fitness: Option<f32>, checkpoint: Checkpoint) -> Self {
        Self {
            name: name.into(),
            saved_at: Utc::now(),
            fitness,
            checkpoint,
        }
    }

    pub fn print_summary(&self) {
        eprintln!("  Name: {}", self.name);
        eprintln!("  Saved at: {}", self.saved_at);
        if let Some(fitness) = self.fitness {
            eprintln!("  Fitness: {fitness:.3}");
        }
        let weights = self.checkpoint.to_weights();
        for weight in Weight::ALL {
            eprintln!("  {:>22}: {:.3}", weight.name(), weights.weight(weight));
        }
    }
}

/// Any file that carries a checkpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CheckpointDocument {
    Record(CalibrationRecord),
    Bare(Checkpoint),
}

impl CheckpointDocument {
    pub fn checkpoint(&self) -> &Checkpoint {
        match self {
            CheckpointDocument::Record(record) => &record.checkpoint,
            CheckpointDocument::Bare(checkpoint) => checkpoint,
        }
    }
}
