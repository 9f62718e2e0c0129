//! Per-batch synthesis loop: drives batches through a synthesizer in order
//! and writes one numbered artifact per successful batch.

use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

use crate::text::Batch;
use crate::tts::{SpeechSynthesizer, SynthesisError};

/// Outcome of one batch: its 1-based index paired with either the artifact
/// written for it or the error that left that index without one.
#[derive(Debug)]
pub struct BatchReport {
    pub index: usize,
    pub outcome: Result<PathBuf, SynthesisError>,
}

/// Artifact path for a batch index.
pub fn artifact_path(out_dir: &Path, index: usize) -> PathBuf {
    out_dir.join(format!("speech_{}.mp3", index))
}

/// Run every batch through the synthesizer, in order.
///
/// A failed batch is logged and skipped; its index is never reused or
/// reassigned. Returns one report per batch, in batch order.
pub async fn run_batches(
    synthesizer: &dyn SpeechSynthesizer,
    batches: &[Batch],
    out_dir: &Path,
) -> Vec<BatchReport> {
    let pb = ProgressBar::new(batches.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut reports = Vec::with_capacity(batches.len());
    for batch in batches {
        let payload = batch.payload();
        let outcome = synthesize_batch(synthesizer, &payload, batch.index, out_dir).await;

        if let Err(ref e) = outcome {
            warn!("Batch {} failed: {} (payload: {:?})", batch.index, e, payload);
        }

        reports.push(BatchReport {
            index: batch.index,
            outcome,
        });
        pb.inc(1);
    }

    pb.finish_with_message("synthesis complete");
    reports
}

async fn synthesize_batch(
    synthesizer: &dyn SpeechSynthesizer,
    payload: &str,
    index: usize,
    out_dir: &Path,
) -> Result<PathBuf, SynthesisError> {
    let audio = synthesizer.synthesize(payload).await?;
    let path = artifact_path(out_dir, index);
    fs::write(&path, &audio)?;
    Ok(path)
}

/// Ordered paths of the artifacts that were produced: the manifest handed
/// to the assembler when both stages run in the same invocation.
pub fn artifact_manifest(reports: &[BatchReport]) -> Vec<PathBuf> {
    reports
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok().cloned())
        .collect()
}
