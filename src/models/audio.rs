//! Audio model (YAMNet) for sample embeddings

use anyhow::{Context, Result};
use ort::session::Session;
use std::path::Path;
use std::sync::Mutex;

use crate::config::{AUDIO_EMBEDDING_DIM, SAMPLE_RATE};
use crate::core::Embedding;
use crate::runtime::Provider;

use super::AudioEncoder;

pub struct AudioModel {
    session: Mutex<Session>,
}

impl AudioModel {
    pub fn load(model_path: &Path, provider: Provider) -> Result<Self> {
        let session = crate::runtime::create_session(model_path, provider)
            .context("Failed to load audio model")?;
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl AudioEncoder for AudioModel {
    fn embed_audio(&self, path: &Path) -> Result<Embedding> {
        let waveform = read_waveform(path)?;
        let len = waveform.len();
        let input = ort::value::Value::from_array((vec![len], waveform))?;

        let mut session = self.session.lock()
            .map_err(|_| anyhow::anyhow!("Audio model session poisoned"))?;
        let outputs = session.run(ort::inputs!["waveform" => input])?;

        let embeddings = outputs.get("embeddings")
            .context("No embeddings output found")?;
        let (shape, data) = embeddings.try_extract_tensor::<f32>()?;
        let dims: Vec<usize> = shape.iter().map(|&x| x as usize).collect();

        let pooled = match dims.as_slice() {
            [frames, dim] if *dim == AUDIO_EMBEDDING_DIM => frame_mean(data, *frames, *dim),
            [dim] if *dim == AUDIO_EMBEDDING_DIM => data.to_vec(),
            _ => anyhow::bail!("Unexpected audio model output shape {:?}", dims),
        };

        Ok(Embedding::new(pooled))
    }
}

/// Decode a mono 16 kHz WAV into samples in [-1, 1]
pub fn read_waveform(path: &Path) -> Result<Vec<f32>> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let spec = reader.spec();

    if spec.channels != 1 || spec.sample_rate != SAMPLE_RATE {
        anyhow::bail!(
            "{} must be mono {} Hz (got {} channels at {} Hz)",
            path.display(),
            SAMPLE_RATE,
            spec.channels,
            spec.sample_rate
        );
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<f32>, _>>()?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<f32>, _>>()?,
    };

    if samples.is_empty() {
        anyhow::bail!("{} contains no samples", path.display());
    }
    Ok(samples)
}

/// Average per-frame embeddings over time
pub(crate) fn frame_mean(data: &[f32], frames: usize, dim: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; dim];
    for frame in data.chunks_exact(dim).take(frames) {
        for (acc, value) in pooled.iter_mut().zip(frame) {
            *acc += value;
        }
    }
    if frames > 0 {
        pooled.iter_mut().for_each(|v| *v /= frames as f32);
    }
    pooled
}
