//! Sentence encoder (MiniLM) for query and class-anchor embeddings

use anyhow::{Context, Result};
use ort::session::Session;
use std::path::Path;
use std::sync::Mutex;
use tokenizers::Tokenizer;

use crate::config::TEXT_EMBEDDING_DIM;
use crate::core::Embedding;
use crate::runtime::Provider;

use super::TextEncoder;

pub struct TextModel {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl TextModel {
    pub fn load(model_path: &Path, tokenizer_path: &Path, provider: Provider) -> Result<Self> {
        let session = crate::runtime::create_session(model_path, provider)
            .context("Failed to load text model")?;

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }
}

impl TextEncoder for TextModel {
    fn embed_text(&self, text: &str) -> Result<Embedding> {
        let encoding = self.tokenizer.encode(text, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&x| x as i64).collect();
        let mask: Vec<i64> = encoding.get_attention_mask().iter().map(|&x| x as i64).collect();
        let type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&x| x as i64).collect();
        let shape = vec![1, input_ids.len()];

        let ids_input = ort::value::Value::from_array((shape.clone(), input_ids))?;
        let mask_input = ort::value::Value::from_array((shape.clone(), mask.clone()))?;
        let type_input = ort::value::Value::from_array((shape, type_ids))?;

        let mut session = self.session.lock()
            .map_err(|_| anyhow::anyhow!("Text model session poisoned"))?;
        let outputs = session.run(ort::inputs![
            "input_ids" => ids_input,
            "attention_mask" => mask_input,
            "token_type_ids" => type_input
        ])?;

        let hidden = outputs.get("last_hidden_state")
            .context("No last_hidden_state output found")?;
        let (shape, data) = hidden.try_extract_tensor::<f32>()?;
        let dims: Vec<usize> = shape.iter().map(|&x| x as usize).collect();

        Ok(Embedding::new(pool_hidden(&dims, data, &mask)?))
    }
}

/// Reduce the model output to one sentence vector
pub(crate) fn pool_hidden(dims: &[usize], data: &[f32], mask: &[i64]) -> Result<Vec<f32>> {
    let pooled = match dims {
        [1, seq, dim] => {
            let tokens = data.get(..seq * dim)
                .with_context(|| format!("Text model output shorter than shape {:?}", dims))?;
            mean_pool(tokens, *seq, *dim, mask)
        }
        [1, dim] => data.get(..*dim)
            .with_context(|| format!("Text model output shorter than shape {:?}", dims))?
            .to_vec(),
        _ => anyhow::bail!("Unexpected text model output shape {:?}", dims),
    };

    if pooled.len() != TEXT_EMBEDDING_DIM {
        anyhow::bail!("Expected a {}-dim text embedding, got {}", TEXT_EMBEDDING_DIM, pooled.len());
    }
    Ok(pooled)
}

/// Average token states, counting only positions the attention mask keeps
pub(crate) fn mean_pool(data: &[f32], seq: usize, dim: usize, mask: &[i64]) -> Vec<f32> {
    let mut pooled = vec![0.0f32; dim];
    let mut kept = 0usize;

    for t in 0..seq {
        if mask.get(t).copied().unwrap_or(1) == 0 {
            continue;
        }
        kept += 1;
        for (j, value) in pooled.iter_mut().enumerate() {
            *value += data[t * dim + j];
        }
    }

    if kept > 0 {
        pooled.iter_mut().for_each(|v| *v /= kept as f32);
    }
    pooled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_pool_skips_masked_tokens() {
        // Three tokens of dim 2, last one is padding
        let data = [1.0, 2.0, 3.0, 4.0, 100.0, 100.0];
        let pooled = mean_pool(&data, 3, 2, &[1, 1, 0]);
        assert_eq!(pooled, vec![2.0, 3.0]);
    }

    #[test]
    fn pooled_output_passes_through() {
        let data = vec![0.5f32; TEXT_EMBEDDING_DIM];
        let pooled = pool_hidden(&[1, TEXT_EMBEDDING_DIM], &data, &[]).unwrap();
        assert_eq!(pooled, data);
    }

    #[test]
    fn short_output_is_an_error() {
        let data = vec![0.5f32; 10];
        assert!(pool_hidden(&[1, TEXT_EMBEDDING_DIM], &data, &[]).is_err());
        assert!(pool_hidden(&[1, 4, TEXT_EMBEDDING_DIM], &data, &[1, 1, 1, 1]).is_err());
    }

    #[test]
    fn wrong_width_is_an_error() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let err = pool_hidden(&[1, 2, 2], &data, &[1, 1]).unwrap_err();
        assert!(err.to_string().contains("384"));
    }
}
