//! DistilBERT sequence classifier on candle.
//!
//! Infrastructure implementation of [`BaseClassifier`]. The model is loaded
//! lazily, at most once per process:
//!
//! 1. `config.json`, `tokenizer.json` and `model.safetensors` from the local
//!    model directory, downloading the base model from the Hugging Face hub
//!    into that directory when any file is missing
//! 2. fine-tuned safetensors merged on top, non-strictly (mismatched keys are
//!    logged, not fatal)
//! 3. classification head weights that are still missing are zero-filled
//!
//! Inference runs on the blocking thread pool.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::distilbert::{Config as DistilBertConfig, DistilBertModel, DTYPE};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokenizers::{Tokenizer, TruncationParams};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::{BaseClassifier, ProgressLog};

const MAX_SEQUENCE_LENGTH: usize = 512;
const NUM_LABELS: usize = 2;
const MODEL_FILES: [&str; 3] = ["config.json", "tokenizer.json", "model.safetensors"];

/// Masked-LM weights shipped with the base checkpoint but unused here.
const LM_HEAD_PREFIX: &str = "vocab_";

/// Where the classifier finds its weights.
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub model_dir: PathBuf,
    pub fine_tuned_path: PathBuf,
    pub base_model_id: String,
}

struct LoadedModel {
    tokenizer: Tokenizer,
    encoder: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
}

pub struct DistilBertClassifier {
    settings: ClassifierSettings,
    device: Device,
    progress: Option<Arc<ProgressLog>>,
    model: OnceCell<Arc<LoadedModel>>,
}

impl DistilBertClassifier {
    /// Create the classifier and pick the device. Weights are not read yet.
    pub fn new(settings: ClassifierSettings, progress: Option<Arc<ProgressLog>>) -> Self {
        let device = Device::cuda_if_available(0).unwrap_or_else(|e| {
            warn!(error = %e, "CUDA unavailable, using CPU");
            Device::Cpu
        });
        info!(device = device_label(&device), "Classifier device selected");

        Self {
            settings,
            device,
            progress,
            model: OnceCell::new(),
        }
    }

    async fn loaded(&self) -> Result<Arc<LoadedModel>> {
        self.model
            .get_or_try_init(|| async {
                let settings = self.settings.clone();
                let device = self.device.clone();
                let progress = self.progress.clone();

                let model = tokio::task::spawn_blocking(move || {
                    LoadedModel::load(&settings, &device, progress.as_deref())
                })
                .await
                .context("Model loading task failed")??;

                Ok::<_, anyhow::Error>(Arc::new(model))
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl BaseClassifier for DistilBertClassifier {
    async fn probabilities(&self, text: &str) -> Result<[f32; 2]> {
        let model = self.loaded().await?;
        let device = self.device.clone();
        let text = text.to_string();

        tokio::task::spawn_blocking(move || model.infer(&text, &device))
            .await
            .context("Inference task failed")?
    }

    async fn ensure_loaded(&self) -> Result<()> {
        self.loaded().await.map(|_| ())
    }

    fn device_name(&self) -> String {
        device_label(&self.device).to_string()
    }
}

impl LoadedModel {
    fn load(
        settings: &ClassifierSettings,
        device: &Device,
        progress: Option<&ProgressLog>,
    ) -> Result<Self> {
        ensure_model_files(settings, progress)?;
        let dir = &settings.model_dir;

        let raw_config: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.join("config.json"))
                .context("Failed to read model config")?,
        )
        .context("Model config is not valid JSON")?;
        let dim = raw_config
            .get("dim")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| anyhow!("Model config has no `dim`"))? as usize;
        let config: DistilBertConfig =
            serde_json::from_value(raw_config).context("Unsupported model config")?;

        let mut tokenizer = Tokenizer::from_file(dir.join("tokenizer.json"))
            .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;
        tokenizer.with_padding(None);

        let mut tensors = candle_core::safetensors::load(dir.join("model.safetensors"), device)
            .context("Failed to read base weights")?;

        if settings.fine_tuned_path.exists() {
            let fine_tuned = candle_core::safetensors::load(&settings.fine_tuned_path, device)
                .context("Failed to read fine-tuned weights")?;
            let (missing, unexpected) = merge_weights(&mut tensors, fine_tuned);
            if !missing.is_empty() || !unexpected.is_empty() {
                warn!(
                    missing = ?missing,
                    unexpected = ?unexpected,
                    "Fine-tuned weights do not match the model exactly"
                );
            }
            info!(path = %settings.fine_tuned_path.display(), "Loaded fine-tuned weights");
        } else {
            warn!(
                path = %settings.fine_tuned_path.display(),
                "No fine-tuned weights found, predictions come from the base model"
            );
        }

        let filled = fill_missing_head(&mut tensors, dim, device)?;
        if !filled.is_empty() {
            warn!(keys = ?filled, "Classification head weights missing, zero-initialised");
        }

        let vb = VarBuilder::from_tensors(tensors, DTYPE, device);
        let encoder = DistilBertModel::load(vb.clone(), &config)
            .context("Failed to build DistilBERT encoder")?;
        let pre_classifier = candle_nn::linear(dim, dim, vb.pp("pre_classifier"))?;
        let classifier = candle_nn::linear(dim, NUM_LABELS, vb.pp("classifier"))?;

        info!(dir = %dir.display(), "DistilBERT classifier loaded");
        Ok(Self {
            tokenizer,
            encoder,
            pre_classifier,
            classifier,
        })
    }

    fn infer(&self, text: &str, device: &Device) -> Result<[f32; 2]> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        let ids = encoding.get_ids();
        let seq_len = ids.len();
        debug!(tokens = seq_len, "Running classifier");

        let input_ids = Tensor::new(ids, device)?.unsqueeze(0)?;
        // Single unpadded sequence: nothing is masked
        let attention_mask = Tensor::zeros((seq_len, seq_len), DType::U8, device)?;

        let hidden = self.encoder.forward(&input_ids, &attention_mask)?;
        let pooled = hidden.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&pooled)?.relu()?;
        let logits = self.classifier.forward(&pooled)?;

        let probs = candle_nn::ops::softmax(&logits, D::Minus1)?
            .squeeze(0)?
            .to_dtype(DType::F32)?
            .to_vec1::<f32>()?;

        match probs.as_slice() {
            [fake, real] => Ok([*fake, *real]),
            other => Err(anyhow!("Expected 2 class probabilities, got {}", other.len())),
        }
    }
}

fn device_label(device: &Device) -> &'static str {
    if device.is_cuda() {
        "cuda"
    } else if device.is_metal() {
        "metal"
    } else {
        "cpu"
    }
}

/// Make sure the model directory holds every file, downloading the base model
/// when it does not.
fn ensure_model_files(settings: &ClassifierSettings, progress: Option<&ProgressLog>) -> Result<()> {
    let dir = &settings.model_dir;
    if MODEL_FILES.iter().all(|file| dir.join(file).is_file()) {
        debug!(dir = %dir.display(), "Using local model files");
        return Ok(());
    }

    warn!(
        dir = %dir.display(),
        model = %settings.base_model_id,
        "Local model missing, downloading base model"
    );
    download_base_model(&settings.base_model_id, dir)?;

    if let Some(progress) = progress {
        progress.record_or_warn("Downloaded base DistilBERT weights.");
    }
    Ok(())
}

fn download_base_model(model_id: &str, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create model directory {}", dir.display()))?;

    let api = hf_hub::api::sync::Api::new().context("Failed to initialise Hugging Face hub client")?;
    let repo = api.model(model_id.to_string());

    for file in MODEL_FILES {
        let cached = repo
            .get(file)
            .with_context(|| format!("Failed to download {} from {}", file, model_id))?;
        std::fs::copy(&cached, dir.join(file))
            .with_context(|| format!("Failed to persist {}", file))?;
    }

    info!(model = %model_id, dir = %dir.display(), "Base model downloaded");
    Ok(())
}

const HEAD_KEYS: [&str; 4] = [
    "pre_classifier.weight",
    "pre_classifier.bias",
    "classifier.weight",
    "classifier.bias",
];

fn head_shapes(dim: usize) -> [(&'static str, Vec<usize>); 4] {
    let [pre_weight, pre_bias, weight, bias] = HEAD_KEYS;
    [
        (pre_weight, vec![dim, dim]),
        (pre_bias, vec![dim]),
        (weight, vec![NUM_LABELS, dim]),
        (bias, vec![NUM_LABELS]),
    ]
}

/// Apply `fine_tuned` over `base` without requiring an exact key match.
///
/// Returns `(missing, unexpected)`: keys the classifier uses that the
/// fine-tuned file lacks, and fine-tuned keys the classifier has no slot for.
/// Unexpected keys and shape mismatches are not applied.
fn merge_weights(
    base: &mut HashMap<String, Tensor>,
    fine_tuned: HashMap<String, Tensor>,
) -> (Vec<String>, Vec<String>) {
    let known: BTreeSet<String> = base
        .keys()
        .cloned()
        .chain(HEAD_KEYS.iter().map(|k| k.to_string()))
        .collect();

    let missing = known
        .iter()
        .filter(|key| !key.starts_with(LM_HEAD_PREFIX) && !fine_tuned.contains_key(*key))
        .cloned()
        .collect();

    let mut unexpected = Vec::new();
    for (key, tensor) in fine_tuned {
        if !known.contains(&key) {
            unexpected.push(key);
            continue;
        }
        if let Some(existing) = base.get(&key) {
            if existing.dims() != tensor.dims() {
                warn!(
                    key = %key,
                    expected = ?existing.dims(),
                    found = ?tensor.dims(),
                    "Skipping fine-tuned tensor with mismatched shape"
                );
                continue;
            }
        }
        base.insert(key, tensor);
    }
    unexpected.sort();

    (missing, unexpected)
}

/// Insert zero tensors for absent classification-head weights. Returns the
/// keys that were filled.
fn fill_missing_head(
    tensors: &mut HashMap<String, Tensor>,
    dim: usize,
    device: &Device,
) -> Result<Vec<String>> {
    let mut filled = Vec::new();
    for (key, shape) in head_shapes(dim) {
        if !tensors.contains_key(key) {
            tensors.insert(key.to_string(), Tensor::zeros(shape, DTYPE, device)?);
            filled.push(key.to_string());
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tensor(shape: &[usize]) -> Tensor {
        Tensor::zeros(shape, DType::F32, &Device::Cpu).unwrap()
    }

    #[test]
    fn test_merge_reports_missing_and_unexpected() {
        let mut base = HashMap::from([
            ("distilbert.embeddings.word_embeddings.weight".to_string(), tensor(&[4, 2])),
            ("vocab_projector.bias".to_string(), tensor(&[4])),
        ]);
        let fine_tuned = HashMap::from([
            ("distilbert.embeddings.word_embeddings.weight".to_string(), Tensor::ones((4, 2), DType::F32, &Device::Cpu).unwrap()),
            ("classifier.weight".to_string(), tensor(&[2, 2])),
            ("optimizer.step".to_string(), tensor(&[1])),
        ]);

        let (missing, unexpected) = merge_weights(&mut base, fine_tuned);

        assert_eq!(
            missing,
            vec!["classifier.bias", "pre_classifier.bias", "pre_classifier.weight"]
        );
        assert_eq!(unexpected, vec!["optimizer.step"]);
        assert!(base.contains_key("classifier.weight"));
        assert!(!base.contains_key("optimizer.step"));

        let merged = base["distilbert.embeddings.word_embeddings.weight"]
            .sum_all()
            .unwrap()
            .to_scalar::<f32>()
            .unwrap();
        assert_eq!(merged, 8.0);
    }

    #[test]
    fn test_merge_skips_shape_mismatch() {
        let mut base = HashMap::from([("distilbert.w".to_string(), tensor(&[3]))]);
        let fine_tuned = HashMap::from([(
            "distilbert.w".to_string(),
            Tensor::ones(5, DType::F32, &Device::Cpu).unwrap(),
        )]);

        merge_weights(&mut base, fine_tuned);
        assert_eq!(base["distilbert.w"].dims(), &[3]);
    }

    #[test]
    fn test_fill_missing_head_zero_initialises() {
        let mut tensors = HashMap::from([("classifier.bias".to_string(), tensor(&[2]))]);
        let filled = fill_missing_head(&mut tensors, 8, &Device::Cpu).unwrap();

        assert_eq!(
            filled,
            vec!["pre_classifier.weight", "pre_classifier.bias", "classifier.weight"]
        );
        assert_eq!(tensors["pre_classifier.weight"].dims(), &[8, 8]);
        assert_eq!(tensors["classifier.weight"].dims(), &[2, 8]);
    }

    #[test]
    fn test_cpu_device_label() {
        assert_eq!(device_label(&Device::Cpu), "cpu");
    }
}
