//! CLIP Image Embedder - Local inference through fastembed
//!
//! Loading the ONNX model is slow and blocking, so it happens once in the async
//! `create` factory. Inference runs on a dedicated thread that owns the model and
//! serves requests from a channel, which keeps the model out of any lock.

use async_trait::async_trait;
use fastembed::{ImageEmbedding, ImageEmbeddingModel, ImageInitOptions};
use tokio::sync::{mpsc, oneshot};

use art_deco::{Embedding, EmbeddingError, ImageEmbedder, ImageRef};

use super::DimensionGuard;
use crate::image_source::ImageLoader;

/// Requests for the inference thread
struct EmbedRequest {
    image_bytes: Vec<u8>,
    tx: oneshot::Sender<Result<Vec<f32>, EmbeddingError>>,
}

/// CLIP embedder running on the local machine
pub struct ClipImageEmbedder {
    sender: mpsc::Sender<EmbedRequest>,
    loader: ImageLoader,
    guard: DimensionGuard,
    model_name: String,
}

impl ClipImageEmbedder {
    /// Load CLIP ViT-B/32 and start the inference thread
    pub async fn create() -> Result<Self, EmbeddingError> {
        Self::with_model(ImageEmbeddingModel::ClipVitB32).await
    }

    /// Load a specific image model and start the inference thread
    pub async fn with_model(model: ImageEmbeddingModel) -> Result<Self, EmbeddingError> {
        let model_name = format!("{model:?}");
        tracing::info!(model = %model_name, "Loading image embedding model");

        let options = ImageInitOptions::new(model);
        let embedding = tokio::task::spawn_blocking(move || ImageEmbedding::try_new(options))
            .await
            .map_err(|e| EmbeddingError::Model(format!("Model loader stopped: {e}")))?
            .map_err(|e| EmbeddingError::Model(format!("Failed to load {model_name}: {e}")))?;

        let (tx, rx) = mpsc::channel(32);
        std::thread::Builder::new()
            .name("clip-embedder".to_string())
            .spawn(move || run_inference(embedding, rx))
            .map_err(|e| EmbeddingError::Model(format!("Failed to start inference thread: {e}")))?;

        tracing::info!(model = %model_name, "Image embedding model ready");

        Ok(Self {
            sender: tx,
            loader: ImageLoader::new(),
            guard: DimensionGuard::default(),
            model_name,
        })
    }
}

#[async_trait]
impl ImageEmbedder for ClipImageEmbedder {
    async fn embed(&self, image: &ImageRef) -> Result<Embedding, EmbeddingError> {
        let image_bytes = self.loader.load(image).await?;

        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EmbedRequest { image_bytes, tx })
            .await
            .map_err(|_| EmbeddingError::Model("Inference thread stopped".to_string()))?;

        let vector = rx
            .await
            .unwrap_or_else(|_| Err(EmbeddingError::Model("Inference thread stopped".to_string())))?;
        self.guard.check(&vector)?;

        tracing::debug!(
            model = %self.model_name,
            dimensions = vector.len(),
            "Local embedding generated"
        );

        Ok(Embedding::from_vector(&vector))
    }
}

fn run_inference(mut model: ImageEmbedding, mut rx: mpsc::Receiver<EmbedRequest>) {
    while let Some(request) = rx.blocking_recv() {
        let result = model
            .embed_bytes(&[request.image_bytes.as_slice()], None)
            .map_err(|e| EmbeddingError::Model(format!("Image inference failed: {e}")))
            .and_then(|mut vectors| {
                vectors
                    .pop()
                    .ok_or_else(|| EmbeddingError::Model("No embedding returned".to_string()))
            });
        let _ = request.tx.send(result);
    }
}

/// Parse a configured model name into a fastembed image model
pub fn parse_image_model(model_name: &str) -> Result<ImageEmbeddingModel, EmbeddingError> {
    match model_name.to_lowercase().as_str() {
        "clip-vit-base-patch32" | "clip-vit-b-32" | "clipvitb32" => Ok(ImageEmbeddingModel::ClipVitB32),
        "resnet50" | "resnet-50" => Ok(ImageEmbeddingModel::Resnet50),
        "unicom-vit-b16" => Ok(ImageEmbeddingModel::UnicomVitB16),
        "unicom-vit-b32" => Ok(ImageEmbeddingModel::UnicomVitB32),
        "nomic-embed-vision-v1.5" => Ok(ImageEmbeddingModel::NomicEmbedVisionV15),
        _ => Err(EmbeddingError::Model(format!(
            "Unknown image model: {model_name}"
        ))),
    }
}
