//! Cover composition: the decode → resize → darken → title → write pipeline.
//!
//! ```text
//! source.jpg ──decode──▶ RGB ──resize──▶ canvas ──blend(black)──▶ shaded
//!                                                        │
//!            "<stem> (Cover).jpg" ◀──encode── titled ◀──render title
//! ```
//!
//! [`compose_cover`] is the in-memory part and never touches the filesystem.
//! [`create_cover`] wraps it with decode/encode through an [`ImageBackend`].
//! [`plan_covers`] + [`create_covers`] drive a batch: every image/title pair
//! and every output name is validated before the first file is read, so a
//! bad invocation leaves no partial output behind.

use crate::config::CoverConfig;
use crate::imaging::{
    BackendError, BlendWeights, DimensionMismatch, ImageBackend, TextError, TextRenderer, blend,
    generate_overlay, render_centered_text, resize, rust_backend,
};
use crate::naming::cover_output_path;
use image::{Rgb, RgbImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverError {
    #[error("Precondition failed: {0}")]
    Precondition(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Dimensions(#[from] DimensionMismatch),
}

/// One image/title pair with its resolved output path.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverJob {
    pub source: PathBuf,
    pub title: String,
    pub output: PathBuf,
}

/// Progress notifications from [`create_covers`].
#[derive(Debug, Clone, PartialEq)]
pub enum CoverEvent {
    Started { index: usize, total: usize, source: PathBuf },
    Written { index: usize, total: usize, output: PathBuf },
}

/// Run the in-memory pipeline on an already decoded image.
pub fn compose_cover(
    renderer: &mut impl TextRenderer,
    source: &RgbImage,
    title: &str,
    weights: BlendWeights,
    config: &CoverConfig,
) -> Result<RgbImage, CoverError> {
    let (width, height) = (config.canvas.width, config.canvas.height);

    let resized = resize(source, width, height);
    let overlay = generate_overlay::<Rgb<u8>>(width, height);
    let shaded = blend(&overlay, &resized, weights)?;
    tracing::debug!(
        width,
        height,
        foreground = weights.foreground(),
        background = weights.background(),
        "shaded background"
    );

    let style = config.text_style();
    Ok(render_centered_text(
        renderer,
        &shaded,
        (width, height),
        title,
        &style,
    ))
}

/// Build a single cover from `source` and write it beside the source (or
/// into `destination`). Returns the written path.
pub fn create_cover(
    backend: &impl ImageBackend,
    renderer: &mut impl TextRenderer,
    source: &Path,
    title: &str,
    destination: Option<&Path>,
    weights: BlendWeights,
    config: &CoverConfig,
) -> Result<PathBuf, CoverError> {
    let job = plan_job(source, title, destination)?;
    run_job(backend, renderer, &job, weights, config)?;
    Ok(job.output)
}

fn plan_job(source: &Path, title: &str, destination: Option<&Path>) -> Result<CoverJob, CoverError> {
    let output = cover_output_path(source, destination).ok_or_else(|| {
        CoverError::Precondition(format!(
            "cannot derive a cover name for {}: it needs a file extension",
            source.display()
        ))
    })?;
    if !rust_backend::can_encode(&output) {
        return Err(CoverError::Precondition(format!(
            "no encoder for the extension of {}",
            output.display()
        )));
    }
    Ok(CoverJob {
        source: source.to_path_buf(),
        title: title.to_string(),
        output,
    })
}

fn run_job(
    backend: &impl ImageBackend,
    renderer: &mut impl TextRenderer,
    job: &CoverJob,
    weights: BlendWeights,
    config: &CoverConfig,
) -> Result<(), CoverError> {
    let source = backend.decode(&job.source)?;
    let cover = compose_cover(renderer, &source, &job.title, weights, config)?;
    backend.encode(&cover, &job.output)?;
    tracing::info!(output = %job.output.display(), title = %job.title, "wrote cover");
    Ok(())
}

/// Pair images with titles and derive every output path.
///
/// Fails before any I/O when the counts differ, nothing was given, a
/// source has no usable extension, or two sources map to the same cover.
pub fn plan_covers(
    images: &[PathBuf],
    titles: &[String],
    destination: Option<&Path>,
) -> Result<Vec<CoverJob>, CoverError> {
    if images.len() != titles.len() {
        return Err(CoverError::Precondition(format!(
            "got {} image(s) but {} title(s); each image needs exactly one title",
            images.len(),
            titles.len()
        )));
    }
    if images.is_empty() {
        return Err(CoverError::Precondition(
            "at least one image/title pair is required".to_string(),
        ));
    }
    let jobs: Vec<CoverJob> = images
        .iter()
        .zip(titles)
        .map(|(image, title)| plan_job(image, title, destination))
        .collect::<Result<_, _>>()?;

    let mut claimed: HashMap<&Path, &Path> = HashMap::new();
    for job in &jobs {
        if let Some(first) = claimed.insert(&job.output, &job.source) {
            return Err(CoverError::Precondition(format!(
                "{} and {} would both be written to {}",
                first.display(),
                job.source.display(),
                job.output.display()
            )));
        }
    }
    Ok(jobs)
}

/// Run planned jobs in order. The first failure aborts the batch.
pub fn create_covers(
    backend: &impl ImageBackend,
    renderer: &mut impl TextRenderer,
    jobs: &[CoverJob],
    weights: BlendWeights,
    config: &CoverConfig,
    mut on_event: impl FnMut(&CoverEvent),
) -> Result<Vec<PathBuf>, CoverError> {
    let total = jobs.len();
    let mut written = Vec::with_capacity(total);
    for (index, job) in jobs.iter().enumerate() {
        on_event(&CoverEvent::Started {
            index,
            total,
            source: job.source.clone(),
        });
        run_job(backend, renderer, job, weights, config)?;
        on_event(&CoverEvent::Written {
            index,
            total,
            output: job.output.clone(),
        });
        written.push(job.output.clone());
    }
    Ok(written)
}
