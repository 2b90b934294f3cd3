use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Result, TelopError};
use crate::session::Session;
use crate::style::StyleConfig;
use crate::subtitle::{SubtitleFormat, write_document};
use crate::transcript::Transcript;

pub struct Workflow {
    config: Config,
    style: StyleConfig,
}

impl Workflow {
    pub fn new(config: Config) -> Result<Self> {
        let style = config.style.to_style_config()?;

        Ok(Self { config, style })
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Render one transcript into the configured output file names
    pub async fn render_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Option<Q>,
    ) -> Result<Vec<PathBuf>> {
        let input_path = input_path.as_ref();
        info!("Rendering subtitles for: {}", input_path.display());

        // Create output directory if it doesn't exist
        let output_dir = resolve_output_dir(input_path, output_dir)?;
        fs::create_dir_all(&output_dir).await?;

        // Load the transcript into a fresh session
        let mut session = Session::new();
        self.load_into(&mut session, input_path).await?;

        // Render and write the enabled formats
        let output = &self.config.output;
        self.write_session(&session, |format| output_dir.join(output.file_name(format)))
            .await
    }

    /// Render every `*.json` transcript below `input_dir` into `<stem>.srt` / `<stem>.ass`.
    /// Subdirectories are mirrored under `output_dir` so equal stems never collide.
    pub async fn render_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Option<Q>,
    ) -> Result<Vec<PathBuf>> {
        let input_dir = input_dir.as_ref();
        info!("Rendering directory: {}", input_dir.display());

        if !input_dir.is_dir() {
            return Err(TelopError::Config("Input path is not a directory".to_string()));
        }

        // Determine output directory
        let output_dir = match output_dir {
            Some(dir) => dir.as_ref().to_path_buf(),
            None => input_dir.to_path_buf(),
        };
        fs::create_dir_all(&output_dir).await?;

        // Find transcript files
        let mut transcripts: Vec<PathBuf> = WalkDir::new(input_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            })
            .map(|e| e.path().to_path_buf())
            .collect();
        transcripts.sort();

        info!("Found {} transcripts to render", transcripts.len());

        let pb = ProgressBar::new(transcripts.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut written = Vec::new();
        let mut session = Session::new();

        for transcript_path in transcripts {
            let stem = transcript_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "subtitles".to_string());
            pb.set_message(stem.clone());

            // Mirror the transcript's subdirectory under the output directory
            let target_dir = match transcript_path.parent().and_then(|p| p.strip_prefix(input_dir).ok()) {
                Some(relative) => output_dir.join(relative),
                None => output_dir.clone(),
            };

            let result = match self.load_into(&mut session, &transcript_path).await {
                Ok(()) => match fs::create_dir_all(&target_dir).await {
                    Ok(()) => {
                        self.write_session(&session, |format| {
                            target_dir.join(format!("{}.{}", stem, format.extension()))
                        })
                        .await
                    }
                    Err(e) => Err(e.into()),
                },
                Err(e) => Err(e),
            };

            match result {
                Ok(paths) => {
                    info!("Successfully rendered: {}", transcript_path.display());
                    written.extend(paths);
                }
                Err(e) => warn!("Failed to render {}: {}", transcript_path.display(), e),
            }

            session.reset();
            pb.inc(1);
        }

        pb.finish_with_message("done");
        Ok(written)
    }

    async fn load_into(&self, session: &mut Session, input_path: &Path) -> Result<()> {
        let transcript = Transcript::from_file(input_path).await?;
        session.load(input_path, transcript.segments);
        Ok(())
    }

    async fn write_session<F>(&self, session: &Session, path_for: F) -> Result<Vec<PathBuf>>
    where
        F: Fn(SubtitleFormat) -> PathBuf,
    {
        let documents = session.render(&self.style)?;

        let mut written = Vec::new();
        for &format in &self.config.output.formats {
            let path = path_for(format);
            write_document(documents.get(format), &path).await?;
            written.push(path);
        }

        Ok(written)
    }
}

fn resolve_output_dir<Q: AsRef<Path>>(input_path: &Path, output_dir: Option<Q>) -> Result<PathBuf> {
    match output_dir {
        Some(dir) => Ok(dir.as_ref().to_path_buf()),
        None => input_path
            .parent()
            .map(|p| {
                if p.as_os_str().is_empty() {
                    PathBuf::from(".")
                } else {
                    p.to_path_buf()
                }
            })
            .ok_or_else(|| TelopError::Config("Cannot determine output directory".to_string())),
    }
}
