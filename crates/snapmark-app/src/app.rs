//! Main application: load, replay, export.

use crate::error::{AppError, AppResult};
use crate::script::{parse_script, ScriptRunner};
use kurbo::Size;
use snapmark_core::{Editor, EditorConfig, EditorError, ImageDecoder, LoadOutcome, LoadPurpose};
use snapmark_render::{
    export_png_with, BlurSampling, GlyphOutlines, ImageCrateDecoder, RenderOptions, SkiaRenderer,
    SystemFonts,
};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Image to annotate.
    pub base_image: PathBuf,
    /// JSON script of editing steps.
    pub script: PathBuf,
    /// Where the annotated PNG is written.
    pub output: PathBuf,
    /// Optional editor configuration file.
    pub config: Option<PathBuf>,
    pub blur_sampling: BlurSampling,
}

/// What a finished run produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub canvas_size: Size,
    pub elements: usize,
    pub png_bytes: usize,
}

/// Main application state.
pub struct App {
    config: AppConfig,
    decoder: ImageCrateDecoder,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            decoder: ImageCrateDecoder,
        }
    }

    /// Run with the system's fonts.
    pub fn run(&self) -> AppResult<RunSummary> {
        self.run_with_fonts(SystemFonts::new())
    }

    /// Run with the given fonts for text measurement and drawing.
    pub fn run_with_fonts<M: GlyphOutlines>(&self, fonts: M) -> AppResult<RunSummary> {
        let editor_config = match &self.config.config {
            Some(path) => EditorConfig::load(path)?,
            None => EditorConfig::default(),
        };
        let mut editor = Editor::with_measure(editor_config, fonts);

        let canvas_size = self.load_base_image(&mut editor)?;
        log::info!("Canvas is {}x{}", canvas_size.width, canvas_size.height);

        let script = read(&self.config.script)?;
        let steps = parse_script(&String::from_utf8_lossy(&script))?;
        let base_dir = self.config.script.parent().unwrap_or(Path::new("."));
        ScriptRunner::new(&self.decoder, base_dir).run(&mut editor, &steps)?;

        let mut renderer = SkiaRenderer::new();
        let options = RenderOptions {
            blur_sampling: self.config.blur_sampling,
        };
        let png = export_png_with(&mut editor, &mut renderer, options)?;
        std::fs::write(&self.config.output, &png).map_err(|source| AppError::Write {
            path: self.config.output.clone(),
            source,
        })?;
        log::info!("Wrote {}", self.config.output.display());

        Ok(RunSummary {
            canvas_size: editor.canvas_size(),
            elements: editor.scene().len(),
            png_bytes: png.len(),
        })
    }

    fn load_base_image<M: GlyphOutlines>(&self, editor: &mut Editor<M>) -> AppResult<Size> {
        let path = &self.config.base_image;
        let bytes = read(path)?;
        let ticket = editor.begin_load(LoadPurpose::BaseImage);
        match editor.finish_load(ticket, self.decoder.decode(&bytes)) {
            Ok(LoadOutcome::BaseImage { canvas_size }) => Ok(canvas_size),
            Ok(_) => Ok(editor.canvas_size()),
            Err(EditorError::Decode(source)) => Err(AppError::Decode {
                path: path.clone(),
                source,
            }),
            Err(err) => Err(err.into()),
        }
    }
}

fn read(path: &Path) -> AppResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}
