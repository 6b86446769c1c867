//! Command-line interface for batch map generation from PNG tilesets

use crate::algorithm::composer::{Discipline, EnabledLayers};
use crate::algorithm::executor::{MapGenerationParams, TileMapper};
use crate::io::configuration::{
    ATLAS_SUFFIX, DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_SEED, DEFAULT_TILE_SIZE,
    MAP_SUFFIX,
};
use crate::io::document::write_json;
use crate::io::error::{ComposerError, Result, invalid_parameter};
use crate::io::image::export_map_as_png;
use crate::io::progress::ProgressManager;
use crate::spatial::grid::Environment;
use crate::spatial::partition::GridSpec;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "tilecomposer")]
#[command(
    author,
    version,
    about = "Slice tilesets, classify tiles and compose procedural maps"
)]
/// Command-line arguments for the map generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG tileset or directory of tilesets
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Map width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_MAP_WIDTH)]
    pub width: usize,

    /// Map height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_MAP_HEIGHT)]
    pub height: usize,

    /// Edge length of extracted tiles in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Grid used to slice the tileset: `auto` or `<cols>x<rows>`
    #[arg(short, long, default_value = "auto", value_parser = parse_grid)]
    pub grid: GridSpec,

    /// Environment archetype
    #[arg(short, long, value_enum, default_value = "auto")]
    pub environment: Environment,

    /// Composition discipline
    #[arg(short, long, value_enum, default_value = "seeded")]
    pub discipline: Discipline,

    /// Leave floor cells without tiles
    #[arg(long)]
    pub no_floors: bool,

    /// Never place walls
    #[arg(long)]
    pub no_walls: bool,

    /// Never place decorations
    #[arg(long)]
    pub no_decorations: bool,

    /// Also write the extracted atlas as `<stem>_atlas.json`
    #[arg(short, long)]
    pub atlas: bool,

    /// Also render the map as `<stem>_map.png`
    #[arg(short, long)]
    pub preview: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log debug details
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_grid(text: &str) -> std::result::Result<GridSpec, String> {
    GridSpec::parse(text).map_err(|e| e.to_string())
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Layers selected by the `--no-*` flags
    pub const fn enabled_layers(&self) -> EnabledLayers {
        EnabledLayers {
            floors: !self.no_floors,
            walls: !self.no_walls,
            decorations: !self.no_decorations,
        }
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    mapper: TileMapper,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            mapper: TileMapper::default(),
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Paths of the tilesets that will be processed, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG file nor a readable
    /// directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG image",
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let read_error = |e| ComposerError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            };
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).map_err(read_error)? {
                let path = entry.map_err(read_error)?.path();
                if is_png(&path) && !is_generated(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = map_document_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let bytes = std::fs::read(input_path).map_err(|e| ComposerError::FileSystem {
            path: input_path.to_path_buf(),
            operation: "read tileset",
            source: e,
        })?;
        let name = input_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let atlas = self
            .mapper
            .extract_tiles(&name, &bytes, self.cli.grid, self.cli.tile_size)?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, "compose");
        }

        let params = MapGenerationParams {
            name: Some(name),
            width: self.cli.width,
            height: self.cli.height,
            tile_size: self.cli.tile_size,
            environment_type: self.cli.environment,
            discipline: self.cli.discipline,
            seed: Some(self.cli.seed),
            enabled_layers: self.cli.enabled_layers(),
            atlas_id: Some(atlas.id.clone()),
            tiles_by_type: None,
        };
        let map = self.mapper.generate_map(&params)?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, "export");
        }

        write_json(&map, &map_document_path(input_path))?;
        if self.cli.atlas {
            write_json(&atlas, &atlas_document_path(input_path))?;
        }
        if self.cli.preview {
            export_map_as_png(
                self.mapper.decoder(),
                &map,
                &atlas,
                &preview_path(input_path),
            )?;
        }

        info!(
            file = %input_path.display(),
            tiles = atlas.tiles.len(),
            environment = %map.environment_type,
            elapsed_ms = start_time.elapsed().as_millis(),
            "processed tileset"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

/// Previews written by earlier runs are not tilesets
fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(MAP_SUFFIX))
}

fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Where the map document for a tileset is written
pub fn map_document_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, MAP_SUFFIX, "json")
}

/// Where the atlas document for a tileset is written
pub fn atlas_document_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, ATLAS_SUFFIX, "json")
}

/// Where the map preview for a tileset is written
pub fn preview_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, MAP_SUFFIX, "png")
}
