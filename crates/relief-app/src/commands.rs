//! `relief` subcommands.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use relief_terrain::debug_viz::{DebugImage, render_biome_debug, render_surface_debug};
use relief_terrain::{Biome, BlockType, CHUNK_WIDTH, ChunkGenerator, ChunkResult};

use crate::app::App;
use crate::error::AppError;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize one chunk and print a summary of its columns.
    Chunk {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,
    },
    /// Render the biome map of a world rectangle to PNG.
    Biomes(RenderArgs),
    /// Render the surface heights of a world rectangle to PNG.
    Heights(RenderArgs),
    /// Pick a random position of a biome near a point.
    Locate {
        /// Biome name, e.g. `ice_mountains`.
        biome: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        x: i32,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        z: i32,
        /// Search radius in blocks.
        #[arg(long, default_value_t = 256)]
        radius: i32,
    },
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// West edge of the rectangle.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub x: i32,
    /// North edge of the rectangle.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub z: i32,
    #[arg(long, default_value_t = 512)]
    pub width: u32,
    #[arg(long, default_value_t = 512)]
    pub depth: u32,
    /// PNG file to write.
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(app: &App, command: Command) -> Result<(), AppError> {
    match command {
        Command::Chunk { x, z } => {
            let chunk = app.generator().generate_chunk(x, z);
            println!("{}", ChunkSummary::of(&chunk));
        }
        Command::Biomes(args) => {
            let image = render_biome_debug(&app.engine(), args.x, args.z, args.width, args.depth);
            write_png(&image, &args.output)?;
        }
        Command::Heights(args) => {
            let image = render_surface_debug(&app.engine(), args.x, args.z, args.width, args.depth);
            write_png(&image, &args.output)?;
        }
        Command::Locate {
            biome,
            x,
            z,
            radius,
        } => {
            let id = app
                .biomes()
                .registry()
                .lookup_by_name(&biome)
                .ok_or_else(|| AppError::UnknownBiome(biome.clone()))?;
            match app
                .biomes()
                .find_biome_position(x, z, radius, &[id], &mut rand::rng())?
            {
                Some(pos) => println!("{biome} at x={} z={}", pos.x, pos.y),
                None => println!("no {biome} within {radius} blocks of x={x} z={z}"),
            }
        }
    }
    Ok(())
}

/// Save an RGBA debug image as PNG.
pub fn write_png(image: &DebugImage, path: &Path) -> Result<(), AppError> {
    image::save_buffer(
        path,
        &image.pixels,
        image.width,
        image.height,
        image::ColorType::Rgba8,
    )
    .map_err(|source| AppError::ImageWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), width = image.width, height = image.height, "wrote image");
    Ok(())
}

/// Column statistics of one chunk.
#[derive(Debug, PartialEq, Eq)]
pub struct ChunkSummary {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub min_surface: u8,
    pub max_surface: u8,
    pub water_columns: usize,
    pub air_pockets: usize,
    pub biomes: BTreeMap<Biome, usize>,
}

impl ChunkSummary {
    pub fn of(chunk: &ChunkResult) -> Self {
        let (chunk_x, chunk_z) = chunk.coords();
        let surface = chunk.surface();
        let mut biomes = BTreeMap::new();
        for id in chunk.biomes() {
            if let Some(biome) = Biome::from_id(*id) {
                *biomes.entry(biome).or_insert(0) += 1;
            }
        }
        let mut water_columns = 0;
        let mut air_pockets = 0;
        for z in 0..CHUNK_WIDTH {
            for x in 0..CHUNK_WIDTH {
                let top = usize::from(chunk.surface_y(x, z));
                if chunk.block(x, top, z) == BlockType::Water {
                    water_columns += 1;
                }
                air_pockets += (1..top)
                    .filter(|&y| chunk.block(x, y, z) == BlockType::Air)
                    .count();
            }
        }
        Self {
            chunk_x,
            chunk_z,
            min_surface: surface.iter().copied().min().unwrap_or(0),
            max_surface: surface.iter().copied().max().unwrap_or(0),
            water_columns,
            air_pockets,
            biomes,
        }
    }
}

impl fmt::Display for ChunkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "chunk ({}, {})", self.chunk_x, self.chunk_z)?;
        writeln!(f, "  surface y: {}..={}", self.min_surface, self.max_surface)?;
        writeln!(f, "  flooded columns: {}", self.water_columns)?;
        write!(f, "  carved blocks: {}", self.air_pockets)?;
        for (biome, count) in &self.biomes {
            write!(f, "\n  {}: {count}", biome.name())?;
        }
        Ok(())
    }
}
