//! Heightmap image decoding.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbImage;
use relief_terrain::{HeightmapGrid, TerrainError};

#[derive(Debug, thiserror::Error)]
pub enum HeightmapLoadError {
    #[error("failed to decode heightmap {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("heightmap {path} is unusable: {source}")]
    Grid {
        path: PathBuf,
        #[source]
        source: TerrainError,
    },
}

/// Decode any raster format the `image` crate understands into a grid of
/// normalized heights.
pub fn load_heightmap(path: &Path) -> Result<HeightmapGrid, HeightmapLoadError> {
    let rgb = image::open(path)
        .map_err(|source| HeightmapLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();
    grid_from_rgb(&rgb).map_err(|source| HeightmapLoadError::Grid {
        path: path.to_path_buf(),
        source,
    })
}

/// Each pixel becomes `(R + G + B) / (255 * 3)`.
pub fn grid_from_rgb(image: &RgbImage) -> Result<HeightmapGrid, TerrainError> {
    HeightmapGrid::from_fn(image.width(), image.height(), |x, z| {
        let [r, g, b] = image.get_pixel(x, z).0;
        (f32::from(r) + f32::from(g) + f32::from(b)) / (255.0 * 3.0)
    })
}

/// Load the heightmap at `path`, or `None` for flat terrain when there is no
/// path or the image cannot be used.
pub fn load_or_flat(path: Option<&Path>) -> Option<Arc<HeightmapGrid>> {
    let path = path?;
    match load_heightmap(path) {
        Ok(grid) => {
            tracing::info!(
                path = %path.display(),
                width = grid.width(),
                height = grid.height(),
                "loaded heightmap"
            );
            Some(Arc::new(grid))
        }
        Err(e) => {
            tracing::warn!("{e}; falling back to flat terrain");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    #[test]
    fn test_gray_levels_normalize() {
        let mut image = RgbImage::new(3, 1);
        image.put_pixel(0, 0, Rgb([0, 0, 0]));
        image.put_pixel(1, 0, Rgb([255, 255, 255]));
        image.put_pixel(2, 0, Rgb([255, 0, 0]));
        let grid = grid_from_rgb(&image).unwrap();
        assert_eq!(grid.get(0, 0), 0.0);
        assert_eq!(grid.get(1, 0), 1.0);
        assert!((grid.get(2, 0) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_png_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        let image = RgbImage::from_fn(4, 2, |x, _| Rgb([x as u8 * 60; 3]));
        image.save(&path).unwrap();

        let grid = load_heightmap(&path).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 2));
        assert!((grid.get(3, 1) - 180.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_falls_back_to_flat() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.png");
        assert!(matches!(
            load_heightmap(&missing),
            Err(HeightmapLoadError::Decode { .. })
        ));
        assert!(load_or_flat(Some(&missing)).is_none());
        assert!(load_or_flat(None).is_none());
    }
}
