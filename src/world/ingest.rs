//! Climate ingestion
//!
//! Converts a single-band climate raster (pixel value = Köppen code, 0 =
//! water) into the climate grid and land mask the engine is built from.
//! The result is produced once at start-up and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::climate::{latitude_of_row, Climate};
use crate::core::error::{GameError, Result};

/// Climate grid plus parallel land mask, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateMap {
    width: usize,
    height: usize,
    climate_grid: Vec<Option<Climate>>,
    land_mask: Vec<bool>,
}

/// JSON raster document: `{ "width": w, "height": h, "values": [..] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterDocument {
    pub width: usize,
    pub height: usize,
    pub values: Vec<u8>,
}

impl ClimateMap {
    /// Assemble from flat row-major arrays
    pub fn from_parts(
        width: usize,
        height: usize,
        climate_grid: Vec<Option<Climate>>,
        land_mask: Vec<bool>,
    ) -> Result<Self> {
        let cells = width * height;
        if climate_grid.len() != cells || land_mask.len() != cells {
            return Err(GameError::Grid(format!(
                "expected {} cells for {}x{}, got climate {} / mask {}",
                cells,
                width,
                height,
                climate_grid.len(),
                land_mask.len()
            )));
        }
        Ok(Self {
            width,
            height,
            climate_grid,
            land_mask,
        })
    }

    /// Assemble from nested rows (`rows[y][x]`)
    pub fn from_rows(climate_rows: Vec<Vec<Option<Climate>>>, land_rows: Vec<Vec<bool>>) -> Result<Self> {
        let height = climate_rows.len();
        let width = climate_rows.first().map_or(0, Vec::len);
        if land_rows.len() != height {
            return Err(GameError::Grid("land mask height differs from climate grid".into()));
        }
        if climate_rows.iter().any(|row| row.len() != width)
            || land_rows.iter().any(|row| row.len() != width)
        {
            return Err(GameError::Grid("rows must all have the same width".into()));
        }

        let climate_grid = climate_rows.into_iter().flatten().collect();
        let land_mask = land_rows.into_iter().flatten().collect();
        Self::from_parts(width, height, climate_grid, land_mask)
    }

    /// All-land map with a single climate
    pub fn uniform(width: usize, height: usize, climate: Climate) -> Self {
        Self {
            width,
            height,
            climate_grid: vec![Some(climate); width * height],
            land_mask: vec![true; width * height],
        }
    }

    /// All-land map whose climates follow the latitude fallback rule
    pub fn latitude_bands(width: usize, height: usize) -> Self {
        let mut climate_grid = Vec::with_capacity(width * height);
        for y in 0..height {
            let climate = Climate::from_latitude(latitude_of_row(y, height));
            climate_grid.extend(std::iter::repeat(Some(climate)).take(width));
        }
        Self {
            width,
            height,
            climate_grid,
            land_mask: vec![true; width * height],
        }
    }

    /// Build from raw raster codes, downsampling by an integer factor.
    ///
    /// Each output cell samples the source pixel at `(x * factor, y * factor)`.
    /// Land cells whose code has no climate mapping get the latitude fallback.
    pub fn from_codes(codes: &[u8], src_width: usize, src_height: usize, downsample: usize) -> Result<Self> {
        if downsample == 0 {
            return Err(GameError::Raster("downsample factor must be at least 1".into()));
        }
        if codes.len() != src_width * src_height {
            return Err(GameError::Raster(format!(
                "raster has {} values, expected {}x{}",
                codes.len(),
                src_width,
                src_height
            )));
        }

        let width = src_width / downsample;
        let height = src_height / downsample;
        if width == 0 || height == 0 {
            return Err(GameError::Raster(format!(
                "downsample factor {} leaves an empty {}x{} grid",
                downsample, width, height
            )));
        }

        let mut climate_grid = Vec::with_capacity(width * height);
        let mut land_mask = Vec::with_capacity(width * height);
        for y in 0..height {
            let latitude = latitude_of_row(y, height);
            for x in 0..width {
                let code = codes[(y * downsample) * src_width + x * downsample];
                let land = code != 0;
                land_mask.push(land);
                climate_grid.push(if land {
                    Some(Climate::from_raster_code(code).unwrap_or_else(|| Climate::from_latitude(latitude)))
                } else {
                    None
                });
            }
        }

        tracing::debug!(
            "Ingested {}x{} raster into {}x{} grid (factor {})",
            src_width,
            src_height,
            width,
            height,
            downsample
        );

        Self::from_parts(width, height, climate_grid, land_mask)
    }

    /// Load an 8-bit grayscale raster image (PNG, TIFF, ...) from disk.
    ///
    /// Pixel values are climate codes, so other pixel formats are rejected
    /// instead of being converted by luminance.
    pub fn load_image(path: &Path, downsample: usize) -> Result<Self> {
        let img = image::open(path)?;
        let Some(gray) = img.as_luma8() else {
            return Err(GameError::Raster(format!(
                "{} is {:?}; climate rasters must be 8-bit grayscale",
                path.display(),
                img.color()
            )));
        };
        let (w, h) = gray.dimensions();
        Self::from_codes(gray.as_raw(), w as usize, h as usize, downsample)
    }

    /// Load a JSON raster document from disk
    pub fn load_json(path: &Path, downsample: usize) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let doc: RasterDocument = serde_json::from_str(&content)?;
        Self::from_codes(&doc.values, doc.width, doc.height, downsample)
    }

    /// Load by file extension: `.json` documents, anything else as an image
    pub fn load(path: &Path, downsample: usize) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::load_json(path, downsample)
        } else {
            Self::load_image(path, downsample)
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_land(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.land_mask[y * self.width + x]
    }

    pub fn climate_at(&self, x: usize, y: usize) -> Option<Climate> {
        if x < self.width && y < self.height {
            self.climate_grid[y * self.width + x]
        } else {
            None
        }
    }

    pub fn land_count(&self) -> usize {
        self.land_mask.iter().filter(|l| **l).count()
    }

    /// Number of land cells per climate
    pub fn histogram(&self) -> BTreeMap<Climate, usize> {
        let mut counts = BTreeMap::new();
        for climate in self.climate_grid.iter().flatten() {
            *counts.entry(*climate).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_map_to_climate_and_water() {
        // 2x2, no downsampling
        let map = ClimateMap::from_codes(&[0, 16, 17, 4], 2, 2, 1).unwrap();
        assert!(!map.is_land(0, 0));
        assert_eq!(map.climate_at(0, 0), None);
        assert_eq!(map.climate_at(1, 0), Some(Climate::Tundra));
        assert_eq!(map.climate_at(0, 1), Some(Climate::IceCap));
        assert_eq!(map.climate_at(1, 1), Some(Climate::HotDesert));
        assert_eq!(map.land_count(), 3);
    }

    #[test]
    fn test_unmapped_code_uses_latitude_fallback() {
        // 1 column, 4 rows; code 200 is unmapped
        let map = ClimateMap::from_codes(&[200, 200, 200, 200], 1, 4, 1).unwrap();
        // Row 0 is latitude 90
        assert_eq!(map.climate_at(0, 0), Some(Climate::IceCap));
        // Row 2 is latitude 0
        assert_eq!(map.climate_at(0, 2), Some(Climate::TropicalRainforest));
    }

    #[test]
    fn test_downsample_samples_top_left() {
        #[rustfmt::skip]
        let codes = [
            9, 0, 16, 0,
            0, 0, 0,  0,
            0, 0, 1,  0,
            0, 0, 0,  0,
        ];
        let map = ClimateMap::from_codes(&codes, 4, 4, 2).unwrap();
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 2);
        assert_eq!(map.climate_at(0, 0), Some(Climate::Oceanic));
        assert_eq!(map.climate_at(1, 0), Some(Climate::Tundra));
        assert!(!map.is_land(0, 1));
        assert_eq!(map.climate_at(1, 1), Some(Climate::TropicalRainforest));
    }

    #[test]
    fn test_bad_inputs_are_errors() {
        assert!(ClimateMap::from_codes(&[1, 2, 3], 2, 2, 1).is_err());
        assert!(ClimateMap::from_codes(&[1; 4], 2, 2, 0).is_err());
        assert!(ClimateMap::from_codes(&[1; 4], 2, 2, 4).is_err());
    }

    #[test]
    fn test_from_rows_checks_shape() {
        let ok = ClimateMap::from_rows(
            vec![vec![Some(Climate::Tundra), None]],
            vec![vec![true, false]],
        );
        assert!(ok.is_ok());

        let bad = ClimateMap::from_rows(vec![vec![Some(Climate::Tundra), None]], vec![vec![true]]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_latitude_bands_and_histogram() {
        let map = ClimateMap::latitude_bands(3, 10);
        assert_eq!(map.land_count(), 30);
        assert_eq!(map.climate_at(0, 0), Some(Climate::IceCap));
        let hist = map.histogram();
        assert_eq!(hist.values().sum::<usize>(), 30);
        assert!(hist.contains_key(&Climate::TropicalRainforest));
    }

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("koppen_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_load_gray_png() {
        let path = scratch_path("gray.png");
        image::GrayImage::from_raw(2, 2, vec![0, 16, 17, 4])
            .unwrap()
            .save(&path)
            .unwrap();

        let map = ClimateMap::load(&path, 1).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(!map.is_land(0, 0));
        assert_eq!(map.climate_at(1, 0), Some(Climate::Tundra));
        assert_eq!(map.climate_at(0, 1), Some(Climate::IceCap));
        assert_eq!(map.climate_at(1, 1), Some(Climate::HotDesert));
    }

    #[test]
    fn test_non_gray_raster_is_rejected() {
        let rgb = scratch_path("rgb.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([16, 16, 16]))
            .save(&rgb)
            .unwrap();
        let result = ClimateMap::load_image(&rgb, 1);
        std::fs::remove_file(&rgb).ok();
        assert!(matches!(result, Err(GameError::Raster(_))));

        let wide = scratch_path("wide.png");
        image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_pixel(2, 2, image::Luma([16]))
            .save(&wide)
            .unwrap();
        let result = ClimateMap::load_image(&wide, 1);
        std::fs::remove_file(&wide).ok();
        assert!(matches!(result, Err(GameError::Raster(_))));
    }

    #[test]
    fn test_json_document_parses() {
        let doc: RasterDocument =
            serde_json::from_str(r#"{"width": 2, "height": 1, "values": [0, 14]}"#).unwrap();
        let map = ClimateMap::from_codes(&doc.values, doc.width, doc.height, 1).unwrap();
        assert_eq!(map.climate_at(1, 0), Some(Climate::WarmSummerContinental));
    }
}
