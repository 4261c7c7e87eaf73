//! Instance placement files
//!
//! A placement file is plain text. Lines that are blank or whose first
//! non-space character is `#` are skipped; every other line holds exactly 16
//! whitespace-separated floats, one 4x4 matrix in row-major order with the
//! translation in the last column.
//!
//! ```text
//! # matrices
//! 1 0 0 750 0 1 0 0 0 0 1 -750 0 0 0 1
//! ```

use crate::error::{PlacementError, Result};
use furrow_math::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Parse placement text into matrices
pub fn parse_placements(text: &str) -> Result<Vec<Mat4>> {
    let mut matrices = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut rows = [[0.0f32; 4]; 4];
        let mut values = line.split_whitespace();
        for (i, slot) in rows.iter_mut().flatten().enumerate() {
            let token = values.next().ok_or_else(|| PlacementError::Parse {
                line: line_no,
                reason: format!("expected 16 values, found {i}"),
            })?;
            *slot = token.parse().map_err(|_| PlacementError::Parse {
                line: line_no,
                reason: format!("'{token}' is not a number"),
            })?;
        }
        if values.next().is_some() {
            return Err(PlacementError::Parse {
                line: line_no,
                reason: "expected 16 values, found more".to_string(),
            });
        }

        matrices.push(Mat4::from_rows(rows));
    }

    Ok(matrices)
}

/// Read a placement file
pub fn load_placements(path: impl AsRef<Path>) -> Result<Vec<Mat4>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PlacementError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let matrices = parse_placements(&text)?;
    log::info!("Loaded {} placements from {}", matrices.len(), path.display());
    Ok(matrices)
}

/// Write matrices in placement format
pub fn write_placements<W: Write>(mut writer: W, matrices: &[Mat4]) -> io::Result<()> {
    writeln!(writer, "# matrices")?;
    for m in matrices {
        let values: Vec<String> = m
            .to_rows()
            .iter()
            .flatten()
            .map(|v| v.to_string())
            .collect();
        writeln!(writer, "{}", values.join(" "))?;
    }
    Ok(())
}

/// Write a placement file
pub fn save_placements(path: impl AsRef<Path>, matrices: &[Mat4]) -> Result<()> {
    let path = path.as_ref();
    let to_error = |source| PlacementError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::create(path).map_err(to_error)?;
    write_placements(io::BufWriter::new(file), matrices).map_err(to_error)
}

/// Posts around a rectangle centered on the origin
///
/// Posts are `spacing` apart along each edge, rotated to follow the edge,
/// scaled by `scale`; `adjust` is applied first, to fix up the model's
/// authored orientation.
pub fn fence_rectangle(width: f32, depth: f32, spacing: f32, scale: Vec3, adjust: Mat4) -> Vec<Mat4> {
    if spacing <= 0.0 || width <= 0.0 || depth <= 0.0 {
        return Vec::new();
    }

    let half_w = width * 0.5;
    let half_d = depth * 0.5;
    let across = (width / spacing).floor() as usize;
    let along = (depth / spacing).floor() as usize;
    let post = |position: Vec3, yaw: f32| {
        Mat4::from_translation(position)
            * Mat4::from_rotation_y(yaw)
            * Mat4::from_scale(scale)
            * adjust
    };

    let mut posts = Vec::with_capacity(2 * (across + along));
    for i in 0..across {
        let x = -half_w + i as f32 * spacing;
        posts.push(post(Vec3::new(x, 0.0, -half_d), 0.0));
        posts.push(post(Vec3::new(x + spacing, 0.0, half_d), 0.0));
    }
    for i in 0..along {
        let z = -half_d + i as f32 * spacing;
        posts.push(post(Vec3::new(half_w, 0.0, z), core::f32::consts::FRAC_PI_2));
        posts.push(post(Vec3::new(-half_w, 0.0, z + spacing), core::f32::consts::FRAC_PI_2));
    }
    posts
}

/// Serializable parameters for [`fence_rectangle`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceLayout {
    pub width: f32,
    pub depth: f32,
    pub spacing: f32,
    pub scale: [f32; 3],
    /// Yaw applied to the model before placement, in degrees
    pub model_yaw_degrees: f32,
}

impl Default for FenceLayout {
    fn default() -> Self {
        Self {
            width: 1500.0,
            depth: 1500.0,
            spacing: 100.0,
            scale: [100.0, 100.0, 100.0],
            model_yaw_degrees: 90.0,
        }
    }
}

impl FenceLayout {
    /// Generate the post transforms
    pub fn generate(&self) -> Vec<Mat4> {
        fence_rectangle(
            self.width,
            self.depth,
            self.spacing,
            Vec3::from_array(self.scale),
            Mat4::from_rotation_y(furrow_math::radians(self.model_yaw_degrees)),
        )
    }
}
