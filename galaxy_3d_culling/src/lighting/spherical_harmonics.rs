/// Order-2 (9 coefficient) RGB spherical harmonics.
///
/// Accumulates the ambient term and every light that did not get a pixel or
/// vertex slot. Directional contributions are stored convolved with the
/// clamped cosine lobe, so `evaluate(normal)` returns irradiance.

use std::f32::consts::PI;
use glam::Vec3;

const Y0: f32 = 0.282_095;
const Y1: f32 = 0.488_603;
const Y2_XY: f32 = 1.092_548;
const Y2_ZZ: f32 = 0.315_392;
const Y2_XX_YY: f32 = 0.546_274;

/// Cosine lobe convolution per band
const BAND_SCALE: [f32; 3] = [PI, 2.0 * PI / 3.0, PI / 4.0];

fn basis(n: Vec3) -> [f32; 9] {
    [
        Y0,
        Y1 * n.y,
        Y1 * n.z,
        Y1 * n.x,
        Y2_XY * n.x * n.y,
        Y2_XY * n.y * n.z,
        Y2_ZZ * (3.0 * n.z * n.z - 1.0),
        Y2_XY * n.x * n.z,
        Y2_XX_YY * (n.x * n.x - n.y * n.y),
    ]
}

fn band(coefficient: usize) -> usize {
    match coefficient {
        0 => 0,
        1..=3 => 1,
        _ => 2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphericalHarmonicsL2 {
    pub coefficients: [Vec3; 9],
}

impl SphericalHarmonicsL2 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uniform ambient color.
    pub fn add_ambient(&mut self, color: Vec3) {
        self.coefficients[0] += color / Y0;
    }

    /// Light arriving from `direction_to_light` with the given color.
    pub fn add_directional_light(&mut self, direction_to_light: Vec3, color: Vec3) {
        let Some(direction) = direction_to_light.try_normalize() else {
            self.add_ambient(color);
            return;
        };
        for (i, y) in basis(direction).into_iter().enumerate() {
            self.coefficients[i] += color * (y * BAND_SCALE[band(i)]);
        }
    }

    /// Irradiance for a surface normal.
    pub fn evaluate(&self, normal: Vec3) -> Vec3 {
        basis(normal.normalize_or_zero())
            .into_iter()
            .zip(self.coefficients.iter())
            .map(|(y, c)| *c * y)
            .sum()
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|c| *c == Vec3::ZERO)
    }
}

#[cfg(test)]
#[path = "spherical_harmonics_tests.rs"]
mod tests;
