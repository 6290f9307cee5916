//! Satellite imaging pipeline
//!
//! An observer at `position` looks toward `target`. The pipeline runs in three stages:
//! 1. lines of sight for every pixel of a numpix x numpix imager (`LosGenerator`)
//! 2. one observer position per line of sight
//! 3. optically thin intensity along every line of sight (`IntensityModel`),
//!    reshaped row-major into an [`IntensityImage`]
//!
//! The LOS generator and the radiative-transfer model are external; this module
//! only sequences them and checks that their outputs are consistent.

use nalgebra::Vector3;
use tracing::{debug, info};

use crate::configuration::config::ImagerConfig;
use crate::simulation::error::{ExoError, Result};
use crate::simulation::states::NVec3;

/// Imager geometry and model settings, positions in planet radii
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteConfig {
    pub position: NVec3,
    pub target: NVec3,
    pub fov: f64, // degrees
    pub pixangres: f64, // degrees between pixels
    pub irradiance: f64,
    pub model: String,
    pub dl: f64, // integration step
    pub min_rad: f64,
    pub max_rad: f64,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self::from(&ImagerConfig::default())
    }
}

impl From<&ImagerConfig> for SatelliteConfig {
    fn from(cfg: &ImagerConfig) -> Self {
        Self {
            position: Vector3::from(cfg.position),
            target: Vector3::from(cfg.target),
            fov: cfg.fov,
            pixangres: cfg.pixangres,
            irradiance: cfg.irradiance,
            model: cfg.model.clone(),
            dl: cfg.dl,
            min_rad: cfg.min_rad,
            max_rad: cfg.max_rad,
        }
    }
}

impl SatelliteConfig {
    pub fn validated(self) -> Result<Self> {
        if !(self.fov > 0.0 && self.pixangres > 0.0) {
            return Err(ExoError::InvalidConfig(format!(
                "fov and pixangres must be positive, got {} and {}",
                self.fov, self.pixangres
            )));
        }
        if !(self.dl > 0.0) {
            return Err(ExoError::InvalidConfig(format!("dl must be positive, got {}", self.dl)));
        }
        if !(self.min_rad < self.max_rad) {
            return Err(ExoError::InvalidConfig(format!(
                "min_rad {} must be below max_rad {}",
                self.min_rad, self.max_rad
            )));
        }
        if self.boresight().norm() == 0.0 {
            return Err(ExoError::InvalidConfig(
                "target coincides with the satellite position".to_string(),
            ));
        }
        Ok(self)
    }

    /// Pointing vector from the satellite to the target
    pub fn boresight(&self) -> NVec3 {
        self.target - self.position
    }

    pub fn radiative_settings(&self) -> RadiativeSettings<'_> {
        RadiativeSettings {
            irradiance: self.irradiance,
            model: &self.model,
            dl: self.dl,
            min_rad: self.min_rad,
            max_rad: self.max_rad,
        }
    }
}

/// Scalar inputs of the optically thin model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiativeSettings<'a> {
    pub irradiance: f64,
    pub model: &'a str,
    pub dl: f64,
    pub min_rad: f64,
    pub max_rad: f64,
}

/// External generator of per-pixel lines of sight.
/// Returns numpix^2 vectors laid out row-major, plus numpix.
pub trait LosGenerator {
    fn generate(&self, fov_deg: f64, pixangres_deg: f64, boresight: &NVec3) -> (Vec<NVec3>, usize);
}

/// External optically thin radiative-transfer model.
/// Returns one intensity per line of sight.
pub trait IntensityModel {
    fn intensity(&self, settings: &RadiativeSettings<'_>, los: &[NVec3], pos: &[NVec3]) -> Vec<f64>;
}

/// numpix x numpix intensity grid, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityImage {
    numpix: usize,
    data: Vec<f64>,
}

impl IntensityImage {
    pub fn new(numpix: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != numpix * numpix {
            return Err(ExoError::ExternalModel(format!(
                "{} intensities for a {numpix}x{numpix} image",
                data.len()
            )));
        }
        Ok(Self { numpix, data })
    }

    pub fn numpix(&self) -> usize {
        self.numpix
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.numpix || col >= self.numpix {
            return None;
        }
        Some(self.data[row * self.numpix + col])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics, an empty image has no rows anyway
        self.data.chunks(self.numpix.max(1))
    }

    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Mirror every row left to right
    pub fn flipped_lr(&self) -> Self {
        let data = self
            .rows()
            .flat_map(|row| row.iter().rev().copied())
            .collect();
        Self {
            numpix: self.numpix,
            data,
        }
    }

    /// Rayleigh to kilo-Rayleigh
    pub fn to_kilo_rayleigh(&self) -> Self {
        Self {
            numpix: self.numpix,
            data: self.data.iter().map(|v| v / 1000.0).collect(),
        }
    }
}

/// Indices of the four corner pixels: top-left, top-right, bottom-right, bottom-left.
/// `None` for an empty imager.
pub fn corner_los_indices(numpix: usize) -> Option<[usize; 4]> {
    let last = numpix.checked_sub(1)?;
    Some([0, last, numpix * numpix - 1, numpix * last])
}

/// Runs the imaging stages in order and keeps every intermediate product
pub struct SatelliteImager<L, M> {
    config: SatelliteConfig,
    los_generator: L,
    model: M,
    los: Option<Vec<NVec3>>,
    numpix: Option<usize>,
    pos: Option<Vec<NVec3>>,
    intensity: Option<IntensityImage>,
}

impl<L: LosGenerator, M: IntensityModel> SatelliteImager<L, M> {
    pub fn new(config: SatelliteConfig, los_generator: L, model: M) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
            los_generator,
            model,
            los: None,
            numpix: None,
            pos: None,
            intensity: None,
        })
    }

    pub fn config(&self) -> &SatelliteConfig {
        &self.config
    }

    pub fn numpix(&self) -> Option<usize> {
        self.numpix
    }

    pub fn los(&self) -> Option<&[NVec3]> {
        self.los.as_deref()
    }

    pub fn pos(&self) -> Option<&[NVec3]> {
        self.pos.as_deref()
    }

    pub fn intensity(&self) -> Option<&IntensityImage> {
        self.intensity.as_ref()
    }

    /// Stage 1: lines of sight from the external generator
    pub fn generate_los(&mut self) -> Result<(&[NVec3], usize)> {
        let boresight = self.config.boresight();
        let (los, numpix) =
            self.los_generator
                .generate(self.config.fov, self.config.pixangres, &boresight);

        if numpix == 0 || los.len() != numpix * numpix {
            return Err(ExoError::ExternalModel(format!(
                "{} lines of sight for numpix = {numpix}",
                los.len()
            )));
        }
        debug!(numpix, "generated lines of sight");

        // a fresh LOS set invalidates everything downstream
        self.pos = None;
        self.intensity = None;
        self.numpix = Some(numpix);
        let los = self.los.insert(los);
        Ok((los.as_slice(), numpix))
    }

    /// Stage 2: the satellite position repeated once per line of sight
    pub fn generate_pos(&mut self) -> Result<&[NVec3]> {
        let numpix = self
            .numpix
            .ok_or_else(|| ExoError::ImagingStage("must generate LOS before POS".to_string()))?;

        let pos = vec![self.config.position; numpix * numpix];
        Ok(self.pos.insert(pos).as_slice())
    }

    /// Stage 3: intensity along every line of sight, as a numpix x numpix image
    pub fn calculate_intensity(&mut self) -> Result<&IntensityImage> {
        let (los, pos, numpix) = match (&self.los, &self.pos, self.numpix) {
            (Some(los), Some(pos), Some(numpix)) => (los, pos, numpix),
            _ => {
                return Err(ExoError::ImagingStage(
                    "must generate LOS and POS before calculating intensity".to_string(),
                ))
            }
        };

        let flat = self
            .model
            .intensity(&self.config.radiative_settings(), los, pos);
        if flat.len() != los.len() {
            return Err(ExoError::ExternalModel(format!(
                "{} intensities for {} lines of sight",
                flat.len(),
                los.len()
            )));
        }

        let image = IntensityImage::new(numpix, flat)?;
        Ok(&*self.intensity.insert(image))
    }

    /// All three stages in order
    pub fn run(&mut self) -> Result<&IntensityImage> {
        self.generate_los()?;
        self.generate_pos()?;
        self.calculate_intensity()?;

        let image = self
            .intensity
            .as_ref()
            .ok_or_else(|| ExoError::ImagingStage("intensity missing after run".to_string()))?;
        info!(
            numpix = image.numpix(),
            min = image.min(),
            max = image.max(),
            "imaging complete"
        );
        Ok(image)
    }

    /// Segments from the satellite along the four corner lines of sight, `length` long
    pub fn fov_outline(&self, length: f64) -> Option<Vec<(NVec3, NVec3)>> {
        let los = self.los.as_ref()?;
        let numpix = self.numpix?;
        let origin = self.config.position;

        Some(
            corner_los_indices(numpix)?
                .iter()
                .map(|&i| (origin, origin + length * los[i]))
                .collect(),
        )
    }
}
