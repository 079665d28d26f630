//! Module parameters - the user-editable description of one enclosure

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::catalog_item::Finish;

/// Depth of every module in millimeters (not user-configurable)
pub const MODULE_DEPTH: f64 = 100.0;

pub const DEFAULT_WIDTH: f64 = 500.0;
pub const DEFAULT_HEIGHT: f64 = 500.0;

/// Rejected module input
#[derive(Debug, Error, Diagnostic)]
pub enum ParamsError {
    #[error("{axis} must be a finite number, got {value}")]
    #[diagnostic(code(ebom::params::not_finite))]
    NotFinite { axis: &'static str, value: f64 },

    #[error("{axis} must be greater than 0, got {value}")]
    #[diagnostic(
        code(ebom::params::not_positive),
        help("Dimensions are in millimeters and must be strictly positive")
    )]
    NotPositive { axis: &'static str, value: f64 },
}

/// Width, height and finish of a module.
///
/// Values are snapshots: edits produce a new value through [`ModuleParams::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModuleParams {
    pub width: f64,
    pub height: f64,
    pub finish: Finish,
}

impl Default for ModuleParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            finish: Finish::Metal,
        }
    }
}

impl ModuleParams {
    /// Create validated module parameters
    pub fn new(width: f64, height: f64, finish: Finish) -> Result<Self, ParamsError> {
        let params = Self {
            width,
            height,
            finish,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that both dimensions are finite and strictly positive
    pub fn validate(&self) -> Result<(), ParamsError> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;
        Ok(())
    }

    /// Produce a new snapshot with the patch's fields overriding ours
    pub fn apply(&self, patch: &ParamsPatch) -> ModuleParams {
        ModuleParams {
            width: patch.width.unwrap_or(self.width),
            height: patch.height.unwrap_or(self.height),
            finish: patch.finish.unwrap_or(self.finish),
        }
    }

    pub fn depth(&self) -> f64 {
        MODULE_DEPTH
    }
}

fn check_dimension(axis: &'static str, value: f64) -> Result<(), ParamsError> {
    if !value.is_finite() {
        return Err(ParamsError::NotFinite { axis, value });
    }
    if value <= 0.0 {
        return Err(ParamsError::NotPositive { axis, value });
    }
    Ok(())
}

/// Field-level overrides for [`ModuleParams`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<Finish>,
}

impl ParamsPatch {
    pub fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn height(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn finish(finish: Finish) -> Self {
        Self {
            finish: Some(finish),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.finish.is_none()
    }
}
