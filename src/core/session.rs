//! Configurator session - current parameters and the BOM derived from them

use crate::core::catalog::Catalog;
use crate::core::resolver::resolve;
use crate::entities::bom::Bom;
use crate::entities::params::{ModuleParams, ParamsError, ParamsPatch};

/// Holds one module's parameters and keeps its BOM in step.
///
/// Every accepted update replaces the parameter snapshot and recomputes
/// the BOM from scratch against the borrowed catalog.
#[derive(Debug)]
pub struct Configurator<'c> {
    catalog: &'c Catalog,
    params: ModuleParams,
    bom: Bom,
}

impl<'c> Configurator<'c> {
    /// Start a session from validated parameters
    pub fn new(catalog: &'c Catalog, params: ModuleParams) -> Result<Self, ParamsError> {
        params.validate()?;
        let bom = resolve(catalog, &params);
        Ok(Self {
            catalog,
            params,
            bom,
        })
    }

    /// Start a session from the built-in default parameters
    pub fn with_defaults(catalog: &'c Catalog) -> Self {
        let params = ModuleParams::default();
        let bom = resolve(catalog, &params);
        Self {
            catalog,
            params,
            bom,
        }
    }

    pub fn params(&self) -> &ModuleParams {
        &self.params
    }

    pub fn bom(&self) -> &Bom {
        &self.bom
    }

    /// Apply a patch; an invalid result is rejected and the session is unchanged
    pub fn update(&mut self, patch: &ParamsPatch) -> Result<&Bom, ParamsError> {
        let next = self.params.apply(patch);
        next.validate()?;
        if next != self.params {
            self.bom = resolve(self.catalog, &next);
            self.params = next;
        }
        Ok(&self.bom)
    }
}
