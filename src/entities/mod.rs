//! Entity types - catalog parts, module parameters and bills of materials

pub mod bom;
pub mod catalog_item;
pub mod params;

pub use bom::{Bom, BomItem};
pub use catalog_item::{
    DimensionConstraint, Dimensions, Finish, PartCategory, ProductCatalogItem,
    DIMENSION_TOLERANCE_MM,
};
pub use params::{ModuleParams, ParamsError, ParamsPatch, MODULE_DEPTH};
