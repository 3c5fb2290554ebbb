//! Declarative array configurations and the arrays they resolve to.
//!
//! A [`ConstantArrayConfig`] describes an array shaped like some source array
//! with every voxel set to one integer, which is the usual way to build a mask
//! covering a whole dataset. Configs load from JSON ([`loader`]), persist in
//! SQLite ([`store`]) and are materialized by an [`ArrayResolver`].

pub mod array;
pub mod cache;
pub mod cli;
pub mod config;
pub mod errors;
pub mod loader;
pub mod metadata;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod validate;

pub use crate::array::{Array, ArrayData, ConstantArray, ElementType, InMemoryArray, Roi};
pub use crate::config::{
    ArrayConfig, ArrayRecipe, ConstantArrayConfig, ConstantArrayConfigBuilder, DummyArrayConfig,
    LiteralArrayConfig, LiteralData,
};
pub use crate::errors::ArrayConfigError;
pub use crate::loader::{load_array_config, load_array_config_file, load_array_config_str};
pub use crate::metadata::{ArrayKind, ConfigFields, FieldMeta};
pub use crate::resolver::{ArrayResolver, ResolverMetrics};
pub use crate::store::ConfigStore;
pub use crate::validate::{ValidationError, ValidationReport};
