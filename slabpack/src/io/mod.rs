/// External representations of jobs and results, (de)serializable with serde
pub mod ext_repr;

/// Conversion of internal entities into their external representation
pub mod export;

/// Conversion of external representations into internal entities
pub mod import;

/// Rendering of slab layouts to SVG
pub mod svg;
