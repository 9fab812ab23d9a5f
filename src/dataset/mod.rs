pub mod config;
pub mod delimited;
pub mod generators;
pub mod sample;
pub mod shape;
pub mod split;

pub use config::{GenerationConfig, NoiseLevel};
pub use delimited::{load_delimited_with, load_from_delimited, DelimitedImport, DelimitedOptions, LabelVocabulary};
pub use generators::{
    from_points, generate, generate_circle, generate_gaussian_clusters, generate_moons,
    generate_spiral, generate_split, generate_xor, LabeledPoint,
};
pub use sample::{Bounds, Dataset, Sample};
pub use shape::Shape;
pub use split::{split, Split};
