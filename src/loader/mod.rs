//! Cube loaders
//!
//! Parsers for Cube Cobra's cube JSON and a directory-backed cube source

pub mod cube;
pub mod source;

pub use cube::CubeLoader;
pub use source::CubeDirectory;
