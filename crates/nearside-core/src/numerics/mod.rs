pub mod special;

pub use special::DenseComplexMatrix;
