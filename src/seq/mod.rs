pub mod dna;

pub use self::dna::{normalize, Base};
