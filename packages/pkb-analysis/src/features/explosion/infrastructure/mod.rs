pub mod exploder;

pub use exploder::explode_program;
