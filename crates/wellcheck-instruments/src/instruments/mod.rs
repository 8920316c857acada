pub mod dass21;
pub mod self_compassion;
