// modules
pub mod streamer; // grouped record streamer built on csv and Rayon
