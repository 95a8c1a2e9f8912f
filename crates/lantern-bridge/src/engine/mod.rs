pub mod surface;

mod conversions;

pub use surface::BoaSurface;
