//! Sample service responses and request data shared by unit tests.

#[cfg(test)]
mod image_fixtures;
#[cfg(test)]
mod video_fixtures;

#[cfg(test)]
pub use error_fixtures::*;
#[cfg(test)]
pub use image_fixtures::*;
#[cfg(test)]
pub use video_fixtures::*;
