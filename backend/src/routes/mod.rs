pub mod landing;
pub mod lessons;
pub mod orders;

/// Prefix under which static images are served.
pub const IMAGES_PREFIX: &str = "/images";

/// Route pattern capturing everything after [`IMAGES_PREFIX`].
pub fn images_route() -> String {
    format!("{IMAGES_PREFIX}/{{*path}}")
}
