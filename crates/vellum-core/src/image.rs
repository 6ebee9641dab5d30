/// Decoded bitmap handle produced by
/// [`Renderer::create_image_data`](crate::Renderer::create_image_data).
///
/// Pixel access stays inside the backend; the contract only sees the intrinsic size.
pub trait ImageData {
    /// Intrinsic width in user units.
    fn width(&self) -> f32;

    /// Intrinsic height in user units.
    fn height(&self) -> f32;
}
