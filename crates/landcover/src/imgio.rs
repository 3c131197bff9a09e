//! Bridging between `image::RgbImage` and the workspace raster types.

use std::path::Path;

use image::ImageReader;
use landcover_core::{resize_bilinear, RasterError, RgbRaster, RgbRasterView};

/// Canonical working resolution images are resized to before
/// classification. Resizing stays a caller convenience, not a core
/// invariant; the classifier accepts any non-empty raster.
pub const WORKING_RESOLUTION: (usize, usize) = (1024, 1024);

#[derive(thiserror::Error, Debug)]
pub enum ImgIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Load any supported image file as RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<image::RgbImage, ImgIoError> {
    Ok(ImageReader::open(path)?.decode()?.to_rgb8())
}

/// View an `image::RgbImage` as a workspace raster without copying.
pub fn rgb_view(img: &image::RgbImage) -> RgbRasterView<'_> {
    RgbRasterView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Resize to [`WORKING_RESOLUTION`] with bilinear sampling.
pub fn preprocess(img: &image::RgbImage) -> Result<RgbRaster, ImgIoError> {
    Ok(resize_bilinear(
        &rgb_view(img),
        WORKING_RESOLUTION.0,
        WORKING_RESOLUTION.1,
    )?)
}

/// Convert a workspace raster back into an `image::RgbImage`.
pub fn to_image(raster: &RgbRaster) -> Result<image::RgbImage, ImgIoError> {
    image::RgbImage::from_raw(
        raster.width as u32,
        raster.height as u32,
        raster.data.clone(),
    )
    .ok_or(ImgIoError::Raster(RasterError::BufferLength {
        expected: 3 * raster.width * raster.height,
        got: raster.data.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_view_shares_the_buffer() {
        let img = image::RgbImage::from_pixel(4, 3, image::Rgb([9, 8, 7]));
        let view = rgb_view(&img);
        assert_eq!((view.width, view.height), (4, 3));
        assert_eq!(view.pixel(3, 2), [9, 8, 7]);
    }

    #[test]
    fn raster_converts_back_to_image() {
        let raster = RgbRaster::filled(5, 2, [1, 2, 3]);
        let img = to_image(&raster).unwrap();
        assert_eq!(img.dimensions(), (5, 2));
        assert_eq!(img.get_pixel(4, 1).0, [1, 2, 3]);
    }

    #[test]
    fn preprocess_hits_the_working_resolution() {
        let img = image::RgbImage::from_pixel(64, 48, image::Rgb([50, 60, 70]));
        let raster = preprocess(&img).unwrap();
        assert_eq!((raster.width, raster.height), WORKING_RESOLUTION);
        assert_eq!(raster.pixel(0, 0), [50, 60, 70]);
    }
}
