use std::io::Cursor;

use base64::Engine;
use image::{DynamicImage, ImageFormat};

use crate::Result;

/// Encodes an image as a `data:image/png;base64,...` URL so clients can
/// render it inline without a second request.
pub fn png_data_url(image: &DynamicImage) -> Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(buffer.into_inner());
    Ok(format!("data:image/png;base64,{encoded}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn round_trips_through_base64() {
        let image = DynamicImage::new_luma8(4, 4);
        let url = png_data_url(&image).unwrap();
        let payload = url.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 4);
    }
}
