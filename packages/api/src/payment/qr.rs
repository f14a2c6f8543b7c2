use image::{DynamicImage, ImageBuffer, Luma};
use qrcode::{QrCode, types::Color};

use crate::error::ApiError;

/// Pixels per QR module.
const SCALE: u32 = 8;
/// Quiet zone around the code, in modules.
const MARGIN: u32 = 4;

/// Encodes `data` as a QR code and returns the image as a PNG data URL,
/// ready to be rendered inline by the storefront client.
pub fn qr_data_url(data: &str) -> Result<String, ApiError> {
    let code = QrCode::new(data.as_bytes())?;
    let module_count = code.width() as u32;
    let image_size = (module_count + MARGIN * 2) * SCALE;
    let mut img = ImageBuffer::from_pixel(image_size, image_size, Luma([255u8]));
    let colors = code.to_colors();

    for y in 0..module_count {
        for x in 0..module_count {
            let index = (y * module_count + x) as usize;
            if colors[index] == Color::Dark {
                let x0 = (x + MARGIN) * SCALE;
                let y0 = (y + MARGIN) * SCALE;
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        img.put_pixel(x0 + dx, y0 + dy, Luma([0u8]));
                    }
                }
            }
        }
    }

    let image = DynamicImage::ImageLuma8(img);
    let url = kirana_types::utils::data_url::png_data_url(&image)?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn produces_a_square_png_data_url() {
        let url = qr_data_url("upi://pay?pa=merchant@paytm&am=100.00").unwrap();
        let payload = url.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), decoded.height());
        assert!(decoded.width() > 0);
    }
}
