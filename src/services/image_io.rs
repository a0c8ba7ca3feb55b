//! Image decoding and encoding at the file boundary.
//!
//! Every decoded image is normalised to 8-bit gray, RGB or RGBA so the core
//! engine sees one of its three channel layouts.

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ExtendedColorType, ImageDecoder, ImageReader};
use pixel_swap::{ChannelLayout, ColorMode, ImageRecord, PixelMatrix};
use std::io::Cursor;
use std::path::Path;

use crate::error::ImageIoError;
use crate::models::{OutputConfig, OutputFormat};

/// Extensions accepted for input files.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// True when `path` has a supported extension, ignoring case.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Layout an image of `color` decodes to.
fn layout_for(color: ColorType) -> ChannelLayout {
    match color {
        ColorType::L8 | ColorType::L16 => ChannelLayout::Gray,
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => ChannelLayout::Rgb,
        _ => ChannelLayout::Rgba,
    }
}

fn mode_for(layout: ChannelLayout) -> ColorMode {
    match layout {
        ChannelLayout::Gray => ColorMode::L,
        ChannelLayout::Rgb => ColorMode::Rgb,
        ChannelLayout::Rgba => ColorMode::Rgba,
    }
}

fn open_reader(
    path: &Path,
) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, ImageIoError> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| ImageIoError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    if reader.format().is_none() {
        return Err(ImageIoError::UnsupportedFormat(path.display().to_string()));
    }
    Ok(reader)
}

/// Read dimensions and color mode without decoding pixel data.
pub fn probe(path: &Path) -> Result<ImageRecord, ImageIoError> {
    let decoder = open_reader(path)?
        .into_decoder()
        .map_err(|e| ImageIoError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let (width, height) = decoder.dimensions();
    let layout = layout_for(decoder.color_type());

    tracing::debug!(
        path = %path.display(),
        width,
        height,
        layout = %layout,
        "Probed image"
    );

    Ok(ImageRecord::new(
        path,
        width as usize,
        height as usize,
        mode_for(layout),
    ))
}

/// Decode an image file into a pixel matrix.
pub fn load_matrix(path: &Path) -> Result<PixelMatrix, ImageIoError> {
    let image = open_reader(path)?
        .decode()
        .map_err(|e| ImageIoError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    matrix_from_image(image).ok_or_else(|| ImageIoError::Decode {
        path: path.to_path_buf(),
        message: "pixel buffer does not match image dimensions".to_string(),
    })
}

/// Convert a decoded image into a matrix with the matching layout.
pub fn matrix_from_image(image: DynamicImage) -> Option<PixelMatrix> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    match layout_for(image.color()) {
        ChannelLayout::Gray => PixelMatrix::from_raw(
            image.into_luma8().into_raw(),
            width,
            height,
            ChannelLayout::Gray,
        ),
        ChannelLayout::Rgb => PixelMatrix::from_raw(
            image.into_rgb8().into_raw(),
            width,
            height,
            ChannelLayout::Rgb,
        ),
        ChannelLayout::Rgba => PixelMatrix::from_raw(
            image.into_rgba8().into_raw(),
            width,
            height,
            ChannelLayout::Rgba,
        ),
    }
}

/// Encode `matrix` and write it to `path` in the configured format.
pub fn save_matrix(
    matrix: &PixelMatrix,
    path: &Path,
    output: &OutputConfig,
) -> Result<(), ImageIoError> {
    let bytes = match output.format {
        OutputFormat::Png => {
            let png_bytes = encode_png(matrix).map_err(|message| ImageIoError::Encode {
                path: path.to_path_buf(),
                message,
            })?;
            if output.optimize_png {
                optimize_png(png_bytes)
            } else {
                png_bytes
            }
        }
        OutputFormat::Jpg => {
            encode_jpeg(matrix, output.jpeg_quality).map_err(|message| ImageIoError::Encode {
                path: path.to_path_buf(),
                message,
            })?
        }
    };

    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote image");
    Ok(())
}

fn dimensions(matrix: &PixelMatrix) -> Result<(u32, u32), String> {
    let width = u32::try_from(matrix.width()).map_err(|e| e.to_string())?;
    let height = u32::try_from(matrix.height()).map_err(|e| e.to_string())?;
    Ok((width, height))
}

/// Encode an 8-bit PNG with the matrix layout as color type.
pub fn encode_png(matrix: &PixelMatrix) -> Result<Vec<u8>, String> {
    let (width, height) = dimensions(matrix)?;
    let color_type = match matrix.layout() {
        ChannelLayout::Gray => png::ColorType::Grayscale,
        ChannelLayout::Rgb => png::ColorType::Rgb,
        ChannelLayout::Rgba => png::ColorType::Rgba,
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(|e| e.to_string())?;
        writer
            .write_image_data(matrix.as_bytes())
            .map_err(|e| e.to_string())?;
    }
    Ok(buf.into_inner())
}

/// Re-compress with oxipng, keeping the input on failure.
fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes)
}

/// Encode a baseline JPEG. Alpha is dropped; JPEG has no alpha channel.
pub fn encode_jpeg(matrix: &PixelMatrix, quality: u8) -> Result<Vec<u8>, String> {
    let (width, height) = dimensions(matrix)?;
    let quality = quality.clamp(1, 100);

    let mut buf = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
        let result = match matrix.layout() {
            ChannelLayout::Gray => {
                encoder.encode(matrix.as_bytes(), width, height, ExtendedColorType::L8)
            }
            ChannelLayout::Rgb => {
                encoder.encode(matrix.as_bytes(), width, height, ExtendedColorType::Rgb8)
            }
            ChannelLayout::Rgba => {
                let rgb: Vec<u8> = matrix
                    .as_bytes()
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect();
                encoder.encode(&rgb, width, height, ExtendedColorType::Rgb8)
            }
        };
        result.map_err(|e| e.to_string())?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_swap::Pixel;

    fn checker() -> PixelMatrix {
        PixelMatrix::from_pixels(
            2,
            2,
            &[
                Pixel::rgb(255, 0, 0),
                Pixel::rgb(0, 255, 0),
                Pixel::rgb(0, 0, 255),
                Pixel::rgb(10, 20, 30),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_is_supported_ignores_case() {
        assert!(is_supported(Path::new("/a/b.png")));
        assert!(is_supported(Path::new("/a/b.JPG")));
        assert!(is_supported(Path::new("photo.Jpeg")));
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("png")));
    }

    #[test]
    fn test_png_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let output = OutputConfig {
            format: OutputFormat::Png,
            ..Default::default()
        };

        save_matrix(&checker(), &path, &output).unwrap();
        assert_eq!(load_matrix(&path).unwrap(), checker());

        let record = probe(&path).unwrap();
        assert_eq!((record.width, record.height), (2, 2));
        assert_eq!(record.mode, ColorMode::Rgb);
        assert_eq!(record.weight, 1);
    }

    #[test]
    fn test_optimized_png_still_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let output = OutputConfig {
            format: OutputFormat::Png,
            optimize_png: true,
            ..Default::default()
        };

        save_matrix(&checker(), &path, &output).unwrap();
        assert_eq!(load_matrix(&path).unwrap(), checker());
    }

    #[test]
    fn test_gray_and_rgba_layouts_survive_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig {
            format: OutputFormat::Png,
            ..Default::default()
        };

        let gray = PixelMatrix::filled(3, 1, Pixel::gray(77));
        let gray_path = dir.path().join("gray.png");
        save_matrix(&gray, &gray_path, &output).unwrap();
        assert_eq!(load_matrix(&gray_path).unwrap(), gray);
        assert_eq!(probe(&gray_path).unwrap().mode, ColorMode::L);

        let rgba = PixelMatrix::filled(1, 2, Pixel::rgba(1, 2, 3, 4));
        let rgba_path = dir.path().join("rgba.png");
        save_matrix(&rgba, &rgba_path, &output).unwrap();
        assert_eq!(load_matrix(&rgba_path).unwrap(), rgba);
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let rgba = PixelMatrix::filled(8, 8, Pixel::rgba(200, 200, 200, 10));

        save_matrix(&rgba, &path, &OutputConfig::default()).unwrap();
        let decoded = load_matrix(&path).unwrap();
        assert_eq!(decoded.layout(), ChannelLayout::Rgb);
        assert_eq!(decoded.shape(), (8, 8, 3));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = load_matrix(Path::new("/nonexistent/image.png")).unwrap_err();
        assert!(matches!(err, ImageIoError::Open { .. }));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image at all").unwrap();

        let err = probe(&path).unwrap_err();
        assert!(matches!(err, ImageIoError::Decode { .. }));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.bin");
        std::fs::write(&path, b"plain text").unwrap();

        let err = load_matrix(&path).unwrap_err();
        assert!(matches!(err, ImageIoError::UnsupportedFormat(_)));
    }
}
