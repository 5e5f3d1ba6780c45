//! SVG to PNG rasterization for the image endpoints.

use tiny_skia::Pixmap;

#[derive(Debug)]
pub enum RasterError {
    Parse(String),
    Pixmap,
    Encode(String),
}

impl std::fmt::Display for RasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterError::Parse(msg) => write!(f, "Failed to parse SVG: {}", msg),
            RasterError::Pixmap => write!(f, "Failed to allocate pixmap"),
            RasterError::Encode(msg) => write!(f, "Failed to encode PNG: {}", msg),
        }
    }
}

impl std::error::Error for RasterError {}

/// Rasterize SVG markup to PNG at the given scale. The widgets draw no
/// text, so no font database is loaded.
pub fn svg_to_png(svg_data: &str, scale: f32) -> Result<Vec<u8>, RasterError> {
    use resvg::usvg;

    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_data, &opts)
        .map_err(|e| RasterError::Parse(e.to_string()))?;

    let size = tree.size();
    let width = (size.width() * scale) as u32;
    let height = (size.height() * scale) as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or(RasterError::Pixmap)?;

    let transform = if scale != 1.0 {
        tiny_skia::Transform::from_scale(scale, scale)
    } else {
        tiny_skia::Transform::identity()
    };

    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.to_string()))
}
