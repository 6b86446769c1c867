//! Image decoding collaborator, PNG export and map preview rasterization
//!
//! The extraction pipeline only talks to [`ImageDecoder`]; [`RasterDecoder`]
//! is the implementation backed by the `image` crate.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, ImageFormat, Pixel, Rgb, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Cursor;
use std::path::Path;

use crate::io::configuration::MAX_PREVIEW_PIXELS;
use crate::io::error::{ComposerError, Result, invalid_parameter};
use crate::spatial::grid::GeneratedMap;
use crate::spatial::partition::SourceRect;
use crate::spatial::tiles::TileAtlas;

/// Width and height of an image in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Row-major pixel buffer with three or four channels per pixel
///
/// Three-channel buffers are treated as fully opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw channel data
    ///
    /// # Errors
    ///
    /// Returns an error if `channels` is not 3 or 4 or the data length does
    /// not match the dimensions
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(invalid_parameter(
                "channels",
                &channels,
                &"pixel buffers carry 3 (RGB) or 4 (RGBA) channels",
            ));
        }
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(invalid_parameter(
                "data",
                &data.len(),
                &format!("{width}x{height}x{channels} buffer needs {expected} bytes"),
            ));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Wrap RGBA data
    ///
    /// # Errors
    ///
    /// Returns an error if the data length is not `width * height * 4`
    pub fn rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, 4, data)
    }

    /// Fully transparent RGBA buffer
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            channels: 4,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Raw channel data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of pixels
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterate pixels as RGBA, filling alpha with 255 when absent
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data.chunks_exact(self.channels.max(1)).map(|chunk| {
            let channel = |index: usize| chunk.get(index).copied();
            [
                channel(0).unwrap_or(0),
                channel(1).unwrap_or(0),
                channel(2).unwrap_or(0),
                channel(3).unwrap_or(u8::MAX),
            ]
        })
    }

    /// Convert to four channels
    pub fn to_rgba(&self) -> Self {
        if self.channels == 4 {
            return self.clone();
        }
        Self {
            width: self.width,
            height: self.height,
            channels: 4,
            data: self.pixels().flatten().collect(),
        }
    }

    /// Copy another buffer into this one with its top-left corner at `(x, y)`
    ///
    /// Both buffers are addressed as RGBA; pixels falling outside are dropped.
    fn blit(&mut self, source: &Self, x: u32, y: u32) {
        if self.channels != 4 {
            return;
        }
        let row_stride = self.width as usize * 4;
        for (index, pixel) in source.pixels().enumerate() {
            let sx = (index % source.width.max(1) as usize) as u32;
            let sy = (index / source.width.max(1) as usize) as u32;
            let (tx, ty) = (x + sx, y + sy);
            if tx >= self.width || ty >= self.height {
                continue;
            }
            let offset = ty as usize * row_stride + tx as usize * 4;
            if let Some(target) = self.data.get_mut(offset..offset + 4) {
                target.copy_from_slice(&pixel);
            }
        }
    }
}

/// Image library capability the extraction pipeline depends on
pub trait ImageDecoder {
    /// Decode encoded image bytes into a pixel buffer
    ///
    /// # Errors
    ///
    /// Returns `ImageDecode` when the bytes are not a supported image
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer>;

    /// Cut a rectangle out of a decoded image and resize it to a square
    ///
    /// # Errors
    ///
    /// Returns `RegionOutOfBounds` when the rectangle leaves the image
    fn extract_region(
        &self,
        image: &PixelBuffer,
        rect: &SourceRect,
        target_size: u32,
    ) -> Result<PixelBuffer>;

    /// Encode a pixel buffer as PNG
    ///
    /// # Errors
    ///
    /// Returns `ImageEncode` when encoding fails
    fn encode_png(&self, buffer: &PixelBuffer) -> Result<Vec<u8>>;
}

/// [`ImageDecoder`] backed by the `image` crate
///
/// Regions are resized with nearest-neighbour sampling so pixel art stays crisp.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl RasterDecoder {
    fn to_rgba_image(buffer: &PixelBuffer) -> Result<RgbaImage> {
        let rgba = buffer.to_rgba();
        RgbaImage::from_raw(rgba.width, rgba.height, rgba.data).ok_or_else(|| {
            invalid_parameter(
                "buffer",
                &format!("{}x{}", buffer.width, buffer.height),
                &"pixel data does not match dimensions",
            )
        })
    }

    // Borrows the buffer; only the cropped region is copied
    fn crop<P: Pixel<Subpixel = u8>>(
        buffer: &PixelBuffer,
        rect: &SourceRect,
    ) -> Result<ImageBuffer<P, Vec<u8>>> {
        let view = ImageBuffer::<P, &[u8]>::from_raw(buffer.width, buffer.height, buffer.data())
            .ok_or_else(|| {
                invalid_parameter(
                    "buffer",
                    &format!("{}x{}", buffer.width, buffer.height),
                    &"pixel data does not match dimensions",
                )
            })?;
        Ok(ImageBuffer::from_fn(rect.width, rect.height, |x, y| {
            *view.get_pixel(rect.x + x, rect.y + y)
        }))
    }

    fn from_rgba_image(image: RgbaImage) -> PixelBuffer {
        let (width, height) = image.dimensions();
        PixelBuffer {
            width,
            height,
            channels: 4,
            data: image.into_raw(),
        }
    }
}

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| ComposerError::ImageDecode { source: e })?;
        Ok(Self::from_rgba_image(decoded.to_rgba8()))
    }

    fn extract_region(
        &self,
        image: &PixelBuffer,
        rect: &SourceRect,
        target_size: u32,
    ) -> Result<PixelBuffer> {
        if !rect.fits_within(image.width, image.height) {
            return Err(ComposerError::RegionOutOfBounds {
                region: (rect.x, rect.y, rect.width, rect.height),
                image: (image.width, image.height),
            });
        }
        if target_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &target_size,
                &"must be positive",
            ));
        }

        let region = if image.channels == 4 {
            Self::crop::<Rgba<u8>>(image, rect)?
        } else {
            DynamicImage::ImageRgb8(Self::crop::<Rgb<u8>>(image, rect)?).to_rgba8()
        };
        let resized = if region.dimensions() == (target_size, target_size) {
            region
        } else {
            imageops::resize(&region, target_size, target_size, FilterType::Nearest)
        };

        Ok(Self::from_rgba_image(resized))
    }

    fn encode_png(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        let image = DynamicImage::ImageRgba8(Self::to_rgba_image(buffer)?);
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ComposerError::ImageEncode { source: e })?;
        Ok(bytes)
    }
}

/// Format PNG bytes as a base64 data URL
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Edge length of one preview cell
///
/// Cells are drawn at `tile_size` unless the canvas would exceed
/// [`MAX_PREVIEW_PIXELS`], in which case they shrink to the largest size that
/// fits.
///
/// # Errors
///
/// Returns `InvalidParameter` when even one-pixel cells exceed the budget
pub fn preview_cell_size(map: &GeneratedMap, tile_size: u32) -> Result<u32> {
    let cells = u64::try_from(map.width)
        .unwrap_or(u64::MAX)
        .saturating_mul(u64::try_from(map.height).unwrap_or(u64::MAX));
    if cells > MAX_PREVIEW_PIXELS {
        return Err(invalid_parameter(
            "map",
            &format!("{}x{}", map.width, map.height),
            &format!("preview would exceed {MAX_PREVIEW_PIXELS} pixels"),
        ));
    }

    let tile_size = tile_size.max(1);
    if cells == 0 {
        return Ok(tile_size);
    }
    let fitting = (MAX_PREVIEW_PIXELS / cells).isqrt();
    Ok(u32::try_from(fitting).unwrap_or(u32::MAX).min(tile_size))
}

fn scale_tile(pixels: &PixelBuffer, cell_size: u32) -> Result<PixelBuffer> {
    if pixels.width == cell_size && pixels.height == cell_size {
        return Ok(pixels.to_rgba());
    }
    let image = RasterDecoder::to_rgba_image(pixels)?;
    Ok(RasterDecoder::from_rgba_image(imageops::resize(
        &image,
        cell_size,
        cell_size,
        FilterType::Nearest,
    )))
}

/// Rasterize a generated map using the pixels of its atlas tiles
///
/// Each cell is drawn at the size [`preview_cell_size`] picks; cells without a
/// tile, or whose tile is not in the atlas, stay transparent.
///
/// # Errors
///
/// Returns an error if the map is too large to preview or a tile cannot be
/// rescaled
pub fn render_map(map: &GeneratedMap, atlas: &TileAtlas) -> Result<PixelBuffer> {
    let cell_size = preview_cell_size(map, atlas.tile_size)?;
    let width = u32::try_from(map.width).unwrap_or(u32::MAX).saturating_mul(cell_size);
    let height = u32::try_from(map.height).unwrap_or(u32::MAX).saturating_mul(cell_size);
    let mut canvas = PixelBuffer::transparent(width, height);

    let tiles_by_id: HashMap<&str, &PixelBuffer> = atlas
        .tiles
        .iter()
        .filter(|tile| tile.pixels.pixel_count() > 0)
        .map(|tile| (tile.id.as_str(), &tile.pixels))
        .collect();
    let mut scaled: HashMap<&str, PixelBuffer> = HashMap::new();

    for cell in map.cells.iter().flatten() {
        let Some((id, pixels)) = cell
            .tile_id
            .as_deref()
            .and_then(|id| tiles_by_id.get_key_value(id))
        else {
            continue;
        };
        let pixels = match scaled.entry(*id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(scale_tile(pixels, cell_size)?),
        };
        canvas.blit(pixels, cell.x as u32 * cell_size, cell.y as u32 * cell_size);
    }

    Ok(canvas)
}

/// Render a map preview and save it as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - No cell of the map references a tile of the atlas
/// - The map is too large to preview
/// - PNG encoding fails
/// - The parent directory cannot be created or the file cannot be written
pub fn export_map_as_png(
    decoder: &impl ImageDecoder,
    map: &GeneratedMap,
    atlas: &TileAtlas,
    output_path: &Path,
) -> Result<()> {
    let drawable = map
        .cells
        .iter()
        .flatten()
        .any(|cell| cell.tile_id.as_deref().is_some_and(|id| atlas.tile(id).is_some()));
    if !drawable {
        return Err(invalid_parameter(
            "map",
            &map.id,
            &format!("no cell references a tile of atlas '{}'", atlas.id),
        ));
    }

    let png = decoder.encode_png(&render_map(map, atlas)?)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ComposerError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(output_path, png).map_err(|e| ComposerError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write preview",
        source: e,
    })
}
