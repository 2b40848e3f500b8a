//! SVG → pixels at a fixed scale factor.

use super::snapshot::SvgDocument;
use super::ExportError;

/// Resolution multiplier applied to the snapshot.
pub const RASTER_SCALE: f32 = 2.0;

/// RGBA pixels. Native rasters come back premultiplied, canvas reads do not.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub premultiplied: bool,
}

impl Raster {
    /// Opaque RGB with transparency composited over white.
    pub fn rgb_on_white(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.rgba.len() / 4 * 3);
        for px in self.rgba.chunks_exact(4) {
            let alpha = px[3] as u32;
            let background = 255 - alpha;
            for channel in &px[..3] {
                let colour = *channel as u32;
                let covered = if self.premultiplied {
                    colour
                } else {
                    colour * alpha / 255
                };
                out.push((covered + background).min(255) as u8);
            }
        }
        out
    }
}

pub async fn rasterize(doc: SvgDocument, scale: f32) -> Result<Raster, ExportError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        crate::core::platform::run_blocking(move || rasterize_native(&doc.markup, scale))
            .await
            .ok_or_else(|| ExportError::Raster("raster task was cancelled".into()))?
    }

    #[cfg(target_arch = "wasm32")]
    {
        rasterize_web(&doc, scale).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn rasterize_native(svg: &str, scale: f32) -> Result<Raster, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|err| ExportError::Snapshot(err.to_string()))?;
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| ExportError::Raster("snapshot size overflows".into()))?;
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ExportError::Raster("unable to allocate pixmap".into()))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    tracing::debug!(width = size.width(), height = size.height(), "snapshot rasterized");
    Ok(Raster {
        width: size.width(),
        height: size.height(),
        rgba: pixmap.take(),
        premultiplied: true,
    })
}

#[cfg(target_arch = "wasm32")]
async fn rasterize_web(doc: &SvgDocument, scale: f32) -> Result<Raster, ExportError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    let raster_err = |msg: &str| ExportError::Raster(msg.to_string());

    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&doc.markup));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| ExportError::Snapshot("unable to build SVG blob".into()))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| ExportError::Snapshot("unable to create SVG URL".into()))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ExportError::Unsupported)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| raster_err("unable to create canvas"))?
        .dyn_into()
        .map_err(|_| raster_err("canvas cast failed"))?;
    let scale = f64::from(scale);
    let width = (doc.width * scale).round() as u32;
    let height = (doc.height * scale).round() as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| raster_err("canvas context unavailable"))?
        .ok_or_else(|| raster_err("canvas context missing"))?
        .dyn_into()
        .map_err(|_| raster_err("context cast failed"))?;

    let image = HtmlImageElement::new().map_err(|_| raster_err("unable to create image"))?;
    image.set_src(&url);
    JsFuture::from(image.decode())
        .await
        .map_err(|_| raster_err("snapshot decode failed"))?;

    context
        .draw_image_with_html_image_element_and_dw_and_dh(
            &image,
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        )
        .map_err(|_| raster_err("unable to draw snapshot"))?;
    Url::revoke_object_url(&url).ok();

    let pixels = context
        .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
        .map_err(|_| raster_err("unable to read canvas pixels"))?;

    Ok(Raster {
        width,
        height,
        rgba: pixels.data().0,
        premultiplied: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparency_is_flattened_on_white() {
        let raster = Raster {
            width: 2,
            height: 1,
            rgba: vec![0, 0, 0, 0, 255, 0, 0, 255],
            premultiplied: true,
        };
        assert_eq!(raster.rgb_on_white(), vec![255, 255, 255, 255, 0, 0]);

        let straight = Raster {
            width: 1,
            height: 1,
            rgba: vec![200, 100, 0, 128],
            premultiplied: false,
        };
        assert_eq!(straight.rgb_on_white(), vec![227, 177, 127]);
    }

    #[test]
    fn native_raster_doubles_the_snapshot() {
        let svg = "<svg xmlns='http://www.w3.org/2000/svg' width='40' height='30'>\
                   <rect width='40' height='30' fill='#ff0000'/></svg>";
        let raster = rasterize_native(svg, RASTER_SCALE).unwrap();
        assert_eq!((raster.width, raster.height), (80, 60));
        assert_eq!(&raster.rgb_on_white()[..3], &[255, 0, 0]);
    }

    #[test]
    fn broken_markup_is_a_snapshot_error() {
        assert!(matches!(
            rasterize_native("<svg", 1.0),
            Err(ExportError::Snapshot(_))
        ));
    }
}
