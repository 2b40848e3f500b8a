//! A4 PDF assembly. The raster is scaled to the page width and sliced across
//! as many pages as its height needs; every page references the same image.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use super::raster::Raster;
use super::ExportError;

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

fn real(value: f64) -> Object {
    Object::Real(value as _)
}

/// Vertical image offsets (mm, top-down) for each page. The first page shows
/// the top of the image; each further page shifts it up by one page height
/// while image remains below the previous page.
pub fn paginate(image_height_mm: f64, page_height_mm: f64) -> Vec<f64> {
    let mut offsets = vec![0.0];
    if page_height_mm <= 0.0 {
        return offsets;
    }
    let mut left = image_height_mm - page_height_mm;
    while left > 0.0 {
        offsets.push(left - image_height_mm);
        left -= page_height_mm;
    }
    offsets
}

pub fn build_pdf(raster: &Raster) -> Result<Vec<u8>, ExportError> {
    if raster.width == 0 || raster.height == 0 {
        return Err(ExportError::Pdf("snapshot is empty".into()));
    }
    let pdf_err = |err: lopdf::Error| ExportError::Pdf(err.to_string());

    let image_height_mm = raster.height as f64 * PAGE_WIDTH_MM / raster.width as f64;
    let page_w = mm_to_pt(PAGE_WIDTH_MM);
    let page_h = mm_to_pt(PAGE_HEIGHT_MM);
    let image_h = mm_to_pt(image_height_mm);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&raster.rgb_on_white())
        .map_err(|err| ExportError::Pdf(err.to_string()))?;
    let pixels = encoder
        .finish()
        .map_err(|err| ExportError::Pdf(err.to_string()))?;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => raster.width as i64,
            "Height" => raster.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        pixels,
    );
    image.allows_compression = false;
    let image_id = doc.add_object(image);

    let offsets = paginate(image_height_mm, PAGE_HEIGHT_MM);
    let mut kids = Vec::with_capacity(offsets.len());
    for offset in &offsets {
        let y = page_h - mm_to_pt(*offset) - image_h;
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        real(page_w),
                        real(0.0),
                        real(0.0),
                        real(image_h),
                        real(0.0),
                        real(y),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().map_err(pdf_err)?,
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![real(0.0), real(0.0), real(page_w), real(page_h)],
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| ExportError::Pdf(err.to_string()))?;
    tracing::debug!(pages = offsets.len(), bytes = bytes.len(), "report PDF assembled");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(width: u32, height: u32) -> Raster {
        Raster {
            width,
            height,
            rgba: vec![255; (width * height * 4) as usize],
            premultiplied: true,
        }
    }

    #[test]
    fn pages_follow_image_height() {
        assert_eq!(paginate(100.0, 297.0), vec![0.0]);
        assert_eq!(paginate(297.0, 297.0), vec![0.0]);
        assert_eq!(paginate(600.0, 297.0), vec![0.0, -297.0, -594.0]);
    }

    #[test]
    fn tall_snapshot_spans_several_pages() {
        // 1:3 aspect maps to 630mm, three A4 pages.
        let bytes = build_pdf(&raster(20, 60)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn short_snapshot_is_one_page() {
        let bytes = build_pdf(&raster(40, 10)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn empty_raster_is_rejected() {
        assert!(matches!(build_pdf(&raster(0, 0)), Err(ExportError::Pdf(_))));
    }
}
