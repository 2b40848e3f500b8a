use super::ExportError;

/// Where a finished export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Written to the local export folder.
    Saved(std::path::PathBuf),
    /// Handed to the browser as a download.
    Downloaded,
}

pub async fn deliver_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Delivery, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let failed = |msg: &str| ExportError::Delivery(msg.to_string());

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| failed("unable to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| failed("unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ExportError::Unsupported)?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| failed("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| failed("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or_else(|| failed("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(Delivery::Downloaded)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let dir = export_dir()?;
        save_into(&dir, filename, &bytes)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = crate::core::platform::project_dirs().ok_or_else(|| {
        ExportError::Delivery("unable to determine export directory".into())
    })?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_into(
    dir: &std::path::Path,
    filename: &str,
    bytes: &[u8],
) -> Result<Delivery, ExportError> {
    use std::fs;

    let io_err = |err: std::io::Error| ExportError::Delivery(err.to_string());
    fs::create_dir_all(dir).map_err(io_err)?;
    let path = dir.join(filename);
    fs::write(&path, bytes).map_err(io_err)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "report saved");
    Ok(Delivery::Saved(path))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn files_land_in_the_export_folder() {
        let dir = std::env::temp_dir().join(format!("decisionmate-export-{}", std::process::id()));
        let delivery = save_into(&dir, "report.pdf", b"%PDF-1.5").unwrap();
        let Delivery::Saved(path) = delivery else {
            panic!("expected a saved file");
        };
        assert_eq!(path, dir.join("report.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5");
        std::fs::remove_dir_all(&dir).ok();
    }
}
