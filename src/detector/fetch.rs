//! Model file resolution and download cache.
//!
//! A model identifier is tried as a filesystem path first, then as a name in
//! the local cache, and finally as a downloadable name. Downloads land in
//! `~/.cache/phonespotter/models/` and are written through a `.part` file so
//! an interrupted transfer never leaves a truncated model behind.

use std::fs;
use std::path::{Path, PathBuf};

use super::DetectError;

const MODEL_BASE_URL: &str = "https://parcel.pyke.io/v2/cdn/assetdelivery/ortrsv2/ex_models";

/// Default cache directory for downloaded models.
/// Default: ~/.cache/phonespotter/models/
pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("phonespotter")
        .join("models")
}

/// Resolve a model identifier to a local ONNX file, downloading on a cache
/// miss.
pub fn resolve_model(identifier: &str) -> Result<PathBuf, DetectError> {
    let direct = Path::new(identifier);
    if direct.exists() {
        return Ok(direct.to_path_buf());
    }

    // Anything with path separators was meant as a path; don't turn a typo'd
    // path into a download.
    if identifier.contains('/') || identifier.contains('\\') {
        return Err(DetectError::ModelNotFound(identifier.to_string()));
    }

    let file_name = model_file_name(identifier);
    let cached = cache_dir().join(&file_name);
    if cached.exists() {
        return Ok(cached);
    }

    download_model(&file_name, &cached)?;
    Ok(cached)
}

/// Normalize an identifier to its on-disk file name.
pub fn model_file_name(identifier: &str) -> String {
    if identifier.ends_with(".onnx") {
        identifier.to_string()
    } else {
        format!("{}.onnx", identifier)
    }
}

fn download_model(file_name: &str, dest: &Path) -> Result<(), DetectError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let url = format!("{}/{}", MODEL_BASE_URL, file_name);
    println!("Downloading model: {}", file_name);
    log::info!("fetching {}", url);

    let response = ureq::get(&url)
        .call()
        .map_err(|e| DetectError::Fetch(format!("{}: {}", url, e)))?;

    let part = dest.with_extension("onnx.part");
    let mut out = fs::File::create(&part)?;
    std::io::copy(&mut response.into_reader(), &mut out)?;
    fs::rename(&part, dest)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_model_file_name() {
        assert_eq!(model_file_name("yolov8n"), "yolov8n.onnx");
        assert_eq!(model_file_name("yolov8n.onnx"), "yolov8n.onnx");
    }

    #[test]
    fn test_resolve_existing_path_is_used_directly() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("custom.onnx");
        let mut f = fs::File::create(&model_path).unwrap();
        f.write_all(b"not a real model").unwrap();

        let resolved = resolve_model(model_path.to_str().unwrap()).unwrap();
        assert_eq!(resolved, model_path);
    }

    #[test]
    fn test_resolve_missing_path_is_not_downloaded() {
        let err = resolve_model("/definitely/missing/model.onnx").unwrap_err();
        assert!(matches!(err, DetectError::ModelNotFound(_)));
    }

    #[test]
    fn test_cache_dir_ends_with_models() {
        let dir = cache_dir();
        assert!(dir.ends_with(Path::new("phonespotter").join("models")));
    }
}
