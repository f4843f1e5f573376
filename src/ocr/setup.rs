use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::log;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";

const COMMON_EXECUTABLE_PATHS: [&str; 4] = [
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
];

const SYSTEM_TESSDATA_PATHS: [&str; 6] = [
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
    r"C:\Program Files\Tesseract-OCR\tessdata",
];

/// Resolved locations of the Tesseract executable and its language data.
#[derive(Clone, Debug)]
pub struct TesseractPaths {
    pub executable: PathBuf,
    pub tessdata: PathBuf,
}

/// Returns the directory for storing downloaded language data.
pub fn get_local_tessdata_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("card-stats")
        .join("tessdata")
}

/// Finds Tesseract and the language data for `language`.
///
/// Explicit overrides win. When no traineddata file can be found anywhere,
/// it is downloaded into the local data directory.
pub fn ensure_tesseract(
    executable_override: Option<&Path>,
    tessdata_override: Option<&Path>,
    language: &str,
) -> Result<TesseractPaths> {
    let executable = match executable_override {
        Some(path) => path.to_path_buf(),
        None => find_tesseract_executable()?,
    };
    log(&format!("Using Tesseract at: {}", executable.display()));

    let tessdata = match tessdata_override {
        Some(dir) => {
            if !traineddata_path(dir, language).exists() {
                return Err(anyhow!(
                    "{}.traineddata not found in {}",
                    language,
                    dir.display()
                ));
            }
            dir.to_path_buf()
        }
        None => match find_tessdata_dir(language) {
            Ok(dir) => dir,
            Err(_) => {
                let dir = get_local_tessdata_dir();
                fs::create_dir_all(&dir)?;
                download_tessdata(&dir, language)?;
                dir
            }
        },
    };
    log(&format!("Using tessdata at: {}", tessdata.display()));

    Ok(TesseractPaths {
        executable,
        tessdata,
    })
}

fn traineddata_path(dir: &Path, language: &str) -> PathBuf {
    dir.join(format!("{}.traineddata", language))
}

/// Finds the Tesseract executable: PATH first, then common install locations.
pub fn find_tesseract_executable() -> Result<PathBuf> {
    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    COMMON_EXECUTABLE_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .ok_or_else(|| anyhow!("Tesseract not found. Please install Tesseract-OCR."))
}

/// Finds a tessdata directory containing `<language>.traineddata`.
pub fn find_tessdata_dir(language: &str) -> Result<PathBuf> {
    let local = get_local_tessdata_dir();
    if traineddata_path(&local, language).exists() {
        return Ok(local);
    }

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let prefix = PathBuf::from(prefix);
        for candidate in [prefix.clone(), prefix.join("tessdata")] {
            if traineddata_path(&candidate, language).exists() {
                return Ok(candidate);
            }
        }
    }

    SYSTEM_TESSDATA_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| traineddata_path(p, language).exists())
        .ok_or_else(|| {
            anyhow!(
                "tessdata directory not found. Please ensure {}.traineddata is available.",
                language
            )
        })
}

/// Downloads `<language>.traineddata` from the upstream tessdata repository.
fn download_tessdata(tessdata_dir: &Path, language: &str) -> Result<()> {
    let url = format!("{}/{}.traineddata", TESSDATA_REPO, language);
    let target = traineddata_path(tessdata_dir, language);

    log(&format!("Downloading {}.traineddata...", language));

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let response = client
        .get(&url)
        .header("User-Agent", "card-stats")
        .send()
        .context("Failed to request traineddata")?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}.traineddata: HTTP {}",
            language,
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    let mut file = fs::File::create(&target)?;
    file.write_all(&bytes)?;

    log(&format!(
        "Downloaded {}.traineddata ({} bytes)",
        language,
        bytes.len()
    ));

    Ok(())
}
