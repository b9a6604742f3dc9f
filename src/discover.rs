use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::filter;

/// A JPEG in the scanned directory, by bare name and absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct Listing {
    pub images: Vec<ImageEntry>,
    pub skipped: usize,
}

/// Lists the direct children of `dir` that qualify as images, sorted by name.
pub fn collect_images(dir: &Path) -> Result<Listing> {
    let metadata = std::fs::metadata(dir)
        .with_context(|| format!("read directory \"{}\"", dir.display()))?;
    if !metadata.is_dir() {
        bail!("read directory \"{}\": not a directory", dir.display());
    }

    let abs_dir = std::path::absolute(dir)
        .with_context(|| format!("resolve directory \"{}\"", dir.display()))?;

    let walker = WalkDir::new(&abs_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut listing = Listing::default();

    for entry in walker {
        let entry = entry.with_context(|| format!("read directory \"{}\"", dir.display()))?;

        if !entry.file_type().is_file() {
            debug!("Skipped \"{}\" (not a regular file)", entry.path().display());
            listing.skipped += 1;
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            warn!(
                "Skipped \"{}\" (file name is not valid UTF-8)",
                entry.path().display()
            );
            listing.skipped += 1;
            continue;
        };

        if filter::is_sidecar(name) {
            continue;
        }

        if !filter::is_jpeg(entry.path()) {
            debug!("Skipped \"{name}\" (not a JPEG)");
            listing.skipped += 1;
            continue;
        }

        listing.images.push(ImageEntry {
            name: name.to_string(),
            path: entry.path().to_path_buf(),
        });
    }

    debug!("Found {} image files", listing.images.len());
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn only_jpegs_are_listed_in_name_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("b.JPEG"), b"")?;
        fs::write(dir.path().join("a.jpg"), b"")?;
        fs::write(dir.path().join("notes.txt"), b"")?;
        fs::write(dir.path().join("bilder.csv"), b"")?;
        fs::create_dir(dir.path().join("sub.jpg"))?;
        fs::write(dir.path().join("sub.jpg").join("c.jpg"), b"")?;

        let listing = collect_images(dir.path())?;
        let names: Vec<_> = listing.images.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, ["a.jpg", "b.JPEG"]);
        assert!(listing.images.iter().all(|i| i.path.is_absolute()));
        assert_eq!(listing.skipped, 2);
        Ok(())
    }

    #[test]
    fn missing_directory_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let err = collect_images(&dir.path().join("missing")).unwrap_err();

        assert!(err.to_string().contains("read directory"));
        Ok(())
    }

    #[test]
    fn regular_file_is_not_a_directory() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("a.jpg");
        fs::write(&file, b"")?;

        assert!(collect_images(&file).is_err());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_skipped() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.jpg"), b"")?;
        std::os::unix::fs::symlink(dir.path().join("a.jpg"), dir.path().join("link.jpg"))?;

        let listing = collect_images(dir.path())?;
        let names: Vec<_> = listing.images.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, ["a.jpg"]);
        Ok(())
    }
}
