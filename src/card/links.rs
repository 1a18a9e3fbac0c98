//! Outbound links on the card
//!
//! Each link is plain data: a label, an accent, and a target. External
//! targets go to the platform URL opener as a detached process, so the
//! browser has no handle back to the card. Download targets copy an asset
//! into the user's downloads directory instead of opening it.

use crate::config::LinksConfig;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Which profile a link points at (drives its accent color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    LinkedIn,
    GitHub,
    Scholar,
    Cv,
}

/// Where activating a link leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Open in the system browser
    External(String),
    /// Save an asset under `file_name` rather than navigating to it
    Download { asset: String, file_name: String },
}

/// A link button: pure data, no state of its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkButton {
    pub kind: LinkKind,
    pub label: &'static str,
    pub target: LinkTarget,
}

impl LinkButton {
    /// Text shown next to the label, e.g. the URL or "CNO_CV.pdf ↓"
    pub fn hint(&self) -> &str {
        match &self.target {
            LinkTarget::External(url) => url,
            LinkTarget::Download { file_name, .. } => file_name,
        }
    }
}

/// The card's link buttons, in display order
pub fn card_links(links: &LinksConfig) -> Vec<LinkButton> {
    vec![
        LinkButton {
            kind: LinkKind::LinkedIn,
            label: "LinkedIn",
            target: LinkTarget::External(links.linkedin.clone()),
        },
        LinkButton {
            kind: LinkKind::GitHub,
            label: "GitHub",
            target: LinkTarget::External(links.github.clone()),
        },
        LinkButton {
            kind: LinkKind::Scholar,
            label: "Google Scholar",
            target: LinkTarget::External(links.scholar.clone()),
        },
        LinkButton {
            kind: LinkKind::Cv,
            label: "Download CV",
            target: LinkTarget::Download {
                asset: links.cv.clone(),
                file_name: links.cv_download_name.clone(),
            },
        },
    ]
}

/// Link activation failures
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("asset not found: {}", .0.display())]
    AssetMissing(PathBuf),

    #[error("no downloads directory available")]
    NoDownloadDir,

    #[error("could not launch {program}: {source}")]
    Opener {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("could not save {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What an activation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Opened(String),
    Saved(PathBuf),
}

/// Activate a link button
pub fn activate(button: &LinkButton, assets_dir: &Path) -> Result<LinkOutcome, LinkError> {
    match &button.target {
        LinkTarget::External(url) => {
            open_external(url)?;
            Ok(LinkOutcome::Opened(url.clone()))
        }
        LinkTarget::Download { asset, file_name } => {
            let dest_dir = dirs::download_dir()
                .or_else(dirs::home_dir)
                .ok_or(LinkError::NoDownloadDir)?;
            save_download(assets_dir, asset, file_name, &dest_dir).map(LinkOutcome::Saved)
        }
    }
}

/// Resolve an asset path against the assets directory
pub fn resolve_asset(assets_dir: &Path, asset: &str) -> Result<PathBuf, LinkError> {
    let path = assets_dir.join(asset);
    if path.is_file() {
        Ok(path)
    } else {
        Err(LinkError::AssetMissing(path))
    }
}

/// Open a local asset (the profile photo) with the platform opener
pub fn open_asset(assets_dir: &Path, asset: &str) -> Result<PathBuf, LinkError> {
    let path = resolve_asset(assets_dir, asset)?;
    open_external(&path.display().to_string())?;
    Ok(path)
}

/// Copy `asset` into `dest_dir` as `file_name`
///
/// An existing file is never overwritten; the copy gets a numbered name
/// instead ("CV (1).pdf", "CV (2).pdf", ...).
pub fn save_download(
    assets_dir: &Path,
    asset: &str,
    file_name: &str,
    dest_dir: &Path,
) -> Result<PathBuf, LinkError> {
    let source = resolve_asset(assets_dir, asset)?;
    let dest = available_path(dest_dir, file_name);

    std::fs::copy(&source, &dest).map_err(|source| LinkError::Io {
        path: dest.clone(),
        source,
    })?;

    tracing::info!("Saved {} to {}", source.display(), dest.display());
    Ok(dest)
}

/// First non-existing path for `file_name` in `dir`
fn available_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };

    (1..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{} ({}).{}", stem, n, ext)),
            None => dir.join(format!("{} ({})", stem, n)),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Hand a URL or path to the platform opener without waiting on it
pub fn open_external(target: &str) -> Result<(), LinkError> {
    let (program, mut command) = opener_command(target);
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| LinkError::Opener { program, source })?;

    // Reap the opener in the background so it doesn't linger as a zombie
    std::thread::spawn(move || {
        let _ = child.wait();
    });

    tracing::debug!("Opened {} via {}", target, program);
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener_command(target: &str) -> (&'static str, Command) {
    let mut command = Command::new("open");
    command.arg(target);
    ("open", command)
}

#[cfg(target_os = "windows")]
fn opener_command(target: &str) -> (&'static str, Command) {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", target]);
    ("start", command)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(target: &str) -> (&'static str, Command) {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    ("xdg-open", command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_card_links_order_and_targets() {
        let links = card_links(&LinksConfig::default());
        let labels: Vec<_> = links.iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            vec!["LinkedIn", "GitHub", "Google Scholar", "Download CV"]
        );

        assert!(matches!(links[0].target, LinkTarget::External(_)));
        assert_eq!(
            links[3].target,
            LinkTarget::Download {
                asset: "CNO_CV_Dec2025.pdf".to_string(),
                file_name: "Naz_Otken_CV.pdf".to_string(),
            }
        );
        assert_eq!(links[3].hint(), "Naz_Otken_CV.pdf");
    }

    #[test]
    fn test_save_download_copies_under_download_name() {
        let assets = tempfile::tempdir().unwrap();
        let downloads = tempfile::tempdir().unwrap();
        fs::write(assets.path().join("cv.pdf"), b"%PDF-1.7").unwrap();

        let saved = save_download(assets.path(), "cv.pdf", "Ada_CV.pdf", downloads.path()).unwrap();

        assert_eq!(saved, downloads.path().join("Ada_CV.pdf"));
        assert_eq!(fs::read(&saved).unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn test_save_download_never_overwrites() {
        let assets = tempfile::tempdir().unwrap();
        let downloads = tempfile::tempdir().unwrap();
        fs::write(assets.path().join("cv.pdf"), b"new").unwrap();
        fs::write(downloads.path().join("Ada_CV.pdf"), b"old").unwrap();

        let first = save_download(assets.path(), "cv.pdf", "Ada_CV.pdf", downloads.path()).unwrap();
        let second = save_download(assets.path(), "cv.pdf", "Ada_CV.pdf", downloads.path()).unwrap();

        assert_eq!(first, downloads.path().join("Ada_CV (1).pdf"));
        assert_eq!(second, downloads.path().join("Ada_CV (2).pdf"));
        assert_eq!(fs::read(downloads.path().join("Ada_CV.pdf")).unwrap(), b"old");
    }

    #[test]
    fn test_missing_asset_reported() {
        let assets = tempfile::tempdir().unwrap();
        let downloads = tempfile::tempdir().unwrap();

        let err = save_download(assets.path(), "nope.pdf", "x.pdf", downloads.path()).unwrap_err();
        assert!(matches!(err, LinkError::AssetMissing(p) if p.ends_with("nope.pdf")));
        assert_eq!(fs::read_dir(downloads.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_numbered_name_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README"), b"").unwrap();
        assert_eq!(available_path(dir.path(), "README"), dir.path().join("README (1)"));
    }
}
