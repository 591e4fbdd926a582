use std::path::Path;
use std::time::Duration;

use lofty::error::LoftyError;
use lofty::file::TaggedFile;
use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use lofty::probe::Probe;

use super::model::Track;

fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}

fn read_tagged(path: &Path) -> Result<TaggedFile, LoftyError> {
    Ok(Probe::open(path)?.guess_file_type()?.read()?)
}

/// Build a `Track` for `path`, reading duration and tags from the file.
///
/// Unreadable or unsupported files still produce a track: the title falls
/// back to the file stem and the duration to zero. Adding a file to the
/// playlist must never fail on bad metadata.
pub fn probe(path: &Path) -> Track {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut title = stem;
    let mut artist: Option<String> = None;
    let mut duration = Duration::ZERO;

    match read_tagged(path) {
        Ok(tagged) => {
            duration = tagged.properties().duration();

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title() {
                    if !v.trim().is_empty() {
                        title = v.trim().to_string();
                    }
                }
                if let Some(v) = tag.artist() {
                    if !v.trim().is_empty() {
                        artist = Some(v.trim().to_string());
                    }
                }
            }
        }
        Err(e) => {
            log::debug!("metadata probe failed for {}: {e}", path.display());
        }
    }

    let display = make_display(&title, artist.as_deref());

    Track {
        path: path.to_path_buf(),
        title,
        duration,
        display,
    }
}
