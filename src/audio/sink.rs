//! Utilities for creating `rodio` sinks.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::TransportError;

/// Check that `path` can be opened and decoded, without keeping anything.
///
/// Called on the controller thread before a `Load` is dispatched, so a
/// corrupt or missing file surfaces as an error instead of a silent dead
/// sink in the audio thread.
pub(super) fn validate_source(path: &Path) -> Result<(), TransportError> {
    let file = File::open(path).map_err(|e| TransportError::Open(path.to_path_buf(), e))?;
    Decoder::new(BufReader::new(file)).map_err(|_| TransportError::Decode(path.to_path_buf()))?;
    Ok(())
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Offsets are applied with `skip_duration`, which decodes and discards up
/// to the target; it works for every format the decoder accepts, at the
/// cost of a short skip delay on long seeks.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, TransportError> {
    let file = File::open(path).map_err(|e| TransportError::Open(path.to_path_buf(), e))?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|_| TransportError::Decode(path.to_path_buf()))?
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
