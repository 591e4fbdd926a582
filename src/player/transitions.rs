use std::time::Duration;

use crate::audio::Transport;
use crate::library::Track;

use super::model::{Player, PlayerError, Status};

impl<T: Transport> Player<T> {
    /// Load and start the track at `index`: load, apply volume, start
    /// output, reset progress. On load failure nothing changes.
    pub fn play_index(&mut self, index: usize) -> Result<(), PlayerError> {
        if self.tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        let path = match self.tracks.get(index) {
            Some(t) => t.path.clone(),
            None => return Ok(()),
        };

        self.transport.load(&path).map_err(PlayerError::Load)?;
        self.transport.set_volume(self.volume);
        self.transport.play(Duration::ZERO);

        self.current = index;
        self.status = Status::Playing;
        self.elapsed = Duration::ZERO;
        self.idle_polls = 0;
        Ok(())
    }

    pub fn play_current(&mut self) -> Result<(), PlayerError> {
        self.play_index(self.current)
    }

    /// Play/pause toggle: pauses when playing, resumes when paused, and
    /// (re)starts the current track from stopped/finished.
    pub fn toggle(&mut self) -> Result<(), PlayerError> {
        if self.tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        match self.status {
            Status::Playing => {
                self.transport.pause();
                self.status = Status::Paused;
                Ok(())
            }
            Status::Paused => {
                self.transport.resume();
                self.status = Status::Playing;
                Ok(())
            }
            Status::Stopped | Status::Finished => self.play_current(),
        }
    }

    /// Halt output and reset the displayed time. Idempotent.
    pub fn stop(&mut self) {
        self.transport.stop();
        self.status = Status::Stopped;
        self.elapsed = Duration::ZERO;
        self.idle_polls = 0;
    }

    /// Advance to the next track, wrapping at the end. No-op when empty.
    pub fn next(&mut self) -> Result<(), PlayerError> {
        if self.tracks.is_empty() {
            return Ok(());
        }
        let target = (self.current + 1) % self.tracks.len();
        self.play_index(target)
    }

    /// Go back one track, wrapping at the start. No-op when empty.
    pub fn prev(&mut self) -> Result<(), PlayerError> {
        if self.tracks.is_empty() {
            return Ok(());
        }
        let target = (self.current + self.tracks.len() - 1) % self.tracks.len();
        self.play_index(target)
    }

    /// Seek relative to the current position, clamped to the track.
    /// Seeking forward past the end behaves as next-track. Only acts
    /// while a track is loaded; a paused track stays paused.
    pub fn seek_by(&mut self, delta_secs: i64) -> Result<(), PlayerError> {
        if !self.status.is_playing() {
            return Ok(());
        }
        let duration = match self.current_track() {
            Some(t) => t.duration,
            None => return Ok(()),
        };

        let target = if delta_secs >= 0 {
            self.elapsed + Duration::from_secs(delta_secs as u64)
        } else {
            self.elapsed
                .saturating_sub(Duration::from_secs(delta_secs.unsigned_abs()))
        };

        if delta_secs > 0 && duration > Duration::ZERO && target >= duration {
            return self.next();
        }
        let target = if duration > Duration::ZERO {
            target.min(duration)
        } else {
            target
        };

        let was_paused = self.status.is_paused();
        self.transport.play(target);
        if was_paused {
            self.transport.pause();
        }
        self.elapsed = target;
        self.idle_polls = 0;
        Ok(())
    }

    /// Set the normalized volume. Applies immediately; never touches the
    /// play/pause state.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.transport.set_volume(self.volume);
    }

    pub fn set_volume_percent(&mut self, percent: f32) {
        self.set_volume(percent / 100.0);
    }

    /// Append tracks, rejecting duplicates by path. Returns how many were
    /// actually added. Never touches playback.
    pub fn queue_tracks(&mut self, new: Vec<Track>) -> usize {
        let mut added = 0;
        for track in new {
            if self.tracks.iter().any(|t| t.path == track.path) {
                continue;
            }
            self.tracks.push(track);
            added += 1;
        }
        added
    }

    /// Append tracks and, when nothing is playing, start playback at the
    /// first newly added entry.
    pub fn add_tracks(&mut self, new: Vec<Track>) -> Result<usize, PlayerError> {
        let added = self.queue_tracks(new);
        if added > 0 && !self.status.is_playing() {
            self.current = self.tracks.len() - added;
            self.play_current()?;
        }
        Ok(added)
    }

    /// Remove the entry at `index`, keeping the current-track pointer on
    /// the same logical track. Removing the playing entry stops playback
    /// first; emptying the playlist force-stops.
    pub fn remove(&mut self, index: usize) {
        if index >= self.tracks.len() {
            return;
        }
        if index == self.current && self.status.is_playing() {
            self.stop();
        }
        self.tracks.remove(index);

        if self.tracks.is_empty() {
            self.stop();
            self.current = 0;
            return;
        }
        if index < self.current {
            self.current -= 1;
        } else if self.current >= self.tracks.len() {
            self.current = self.tracks.len() - 1;
        }
    }

    /// Drop the whole playlist and stop.
    pub fn clear(&mut self) {
        self.stop();
        self.tracks.clear();
        self.current = 0;
    }

    /// Progress tick (~50 ms): refresh the displayed position from the
    /// transport. Only meaningful while actually playing; a paused track
    /// keeps its preserved position.
    pub fn tick_progress(&mut self) {
        if self.status != Status::Playing {
            return;
        }
        let pos = self.transport.position();
        let duration = self
            .current_track()
            .map(|t| t.duration)
            .unwrap_or(Duration::ZERO);
        self.elapsed = if duration > Duration::ZERO {
            pos.min(duration)
        } else {
            pos
        };
    }

    /// End-detection tick (~500 ms): when the transport has gone idle for
    /// enough consecutive polls, advance to the next track or finish.
    ///
    /// Runs only in `Playing` - pausing or stopping must never trigger a
    /// phantom advance, and a single idle report is ignored because the
    /// transport can look idle for one poll right after a seek or load.
    pub fn tick_end_check(&mut self) -> Result<(), PlayerError> {
        if self.status != Status::Playing {
            return Ok(());
        }
        if self.transport.is_busy() {
            self.idle_polls = 0;
            return Ok(());
        }
        self.idle_polls += 1;
        if self.idle_polls < self.idle_polls_to_advance {
            return Ok(());
        }
        self.idle_polls = 0;

        if self.current + 1 < self.tracks.len() {
            self.current += 1;
            if let Err(e) = self.play_current() {
                // Skipping ahead silently could loop forever on a playlist
                // of unreadable files; stop and let the UI report it.
                self.stop();
                return Err(e);
            }
        } else {
            self.status = Status::Finished;
            self.elapsed = self
                .current_track()
                .map(|t| t.duration)
                .unwrap_or(Duration::ZERO);
        }
        Ok(())
    }
}
