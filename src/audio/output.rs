use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use super::sink::validate_source;
use super::thread::spawn_transport_thread;
use super::types::{StatusHandle, Transport, TransportCmd, TransportError, TransportStatus};

/// `rodio`-backed transport: commands go to a dedicated audio thread over
/// a channel, position/busy come back through a shared status snapshot.
pub struct RodioTransport {
    tx: Sender<TransportCmd>,
    status: StatusHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioTransport {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<TransportCmd>();
        let status: StatusHandle = Arc::new(Mutex::new(TransportStatus::default()));

        let handle = spawn_transport_thread(rx, status.clone());

        Self {
            tx,
            status,
            join: Mutex::new(Some(handle)),
        }
    }

    fn send(&self, cmd: TransportCmd) {
        if self.tx.send(cmd).is_err() {
            log::warn!("audio thread is gone; transport command dropped");
        }
    }
}

impl Default for RodioTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for RodioTransport {
    fn load(&mut self, path: &Path) -> Result<(), TransportError> {
        // Validate on the calling thread so the failure reaches the user;
        // the thread-side decode of the same file is then expected to work.
        validate_source(path)?;
        self.send(TransportCmd::Load(path.to_path_buf()));
        Ok(())
    }

    fn play(&mut self, start_at: Duration) {
        self.send(TransportCmd::Play { start_at });
    }

    fn pause(&mut self) {
        self.send(TransportCmd::Pause);
    }

    fn resume(&mut self) {
        self.send(TransportCmd::Resume);
    }

    fn stop(&mut self) {
        self.send(TransportCmd::Stop);
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(TransportCmd::SetVolume(volume.clamp(0.0, 1.0)));
    }

    fn position(&self) -> Duration {
        self.status
            .lock()
            .map(|s| s.elapsed)
            .unwrap_or(Duration::ZERO)
    }

    fn is_busy(&self) -> bool {
        self.status.lock().map(|s| s.busy).unwrap_or(false)
    }

    fn shutdown(&mut self) {
        self.send(TransportCmd::Shutdown);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
