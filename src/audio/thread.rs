use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};

use super::clock::ElapsedClock;
use super::sink::create_sink_at;
use super::types::{StatusHandle, TransportCmd};

/// How often the thread refreshes the shared status when no commands
/// arrive. Position consumers poll faster than this, but they only need
/// ms-scale freshness, not sample accuracy.
const STATUS_TICK: Duration = Duration::from_millis(100);

pub(super) fn spawn_transport_thread(
    rx: Receiver<TransportCmd>,
    status: StatusHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("audio output unavailable, playback disabled: {e}");
                // Keep draining commands so senders never see a closed
                // channel; the status handle stays at its idle default.
                loop {
                    match rx.recv() {
                        Ok(TransportCmd::Shutdown) | Err(_) => return,
                        Ok(_) => {}
                    }
                }
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful
        // in debugging, but noisy for a GUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut loaded: Option<PathBuf> = None;
        let mut clock = ElapsedClock::new();
        let mut volume: f32 = 1.0;

        loop {
            match rx.recv_timeout(STATUS_TICK) {
                Ok(cmd) => {
                    match cmd {
                        TransportCmd::Load(path) => {
                            if let Some(s) = sink.take() {
                                s.stop();
                            }
                            clock.reset();
                            match create_sink_at(&stream, &path, Duration::ZERO) {
                                Ok(s) => {
                                    s.set_volume(volume);
                                    sink = Some(s);
                                    loaded = Some(path);
                                }
                                Err(e) => {
                                    // The sender validated this file already;
                                    // hitting this means it vanished since.
                                    log::warn!("load failed: {e}");
                                    loaded = None;
                                }
                            }
                        }

                        TransportCmd::Play { start_at } => {
                            // A nonzero offset (or a consumed sink) needs a
                            // fresh decode; a just-loaded sink can simply
                            // be unpaused.
                            let needs_rebuild = start_at != Duration::ZERO
                                || sink.as_ref().map(|s| s.empty()).unwrap_or(true);
                            if needs_rebuild {
                                if let Some(path) = loaded.clone() {
                                    if let Some(s) = sink.take() {
                                        s.stop();
                                    }
                                    match create_sink_at(&stream, &path, start_at) {
                                        Ok(s) => {
                                            s.set_volume(volume);
                                            sink = Some(s);
                                        }
                                        Err(e) => log::warn!("seek rebuild failed: {e}"),
                                    }
                                }
                            }
                            if let Some(s) = sink.as_ref() {
                                s.play();
                                clock.start_at(start_at);
                            }
                        }

                        TransportCmd::Pause => {
                            if let Some(s) = sink.as_ref() {
                                s.pause();
                            }
                            clock.pause();
                        }

                        TransportCmd::Resume => {
                            if let Some(s) = sink.as_ref() {
                                s.play();
                                clock.resume();
                            }
                        }

                        TransportCmd::Stop => {
                            if let Some(s) = sink.take() {
                                s.stop();
                            }
                            clock.reset();
                        }

                        TransportCmd::SetVolume(v) => {
                            volume = v.clamp(0.0, 1.0);
                            if let Some(s) = sink.as_ref() {
                                s.set_volume(volume);
                            }
                        }

                        TransportCmd::Shutdown => {
                            if let Some(s) = sink.take() {
                                s.stop();
                            }
                            publish(&status, &clock, None);
                            break;
                        }
                    }
                    publish(&status, &clock, sink.as_ref());
                }
                Err(RecvTimeoutError::Timeout) => {
                    publish(&status, &clock, sink.as_ref());
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

fn publish(status: &StatusHandle, clock: &ElapsedClock, sink: Option<&Sink>) {
    let busy = sink.map(|s| !s.empty()).unwrap_or(false);
    if let Ok(mut st) = status.lock() {
        st.elapsed = clock.elapsed();
        st.busy = busy;
    }
}
