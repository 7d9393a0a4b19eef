//! Sound output seam.
//!
//! The engine never decodes or plays audio itself. Systems write
//! [`AudioCmd`] messages, and the [`Paradise`](crate::paradise::Paradise)
//! facade forwards them to whatever [`SoundDevice`] the host installed.
//! Completion comes back through
//! [`Paradise::sound_finished`](crate::paradise::Paradise::sound_finished)
//! and [`Paradise::sound_error`](crate::paradise::Paradise::sound_error).
//!
//! A device that refuses a `PlayFx` command is treated exactly like a sound
//! error, so the click still navigates.

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::audio::AudioCmd;
use crate::resources::navigation::PlaybackId;

/// Host-side sound output.
pub trait SoundDevice {
    /// Start `fx` as playback `playback`. An error means it will never play.
    fn play(&mut self, playback: PlaybackId, fx: &str) -> Result<(), String>;

    /// Stop a playback if it is still running.
    fn stop(&mut self, playback: PlaybackId);
}

/// Device that accepts every command and never reports back.
///
/// Clicks then resolve through the fallback timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDevice;

impl SoundDevice for SilentDevice {
    fn play(&mut self, _playback: PlaybackId, _fx: &str) -> Result<(), String> {
        Ok(())
    }

    fn stop(&mut self, _playback: PlaybackId) {}
}

/// Device that forwards commands over a channel to an audio thread.
///
/// Play fails once the receiving side is gone.
#[derive(Debug, Clone)]
pub struct ChannelSoundDevice {
    /// Sender for [`AudioCmd`] messages (engine -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
}

/// Create a [`ChannelSoundDevice`] and the receiver the audio side drains.
pub fn channel_device() -> (ChannelSoundDevice, Receiver<AudioCmd>) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    (ChannelSoundDevice { tx_cmd }, rx_cmd)
}

impl SoundDevice for ChannelSoundDevice {
    fn play(&mut self, playback: PlaybackId, fx: &str) -> Result<(), String> {
        self.tx_cmd
            .send(AudioCmd::PlayFx {
                playback,
                fx: fx.to_string(),
            })
            .map_err(|e| format!("audio channel closed: {}", e))
    }

    fn stop(&mut self, playback: PlaybackId) {
        // ignore send error on shutdown
        let _ = self.tx_cmd.send(AudioCmd::StopFx { playback });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_device_forwards_commands() {
        let (mut device, rx) = channel_device();
        device.play(PlaybackId(1), "chime").unwrap();
        device.stop(PlaybackId(1));
        let cmds: Vec<AudioCmd> = rx.try_iter().collect();
        assert_eq!(
            cmds,
            vec![
                AudioCmd::PlayFx {
                    playback: PlaybackId(1),
                    fx: "chime".into()
                },
                AudioCmd::StopFx {
                    playback: PlaybackId(1)
                },
            ]
        );
    }

    #[test]
    fn channel_device_fails_when_receiver_dropped() {
        let (mut device, rx) = channel_device();
        drop(rx);
        assert!(device.play(PlaybackId(1), "chime").is_err());
    }
}
