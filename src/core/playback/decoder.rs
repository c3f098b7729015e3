//! core/playback/decoder.rs
//! Symphonia demux/decode wrapped as a rodio `Source`.
//!
//! Every packet is converted through one reused interleaved `SampleBuffer`,
//! whatever the codec's native sample format. A decode failure that ends the
//! track early is reported to the controller as `PlayerEvent::Error`.

use std::fs::File;
use std::path::Path;
use std::sync::mpsc::Sender;
use std::time::Duration;

use rodio::Source;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CodecParameters, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};

use super::{EngineError, PlayerEvent};

/// Open `path` positioned at `start_ms`, plus the track length when the
/// container declares one.
pub fn open_source_at_ms(
    path: &Path,
    start_ms: u64,
    event_tx: Sender<PlayerEvent>,
) -> Result<(SymphoniaSource, Option<u64>), EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let mut format = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| EngineError::Probe(e.to_string()))?
        .format;

    let track = format.default_track().ok_or(EngineError::NoTrack)?;
    let track_id = track.id;
    let params = track.codec_params.clone();
    let duration_ms = duration_from_params(params.time_base, params.n_frames);

    if start_ms > 0 {
        let target = SeekTo::Time {
            time: Time::from(Duration::from_millis(start_ms)),
            track_id: Some(track_id),
        };
        format
            .seek(SeekMode::Accurate, target)
            .map_err(|e| EngineError::Seek(e.to_string()))?;
    }

    // Built after any seek so no decoder state predates the new position.
    let decoder = make_decoder(&params)?;

    let source = SymphoniaSource::new(format, decoder, track_id, &params, event_tx);
    Ok((source, duration_ms))
}

fn make_decoder(params: &CodecParameters) -> Result<Box<dyn Decoder>, EngineError> {
    symphonia::default::get_codecs()
        .make(params, &DecoderOptions::default())
        .map_err(|e| EngineError::Decoder(e.to_string()))
}

fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let t = time_base?.calc_time(n_frames?);
    Some(t.seconds * 1000 + (t.frac * 1000.0).round() as u64)
}

/// Streams interleaved f32 samples out of a symphonia format reader.
pub struct SymphoniaSource {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,

    sample_rate: u32,
    channels: u16,

    /// Grown only when a packet decodes to more samples than it holds.
    buf: Option<SampleBuffer<f32>>,
    pos: usize,

    ended: bool,
    event_tx: Sender<PlayerEvent>,
}

impl SymphoniaSource {
    fn new(
        format: Box<dyn FormatReader>,
        decoder: Box<dyn Decoder>,
        track_id: u32,
        params: &CodecParameters,
        event_tx: Sender<PlayerEvent>,
    ) -> Self {
        let mut this = Self {
            format,
            decoder,
            track_id,
            sample_rate: params.sample_rate.unwrap_or(44_100),
            channels: params
                .channels
                .map(|c| c.count() as u16)
                .unwrap_or(2),
            buf: None,
            pos: 0,
            ended: false,
            event_tx,
        };

        // rodio reads the rate and channel count before the first sample.
        this.refill();
        this
    }

    fn buffered(&self) -> &[f32] {
        self.buf.as_ref().map(SampleBuffer::samples).unwrap_or_default()
    }

    /// Decode the next packet of our track. On a hard error the track ends
    /// and the error goes to the controller.
    fn refill(&mut self) {
        self.pos = 0;
        if let Some(buf) = &mut self.buf {
            buf.clear();
        }

        match self.decode_next() {
            Ok(true) => {}
            Ok(false) => self.ended = true,
            Err(e) => {
                self.ended = true;
                let e = EngineError::Decode(e.to_string());
                tracing::warn!(error = %e, "ending track early");
                let _ = self.event_tx.send(PlayerEvent::Error(e.to_string()));
            }
        }
    }

    /// `Ok(false)` at end of stream.
    fn decode_next(&mut self) -> Result<bool, SymphoniaError> {
        loop {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                // symphonia signals end of stream as an unexpected EOF.
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    return Ok(false);
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(e),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(e)) => {
                    tracing::debug!(error = e, ts = packet.ts(), "skipping corrupt packet");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let spec = *decoded.spec();
            self.sample_rate = spec.rate;
            self.channels = spec.channels.count() as u16;

            let frames = decoded.capacity();
            let needed = frames * spec.channels.count();
            if self.buf.as_ref().is_some_and(|b| b.capacity() < needed) {
                self.buf = None;
            }
            let buf = self
                .buf
                .get_or_insert_with(|| SampleBuffer::new(frames as u64, spec));
            buf.copy_interleaved_ref(decoded);

            if buf.len() > 0 {
                return Ok(true);
            }
        }
    }
}

impl Iterator for SymphoniaSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos >= SymphoniaSource::buffered(self).len() {
            if self.ended {
                return None;
            }
            self.refill();
        }

        let s = SymphoniaSource::buffered(self)[self.pos];
        self.pos += 1;
        Some(s)
    }
}

impl Source for SymphoniaSource {
    // Spans change whenever a packet does; rodio re-reads rate/channels.
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::mpsc;
    use tempfile::TempDir;

    /// 16-bit mono PCM WAV with `frames` samples of a quiet ramp.
    fn write_wav(path: &Path, rate: u32, frames: u32) {
        let data_len = frames * 2;
        let mut bytes = Vec::with_capacity(44 + data_len as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&rate.to_le_bytes());
        bytes.extend_from_slice(&(rate * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        for i in 0..frames {
            bytes.extend_from_slice(&((i % 256) as i16).to_le_bytes());
        }
        fs::write(path, bytes).unwrap();
    }

    fn one_second_wav(tmp: &TempDir) -> PathBuf {
        let path = tmp.path().join("tone.wav");
        write_wav(&path, 8_000, 8_000);
        path
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let tmp = TempDir::new().unwrap();
        let (tx, _rx) = mpsc::channel();

        let err = open_source_at_ms(&tmp.path().join("gone.mp3"), 0, tx)
            .err()
            .unwrap();

        assert!(matches!(err, EngineError::Open { .. }), "{err}");
    }

    #[test]
    fn junk_with_an_audio_extension_is_unrecognized() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fake.mp3");
        fs::write(&path, "definitely not audio, just some text\n".repeat(64)).unwrap();
        let (tx, _rx) = mpsc::channel();

        let err = open_source_at_ms(&path, 0, tx).err().unwrap();

        assert!(matches!(err, EngineError::Probe(_)), "{err}");
    }

    #[test]
    fn wav_reports_duration_and_decodes_every_frame() {
        let tmp = TempDir::new().unwrap();
        let path = one_second_wav(&tmp);
        let (tx, rx) = mpsc::channel();

        let (source, duration_ms) = open_source_at_ms(&path, 0, tx).unwrap();

        assert_eq!(duration_ms, Some(1_000));
        assert_eq!(source.sample_rate(), 8_000);
        assert_eq!(source.channels(), 1);
        assert_eq!(source.count(), 8_000);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn start_offset_skips_the_beginning() {
        let tmp = TempDir::new().unwrap();
        let path = one_second_wav(&tmp);
        let (tx, _rx) = mpsc::channel();

        let (source, duration_ms) = open_source_at_ms(&path, 500, tx).unwrap();

        // Length is still the whole track; only the stream is shorter.
        assert_eq!(duration_ms, Some(1_000));
        let remaining = source.count();
        assert!(remaining > 0 && remaining < 8_000, "{remaining} samples left");
    }

    #[test]
    fn duration_needs_both_time_base_and_frames() {
        assert_eq!(duration_from_params(None, Some(10)), None);
        assert_eq!(duration_from_params(Some(TimeBase::new(1, 44_100)), None), None);
        assert_eq!(
            duration_from_params(Some(TimeBase::new(1, 44_100)), Some(66_150)),
            Some(1_500)
        );
    }
}
