//! Audio file decoding.
//!
//! Uses symphonia for format-agnostic decoding (MP3, WAV, M4A/AAC) into a
//! mono f32 signal at the file's native sample rate. No resampling: frame
//! times downstream are computed against the native rate.

use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use crate::error::{AudioError, AudioResult};
use crate::signal::Signal;

/// Decode an audio file into a mono signal.
///
/// Multi-channel input is downmixed by averaging the channels of each
/// frame. Decode failures are surfaced verbatim; plain I/O failures keep
/// their own error variants.
pub fn decode_signal(path: &Path) -> AudioResult<Signal> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AudioError::FileNotFound(path.to_path_buf()),
        _ => AudioError::Io(e),
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Hint the container format from the file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;

    let mut format = probed.format;

    // First audio track with a decodable codec
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(AudioError::NoAudioTrack)?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| AudioError::decode_failed("cannot determine sample rate"))?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1).max(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break; // End of stream
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(AudioError::decode_failed(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // Recoverable per-packet errors: skip the packet
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(AudioError::decode_failed(e.to_string())),
        };

        let spec = *decoded.spec();
        let capacity = decoded.capacity();

        let sbuf =
            sample_buf.get_or_insert_with(|| SampleBuffer::<f32>::new(capacity as u64, spec));
        if sbuf.capacity() < capacity {
            *sbuf = SampleBuffer::<f32>::new(capacity as u64, spec);
        }

        sbuf.copy_interleaved_ref(decoded);
        let interleaved = sbuf.samples();

        if channels == 1 {
            samples.extend_from_slice(interleaved);
        } else {
            // Downmix: mean of the channels per frame
            for frame in interleaved.chunks_exact(channels) {
                samples.push(frame.iter().sum::<f32>() / channels as f32);
            }
        }
    }

    debug!(
        path = %path.display(),
        sample_rate,
        channels,
        samples = samples.len(),
        "Decoded audio signal"
    );

    Ok(Signal::new(samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = decode_signal(Path::new("/nonexistent/audio.mp3"));
        assert!(matches!(result, Err(AudioError::FileNotFound(_))));
    }

    #[test]
    fn test_garbage_input_rejected() {
        let mut file = tempfile::NamedTempFile::with_suffix(".m4a").unwrap();
        std::io::Write::write_all(&mut file, b"this is not audio at all").unwrap();

        let result = decode_signal(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().is_decode_error());
    }

    #[test]
    fn test_wav_mono_round_trip() {
        let file = tempfile::NamedTempFile::with_suffix(".wav").unwrap();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        {
            let mut writer = hound::WavWriter::create(file.path(), spec).unwrap();
            for i in 0..16_000 {
                let sample = ((i as f64 * 440.0 * 2.0 * std::f64::consts::PI / 16_000.0).sin()
                    * 16_000.0) as i16;
                writer.write_sample(sample).unwrap();
            }
            writer.finalize().unwrap();
        }

        let signal = decode_signal(file.path()).unwrap();
        assert_eq!(signal.sample_rate(), 16_000);
        assert_eq!(signal.len(), 16_000);
        // Normalized to roughly [-0.5, 0.5] for the 16000/32768 amplitude
        let peak = signal.samples().iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.4 && peak < 0.6, "unexpected peak {}", peak);
    }

    #[test]
    fn test_wav_stereo_downmix() {
        let file = tempfile::NamedTempFile::with_suffix(".wav").unwrap();
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        {
            let mut writer = hound::WavWriter::create(file.path(), spec).unwrap();
            // Left and right cancel out: downmix should be near-zero
            for _ in 0..4410 {
                writer.write_sample(12_000i16).unwrap();
                writer.write_sample(-12_000i16).unwrap();
            }
            writer.finalize().unwrap();
        }

        let signal = decode_signal(file.path()).unwrap();
        assert_eq!(signal.sample_rate(), 44_100);
        assert_eq!(signal.len(), 4410);
        let peak = signal.samples().iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak < 0.01, "stereo downmix should cancel, peak {}", peak);
    }
}
