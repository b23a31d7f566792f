//! Audio transcoding.
//!
//! MP3 decoding runs in-process with symphonia and hound. MP3 encoding, and
//! pulling the audio track out of MP4 containers, go through the `ffmpeg`
//! executable.

use crate::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Command;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Settings for the ffmpeg MP3 encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct Mp3Encoder {
    /// ffmpeg executable, looked up on `PATH` when not absolute.
    pub ffmpeg: PathBuf,
    /// Target bitrate as ffmpeg understands it, e.g. `192k`.
    pub bitrate: String,
}

impl Default for Mp3Encoder {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            bitrate: "192k".to_string(),
        }
    }
}

impl Mp3Encoder {
    /// Encodes the first audio stream of `input` (WAV or MP4) to MP3.
    pub fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-vn")
            .arg("-acodec")
            .arg("libmp3lame")
            .arg("-b:a")
            .arg(&self.bitrate)
            .arg(output);

        log::debug!("running {:?}", cmd);
        let result = cmd.output().map_err(|e| {
            Error::Ffmpeg(format!(
                "Failed to execute {}: {e}",
                self.ffmpeg.display()
            ))
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::Ffmpeg(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                stderr.trim()
            )));
        }
        if !output.exists() {
            return Err(Error::Ffmpeg("Output file was not created".to_string()));
        }
        Ok(())
    }
}

/// Decodes an MP3 file and writes 16-bit PCM WAV with the source sample rate
/// and channel layout.
pub fn mp3_to_wav(input: &Path, output: &Path) -> Result<()> {
    let file = File::open(input)?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::Audio(format!("Failed to probe MP3 file: {e}")))?;
    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| Error::Audio("No audio track found in MP3 file".to_string()))?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::Audio(format!("Failed to create MP3 decoder: {e}")))?;

    let mut writer: Option<WavWriter<BufWriter<File>>> = None;
    let mut frames = 0u64;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(Error::Audio(format!("Failed to read MP3 packet: {e}"))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let audio_buffer = match decoder.decode(&packet) {
            Ok(buffer) => buffer,
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("skipping undecodable MP3 frame: {e}");
                continue;
            }
            Err(e) => return Err(Error::Audio(format!("Failed to decode MP3 packet: {e}"))),
        };

        let spec = *audio_buffer.spec();
        let mut samples = SampleBuffer::<i16>::new(audio_buffer.capacity() as u64, spec);
        samples.copy_interleaved_ref(audio_buffer);

        if writer.is_none() {
            let wav_spec = WavSpec {
                channels: spec.channels.count() as u16,
                sample_rate: spec.rate,
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            };
            log::debug!(
                "writing {} Hz, {} channel WAV",
                wav_spec.sample_rate,
                wav_spec.channels
            );
            writer = Some(WavWriter::create(output, wav_spec).map_err(wav_error)?);
        }
        if let Some(writer) = writer.as_mut() {
            for &sample in samples.samples() {
                writer.write_sample(sample).map_err(wav_error)?;
            }
        }
        frames += 1;
    }

    let writer = writer.ok_or_else(|| Error::Audio("No audio decoded from MP3 file".to_string()))?;
    writer.finalize().map_err(wav_error)?;
    log::debug!("decoded {} MP3 frames", frames);
    Ok(())
}

fn wav_error(e: hound::Error) -> Error {
    match e {
        hound::Error::IoError(io) => Error::Io(io),
        other => Error::Audio(format!("Failed to write WAV file: {other}")),
    }
}
