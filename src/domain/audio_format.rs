use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Audio container declared alongside an upload. The tag is forwarded
/// verbatim to the transcription model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Ogg,
    Flac,
    Aac,
    Aiff,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Flac => "flac",
            AudioFormat::Aac => "aac",
            AudioFormat::Aiff => "aiff",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "audio/mpeg" | "audio/mp3" | "audio/mpeg3" => Some(Self::Mp3),
            "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => Some(Self::Wav),
            "audio/ogg" | "audio/opus" => Some(Self::Ogg),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            "audio/aac" | "audio/x-aac" => Some(Self::Aac),
            "audio/aiff" | "audio/x-aiff" => Some(Self::Aiff),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        extension.parse().ok()
    }

    /// Content type wins over the file extension; `None` when neither names
    /// a known format.
    pub fn detect(content_type: Option<&str>, filename: Option<&str>) -> Option<Self> {
        content_type
            .and_then(Self::from_mime)
            .or_else(|| filename.and_then(Self::from_filename))
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "wav" | "wave" => Ok(Self::Wav),
            "ogg" | "oga" | "opus" => Ok(Self::Ogg),
            "flac" => Ok(Self::Flac),
            "aac" | "m4a" => Ok(Self::Aac),
            "aiff" | "aif" => Ok(Self::Aiff),
            other => Err(format!("Unsupported audio format: {}", other)),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
