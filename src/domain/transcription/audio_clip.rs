//! Audio clip value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidEncodingError;

/// Audio encodings accepted by the speech backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioEncoding {
    #[default]
    WebmOpus,
    OggOpus,
    Flac,
    Linear16,
    Mp3,
}

impl AudioEncoding {
    /// Config-facing identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WebmOpus => "webm_opus",
            Self::OggOpus => "ogg_opus",
            Self::Flac => "flac",
            Self::Linear16 => "linear16",
            Self::Mp3 => "mp3",
        }
    }

    /// Enum name as the speech API expects it
    pub const fn api_name(&self) -> &'static str {
        match self {
            Self::WebmOpus => "WEBM_OPUS",
            Self::OggOpus => "OGG_OPUS",
            Self::Flac => "FLAC",
            Self::Linear16 => "LINEAR16",
            Self::Mp3 => "MP3",
        }
    }
}

impl FromStr for AudioEncoding {
    type Err = InvalidEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "webm_opus" => Ok(Self::WebmOpus),
            "ogg_opus" => Ok(Self::OggOpus),
            "flac" => Ok(Self::Flac),
            "linear16" => Ok(Self::Linear16),
            "mp3" => Ok(Self::Mp3),
            _ => Err(InvalidEncodingError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed audio format a deployment is provisioned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
}

impl AudioFormat {
    pub const DEFAULT_SAMPLE_RATE_HERTZ: u32 = 48_000;
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            encoding: AudioEncoding::default(),
            sample_rate_hertz: Self::DEFAULT_SAMPLE_RATE_HERTZ,
        }
    }
}

/// Value object representing one uploaded clip.
/// The bytes are opaque; the format is declared, never sniffed.
#[derive(Debug, Clone)]
pub struct AudioClip {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Encode the audio bytes as base64
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}
