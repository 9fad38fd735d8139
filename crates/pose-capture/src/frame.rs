//! Video frame buffer handed from the video source to the pose model

/// Decoded RGB video frame
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
    /// Capture timestamp (milliseconds since the source was opened)
    pub timestamp_ms: u64,
    /// Frame sequence number
    pub sequence: u32,
}

impl VideoFrame {
    /// Create a new video frame from raw RGB data
    pub fn new(data: Vec<u8>, width: u32, height: u32, timestamp_ms: u64, sequence: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp_ms,
            sequence,
        }
    }

    /// All-black frame of the given size
    pub fn blank(width: u32, height: u32, timestamp_ms: u64, sequence: u32) -> Self {
        Self::new(
            vec![0; (width * height * 3) as usize],
            width,
            height,
            timestamp_ms,
            sequence,
        )
    }
}
