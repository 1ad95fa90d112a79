//! The pipeline's native image representation.
//!
//! Images travel through the host pipeline as dense float tensors laid out
//! batch x height x width x channel. This module only carries the shape; the
//! actual PNG/base64 codec lives with the host and is injected through
//! [`ImageCodec`](crate::core::traits::ImageCodec).

/// A batch of same-sized RGB(A) frames stored as one contiguous f32 buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    pub batch: usize,
    pub height: usize,
    pub width: usize,
    pub channels: usize,
    data: Vec<f32>,
}

impl ImageTensor {
    pub fn new(
        batch: usize,
        height: usize,
        width: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Option<Self> {
        if data.len() != batch * height * width * channels {
            return None;
        }
        Some(Self {
            batch,
            height,
            width,
            channels,
            data,
        })
    }

    /// A single all-zero RGB frame, used as the placeholder result when a
    /// whole image batch fails.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            batch: 1,
            height,
            width,
            channels: 3,
            data: vec![0.0; height * width * 3],
        }
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Concatenates frames along the batch dimension. The backend returns the
    /// size that was requested, so within one batch the shapes agree; a frame
    /// that still disagrees with the first is skipped rather than corrupting
    /// the buffer layout. Returns `None` for an empty input.
    pub fn concat(frames: &[ImageTensor]) -> Option<Self> {
        let first = frames.first()?;
        let mut data = Vec::with_capacity(frames.iter().map(|f| f.data.len()).sum());
        let mut batch = 0;
        for frame in frames {
            if (frame.height, frame.width, frame.channels)
                != (first.height, first.width, first.channels)
            {
                continue;
            }
            data.extend_from_slice(&frame.data);
            batch += frame.batch;
        }
        Some(Self {
            batch,
            height: first.height,
            width: first.width,
            channels: first.channels,
            data,
        })
    }
}

/// Decode metadata reported alongside a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMeta {
    pub width: usize,
    pub height: usize,
}
