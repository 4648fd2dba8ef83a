use ndarray::ArrayView3;

/// A single video frame: contiguous RGB bytes in row-major order.
///
/// The tracking core never looks at pixels; it only hands frames to the
/// detector and refiner collaborators, which read them through `as_ndarray`,
/// and uses `index` to label results.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
    timestamp_us: Option<u64>,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
            timestamp_us: None,
        }
    }

    /// An all-black RGB frame.
    pub fn blank(width: u32, height: u32, index: usize) -> Self {
        Self::new(
            vec![0u8; width as usize * height as usize * 3],
            width,
            height,
            3,
            index,
        )
    }

    pub fn with_timestamp_us(mut self, timestamp_us: u64) -> Self {
        self.timestamp_us = Some(timestamp_us);
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn timestamp_us(&self) -> Option<u64> {
        self.timestamp_us
    }

    /// Width over height, or `None` for an empty frame.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0 {
            None
        } else {
            Some(self.width as f64 / self.height as f64)
        }
    }

    /// `(height, width, channels)` view of the pixel data.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
        assert!(frame.timestamp_us().is_none());
    }

    #[test]
    fn test_blank_frame_is_black_rgb() {
        let frame = Frame::blank(4, 3, 7);
        assert_eq!(frame.data().len(), 4 * 3 * 3);
        assert!(frame.data().iter().all(|&b| b == 0));
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 7);
    }

    #[test]
    fn test_timestamp_builder() {
        let frame = Frame::blank(1, 1, 0).with_timestamp_us(33_333);
        assert_eq!(frame.timestamp_us(), Some(33_333));
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(Frame::blank(640, 480, 0).aspect_ratio(), Some(640.0 / 480.0));
        assert_eq!(Frame::blank(0, 0, 0).aspect_ratio(), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_shape_is_height_width_channels() {
        let frame = Frame::blank(4, 2, 0);
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 3]);
    }

    #[test]
    fn test_as_ndarray_indexes_row_column_channel() {
        let mut data = vec![0u8; 2 * 2 * 3];
        data[2 * 3 + 2] = 200; // row 1, column 0, blue
        let frame = Frame::new(data, 2, 2, 3, 0);
        assert_eq!(frame.as_ndarray()[[1, 0, 2]], 200);
        assert_eq!(frame.as_ndarray()[[0, 1, 2]], 0);
    }
}
