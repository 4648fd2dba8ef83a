/// Number of hands tracked at once when no capacity is configured.
pub const DEFAULT_MAX_REGIONS: usize = 2;

/// Minimum similarity for a detection to confirm an already tracked hand.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.5;

/// Frame size used when replaying recorded detections without video.
pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;
