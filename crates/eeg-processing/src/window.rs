//! Fixed-capacity window accumulation

use eeg_core::WINDOW_SIZE;

/// Collects converted and filtered samples into one-second analysis windows.
///
/// Two parallel fixed-capacity buffers share a single write cursor. When the
/// cursor would pass the last slot the window is complete and the cursor
/// wraps to zero, so consecutive windows are contiguous back-to-back blocks.
/// The configured [`eeg_core::OVERLAP_PERCENTAGE`] is intentionally not
/// consumed here; see the note on that constant.
#[derive(Debug, Clone)]
pub struct WindowAccumulator {
    raw: [f32; WINDOW_SIZE],
    filtered: [f32; WINDOW_SIZE],
    cursor: usize,
    total_samples: u64,
}

impl WindowAccumulator {
    pub fn new() -> Self {
        WindowAccumulator {
            raw: [0.0; WINDOW_SIZE],
            filtered: [0.0; WINDOW_SIZE],
            cursor: 0,
            total_samples: 0,
        }
    }

    /// Store one converted/filtered sample pair at the cursor.
    ///
    /// Returns true exactly when this sample completed a window; the next
    /// push begins overwriting from slot zero.
    pub fn push(&mut self, raw_uv: f32, filtered_uv: f32) -> bool {
        self.raw[self.cursor] = raw_uv;
        self.filtered[self.cursor] = filtered_uv;

        self.cursor += 1;
        self.total_samples += 1;

        if self.cursor >= WINDOW_SIZE {
            self.cursor = 0;
            return true;
        }
        false
    }

    /// True once at least one full window of samples has been admitted.
    ///
    /// After the first completion the buffers always hold [`WINDOW_SIZE`]
    /// valid samples (a mix of the current and previous window while the
    /// cursor is mid-sweep), so feature extraction never sees stale zeros.
    pub fn is_primed(&self) -> bool {
        self.total_samples >= WINDOW_SIZE as u64
    }

    /// Number of valid samples currently buffered, saturating at capacity
    pub fn filled(&self) -> usize {
        if self.is_primed() {
            WINDOW_SIZE
        } else {
            self.total_samples as usize
        }
    }

    pub fn filtered(&self) -> &[f32; WINDOW_SIZE] {
        &self.filtered
    }

    pub fn raw(&self) -> &[f32; WINDOW_SIZE] {
        &self.raw
    }

    /// Lifetime sample count across window boundaries
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    /// Zero both buffers, the cursor, and the lifetime counter
    pub fn reset(&mut self) {
        self.raw = [0.0; WINDOW_SIZE];
        self.filtered = [0.0; WINDOW_SIZE];
        self.cursor = 0;
        self.total_samples = 0;
    }
}

impl Default for WindowAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
