/// Frames per analysis window.
pub const WINDOW_SIZE: usize = 1024;

/// Loudness and zero-crossing statistics of one full window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerFeedback {
    /// Root-mean-square of the window (linear, >= 0)
    pub rms: f32,
    /// Fraction of adjacent sample pairs that change sign (0.0-1.0)
    pub zcr: f32,
}

/// Sliding window of mid (L+R)/2 samples.
///
/// The window is a strict FIFO of [`WINDOW_SIZE`] values: once full, each push
/// drops the oldest value. Callers that want discrete, non-overlapping frames
/// consume a ready window with [`take_feedback`](Self::take_feedback) (or read
/// the stats and call [`reset`](Self::reset)); callers that never reset get a
/// trailing statistic over the most recent window instead.
#[derive(Clone, Debug)]
pub struct FeatureExtractor {
    ring: Box<[f32; WINDOW_SIZE]>,
    /// Index of the oldest value.
    head: usize,
    len: usize,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            ring: Box::new([0.0; WINDOW_SIZE]),
            head: 0,
            len: 0,
        }
    }

    pub fn push_sample(&mut self, left: f32, right: f32) {
        let mid = 0.5 * (left + right);
        if self.len < WINDOW_SIZE {
            self.ring[(self.head + self.len) % WINDOW_SIZE] = mid;
            self.len += 1;
        } else {
            self.ring[self.head] = mid;
            self.head = (self.head + 1) % WINDOW_SIZE;
        }
    }

    pub fn ready(&self) -> bool {
        self.len == WINDOW_SIZE
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn reset(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Held values, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.len).map(move |i| self.ring[(self.head + i) % WINDOW_SIZE])
    }

    pub fn rms(&self) -> f32 {
        if self.len == 0 {
            return 0.0;
        }
        let acc: f64 = self.iter().map(|x| x as f64 * x as f64).sum();
        (acc / self.len as f64).sqrt() as f32
    }

    /// Zero counts as non-negative.
    pub fn zcr(&self) -> f32 {
        if self.len < 2 {
            return 0.0;
        }
        let mut prev_negative = None;
        let mut crossings = 0usize;
        for x in self.iter() {
            let negative = x < 0.0;
            if prev_negative.is_some_and(|p| p != negative) {
                crossings += 1;
            }
            prev_negative = Some(negative);
        }
        crossings as f32 / (self.len - 1) as f32
    }

    pub fn feedback(&self) -> ControllerFeedback {
        ControllerFeedback {
            rms: self.rms(),
            zcr: self.zcr(),
        }
    }

    /// If the window is full, return its stats and start a fresh window.
    pub fn take_feedback(&mut self) -> Option<ControllerFeedback> {
        if !self.ready() {
            return None;
        }
        let fb = self.feedback();
        self.reset();
        Some(fb)
    }
}
