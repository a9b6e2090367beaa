//! Gallery and lightbox state machine.
//!
//! A gallery is a list of images plus a cursor. It idles on the first image,
//! cycles on a timer while the card is highlighted, and freezes while the
//! lightbox overlay is open. All index motion wraps around.

/// What the gallery is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GalleryPhase {
    /// At rest on the current image; the cycle timer is ignored.
    #[default]
    Idle,
    /// Advancing automatically on each cycle tick.
    Cycling,
    /// Lightbox overlay open; only manual navigation moves the cursor.
    Lightbox,
}

/// Image cursor with wraparound navigation.
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    images: Vec<String>,
    index: usize,
    phase: GalleryPhase,
}

impl Gallery {
    #[must_use]
    pub fn new(images: Vec<String>) -> Self {
        Gallery {
            images,
            index: 0,
            phase: GalleryPhase::Idle,
        }
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn phase(&self) -> GalleryPhase {
        self.phase
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    /// Euclidean wraparound, safe for negative deltas.
    fn wrap(&self, delta: isize) -> usize {
        let n = self.images.len() as isize;
        if n == 0 {
            return 0;
        }
        ((self.index as isize + delta).rem_euclid(n)) as usize
    }

    /// Begin timed cycling. Single-image galleries have nothing to cycle and
    /// stay idle.
    pub fn start_cycle(&mut self) {
        if self.images.len() > 1 && self.phase == GalleryPhase::Idle {
            self.phase = GalleryPhase::Cycling;
        }
    }

    /// Stop cycling and reset to the first image.
    pub fn stop_cycle(&mut self) {
        if self.phase == GalleryPhase::Cycling {
            self.phase = GalleryPhase::Idle;
            self.index = 0;
        }
    }

    /// Advance on a cycle tick; no-op outside [`GalleryPhase::Cycling`].
    pub fn tick(&mut self) {
        if self.phase == GalleryPhase::Cycling {
            self.index = self.wrap(1);
        }
    }

    /// Open the lightbox at the current image, freezing any cycle.
    pub fn open_lightbox(&mut self) {
        if !self.images.is_empty() {
            self.phase = GalleryPhase::Lightbox;
        }
    }

    /// Open the lightbox directly at image `idx` (clamped into range).
    pub fn open_lightbox_at(&mut self, idx: usize) {
        if !self.images.is_empty() {
            self.index = idx.min(self.images.len() - 1);
            self.phase = GalleryPhase::Lightbox;
        }
    }

    /// Close the lightbox, returning to rest at the current image.
    pub fn close_lightbox(&mut self) {
        if self.phase == GalleryPhase::Lightbox {
            self.phase = GalleryPhase::Idle;
        }
    }

    pub fn next(&mut self) {
        self.index = self.wrap(1);
    }

    pub fn prev(&mut self) {
        self.index = self.wrap(-1);
    }

    /// Jump to an absolute index (clamped into range).
    pub fn jump(&mut self, idx: usize) {
        if !self.images.is_empty() {
            self.index = idx.min(self.images.len() - 1);
        }
    }

    /// Position caption in the form `2 / 5`.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("{} / {}", self.index + 1, self.images.len())
    }
}
