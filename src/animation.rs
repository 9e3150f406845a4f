/// Cycles through a fixed list of glyphs, holding each for `frame_duration` updates.
#[derive(Clone, Debug)]
pub struct Animation {
    frames: &'static [char],
    frame_index: usize,
    frame_duration: u32,
    frame_time: u32,
}

impl Animation {
    pub fn new(frames: &'static [char], frame_duration: u32) -> Self {
        Animation { frames, frame_index: 0, frame_duration: frame_duration.max(1), frame_time: 0 }
    }

    /// Moves the caret on by one update, wrapping back to frame 0 after the last one.
    pub fn advance(&mut self) {
        if self.frame_time + 1 < self.frame_duration {
            self.frame_time += 1;
            return;
        }

        self.frame_time = 0;
        self.frame_index = if self.frame_index + 1 < self.frames.len() { self.frame_index + 1 } else { 0 };
    }

    pub fn current_frame(&self) -> char {
        self.frames.get(self.frame_index).copied().unwrap_or(' ')
    }
}
