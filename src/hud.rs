//! Transient on-screen feedback.
//!
//! After a range or speed adjustment the collection summary stays visible
//! for a fixed number of ticks. The countdown runs whether or not the
//! animation is paused.

use crate::particle_set::Summary;

/// Ticks a summary stays on screen.
pub const DEFAULT_MESSAGE_FRAMES: u32 = 60;

/// Prefix shown above the summary while paused.
pub const PAUSED_PREFIX: &str = "Animation Paused\n\n";

/// Shown until the first mouse click.
pub const INSTRUCTIONS: &str = "Welcome to the Particle Box!\n\
It shows particles in a walled box which you can interact with.\n\
Move around using W/S/A/D and the mouse.\n\
The left and right mouse buttons attract and\n\
repel particles respectively.\n\
Add or remove a single particle with N or M.\n\
The range at which particles react to the mouse\n\
can be adjusted with + or -.\n\
Particle speed goes up or down with the arrow keys.\n\
Pause at any time with the space bar.\n\
Add particles in bulk with G,\n\
or press R to erase everything and start fresh.\n\
Quit at any time with Q or Escape.\n\n\
Now click to begin!";

/// Countdown-driven summary display.
#[derive(Debug, Clone)]
pub struct Hud {
    summary: Summary,
    frames_left: u32,
    message_frames: u32,
}

impl Hud {
    pub fn new(message_frames: u32) -> Self {
        Self {
            summary: Summary::default(),
            frames_left: 0,
            message_frames,
        }
    }

    /// Show `summary` for the configured number of ticks, restarting the
    /// countdown.
    pub fn show(&mut self, summary: Summary) {
        self.summary = summary;
        self.frames_left = self.message_frames;
        log::info!("{}", format_summary(&summary).replace('\n', ", "));
    }

    /// Advance the countdown by one tick.
    pub fn tick(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
    }

    pub fn is_visible(&self) -> bool {
        self.frames_left > 0
    }

    pub fn frames_left(&self) -> u32 {
        self.frames_left
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Current message, if one is visible.
    pub fn text(&self, paused: bool) -> Option<String> {
        if !self.is_visible() {
            return None;
        }
        let body = format_summary(&self.summary);
        Some(if paused {
            format!("{PAUSED_PREFIX}{body}")
        } else {
            body
        })
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_FRAMES)
    }
}

/// Three-line collection summary.
pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Average particle range: {}\nAverage particle speed: {}\nParticle count: {}",
        summary.average_range, summary.average_speed, summary.count
    )
}
