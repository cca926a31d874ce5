//! Player spritesheet animation
//!
//! The cat sheet is a single row of 120×99 frames.

/// Named player clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerAnim {
    Left,
    #[default]
    Turn,
    Right,
}

/// A run of frames on the sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    pub first: u32,
    pub last: u32,
    pub frame_rate: f32,
    pub looping: bool,
}

impl PlayerAnim {
    pub fn key(&self) -> &'static str {
        match self {
            PlayerAnim::Left => "left",
            PlayerAnim::Turn => "turn",
            PlayerAnim::Right => "right",
        }
    }

    pub fn clip(&self) -> Clip {
        match self {
            PlayerAnim::Left => Clip {
                first: 0,
                last: 2,
                frame_rate: 10.0,
                looping: true,
            },
            PlayerAnim::Turn => Clip {
                first: 0,
                last: 0,
                frame_rate: 20.0,
                looping: false,
            },
            PlayerAnim::Right => Clip {
                first: 1,
                last: 2,
                frame_rate: 10.0,
                looping: true,
            },
        }
    }
}

/// Plays one clip at a time
#[derive(Debug, Clone, Default)]
pub struct Animator {
    current: PlayerAnim,
    elapsed: f32,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> PlayerAnim {
        self.current
    }

    /// Switch clips. Asking for the clip already playing keeps its progress.
    pub fn play(&mut self, anim: PlayerAnim) {
        if self.current != anim {
            self.current = anim;
            self.elapsed = 0.0;
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Sheet frame to draw
    pub fn frame(&self) -> u32 {
        let clip = self.current.clip();
        let count = clip.last - clip.first + 1;
        let step = (self.elapsed * clip.frame_rate) as u32;
        if clip.looping {
            clip.first + step % count
        } else {
            clip.first + step.min(count - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_cycles_three_frames() {
        let mut animator = Animator::new();
        animator.play(PlayerAnim::Left);
        assert_eq!(animator.frame(), 0);

        // Sampled mid-frame to stay clear of float boundaries
        animator.advance(0.15);
        assert_eq!(animator.frame(), 1);
        animator.advance(0.1);
        assert_eq!(animator.frame(), 2);
        animator.advance(0.1);
        assert_eq!(animator.frame(), 0);
    }

    #[test]
    fn test_right_uses_frames_one_and_two() {
        let mut animator = Animator::new();
        animator.play(PlayerAnim::Right);
        assert_eq!(animator.frame(), 1);
        animator.advance(0.15);
        assert_eq!(animator.frame(), 2);
        animator.advance(0.1);
        assert_eq!(animator.frame(), 1);
    }

    #[test]
    fn test_replaying_same_clip_keeps_progress() {
        let mut animator = Animator::new();
        animator.play(PlayerAnim::Left);
        animator.advance(0.15);
        animator.play(PlayerAnim::Left);
        assert_eq!(animator.frame(), 1);

        animator.play(PlayerAnim::Turn);
        assert_eq!(animator.current(), PlayerAnim::Turn);
        animator.advance(5.0);
        assert_eq!(animator.frame(), 0);
    }
}
