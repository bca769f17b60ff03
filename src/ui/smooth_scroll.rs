//! Page smooth scroll with exponential ease-out.
//!
//! Jumping to a section sets a new target; each tick the position closes a
//! fixed fraction of the remaining distance, so the page decelerates into
//! place.  Wheel and arrow-key scrolling bypass the animation with
//! [`SmoothScroll::jump_to`].

/// Row-position smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current position in document rows (fractional while animating).
    position: f64,
    /// Where the animation settles.
    target: f64,
    /// Fraction of the remaining distance covered per tick.
    /// Good range: 0.2–0.45 at 30 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Start easing toward `target`.
    pub fn set_target(&mut self, target: f64) {
        self.target = target.max(0.0);
    }

    /// Move immediately, cancelling any animation.
    pub fn jump_to(&mut self, position: f64) {
        self.position = position.max(0.0);
        self.target = self.position;
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        let remaining = self.target - self.position;
        if remaining.abs() < 0.4 {
            self.position = self.target;
        } else {
            self.position += remaining * self.speed;
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current position rounded to a whole row.
    pub fn row(&self) -> u32 {
        self.position.round().max(0.0) as u32
    }

    /// True until the position has settled on the target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_out_and_settles() {
        let mut s = SmoothScroll::new(0.3);
        s.set_target(100.0);
        s.tick();
        let first_step = s.position();
        let mut frames = 1;
        while s.is_animating() {
            let before = s.position();
            s.tick();
            assert!(s.position() >= before && s.position() <= 100.0);
            assert!(s.position() - before < first_step);
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(s.row(), 100);
    }

    #[test]
    fn jump_cancels_animation() {
        let mut s = SmoothScroll::new(0.3);
        s.set_target(50.0);
        s.tick();
        s.jump_to(10.0);
        assert!(!s.is_animating());
        assert_eq!(s.row(), 10);
    }

    #[test]
    fn negative_positions_clamp() {
        let mut s = SmoothScroll::new(0.3);
        s.jump_to(-5.0);
        s.set_target(-1.0);
        assert_eq!(s.position(), 0.0);
        assert!(!s.is_animating());
    }
}
