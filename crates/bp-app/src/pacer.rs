use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Cadence de rendu : dort jusqu'à la prochaine frame et mesure le FPS réel.
///
/// FPS par fenêtre glissante, zéro allocation après init.
pub struct FramePacer {
    /// Durée cible d'une frame.
    period: Duration,
    /// Début de la frame courante.
    frame_start: Instant,
    /// Timestamps des dernières N frames.
    timestamps: VecDeque<Instant>,
    /// Taille de la fenêtre (nombre de frames à moyenner).
    window: usize,
    fps: f64,
}

impl FramePacer {
    /// `target_fps` of 0 is treated as 1.
    #[must_use]
    pub fn new(target_fps: u32, window: usize) -> Self {
        Self {
            period: Duration::from_secs(1) / target_fps.max(1),
            frame_start: Instant::now(),
            timestamps: VecDeque::with_capacity(window + 1),
            window: window.max(2),
            fps: 0.0,
        }
    }

    /// Time left in the current frame as of `now`.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.period
            .saturating_sub(now.saturating_duration_since(self.frame_start))
    }

    /// Sleep out the rest of the frame, then start the next one.
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.tick(Instant::now());
    }

    /// Mark a frame boundary at `now`.
    pub fn tick(&mut self, now: Instant) {
        self.frame_start = now;
        self.timestamps.push_back(now);
        if self.timestamps.len() > self.window {
            self.timestamps.pop_front();
        }
        if let (Some(&first), true) = (self.timestamps.front(), self.timestamps.len() >= 2) {
            let secs = now.saturating_duration_since(first).as_secs_f64();
            if secs > 0.0 {
                self.fps = (self.timestamps.len() - 1) as f64 / secs;
            }
        }
    }

    /// FPS moyen sur la fenêtre.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_fps() {
        let pacer = FramePacer::new(30, 10);
        assert!(pacer.fps().abs() < f64::EPSILON);
    }

    #[test]
    fn fps_from_evenly_spaced_ticks() {
        let mut pacer = FramePacer::new(30, 5);
        let t0 = Instant::now();
        for i in 0..10 {
            pacer.tick(t0 + Duration::from_millis(i * 20));
        }
        assert!((pacer.fps() - 50.0).abs() < 0.01, "fps = {}", pacer.fps());
    }

    #[test]
    fn remaining_shrinks_with_elapsed_time() {
        let mut pacer = FramePacer::new(10, 5);
        let t0 = Instant::now();
        pacer.tick(t0);
        assert_eq!(pacer.remaining(t0), Duration::from_millis(100));
        assert_eq!(
            pacer.remaining(t0 + Duration::from_millis(40)),
            Duration::from_millis(60)
        );
        assert!(pacer.remaining(t0 + Duration::from_secs(1)).is_zero());
    }

    #[test]
    fn wait_holds_the_frame_period() {
        let mut pacer = FramePacer::new(200, 5);
        let start = Instant::now();
        pacer.tick(start);
        pacer.wait();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
