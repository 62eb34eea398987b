use anyhow::Result;
use bp_canvas::{AnimatedSprite, Canvas, Line, Point, Rectangle, Texture};
use bp_core::SceneConfig;

/// The four sprite patterns: checker, inverse checker, diagonal band, frame.
///
/// # Errors
/// Returns an error if `side` is negative.
pub fn demo_textures(side: i32) -> Result<Vec<Texture>> {
    let edge = |n: i32| n == 0 || n == side - 1;
    Ok(vec![
        Texture::from_fn(side, side, |x, y| x % 2 == y % 2)?,
        Texture::from_fn(side, side, |x, y| x % 2 != y % 2)?,
        Texture::from_fn(side, side, |x, y| (x - y).abs() > 1)?,
        Texture::from_fn(side, side, |x, y| edge(x) || edge(y))?,
    ])
}

/// Animated square bouncing inside the canvas border.
pub struct Bouncer {
    pub sprite: AnimatedSprite,
    side: i32,
    dx: i32,
    dy: i32,
}

impl Bouncer {
    #[must_use]
    pub fn new(sprite: AnimatedSprite, side: i32) -> Self {
        Self {
            sprite,
            side,
            dx: 1,
            dy: 1,
        }
    }

    /// Centre of the square, where the follower line points.
    #[must_use]
    pub fn centre(&self) -> Point {
        self.sprite.position + Point::new(self.side / 2, self.side / 2)
    }

    /// Move one dot, reversing before the square would touch the border.
    pub fn update(&mut self, width: i32, height: i32) {
        let p = &mut self.sprite.position;
        p.x += self.dx;
        p.y += self.dy;

        if p.x <= 1 {
            self.dx = 1;
        } else if p.x + self.side >= width - 1 {
            self.dx = -1;
        }

        if p.y <= 1 {
            self.dy = 1;
        } else if p.y + self.side >= height - 1 {
            self.dy = -1;
        }
    }
}

/// Border, axis, scrolling sine wave and a bouncing animated sprite.
///
/// [`draw`](Self::draw) only stamps the current state; [`advance`](Self::advance)
/// moves everything to the next frame.
pub struct Scene {
    config: SceneConfig,
    bouncer: Bouncer,
    frame: u64,
}

impl Scene {
    /// # Errors
    /// Returns an error if the textures cannot be built.
    pub fn new(config: &SceneConfig) -> Result<Self> {
        let sprite = AnimatedSprite::new(Point::new(3, 3), demo_textures(config.texture_side)?)?;
        Ok(Self {
            config: config.clone(),
            bouncer: Bouncer::new(sprite, config.texture_side),
            frame: 1,
        })
    }

    /// Numéro de la frame courante (commence à 1).
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn bouncer(&self) -> &Bouncer {
        &self.bouncer
    }

    /// Height of the sine wave at column `x` for the current frame.
    fn wave(&self, x: i32, height: i32) -> i32 {
        let degrees = (self.frame as f64 + f64::from(x)) * f64::from(self.config.wave_degrees_per_dot);
        let scale = f64::from(height) * f64::from(self.config.wave_scale) / 2.0;
        (f64::from(height) / 2.0 - degrees.to_radians().sin() * scale) as i32
    }

    /// Clear the canvas and stamp the current frame.
    pub fn draw(&self, canvas: &mut Canvas) {
        let (width, height) = (canvas.width(), canvas.height());
        canvas.clear(false);

        if self.config.show_border {
            canvas.draw(&Rectangle::new(Point::new(0, 0), width, height));
        }
        for x in 0..width {
            if self.config.show_axis {
                canvas.draw(&Point::new(x, height / 2));
            }
            if self.config.show_wave {
                canvas.draw(&Point::new(x, self.wave(x, height)));
            }
        }
        if self.config.show_follower {
            let centre = Point::new(width / 2, height / 2);
            canvas.draw(&Line::new(centre, self.bouncer.centre()));
        }
        if self.config.show_sprite {
            canvas.draw(&self.bouncer.sprite);
        }
    }

    /// Step the animation state once, after the frame has been drawn.
    pub fn advance(&mut self, canvas: &Canvas) {
        self.bouncer.update(canvas.width(), canvas.height());
        if self.frame % u64::from(self.config.texture_period.max(1)) == 0 {
            self.bouncer.sprite.advance();
            log::trace!(
                "frame {} : texture {}",
                self.frame,
                self.bouncer.sprite.index()
            );
        }
        self.frame += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SceneConfig {
        SceneConfig {
            width: 40,
            height: 24,
            ..SceneConfig::default()
        }
    }

    #[test]
    fn textures_have_expected_patterns() {
        let t = demo_textures(5).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t[0].get_dot(0, 0), Ok(true));
        assert_eq!(t[1].get_dot(0, 0), Ok(false));
        assert_eq!(t[2].get_dot(4, 0), Ok(true));
        assert_eq!(t[2].get_dot(1, 0), Ok(false));
        assert_eq!(t[3].get_dot(2, 2), Ok(false));
        assert_eq!(t[3].get_dot(4, 2), Ok(true));
        assert!(demo_textures(-1).is_err());
    }

    #[test]
    fn bouncer_reverses_at_edges() {
        let sprite = AnimatedSprite::new(Point::new(3, 3), demo_textures(5).unwrap()).unwrap();
        let mut b = Bouncer::new(sprite, 5);
        let (w, h) = (12, 40);
        let mut xs = Vec::new();
        for _ in 0..8 {
            b.update(w, h);
            xs.push(b.sprite.position.x);
        }
        // x + 5 >= 11 flips direction at x = 6.
        assert_eq!(xs, [4, 5, 6, 5, 4, 3, 2, 1]);
        b.update(w, h);
        assert_eq!(b.sprite.position.x, 2);
    }

    #[test]
    fn first_frame_has_border_axis_and_sprite() {
        let config = small_config();
        let scene = Scene::new(&config).unwrap();
        let mut canvas = Canvas::new(config.width, config.height).unwrap();
        scene.draw(&mut canvas);

        assert!(canvas.get_dot(0, 0));
        assert!(canvas.get_dot(39, 23));
        assert!(canvas.get_dot(10, 12));
        // Checker texture at (3, 3): its origin texel is raised.
        assert!(canvas.get_dot(3, 3));
        assert_eq!(canvas.render().lines().count(), 6);
    }

    #[test]
    fn disabled_layers_leave_canvas_blank() {
        let config = SceneConfig {
            show_border: false,
            show_axis: false,
            show_wave: false,
            show_follower: false,
            show_sprite: false,
            ..small_config()
        };
        let scene = Scene::new(&config).unwrap();
        let mut canvas = Canvas::new(config.width, config.height).unwrap();
        canvas.clear(true);
        scene.draw(&mut canvas);
        assert_eq!(canvas, Canvas::new(config.width, config.height).unwrap());
    }

    #[test]
    fn texture_changes_every_period() {
        let config = SceneConfig {
            texture_period: 3,
            ..small_config()
        };
        let mut scene = Scene::new(&config).unwrap();
        let canvas = Canvas::new(config.width, config.height).unwrap();
        let mut indices = Vec::new();
        for _ in 0..7 {
            scene.advance(&canvas);
            indices.push(scene.bouncer().sprite.index());
        }
        assert_eq!(indices, [0, 0, 1, 1, 1, 2, 2]);
        assert_eq!(scene.frame(), 8);
    }

    #[test]
    fn wave_stays_on_canvas() {
        let config = small_config();
        let mut scene = Scene::new(&config).unwrap();
        let canvas = Canvas::new(config.width, config.height).unwrap();
        for _ in 0..90 {
            for x in 0..config.width {
                let y = scene.wave(x, config.height);
                assert!((0..config.height).contains(&y), "y = {y}");
            }
            scene.advance(&canvas);
        }
    }
}
