use rand::seq::IteratorRandom;
use rand::Rng;

use crate::animation::Animation;
use crate::body::Body;
use crate::canvas::{Canvas, Drawable};
use crate::geometry::{Field, Point};

const FOOD_FRAMES: [char; 4] = ['-', '\\', '|', '/'];
const FOOD_FRAME_DURATION: u32 = 1;

#[derive(Clone, Debug)]
pub struct Food {
    position: Point,
    animation: Animation,
}

impl Food {
    pub fn new(position: Point) -> Self {
        Food { position, animation: Animation::new(&FOOD_FRAMES, FOOD_FRAME_DURATION) }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn update(&mut self) {
        self.animation.advance();
    }
}

impl Drawable for Food {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.put(self.position, self.animation.current_frame());
    }
}

/// Picks a random interior cell that is not part of `body`.
///
/// Tries `attempts` uniform samples first, then falls back to choosing among
/// every free cell. Returns `None` only when the board is full.
pub fn place_food<R: Rng + ?Sized>(field: &Field, body: &Body, rng: &mut R, attempts: usize) -> Option<Point> {
    if field.interior_size() == 0 {
        return None;
    }

    for _ in 0..attempts {
        let candidate = Point::new(rng.gen_range(1..field.row_limit()), rng.gen_range(1..field.col_limit()));
        if !body.contains(candidate) {
            return Some(candidate);
        }
    }

    field.interior().filter(|pos| !body.contains(*pos)).choose(rng)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::canvas::testing::RecordingFrontend;
    use crate::geometry::Direction;
    use crate::snake::Snake;

    #[test]
    fn never_lands_on_the_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = Field::new(6, 6);
        let snake = Snake::new(Point::new(3, 1), 5, Direction::Left);

        for _ in 0..500 {
            let pos = place_food(&field, snake.body(), &mut rng, 4).expect("free cells left");
            assert!(field.contains(pos));
            assert!(!snake.body().contains(pos));
        }
    }

    #[test]
    fn finds_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = Field::new(3, 4);
        let mut body = Body::new();
        body.append(Point::new(1, 1));
        body.append(Point::new(1, 2));
        body.append(Point::new(2, 1));
        body.append(Point::new(2, 2));
        body.append(Point::new(2, 3));

        assert_eq!(place_food(&field, &body, &mut rng, 1), Some(Point::new(1, 3)));
    }

    #[test]
    fn full_board_reports_no_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = Field::new(3, 3);
        let mut body = Body::new();
        for pos in field.interior() {
            body.append(pos);
        }

        assert_eq!(place_food(&field, &body, &mut rng, 100), None);
        assert_eq!(place_food(&Field::new(1, 1), &Body::new(), &mut rng, 100), None);
    }

    #[test]
    fn food_glyph_spins() {
        let mut canvas = RecordingFrontend::default();
        let mut food = Food::new(Point::new(2, 2));
        food.draw(&mut canvas);
        assert_eq!(canvas.glyph_at(Point::new(2, 2)), '-');
        food.update();
        food.draw(&mut canvas);
        assert_eq!(canvas.glyph_at(Point::new(2, 2)), '\\');
    }
}
