use crate::body::Body;
use crate::canvas::{Canvas, Drawable};
use crate::geometry::{Direction, Field, Point};

pub const HEAD_CHAR: char = '#';
pub const BODY_CHAR: char = 'o';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No direction yet, nothing happened.
    Idle,
    Moved { new_head: Point, old_tail: Point },
    Ate { new_head: Point, old_length: usize },
    Crashed { at: Point },
}

#[derive(Clone, Debug)]
pub struct Snake {
    body: Body,
    direction: Direction,
}

impl Snake {
    /// Builds a straight snake with its head at `head`, trailing away from `direction`.
    pub fn new(head: Point, length: usize, direction: Direction) -> Self {
        let trail = match direction {
            Direction::None => Direction::Right.offset(),
            dir => dir.opposite().offset(),
        };

        let mut body = Body::new();
        let mut cell = head;
        for _ in 0..length.max(1) {
            body.append(cell);
            cell = cell + trail;
        }

        Snake { body, direction }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Accepts the new direction unless it would reverse a snake longer than one cell.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == Direction::None {
            return false;
        }
        if self.body.len() > 1 && new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Advances the snake one cell. A crash leaves the body untouched.
    pub fn move_step(&mut self, field: &Field, food: Point, canvas: &mut dyn Canvas) -> MoveOutcome {
        if self.direction == Direction::None {
            return MoveOutcome::Idle;
        }

        let new_head = self.head() + self.direction.offset();

        if !field.contains(new_head) || self.body.contains(new_head) {
            return MoveOutcome::Crashed { at: new_head };
        }

        if new_head == food {
            let old_length = self.body.len();
            self.body.prepend(new_head);
            return MoveOutcome::Ate { new_head, old_length };
        }

        let old_tail = self.body.back().expect("Snake body should never be empty");
        canvas.erase(old_tail);
        self.body.remove_last();
        self.body.prepend(new_head);

        MoveOutcome::Moved { new_head, old_tail }
    }
}

impl Drawable for Snake {
    fn draw(&self, canvas: &mut dyn Canvas) {
        for (i, pos) in self.body.iter().enumerate() {
            let ch = if i == 0 { HEAD_CHAR } else { BODY_CHAR };
            canvas.put(*pos, ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::RecordingFrontend;

    const FAR_AWAY: Point = Point::new(-10, -10);

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new(Point::new(5, 5), 5, Direction::Left);
        let cells: Vec<Point> = snake.body().iter().copied().collect();
        assert_eq!(cells, (5..10).map(|c| Point::new(5, c)).collect::<Vec<_>>());
        assert_eq!(snake.head(), Point::new(5, 5));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut snake = Snake::new(Point::new(5, 5), 3, Direction::Right);
        assert!(!snake.set_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(snake.set_direction(Direction::Up));
        assert!(!snake.set_direction(Direction::Down));
        assert!(!snake.set_direction(Direction::None));
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn single_cell_snake_may_reverse() {
        let mut snake = Snake::new(Point::new(5, 5), 1, Direction::Right);
        assert!(snake.set_direction(Direction::Left));
    }

    #[test]
    fn idle_snake_stays_put() {
        let mut canvas = RecordingFrontend::default();
        let mut snake = Snake::new(Point::new(5, 5), 3, Direction::None);
        assert_eq!(snake.move_step(&Field::new(20, 20), FAR_AWAY, &mut canvas), MoveOutcome::Idle);
        assert_eq!(snake.head(), Point::new(5, 5));
    }

    #[test]
    fn moves_one_unit_and_erases_tail() {
        let mut canvas = RecordingFrontend::default();
        let field = Field::new(20, 20);

        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let mut snake = Snake::new(Point::new(10, 10), 1, dir);
            snake.draw(&mut canvas);
            let old = snake.head();
            let outcome = snake.move_step(&field, FAR_AWAY, &mut canvas);

            assert_eq!(snake.head(), old + dir.offset());
            assert_eq!(snake.len(), 1);
            assert_eq!(outcome, MoveOutcome::Moved { new_head: old + dir.offset(), old_tail: old });
            assert_eq!(canvas.glyph_at(old), ' ');
        }
    }

    #[test]
    fn eating_grows_by_one() {
        let mut canvas = RecordingFrontend::default();
        let mut snake = Snake::new(Point::new(5, 5), 4, Direction::Right);
        let outcome = snake.move_step(&Field::new(20, 20), Point::new(5, 6), &mut canvas);

        assert_eq!(outcome, MoveOutcome::Ate { new_head: Point::new(5, 6), old_length: 4 });
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.body().back(), Some(Point::new(5, 2)));
    }

    #[test]
    fn crashes_into_walls() {
        let mut canvas = RecordingFrontend::default();
        let field = Field::new(20, 20);

        for (head, dir) in [
            (Point::new(1, 5), Direction::Up),
            (Point::new(19, 5), Direction::Down),
            (Point::new(5, 1), Direction::Left),
            (Point::new(5, 19), Direction::Right),
        ] {
            let mut snake = Snake::new(head, 1, dir);
            assert_eq!(
                snake.move_step(&field, FAR_AWAY, &mut canvas),
                MoveOutcome::Crashed { at: head + dir.offset() }
            );
            assert_eq!(snake.head(), head);
        }
    }

    #[test]
    fn crashes_into_itself() {
        let mut canvas = RecordingFrontend::default();
        let field = Field::new(20, 20);
        let mut snake = Snake::new(Point::new(5, 5), 5, Direction::Right);

        assert!(snake.set_direction(Direction::Down));
        snake.move_step(&field, FAR_AWAY, &mut canvas);
        assert!(snake.set_direction(Direction::Left));
        snake.move_step(&field, FAR_AWAY, &mut canvas);
        assert!(snake.set_direction(Direction::Up));

        let before: Vec<Point> = snake.body().iter().copied().collect();
        let outcome = snake.move_step(&field, FAR_AWAY, &mut canvas);
        assert_eq!(outcome, MoveOutcome::Crashed { at: Point::new(5, 4) });
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), before);
    }

    #[test]
    fn draws_head_and_body() {
        let mut canvas = RecordingFrontend::default();
        Snake::new(Point::new(3, 3), 3, Direction::Left).draw(&mut canvas);
        assert_eq!(canvas.glyph_at(Point::new(3, 3)), HEAD_CHAR);
        assert_eq!(canvas.glyph_at(Point::new(3, 4)), BODY_CHAR);
        assert_eq!(canvas.glyph_at(Point::new(3, 5)), BODY_CHAR);
    }
}
