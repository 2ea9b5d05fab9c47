use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Began { position: Vec2 },
    Moved { position: Vec2, delta: Vec2 },
    Ended { position: Vec2 },
}

/// Single-pointer capture tracker.
///
/// `Idle` until `begin`, `Captured` until `end`. Moves and ends that arrive
/// while idle are dropped. A `begin` while already captured simply restarts
/// the capture at the new position.
#[derive(Debug, Default, Clone)]
pub struct TouchState {
    start: Vec2,
    last: Vec2,
    captured: bool,
}

impl TouchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, x: f32, y: f32) -> TouchEvent {
        let position = Vec2::new(x, y);
        self.start = position;
        self.last = position;
        self.captured = true;
        TouchEvent::Began { position }
    }

    pub fn moved(&mut self, x: f32, y: f32) -> Option<TouchEvent> {
        if !self.captured {
            return None;
        }
        let position = Vec2::new(x, y);
        let delta = position - self.last;
        self.last = position;
        Some(TouchEvent::Moved { position, delta })
    }

    pub fn end(&mut self) -> Option<TouchEvent> {
        if !self.captured {
            return None;
        }
        self.captured = false;
        Some(TouchEvent::Ended {
            position: self.last,
        })
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Most recent raw position; still valid after `end` until the next
    /// `begin`.
    pub fn x(&self) -> f32 {
        self.last.x
    }

    pub fn y(&self) -> f32 {
        self.last.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_move_end_lifecycle() {
        let mut touch = TouchState::new();
        let mut deltas = Vec::new();

        assert_eq!(
            touch.begin(10.0, 10.0),
            TouchEvent::Began {
                position: Vec2::new(10.0, 10.0)
            }
        );
        if let Some(TouchEvent::Moved { delta, .. }) = touch.moved(15.0, 12.0) {
            deltas.push(delta);
        }
        let ended = touch.end();

        assert_eq!(deltas, vec![Vec2::new(5.0, 2.0)]);
        assert_eq!(
            ended,
            Some(TouchEvent::Ended {
                position: Vec2::new(15.0, 12.0)
            })
        );
        assert!(!touch.is_captured());
        assert_eq!((touch.x(), touch.y()), (15.0, 12.0));

        assert_eq!(touch.moved(20.0, 20.0), None);
        assert_eq!((touch.x(), touch.y()), (15.0, 12.0));
        assert_eq!(touch.start(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_events_while_idle_are_ignored() {
        let mut touch = TouchState::new();

        assert_eq!(touch.moved(3.0, 4.0), None);
        assert_eq!(touch.end(), None);
        assert!(!touch.is_captured());
        assert_eq!((touch.x(), touch.y()), (0.0, 0.0));
    }

    #[test]
    fn test_second_begin_overwrites_capture() {
        let mut touch = TouchState::new();
        touch.begin(1.0, 1.0);
        touch.moved(2.0, 2.0);
        touch.begin(50.0, 60.0);

        assert!(touch.is_captured());
        assert_eq!(touch.start(), Vec2::new(50.0, 60.0));
        assert_eq!(
            touch.moved(51.0, 60.0),
            Some(TouchEvent::Moved {
                position: Vec2::new(51.0, 60.0),
                delta: Vec2::new(1.0, 0.0),
            })
        );
    }
}
