/// Window placement and monitor size as reported by the host, in physical
/// pixels. Window position is measured from the monitor's top-left corner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub monitor_width: i32,
    pub monitor_height: i32,
}

impl WindowGeometry {
    pub fn has_valid_size(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Desktop-global bounds of the monitor holding the window. Secondary
/// monitors usually have an origin away from `(0, 0)`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MonitorPlacement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl MonitorPlacement {
    /// Desktop-global point to monitor-relative pixels.
    pub fn to_local(&self, x: i32, y: i32) -> (i32, i32) {
        (x - self.x, y - self.y)
    }

    /// Monitor-relative point back to desktop-global pixels.
    pub fn to_desktop(&self, x: f32, y: f32) -> (f32, f32) {
        (x + self.x as f32, y + self.y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_valid_size() {
        let mut geometry = WindowGeometry {
            width: 800,
            height: 600,
            ..Default::default()
        };
        assert!(geometry.has_valid_size());

        geometry.height = 0;
        assert!(!geometry.has_valid_size());
        geometry.height = -4;
        assert!(!geometry.has_valid_size());
    }

    #[test]
    fn test_second_monitor_round_trip() {
        let right = MonitorPlacement {
            x: 1920,
            y: 0,
            width: 1920,
            height: 1080,
        };
        assert_eq!(right.to_local(1920 + 560, 240), (560, 240));
        assert_eq!(right.to_desktop(560.0, 240.0), (2480.0, 240.0));

        let above = MonitorPlacement {
            x: -200,
            y: -1440,
            width: 2560,
            height: 1440,
        };
        assert_eq!(above.to_local(0, -1000), (200, 440));
        assert_eq!(above.to_desktop(200.0, 440.0), (0.0, -1000.0));
    }
}
