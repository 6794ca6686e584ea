//! Integer Bresenham rasterization.

/// Iterator over the pixels of a line from one point to another, both inclusive.
///
/// The endpoints are ordered so the line always runs left to right; x is therefore monotonic and
/// every column between the endpoints is visited.
#[derive(Clone, Debug)]
pub struct Bresenham {
    x: i16,
    y: i16,
    x_end: i16,
    y_end: i16,
    dx: i16,
    dy: i16,
    sy: i16,
    err: i16,
    done: bool,
}

impl Bresenham {
    pub fn new(from: (u8, u8), to: (u8, u8)) -> Self {
        let (from, to) = if to.0 < from.0 { (to, from) } else { (from, to) };
        let (x, y) = (from.0 as i16, from.1 as i16);
        let (x_end, y_end) = (to.0 as i16, to.1 as i16);
        let dx = x_end - x;
        let dy = (y_end - y).abs();
        // Truncating division, so a steep line with odd `dy` starts at `-(dy / 2)`.
        let err = (if dx > dy { dx } else { -dy }) / 2;
        Bresenham {
            x,
            y,
            x_end,
            y_end,
            dx,
            dy,
            sy: if y < y_end { 1 } else { -1 },
            err,
            done: false,
        }
    }
}

impl Iterator for Bresenham {
    type Item = (u8, u8);

    fn next(&mut self) -> Option<(u8, u8)> {
        if self.done {
            return None;
        }
        let point = (self.x as u8, self.y as u8);
        if self.x == self.x_end && self.y == self.y_end {
            self.done = true;
            return Some(point);
        }
        let e2 = self.err;
        if e2 > -self.dx {
            self.err -= self.dy;
            self.x += 1;
        }
        if e2 < self.dy {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }
}
