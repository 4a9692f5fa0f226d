use crate::point::Point;

/// Axis-aligned bounding box in 3D space.
///
/// Inside the tree every box is cropped to the points of its node, so it is the tightest box
/// around them and `min[i] <= max[i]` holds on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points[begin..end]`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty, a box around no points is undefined.
    pub fn from_points<T: Point>(points: &[T], begin: usize, end: usize) -> Self {
        let mut bounds = Self::new([0.0; 3], [0.0; 3]);
        bounds.crop(points, begin, end);
        bounds
    }

    /// Recomputes the box from scratch as the tightest box around `points[begin..end]`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or out of bounds.
    pub fn crop<T: Point>(&mut self, points: &[T], begin: usize, end: usize) {
        assert!(
            begin < end,
            "cannot compute a bounding box over the empty range [{}, {})",
            begin,
            end
        );

        let first = points[begin].position();
        self.min = first;
        self.max = first;

        for point in &points[begin + 1..end] {
            let p = point.position();
            for axis in 0..3 {
                if p[axis] < self.min[axis] { self.min[axis] = p[axis]; }
                if p[axis] > self.max[axis] { self.max[axis] = p[axis]; }
            }
        }
    }

    /// Side lengths of the box along x, y and z.
    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// The axis of greatest extent: 0 for x, 1 for y, 2 for z.
    ///
    /// x is only chosen when strictly longer than both y and z. Between y and z, y wins ties.
    /// The tie-break determines the tree shape and must stay stable.
    pub fn split_axis(&self) -> usize {
        let [ex, ey, ez] = self.extent();
        if ex > ey && ex > ez {
            0
        } else if ez <= ey {
            1
        } else {
            2
        }
    }

    /// Squared distance from `point` to the box, zero if the point lies inside.
    ///
    /// This is a lower bound for the squared distance to every point inside the box.
    #[inline]
    pub fn distance2(&self, point: &[f64; 3]) -> f64 {
        let mut d2 = 0.0;
        for i in 0..3 {
            let v = point[i];
            if v < self.min[i] {
                d2 += (self.min[i] - v).powi(2);
            } else if v > self.max[i] {
                d2 += (v - self.max[i]).powi(2);
            }
        }
        d2
    }

    /// Returns `true` if `point` lies inside the box or on its boundary.
    pub fn contains(&self, point: &[f64; 3]) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}
