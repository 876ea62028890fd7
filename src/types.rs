use serde::Serialize;

/// 3-D point with a gray-level intensity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PointXyzi {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
}

impl PointXyzi {
    pub fn nan() -> Self {
        Self {
            x: f32::NAN,
            y: f32::NAN,
            z: f32::NAN,
            intensity: f32::NAN,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Organized point container addressed by `(column, row)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointCloud<T> {
    pub width: usize,
    pub height: usize,
    /// `false` when some points are NaN placeholders.
    pub is_dense: bool,
    pub points: Vec<T>,
}

impl<T: Clone + Default> PointCloud<T> {
    /// `width × height` cloud filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            is_dense: true,
            points: vec![T::default(); width * height],
        }
    }
}

impl<T> PointCloud<T> {
    #[inline]
    pub fn at(&self, column: usize, row: usize) -> &T {
        &self.points[row * self.width + column]
    }

    #[inline]
    pub fn at_mut(&mut self, column: usize, row: usize) -> &mut T {
        &mut self.points[row * self.width + column]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }
}
