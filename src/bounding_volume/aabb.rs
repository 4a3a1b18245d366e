//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real, Vector, DIM};

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is the simplest bounding volume, defined by its minimum and maximum corners.
/// It's called "axis-aligned" because its edges are always parallel to the coordinate axes,
/// making it very fast to test and compute.
///
/// # Structure
///
/// - **mins**: The point with the smallest coordinates on each axis (bottom-left corner)
/// - **maxs**: The point with the largest coordinates on each axis (top-right corner)
/// - **Invariant**: `mins.x ≤ maxs.x` and `mins.y ≤ maxs.y`
///
/// # Degenerate boxes
///
/// Boxes with a zero width or height (including single points) are perfectly valid. Their
/// [`area`](Self::area) is zero and the intersection test remains well-defined: since it is
/// strict, a degenerate box never intersects anything sitting exactly on its boundary.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use dyntree2d::bounding_volume::{Aabb, BoundingVolume};
/// use nalgebra::{Point2, Vector2};
///
/// let a = Aabb::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
/// let b = Aabb::from_pos_dim(Point2::new(0.5, 0.5), Vector2::new(1.0, 1.0));
///
/// assert!(a.intersects(&b));
/// assert_eq!(a.merged(&b), Aabb::new(Point2::new(0.0, 0.0), Point2::new(1.5, 1.5)));
/// assert_eq!(a.area(), 1.0);
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "bytemuck-serialize",
    derive(bytemuck::Pod, bytemuck::Zeroable)
)]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates (bottom-left corner).
    ///
    /// Each component should be less than or equal to the corresponding component in `maxs`.
    pub mins: Point<Real>,

    /// The point with maximum coordinates (top-right corner).
    ///
    /// Each component should be greater than or equal to the corresponding component in `mins`.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    ///
    /// # Invariant
    ///
    /// Each component of `mins` should be ≤ the corresponding component of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates a new AABB from its bottom-left corner and its dimensions.
    ///
    /// This is the `(x, y, width, height)` convention commonly used by tile-based games.
    ///
    /// # Example
    ///
    /// ```rust
    /// # #[cfg(feature = "f32")] {
    /// use dyntree2d::bounding_volume::Aabb;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let aabb = Aabb::from_pos_dim(Point2::new(16.0, 224.0), Vector2::new(16.0, 16.0));
    /// assert_eq!(aabb.maxs, Point2::new(32.0, 240.0));
    /// # }
    /// ```
    #[inline]
    pub fn from_pos_dim(pos: Point<Real>, dim: Vector<Real>) -> Aabb {
        Aabb::new(pos, pos + dim)
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates an invalid AABB with inverted bounds.
    ///
    /// The resulting AABB has `mins` set to maximum values and `maxs` set to
    /// minimum values. Merging anything with it yields that other thing, which makes
    /// it the natural starting point of a merge loop.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Returns the center point of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// Returns the half-extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        let half: Real = na::convert::<f64, Real>(0.5);
        (self.maxs - self.mins) * half
    }

    /// Returns the full extents (width and height) of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The area (width × height) of this AABB.
    ///
    /// Degenerate boxes have a zero area, so callers must not rely on it being strictly
    /// positive.
    #[inline]
    pub fn area(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y
    }

    /// The area of the AABB that would result from merging `self` with `other`.
    ///
    /// Equivalent to `self.merged(other).area()`.
    #[inline]
    pub fn merged_area(&self, other: &Aabb) -> Real {
        let extents = self.maxs.sup(&other.maxs) - self.mins.inf(&other.mins);
        extents.x * extents.y
    }

    /// Does this AABB satisfy `mins <= maxs` on every axis?
    #[inline]
    pub fn is_valid(&self) -> bool {
        na::partial_le(&self.mins, &self.maxs)
    }

    /// Does this AABB contain the given point (boundary included)?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Computes the intersection of this `Aabb` and another one.
    ///
    /// Returns `None` if they don't intersect, following the same strict convention as
    /// [`BoundingVolume::intersects`].
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        if !self.intersects(other) {
            return None;
        }

        Some(Aabb {
            mins: self.mins.sup(&other.mins),
            maxs: self.maxs.inf(&other.maxs),
        })
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    /// Two boxes intersect unless they are separated along some axis.
    ///
    /// Boxes that only touch along an edge or a corner are **not** intersecting.
    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        for i in 0..DIM {
            if self.mins[i] >= other.maxs[i] || self.maxs[i] <= other.mins[i] {
                return false;
            }
        }

        true
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    #[inline]
    fn loosen(&mut self, amount: Real) {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        self.mins += Vector::repeat(-amount);
        self.maxs += Vector::repeat(amount);
    }

    #[inline]
    fn loosened(&self, amount: Real) -> Aabb {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }
}
