//! Vector helpers on top of `nalgebra::Vector3`.
//!
//! dot, cross, norm and the arithmetic operators come straight from nalgebra.
//! Note that `a * b` between two vectors is a matrix product there, so
//! element-wise products are spelled `tint`.

pub use na::Vector3;

pub trait VectorExt {
    /// Unit vector in the same direction, or the zero vector for a zero input.
    fn normalized(&self) -> Self;

    /// Mirror `self` about `axis`. `axis` has to be unit length.
    fn reflected(&self, axis: &Self) -> Self;

    /// Component-wise product, used to filter one colour by another.
    fn tint(&self, other: &Self) -> Self;
}

impl VectorExt for Vector3<f32> {
    fn normalized(&self) -> Vector3<f32> {
        self.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
    }

    fn reflected(&self, axis: &Vector3<f32>) -> Vector3<f32> {
        *self - 2.0 * self.dot(axis) * *axis
    }

    fn tint(&self, other: &Vector3<f32>) -> Vector3<f32> {
        self.component_mul(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn normalized_has_unit_length() {
        for v in &[
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-0.001, 0.002, 0.0005),
            Vector3::new(1000.0, -2000.0, 3000.0),
        ] {
            assert!((v.normalized().norm() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn normalized_zero_is_zero() {
        assert_eq!(Vector3::<f32>::zeros().normalized(), Vector3::zeros());
    }

    #[test]
    fn reflection_flips_the_axis_component() {
        let axis = Vector3::new(1.0, 1.0, 0.0).normalized();
        for v in &[
            Vector3::new(0.3, -2.0, 5.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        ] {
            let r = v.reflected(&axis);
            assert!((r.dot(&axis) + v.dot(&axis)).abs() < EPSILON);
            // the tangential part is untouched
            assert!((r.norm() - v.norm()).abs() < EPSILON);
        }
    }

    #[test]
    fn tint_multiplies_components() {
        let a = Vector3::new(0.5, 2.0, -1.0);
        let b = Vector3::new(4.0, 0.25, 3.0);
        assert_eq!(a.tint(&b), Vector3::new(2.0, 0.5, -3.0));
    }

    #[test]
    fn cross_is_right_handed() {
        let x = Vector3::<f32>::x();
        let y = Vector3::<f32>::y();
        assert_eq!(x.cross(&y), Vector3::z());
    }
}
