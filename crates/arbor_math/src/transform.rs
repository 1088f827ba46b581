// Transform utilities for Mat4
//
// Extends glam::Mat4 with the homogeneous operations the ray tracer needs
// when moving between view space and a leaf's object space.

use glam::{Mat4, Vec4};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Matrix that maps normals through this transform: the transpose of
    /// its inverse. Stays correct under non-uniform scale.
    fn normal_matrix(&self) -> Mat4;

    /// Transform a homogeneous vector and force w back to 0.
    fn transform_direction4(&self, vector: Vec4) -> Vec4;

    /// Transform a normal by this matrix (normally the result of
    /// `normal_matrix`), zero its w and renormalize. Degenerate normals stay zero.
    fn transform_normal4(&self, normal: Vec4) -> Vec4;
}

impl Mat4Ext for Mat4 {
    fn normal_matrix(&self) -> Mat4 {
        self.inverse().transpose()
    }

    fn transform_direction4(&self, vector: Vec4) -> Vec4 {
        let mut v = *self * vector;
        v.w = 0.0;
        v
    }

    fn transform_normal4(&self, normal: Vec4) -> Vec4 {
        let n = self.transform_direction4(normal.truncate().extend(0.0));
        n.truncate().normalize_or_zero().extend(0.0)
    }
}
