//! Orthographic camera for 2D scenes

use glam::{Mat4, Vec3};

/// 2D orthographic camera
///
/// `zoom` is the half height of the visible area in world units.
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub position: Vec3,
    pub zoom: f32,
    pub aspect_ratio: f32,
}

impl Camera2D {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            zoom: 1.0,
            aspect_ratio,
        }
    }

    /// A camera whose world units are window pixels, origin at the centre
    pub fn pixel_space(width: u32, height: u32) -> Self {
        let mut camera = Self::new(1.0);
        camera.fit_pixels(width, height);
        camera
    }

    /// Keep one world unit per pixel after the window changes size
    pub fn fit_pixels(&mut self, width: u32, height: u32) {
        let height = height.max(1) as f32;
        self.zoom = height / 2.0;
        self.aspect_ratio = width.max(1) as f32 / height;
    }

    /// Get the view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        let half_width = self.zoom * self.aspect_ratio;
        let half_height = self.zoom;

        let projection = Mat4::orthographic_rh(
            -half_width,
            half_width,
            -half_height,
            half_height,
            -1.0,
            1.0,
        );

        let view = Mat4::from_translation(-self.position);

        projection * view
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera_2d(camera: &Camera2D) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn pixel_space_maps_window_edges_to_clip_edges() {
        let camera = Camera2D::pixel_space(800, 600);
        let vp = camera.view_projection();

        let corner = vp * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert!((corner.x - 1.0).abs() < 1e-6);
        assert!((corner.y - 1.0).abs() < 1e-6);

        let centre = vp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(centre.x.abs() < 1e-6 && centre.y.abs() < 1e-6);
    }

    #[test]
    fn fit_pixels_tracks_resizes() {
        let mut camera = Camera2D::pixel_space(800, 800);
        camera.fit_pixels(1000, 500);
        assert_eq!(camera.zoom, 250.0);
        assert_eq!(camera.aspect_ratio, 2.0);
    }
}
