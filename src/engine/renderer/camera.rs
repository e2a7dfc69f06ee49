// 2D orthographic camera with map clamping

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Scrolling camera. Position is the view center in world pixels; zoom > 1
/// moves closer, zoom < 1 pulls back.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec2,
    zoom: f32,
    viewport_width: f32,
    viewport_height: f32,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            position,
            zoom: 1.0,
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    fn update_view_proj(&mut self) {
        let half_width = (self.viewport_width / 2.0) / self.zoom;
        let half_height = (self.viewport_height / 2.0) / self.zoom;

        self.view_proj = Mat4::orthographic_rh(
            self.position.x - half_width,
            self.position.x + half_width,
            self.position.y - half_height,
            self.position.y + half_height,
            -100.0,
            100.0,
        );
    }

    /// Center on the target, then clamp so the view shows only the map.
    /// The clamp ignores zoom; when the map is smaller than the viewport
    /// the upper clamp wins.
    pub fn follow_clamped(&mut self, target: Vec2, map_width: f32, map_height: f32) {
        let half_w = self.viewport_width / 2.0;
        let half_h = self.viewport_height / 2.0;

        let mut position = target;
        if position.x < half_w {
            position.x = half_w;
        }
        if position.x >= map_width - half_w {
            position.x = map_width - half_w;
        }
        if position.y < half_h {
            position.y = half_h;
        }
        if position.y >= map_height - half_h {
            position.y = map_height - half_h;
        }

        self.position = position;
        self.update_view_proj();
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(0.05);
        self.update_view_proj();
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_view_proj();
    }

    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    #[test]
    fn test_center_projects_to_ndc_origin() {
        let mut camera = Camera::new(Vec2::ZERO, 800.0, 480.0);
        camera.follow_clamped(Vec2::new(1000.0, 600.0), 4000.0, 2000.0);

        let center = camera.view_proj_matrix()
            * Vec4::new(camera.position.x, camera.position.y, 0.0, 1.0);
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_follow_centers_on_target() {
        let mut camera = Camera::new(Vec2::ZERO, 800.0, 480.0);
        camera.follow_clamped(Vec2::new(1000.0, 600.0), 4000.0, 2000.0);
        assert_eq!(camera.position, Vec2::new(1000.0, 600.0));
    }

    #[test]
    fn test_follow_clamps_to_lower_edges() {
        let mut camera = Camera::new(Vec2::ZERO, 800.0, 480.0);
        camera.follow_clamped(Vec2::new(10.0, 10.0), 4000.0, 2000.0);
        assert_eq!(camera.position, Vec2::new(400.0, 240.0));
    }

    #[test]
    fn test_follow_clamps_to_upper_edges() {
        let mut camera = Camera::new(Vec2::ZERO, 800.0, 480.0);
        camera.follow_clamped(Vec2::new(3990.0, 1990.0), 4000.0, 2000.0);
        assert_eq!(camera.position, Vec2::new(3600.0, 1760.0));
    }

    #[test]
    fn test_view_never_leaves_map() {
        let mut camera = Camera::new(Vec2::ZERO, 800.0, 480.0);
        for target in [
            Vec2::new(-500.0, -500.0),
            Vec2::new(0.0, 2000.0),
            Vec2::new(4000.0, 0.0),
            Vec2::new(2000.0, 1000.0),
        ] {
            camera.follow_clamped(target, 4000.0, 2000.0);
            let half = camera.viewport_size() / 2.0;
            assert!(camera.position.x - half.x >= 0.0);
            assert!(camera.position.x + half.x <= 4000.0);
            assert!(camera.position.y - half.y >= 0.0);
            assert!(camera.position.y + half.y <= 2000.0);
        }
    }

    #[test]
    fn test_zoom_floor() {
        let mut camera = Camera::new(Vec2::ZERO, 800.0, 480.0);
        camera.set_zoom(0.0);
        assert!(camera.zoom() >= 0.05);
    }
}
