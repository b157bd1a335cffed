//! Scene-space geometry for memo placement and the memo list "move to" action.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, k: f32) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(self) -> Option<Vec3> {
        let len = self.length();
        (len > f32::EPSILON).then(|| self.scale(1.0 / len))
    }
}

/// Where to put the viewer and which way to point them.
///
/// `yaw` rotates about +Y, `pitch` about the viewer's local X; with both zero
/// the viewer looks down -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// Direction a memo faces: its local +Z after applying the Euler rotation
/// (radians, X then Y then Z intrinsic order).
pub fn facing_from_rotation(rotation: Vec3) -> Vec3 {
    let (sx, cx) = rotation.x.sin_cos();
    let (sy, cy) = rotation.y.sin_cos();
    Vec3::new(sy, -sx * cy, cx * cy)
}

/// Viewer placement `distance` units in front of a memo, looking back at it.
pub fn viewpoint_for(position: Vec3, rotation: Vec3, distance: f32) -> Viewpoint {
    let facing = facing_from_rotation(rotation)
        .normalized()
        .unwrap_or(Vec3::new(0.0, 0.0, 1.0));
    let eye = position.add(facing.scale(distance));
    let dir = facing.scale(-1.0);
    Viewpoint {
        position: eye,
        yaw: (-dir.x).atan2(-dir.z),
        pitch: dir.y.clamp(-1.0, 1.0).asin(),
    }
}
