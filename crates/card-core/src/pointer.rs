use crate::constants::{
    HOVER_TILT_DEG, MAX_SPIN_Y_DEG, MAX_TILT_X_DEG, POINTER_CENTER, ROTATION_DEG_PER_CARD,
};
use glam::{EulerRot, Mat4, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// `last` is the previous normalized pointer position of the drag.
    Dragging { last: Vec2 },
}

/// Snapshot consumed by both compositors and the 3D view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
    pub is_hovering: bool,
    pub is_dragging: bool,
    /// Accumulated drag rotation in degrees: x is pitch, y is yaw.
    pub rotation: Vec2,
}

/// Card bounding box in client (CSS pixel) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CardRect {
    /// Map a client-space point into [0, 1]^2 relative to the card. A
    /// degenerate rect maps everything to the center.
    pub fn normalize(&self, client: Vec2) -> Vec2 {
        if self.width > 0.0 && self.height > 0.0 {
            let u = ((client.x - self.left) / self.width).clamp(0.0, 1.0);
            let v = ((client.y - self.top) / self.height).clamp(0.0, 1.0);
            Vec2::new(u, v)
        } else {
            Vec2::from(POINTER_CENTER)
        }
    }
}

/// Hover and drag-rotation state for one viewer instance.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    position: Vec2,
    hover: HoverState,
    drag: DragState,
    rotation: Vec2,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            position: Vec2::from(POINTER_CENTER),
            hover: HoverState::Idle,
            drag: DragState::Idle,
            rotation: Vec2::ZERO,
        }
    }

    pub fn state(&self) -> PointerState {
        PointerState {
            position: self.position,
            is_hovering: self.is_hovering(),
            is_dragging: self.is_dragging(),
            rotation: self.rotation,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn is_hovering(&self) -> bool {
        self.hover == HoverState::Hovering
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn pointer_enter(&mut self) {
        self.hover = HoverState::Hovering;
    }

    /// Leaving the card ends hover but not an active drag; pointer capture
    /// keeps delivering moves until the button is released.
    pub fn pointer_leave(&mut self) {
        self.hover = HoverState::Idle;
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        let pos = pos.clamp(Vec2::ZERO, Vec2::ONE);
        if let DragState::Dragging { last } = self.drag {
            let delta = pos - last;
            self.rotation.y += delta.x * ROTATION_DEG_PER_CARD;
            self.rotation.x -= delta.y * ROTATION_DEG_PER_CARD;
            self.rotation.x = self.rotation.x.clamp(-MAX_TILT_X_DEG, MAX_TILT_X_DEG);
            self.rotation.y = self.rotation.y.clamp(-MAX_SPIN_Y_DEG, MAX_SPIN_Y_DEG);
            self.drag = DragState::Dragging { last: pos };
        }
        self.position = pos;
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        let pos = pos.clamp(Vec2::ZERO, Vec2::ONE);
        self.position = pos;
        self.drag = DragState::Dragging { last: pos };
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = Vec2::ZERO;
    }

    /// Zero rotation, recenter the pointer and drop any drag in progress.
    pub fn reset_view(&mut self) {
        self.reset_rotation();
        self.position = Vec2::from(POINTER_CENTER);
        self.drag = DragState::Idle;
    }

    /// Small tilt towards the pointer while hovering without dragging.
    pub fn hover_tilt(&self) -> Vec2 {
        if !self.is_hovering() || self.is_dragging() {
            return Vec2::ZERO;
        }
        let offset = self.position - Vec2::from(POINTER_CENTER);
        Vec2::new(-offset.y, offset.x) * 2.0 * HOVER_TILT_DEG
    }

    /// Drag rotation plus hover tilt, in degrees.
    pub fn effective_rotation(&self) -> Vec2 {
        self.rotation + self.hover_tilt()
    }

    /// Model rotation for the 3D card (yaw about Y, then pitch about X).
    pub fn card_transform(&self) -> Mat4 {
        let r = self.effective_rotation();
        Mat4::from_euler(EulerRot::YXZ, r.y.to_radians(), r.x.to_radians(), 0.0)
    }
}
