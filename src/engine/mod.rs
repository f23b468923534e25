//! Top-level editor engine tying scene state to the GPU.
//!
//! Owns the render context, camera, renderers and all scene state, and
//! exposes the small surface the window event loop drives: input
//! events, per-frame update, render, and click picking.

use crate::camera::controller::CameraController;
use crate::error::ArmatureError;
use crate::gpu::render_context::RenderContext;
use crate::input::controller::{Direction, Mode, PoseController};
use crate::input::event::{InputEvent, MouseButton};
use crate::input::keybindings::{EditorAction, KeyBindings};
use crate::renderer::picking::pipeline::cursor_texel;
use crate::renderer::picking::{PickTarget, Picking};
use crate::renderer::SceneRenderer;
use crate::scene::pose::PoseState;
use crate::scene::selection::{PickOutcome, SelectionState};
use crate::scene::transform::{compose_world, WorldTransforms};

/// The scene editor: one articulated model, one orbit camera, and a
/// picking pass that agrees with the display pass pixel for pixel.
pub struct Editor {
    context: RenderContext,
    camera: CameraController,
    renderer: SceneRenderer,
    picking: Picking,

    pose: PoseState,
    world: WorldTransforms,
    selection: SelectionState,
    controller: PoseController,
    keybindings: KeyBindings,

    /// Last cursor position in physical pixels.
    cursor: (f32, f32),
}

impl Editor {
    /// Initialize the GPU context and all render resources for the
    /// given window surface.
    ///
    /// # Errors
    ///
    /// Returns [`ArmatureError::Gpu`] if the adapter, device, or
    /// surface cannot be set up.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, ArmatureError> {
        let context = RenderContext::new(window, size).await?;
        let camera = CameraController::new(&context);
        let renderer = SceneRenderer::new(&context, &camera);
        let picking =
            Picking::new(&context, &camera.layout, &renderer.parts.layout);

        let pose = PoseState::new();
        let world = compose_world(&pose);

        Ok(Self {
            context,
            camera,
            renderer,
            picking,
            pose,
            world,
            selection: SelectionState::new(),
            controller: PoseController::new(),
            keybindings: KeyBindings::default(),
            cursor: (0.0, 0.0),
        })
    }

    /// Key bindings for the window event loop to translate key codes.
    #[must_use]
    pub const fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    /// Current status label (a part name, "background", or empty).
    #[must_use]
    pub fn selection_label(&self) -> &str {
        self.selection.label()
    }

    /// Resize all render targets to the new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera.resize(width, height);
        self.renderer.resize(&self.context);
        self.picking.resize(&self.context.device, width, height);
    }

    /// Feed a window input event into the editor.
    ///
    /// Returns `true` if the event changed editor state.
    ///
    /// # Errors
    ///
    /// Returns [`ArmatureError::Pick`] if a click's pick readback
    /// fails.
    pub fn handle_input(
        &mut self,
        event: InputEvent,
    ) -> Result<bool, ArmatureError> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = (x, y);
                Ok(false)
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            } => {
                self.pick_at_cursor()?;
                Ok(true)
            }
            InputEvent::MouseButton { .. } => Ok(false),
            InputEvent::ModifiersChanged { shift } => {
                self.controller.set_shift(shift);
                Ok(true)
            }
        }
    }

    /// Apply a bound editor action (mode toggles; `Quit` is handled by
    /// the event loop).
    pub fn apply_action(&mut self, action: EditorAction) {
        let Some(mode) = action.mode() else {
            return;
        };
        match self.controller.toggle_mode(mode) {
            Mode::None => self.selection.clear(),
            new_mode => {
                if let Some(part) = new_mode.part() {
                    let _ = self.selection.apply_pick(PickTarget::Part {
                        part,
                        highlighted: false,
                    });
                }
            }
        }
    }

    /// Latch an arrow key press. Returns `true` if the key mapped to a
    /// direction.
    pub fn press_key(&mut self, key: &str) -> bool {
        Direction::from_key(key).is_some_and(|direction| {
            self.controller.press_direction(direction);
            true
        })
    }

    /// A key was released: clear the direction latch unless the key is
    /// a modifier.
    pub fn release_key(&mut self, key: &str) {
        self.controller.release_key(key);
    }

    /// Advance one frame: apply the held direction to the active mode
    /// and recompute the world transform snapshot.
    ///
    /// Both the display and picking passes consume the snapshot
    /// computed here, so a click can never see a half-updated pose.
    pub fn update(&mut self) {
        if let Some(delta) = self.controller.apply_step(&mut self.pose) {
            self.camera.orbit(delta.azimuth, delta.elevation);
        }
        self.world = compose_world(&self.pose);
    }

    /// Render the display pass to the surface.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot
    /// be acquired; the caller resizes and retries on `Lost`/`Outdated`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.camera.update_gpu(&self.context.queue);
        self.renderer
            .parts
            .upload(&self.context.queue, &self.world, &self.selection);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        self.renderer
            .render(&mut encoder, &view, &self.camera, &self.selection);
        self.context.submit(encoder);
        frame.present();

        Ok(())
    }

    /// Run the picking pass at the current cursor and apply the result
    /// to the selection and controller mode.
    fn pick_at_cursor(&mut self) -> Result<(), ArmatureError> {
        self.camera.update_gpu(&self.context.queue);
        self.renderer
            .parts
            .upload(&self.context.queue, &self.world, &self.selection);

        let (x, y) = self.cursor;
        let cursor = cursor_texel(x, y);

        let target = self.picking.pick(
            &self.context,
            &self.renderer,
            &self.camera,
            &self.selection,
            cursor,
        )?;

        if let PickOutcome::Selected(part) = self.selection.apply_pick(target)
        {
            self.controller.set_mode(Mode::for_part(part));
        }
        log::debug!("pick at {cursor:?}: {}", self.selection.label());
        Ok(())
    }
}
