use std::sync::Arc;

use armature::engine::Editor;
use armature::input::event::{InputEvent, MouseButton};
use armature::input::keybindings::EditorAction;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

const WINDOW_WIDTH: u32 = 1024;
const WINDOW_HEIGHT: u32 = 768;
const WINDOW_TITLE: &str = "Armature";

struct EditorApp {
    window: Option<Arc<Window>>,
    editor: Option<Editor>,
}

impl EditorApp {
    fn new() -> Self {
        Self {
            window: None,
            editor: None,
        }
    }

    fn update_title(&self) {
        if let (Some(window), Some(editor)) = (&self.window, &self.editor) {
            let label = editor.selection_label();
            if label.is_empty() {
                window.set_title(WINDOW_TITLE);
            } else {
                window.set_title(&format!("{WINDOW_TITLE} - {label}"));
            }
        }
    }
}

impl ApplicationHandler for EditorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    WINDOW_WIDTH,
                    WINDOW_HEIGHT,
                ));
            let window = Arc::new(event_loop.create_window(attrs).unwrap());

            let size = window.inner_size();
            let editor = pollster::block_on(Editor::new(
                window.clone(),
                (size.width, size.height),
            ))
            .expect("Failed to initialize editor");

            window.request_redraw();
            self.window = Some(window);
            self.editor = Some(editor);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(editor) = &mut self.editor {
                    editor.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(editor)) =
                    (&self.window, &mut self.editor)
                {
                    editor.update();
                    match editor.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            let inner = window.inner_size();
                            editor.resize(inner.width, inner.height);
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                    window.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(editor) = &mut self.editor {
                    let result = editor.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed: state == ElementState::Pressed,
                    });
                    match result {
                        Ok(true) => self.update_title(),
                        Ok(false) => {}
                        Err(e) => log::error!("pick failed: {e}"),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(editor) = &mut self.editor {
                    let _ = editor.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(editor) = &mut self.editor {
                    let _ =
                        editor.handle_input(InputEvent::ModifiersChanged {
                            shift: modifiers.state().shift_key(),
                        });
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                let Some(editor) = &mut self.editor else {
                    return;
                };

                if event.state == ElementState::Pressed {
                    // OS key repeats would re-toggle modes.
                    if event.repeat {
                        return;
                    }
                    if editor.press_key(&key_str) {
                        return;
                    }
                    if let Some(action) = editor.keybindings().lookup(&key_str)
                    {
                        if action == EditorAction::Quit {
                            event_loop.exit();
                            return;
                        }
                        editor.apply_action(action);
                        self.update_title();
                    }
                } else {
                    editor.release_key(&key_str);
                }
            }

            _ => (),
        }
    }
}

fn main() {
    env_logger::init();

    let mut app = EditorApp::new();
    let event_loop = EventLoop::new().unwrap();

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app).expect("Event loop error");
}
