//! User controls: camera sliders, projection toggles, jump and stop.
//!
//! Every input surface produces [`SceneCommand`]s. On the web the DOM
//! sliders and buttons post them through the event loop proxy; natively the
//! keyboard is mapped by [`command_for_key`].

use winit::keyboard::{KeyCode, PhysicalKey};

use crate::{camera::Axis, scene::Scene};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneCommand {
    /// Absolute camera coordinate, as set by a slider.
    SetCamera(Axis, f32),
    /// Relative camera move, as produced by a key press.
    NudgeCamera(Axis, f32),
    Orthographic,
    Perspective,
    Jump,
    Stop,
}

impl Scene {
    /// Apply a command. `Stop` is handled by the frame loop and ignored here.
    pub fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::SetCamera(axis, value) => self.camera.set(axis, value),
            SceneCommand::NudgeCamera(axis, delta) => {
                let value = self.camera.get(axis) + delta;
                self.camera.set(axis, value);
            }
            SceneCommand::Orthographic => self.set_orthographic(),
            SceneCommand::Perspective => self.set_perspective(),
            SceneCommand::Jump => self.jump(),
            SceneCommand::Stop => (),
        }
    }
}

/// Native keyboard bindings.
pub fn command_for_key(key: PhysicalKey, nudge: f32) -> Option<SceneCommand> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    let command = match code {
        KeyCode::Space => SceneCommand::Jump,
        KeyCode::KeyO => SceneCommand::Orthographic,
        KeyCode::KeyP => SceneCommand::Perspective,
        KeyCode::ArrowLeft => SceneCommand::NudgeCamera(Axis::X, -nudge),
        KeyCode::ArrowRight => SceneCommand::NudgeCamera(Axis::X, nudge),
        KeyCode::ArrowDown => SceneCommand::NudgeCamera(Axis::Y, -nudge),
        KeyCode::ArrowUp => SceneCommand::NudgeCamera(Axis::Y, nudge),
        KeyCode::PageDown => SceneCommand::NudgeCamera(Axis::Z, -nudge),
        KeyCode::PageUp => SceneCommand::NudgeCamera(Axis::Z, nudge),
        KeyCode::Escape => SceneCommand::Stop,
        _ => return None,
    };
    Some(command)
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    //! DOM bindings. Element ids follow `web/index.html`.

    use wasm_bindgen::{JsCast, JsValue, prelude::Closure};
    use winit::event_loop::EventLoopProxy;

    use super::SceneCommand;
    use crate::{
        camera::{Axis, Camera},
        flow::SceneEvent,
    };

    fn slider_id(axis: Axis) -> &'static str {
        match axis {
            Axis::X => "sliderX",
            Axis::Y => "sliderY",
            Axis::Z => "sliderZ",
        }
    }

    fn label_id(axis: Axis) -> &'static str {
        match axis {
            Axis::X => "cameraX",
            Axis::Y => "cameraY",
            Axis::Z => "cameraZ",
        }
    }

    fn document() -> Result<web_sys::Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    fn send(proxy: &EventLoopProxy<SceneEvent>, command: SceneCommand) {
        if proxy.send_event(SceneEvent::Command(command)).is_err() {
            log::warn!("event loop closed, dropping {:?}", command);
        }
    }

    /// Wire sliders and buttons to the event loop. Missing elements are
    /// skipped with a warning so a page can expose a subset of controls.
    pub fn bind(proxy: &EventLoopProxy<SceneEvent>) -> Result<(), JsValue> {
        let document = document()?;

        for axis in Axis::ALL {
            let Some(element) = document.get_element_by_id(slider_id(axis)) else {
                log::warn!("no #{} slider on the page", slider_id(axis));
                continue;
            };
            let input: web_sys::HtmlInputElement = element.dyn_into()?;
            let proxy = proxy.clone();
            let source = input.clone();
            let on_input = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
                match source.value().parse::<f32>() {
                    Ok(value) => send(&proxy, SceneCommand::SetCamera(axis, value)),
                    Err(e) => log::warn!("ignoring slider value {:?}: {}", source.value(), e),
                }
            });
            input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
            on_input.forget();
        }

        let buttons = [
            ("jump", SceneCommand::Jump),
            ("orthographic", SceneCommand::Orthographic),
            ("perspective", SceneCommand::Perspective),
            ("stop", SceneCommand::Stop),
        ];
        for (id, command) in buttons {
            let Some(button) = document.get_element_by_id(id) else {
                log::warn!("no #{} button on the page", id);
                continue;
            };
            let proxy = proxy.clone();
            let on_click =
                Closure::<dyn FnMut(web_sys::Event)>::new(move |_| send(&proxy, command));
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }
        Ok(())
    }

    /// Mirror the camera coordinates into the slider labels.
    pub fn sync_labels(camera: &Camera) {
        let Ok(document) = document() else {
            return;
        };
        for axis in Axis::ALL {
            if let Some(label) = document.get_element_by_id(label_id(axis)) {
                label.set_text_content(Some(&camera.label(axis)));
            }
        }
    }
}
