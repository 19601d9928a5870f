//! SDL2 window, keyboard input and frame presentation.
//!
//! The framebuffer stores row 0 at the bottom; SDL textures store it at the
//! top, so every presented frame goes through
//! [`FrameBuffer::to_argb8888_flipped`]. A streaming ARGB8888 texture sized
//! to the framebuffer is created for each frame. There is no frame limiter.

use std::time::Duration;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::WindowContext;

use crate::engine::SceneAction;
use crate::math::Vec3;
use crate::render::FrameBuffer;

/// Camera and light step per key press, in world units.
pub const MOVE_STEP: f32 = 1.0;
/// Field-of-view step per key press, in degrees.
pub const FOV_STEP: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Quit,
    Action(SceneAction),
}

/// Scene action bound to `keycode`, if any.
///
/// | Key            | Action              |
/// |----------------|---------------------|
/// | Space / LCtrl  | camera +Y / -Y      |
/// | A / D          | camera -X / +X      |
/// | W / S          | camera -Z / +Z      |
/// | Left / Right   | light -X / +X       |
/// | Up / Down      | light +Y / -Y       |
/// | `.` / `,`      | light -Z / +Z       |
/// | R / F          | field of view +/-   |
/// | G              | light to camera     |
pub fn key_action(keycode: Keycode) -> Option<SceneAction> {
    use SceneAction::*;

    let action = match keycode {
        Keycode::Space => MoveCamera(Vec3::new(0.0, MOVE_STEP, 0.0)),
        Keycode::LCtrl => MoveCamera(Vec3::new(0.0, -MOVE_STEP, 0.0)),
        Keycode::A => MoveCamera(Vec3::new(-MOVE_STEP, 0.0, 0.0)),
        Keycode::D => MoveCamera(Vec3::new(MOVE_STEP, 0.0, 0.0)),
        Keycode::W => MoveCamera(Vec3::new(0.0, 0.0, -MOVE_STEP)),
        Keycode::S => MoveCamera(Vec3::new(0.0, 0.0, MOVE_STEP)),
        Keycode::Left => MoveLight(Vec3::new(-MOVE_STEP, 0.0, 0.0)),
        Keycode::Right => MoveLight(Vec3::new(MOVE_STEP, 0.0, 0.0)),
        Keycode::Up => MoveLight(Vec3::new(0.0, MOVE_STEP, 0.0)),
        Keycode::Down => MoveLight(Vec3::new(0.0, -MOVE_STEP, 0.0)),
        Keycode::Period => MoveLight(Vec3::new(0.0, 0.0, -MOVE_STEP)),
        Keycode::Comma => MoveLight(Vec3::new(0.0, 0.0, MOVE_STEP)),
        Keycode::R => AdjustFov(FOV_STEP),
        Keycode::F => AdjustFov(-FOV_STEP),
        Keycode::G => LightToCamera,
        _ => return None,
    };
    Some(action)
}

/// Window title with the per-frame readout. `None` for a zero-length frame.
pub fn frame_title(frame_time: Duration, fov_degrees: f32, light: Vec3) -> Option<String> {
    let secs = frame_time.as_secs_f64();
    if secs <= 0.0 {
        return None;
    }
    Some(format!(
        "FPS: {:.1}, FOV: {}, L -> x{} y{} z{}",
        1.0 / secs,
        fov_degrees,
        light.x,
        light.y,
        light.z
    ))
}

pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    texture_creator: TextureCreator<WindowContext>,
    event_pump: sdl2::EventPump,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        log::info!("opened {width}x{height} window '{title}'");
        Ok(Self {
            canvas,
            texture_creator,
            event_pump,
        })
    }

    /// Drains pending SDL events. A quit request is reported once and ends
    /// the drain.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => {
                    events.push(WindowEvent::Quit);
                    break;
                }
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(action) = key_action(keycode) {
                        events.push(WindowEvent::Action(action));
                    }
                }
                _ => {}
            }
        }
        events
    }

    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), String> {
        let (width, height) = (framebuffer.width(), framebuffer.height());
        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        texture
            .update(None, &framebuffer.to_argb8888_flipped(), (width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }
}
