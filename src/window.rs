// ============================================================================
// WINDOW SHELL
// ============================================================================

use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::cockpit::Cockpit;
use crate::config::CockpitConfig;
use crate::error::Result;
use crate::font::load_font;
use crate::geometry::Point;
use crate::raster::Canvas;
use crate::snapshot::StateSnapshot;

/// Keyboard actions available while the panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKey {
    ToggleEditMode,
    SwapCom,
    SwapNav,
    Quit,
}

impl PanelKey {
    pub fn from_key(key: Key<&str>) -> Option<Self> {
        match key {
            Key::Named(NamedKey::Escape) => Some(PanelKey::Quit),
            Key::Character(c) if c.eq_ignore_ascii_case("e") => Some(PanelKey::ToggleEditMode),
            Key::Character(c) if c.eq_ignore_ascii_case("s") => Some(PanelKey::SwapCom),
            Key::Character(c) if c.eq_ignore_ascii_case("n") => Some(PanelKey::SwapNav),
            _ => None,
        }
    }

    /// Applies the action; returns false for [`PanelKey::Quit`].
    pub fn apply(self, cockpit: &mut Cockpit) -> bool {
        match self {
            PanelKey::ToggleEditMode => {
                cockpit.toggle_edit_mode();
            }
            PanelKey::SwapCom => {
                if let Some(radio) = cockpit.radio_mut() {
                    radio.swap_com();
                }
            }
            PanelKey::SwapNav => {
                if let Some(radio) = cockpit.radio_mut() {
                    radio.swap_nav();
                }
            }
            PanelKey::Quit => return false,
        }
        true
    }
}

pub struct CockpitWindow {
    config: CockpitConfig,
    font: Option<Font<'static>>,
}

impl CockpitWindow {
    /// Fails only if a configured font cannot be loaded.
    pub fn new(config: CockpitConfig) -> Result<Self> {
        let font = load_font(config.font_path.as_deref())?;
        Ok(Self { config, font })
    }

    /// Opens the window and runs until it is closed.
    ///
    /// `feed` is called once per frame with the time since start; every
    /// snapshot it yields is applied, in order, before drawing.
    pub fn show<F, I>(self, mut feed: F) -> Result<()>
    where
        F: FnMut(Duration) -> I,
        I: IntoIterator<Item = StateSnapshot>,
    {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let mut cockpit = Cockpit::new(fb_width as f64, fb_height as f64, &self.config.layout);
        if self.config.start_in_edit_mode {
            cockpit.set_edit_mode(true);
        }
        tracing::info!(width = fb_width, height = fb_height, "window open");

        let frame_duration = Duration::from_secs_f64(1.0 / self.config.max_framerate.max(1.0));
        let started = Instant::now();
        let mut last_frame = Instant::now();
        let mut cursor = Point::default();
        let font = self.font;

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                            tracing::warn!(%err, "resize_buffer failed");
                        }
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            tracing::warn!(%err, "resize_surface failed");
                        }
                        cockpit.set_canvas_size(fb_width as f64, fb_height as f64);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = Point::new(position.x, position.y);
                        cockpit.pointer_moved(cursor.x, cursor.y);
                    }
                    WindowEvent::CursorLeft { .. } => cockpit.pointer_left(),
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } => match state {
                        ElementState::Pressed => {
                            cockpit.pointer_pressed(cursor.x, cursor.y);
                        }
                        ElementState::Released => cockpit.pointer_released(),
                    },
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key,
                                state: ElementState::Pressed,
                                repeat: false,
                                ..
                            },
                        ..
                    } => {
                        if let Some(key) = PanelKey::from_key(logical_key.as_ref()) {
                            tracing::debug!(?key, "key");
                            if !key.apply(&mut cockpit) {
                                window_target.exit();
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let elapsed = started.elapsed();
                        for snapshot in feed(elapsed) {
                            cockpit.update(&snapshot);
                        }

                        {
                            let frame = pixels.frame_mut();
                            let mut canvas =
                                Canvas::new(frame, fb_width, fb_height).with_font(font.as_ref());
                            cockpit.draw(&mut canvas, elapsed.as_secs_f64() * 1000.0);
                        }
                        if let Err(err) = pixels.render() {
                            tracing::error!(%err, "render failed");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    #[test]
    fn keys_map_case_insensitively() {
        assert_eq!(
            PanelKey::from_key(Key::Character("E")),
            Some(PanelKey::ToggleEditMode)
        );
        assert_eq!(PanelKey::from_key(Key::Character("s")), Some(PanelKey::SwapCom));
        assert_eq!(PanelKey::from_key(Key::Named(NamedKey::Escape)), Some(PanelKey::Quit));
        assert_eq!(PanelKey::from_key(Key::Character("x")), None);
    }

    #[test]
    fn key_actions_drive_the_cockpit() {
        let mut cockpit = Cockpit::new(1200.0, 800.0, &LayoutConfig::default());
        assert!(PanelKey::ToggleEditMode.apply(&mut cockpit));
        assert!(cockpit.edit_mode());
        assert!(PanelKey::SwapNav.apply(&mut cockpit));
        assert!(!PanelKey::Quit.apply(&mut cockpit));
    }
}
