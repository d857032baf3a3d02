//! Progress rendering for the loading stages.

use crate::{
    config::ProgressLayout,
    engine::{Alignment, Engine, Rect},
    loading::filled_width,
    resources::{FontHandle, ImageHandle},
};

/// Something that can display a progress message and step.
pub trait ProgressView<E: Engine + ?Sized> {
    fn show(&mut self, engine: &mut E, message: &str, step: u32);
}

/// Draws the empty bar, the filled part of the full bar over it and the status
/// message, then presents the frame.
#[derive(Debug, Clone)]
pub struct ProgressOverlay {
    bar_empty: ImageHandle,
    bar_full: ImageHandle,
    font: FontHandle,
    layout: ProgressLayout,
}

impl ProgressOverlay {
    pub fn new(
        bar_empty: ImageHandle,
        bar_full: ImageHandle,
        font: FontHandle,
        layout: ProgressLayout,
    ) -> Self {
        Self {
            bar_empty,
            bar_full,
            font,
            layout,
        }
    }
}

impl<E: Engine + ?Sized> ProgressView<E> for ProgressOverlay {
    fn show(&mut self, engine: &mut E, message: &str, step: u32) {
        let origin = self.layout.bar_origin();
        let filled = filled_width(self.layout.bar_width, step);
        log::debug!("progress `{}` step {} ({}px)", message, step, filled);

        engine.draw_image(self.bar_empty, origin);
        engine.draw_image_part(
            self.bar_full,
            Rect::new(0, 0, filled, self.layout.bar_height),
            origin,
        );
        engine.draw_text(
            message,
            self.layout.text_color(),
            self.font,
            Alignment::Center,
            self.layout.text_bounds(),
        );
        engine.refresh_screen();
        engine.pump_events();
    }
}

/// Keeps the messages and steps without drawing anything.
#[derive(Debug, Default, Clone)]
pub struct SilentProgress {
    pub shown: Vec<(String, u32)>,
}

impl<E: Engine + ?Sized> ProgressView<E> for SilentProgress {
    fn show(&mut self, _engine: &mut E, message: &str, step: u32) {
        self.shown.push((message.to_string(), step));
    }
}
