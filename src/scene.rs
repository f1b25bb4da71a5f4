// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::color::Color;
use crate::surface::{Brush, Path, Surface, TextStyle};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    Clear(Color),
    Fill {
        path: Path,
        brush: Brush,
    },
    Stroke {
        path: Path,
        brush: Brush,
        line_width: f64,
    },
    Clip(Path),
    Text {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
        color: Color,
    },
}

/// A [`Surface`] that records instead of rasterizing.
///
/// Replaying onto another surface reproduces the frame exactly; the depth
/// bookkeeping makes unbalanced `save`/`restore` pairs observable.
#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
    unmatched_restores: usize,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            depth: 0,
            max_depth: 0,
            unmatched_restores: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Open `save`s not yet restored.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn unmatched_restores(&self) -> usize {
        self.unmatched_restores
    }

    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && self.unmatched_restores == 0
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn replay(&self, target: &mut dyn Surface) {
        for command in &self.commands {
            match command {
                DrawCommand::Save => target.save(),
                DrawCommand::Restore => target.restore(),
                DrawCommand::Translate(dx, dy) => target.translate(*dx, *dy),
                DrawCommand::Rotate(r) => target.rotate(*r),
                DrawCommand::Scale(sx, sy) => target.scale(*sx, *sy),
                DrawCommand::Clear(color) => target.clear(*color),
                DrawCommand::Fill { path, brush } => target.fill(path, brush),
                DrawCommand::Stroke {
                    path,
                    brush,
                    line_width,
                } => target.stroke(path, brush, *line_width),
                DrawCommand::Clip(path) => target.clip(path),
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    style,
                    color,
                } => target.fill_text(text, *x, *y, style, *color),
            }
        }
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for Scene {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.add_command(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            self.unmatched_restores += 1;
        } else {
            self.depth -= 1;
        }
        self.add_command(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.add_command(DrawCommand::Translate(dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.add_command(DrawCommand::Rotate(radians));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.add_command(DrawCommand::Scale(sx, sy));
    }

    fn clear(&mut self, color: Color) {
        self.add_command(DrawCommand::Clear(color));
    }

    fn fill(&mut self, path: &Path, brush: &Brush) {
        self.add_command(DrawCommand::Fill {
            path: path.clone(),
            brush: brush.clone(),
        });
    }

    fn stroke(&mut self, path: &Path, brush: &Brush, line_width: f64) {
        self.add_command(DrawCommand::Stroke {
            path: path.clone(),
            brush: brush.clone(),
            line_width,
        });
    }

    fn clip(&mut self, path: &Path) {
        self.add_command(DrawCommand::Clip(path.clone()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle, color: Color) {
        self.add_command(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            style: *style,
            color,
        });
    }
}
