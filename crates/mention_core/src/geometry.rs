use layout::{MirrorHost, Placement, Rectangle, Size, TextField};

/// Where the menu goes. `visible` stays false until a measurement has landed
/// since the menu last opened.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MenuGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
}

impl MenuGeometry {
    pub fn rect(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }
}

impl From<Placement> for MenuGeometry {
    fn from(p: Placement) -> Self {
        Self {
            x: p.rect.x,
            y: p.rect.y,
            width: p.rect.width,
            height: p.rect.height,
            visible: true,
        }
    }
}

/// Everything a measurement reads from the host, passed in explicitly each
/// time so nothing is captured from an earlier frame.
pub struct MeasureInput<'a> {
    /// The live field; `None` when it is not mounted.
    pub field: Option<&'a dyn TextField>,
    pub mirror_host: &'a mut dyn MirrorHost,
    pub viewport: Size,
}
