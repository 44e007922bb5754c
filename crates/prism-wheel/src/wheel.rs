use prism_core::*;

use crate::raster::{Raster, render_hue_ring, render_triangle_gradient};

/// Fixed layout of the wheel canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelGeometry {
    pub canvas_size: u32,
    pub center: Vec2,
    pub ring_inner_radius: f64,
    pub ring_outer_radius: f64,
    pub triangle_radius: f64,
    /// Hue indicator length past the inner ring edge.
    pub indicator_length: f64,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            canvas_size: 250,
            center: Vec2::new(125.0, 125.0),
            ring_inner_radius: 105.0,
            ring_outer_radius: 125.0,
            triangle_radius: 105.0,
            indicator_length: 30.0,
        }
    }
}

impl WheelGeometry {
    pub fn in_ring(&self, p: Vec2) -> bool {
        let d = (p - self.center).length();
        d >= self.ring_inner_radius && d <= self.ring_outer_radius
    }

    /// Triangle at hue 0: A (white) upper left, B (hue) on the +x axis, C (black) lower left.
    pub fn base_triangle(&self) -> Triangle {
        let c = self.center;
        let r = self.triangle_radius;
        let h = r * 3f64.sqrt() / 2.0;
        Triangle::new(
            Vec2::new(c.x - r / 2.0, c.y - h),
            Vec2::new(c.x + r, c.y),
            Vec2::new(c.x - r / 2.0, c.y + h),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    Idle,
    Ring,
    Triangle,
}

/// Hue ring plus saturation/value triangle.
///
/// The selected color is the bindable surface: hosts read it, write it with
/// [`ColorWheel::set_selected_color`], and observe it with
/// [`ColorWheel::on_selected_color_changed`]. Hue, saturation and value are
/// the wheel's own state. Drags update them directly and publish the derived
/// color without reading it back, so the lossy byte round trip never feeds
/// into the next drag step.
pub struct ColorWheel {
    geometry: WheelGeometry,
    base: Triangle,
    triangle: Triangle,

    hue: f64,
    saturation: f64,
    value: f64,

    selected: Signal<Color>,
    suppress_color_callback: bool,
    drag: DragMode,
    loaded: bool,

    hue_ring: Option<Raster>,
    gradient: Option<Raster>,
    gradient_pending: bool,
    hue_indicator: (Vec2, Vec2),
    selector: Option<Vec2>,

    dispatcher: Dispatcher<ColorWheel>,
}

impl Default for ColorWheel {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorWheel {
    pub fn new() -> Self {
        Self::with_geometry(WheelGeometry::default())
    }

    pub fn with_geometry(geometry: WheelGeometry) -> Self {
        Self {
            geometry,
            base: Triangle::default(),
            triangle: Triangle::default(),
            hue: 0.0,
            saturation: 1.0,
            value: 1.0,
            selected: signal(Color::WHITE),
            suppress_color_callback: false,
            drag: DragMode::Idle,
            loaded: false,
            hue_ring: None,
            gradient: None,
            gradient_pending: false,
            hue_indicator: (geometry.center, geometry.center),
            selector: None,
            dispatcher: Dispatcher::new(),
        }
    }

    /// Build geometry and rasters, then publish the current HSV as the
    /// selected color.
    pub fn load(&mut self) {
        self.base = self.geometry.base_triangle();
        self.update_rotated_triangle();
        self.update_triangle_gradient();
        self.hue_ring = Some(render_hue_ring(&self.geometry));
        self.update_hue_indicator();
        self.loaded = true;
        self.set_selected_color(Color::from_hsv(self.hue, self.saturation, self.value));
        self.update_selector_from_hsv();
        log::debug!("color wheel loaded, selected {}", self.selected_color());
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Run work deferred to this cycle. Returns how many jobs ran.
    pub fn pump(&mut self) -> usize {
        let jobs = self.dispatcher.drain();
        let n = jobs.len();
        for job in jobs {
            job(self);
        }
        n
    }

    pub fn selected_color(&self) -> Color {
        self.selected.get()
    }

    /// Assign the selected color. Outside a drag this re-derives saturation
    /// and value, and hue too unless the color is a gray.
    pub fn set_selected_color(&mut self, color: Color) {
        if self.selected.get() == color {
            return;
        }
        self.selected.set(color);
        if !self.suppress_color_callback {
            self.apply_external_color(color);
        }
    }

    pub fn on_selected_color_changed(&self, f: impl Fn(&Color) + 'static) -> SubId {
        self.selected.subscribe(f)
    }

    pub fn remove_listener(&self, id: SubId) {
        self.selected.unsubscribe(id);
    }

    fn apply_external_color(&mut self, color: Color) {
        let hsv = color.to_hsv();
        if hsv.s != 0.0 {
            self.hue = hsv.h;
        }
        self.saturation = hsv.s;
        self.value = hsv.v;

        self.update_rotated_triangle();
        self.update_triangle_gradient();
        self.update_hue_indicator();
        self.update_selector_from_hsv();
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }
    pub fn saturation(&self) -> f64 {
        self.saturation
    }
    pub fn value(&self) -> f64 {
        self.value
    }
    pub fn hsv(&self) -> Hsv {
        Hsv::new(self.hue, self.saturation, self.value)
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }
    pub fn triangle(&self) -> Triangle {
        self.triangle
    }
    pub fn drag_mode(&self) -> DragMode {
        self.drag
    }
    pub fn hue_ring(&self) -> Option<&Raster> {
        self.hue_ring.as_ref()
    }
    pub fn triangle_gradient(&self) -> Option<&Raster> {
        self.gradient.as_ref()
    }
    pub fn gradient_pending(&self) -> bool {
        self.gradient_pending
    }
    /// Segment from the inner ring edge outwards along the current hue.
    pub fn hue_indicator(&self) -> (Vec2, Vec2) {
        self.hue_indicator
    }
    /// Center of the saturation/value marker, once it has been placed.
    pub fn selector_position(&self) -> Option<Vec2> {
        self.selector
    }

    // ---- pointer ----

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match event.event {
            PointerEventKind::Down(_) => self.pointer_down(event.position),
            PointerEventKind::Move => self.pointer_move(event.position),
            PointerEventKind::Up(_) | PointerEventKind::Cancel => self.pointer_up(),
        }
    }

    /// Starts a drag when `pos` hits the ring or the triangle. The ring wins
    /// where both overlap.
    pub fn pointer_down(&mut self, pos: Vec2) -> bool {
        if self.geometry.in_ring(pos) {
            self.drag = DragMode::Ring;
            self.update_hue_from_point(pos);
        } else if self.triangle.contains(pos) {
            self.drag = DragMode::Triangle;
            self.update_sv_from_point(pos);
        } else {
            return false;
        }
        log::trace!("drag start: {:?} at {:?}", self.drag, pos);
        true
    }

    pub fn pointer_move(&mut self, pos: Vec2) -> bool {
        match self.drag {
            DragMode::Idle => false,
            DragMode::Ring => {
                self.update_hue_from_point(pos);
                true
            }
            DragMode::Triangle => {
                self.update_sv_from_point(pos);
                true
            }
        }
    }

    pub fn pointer_up(&mut self) -> bool {
        let was_dragging = self.drag != DragMode::Idle;
        self.drag = DragMode::Idle;
        was_dragging
    }

    fn update_hue_from_point(&mut self, pos: Vec2) {
        self.hue = (pos - self.geometry.center).angle_degrees();
        self.update_hue_indicator();
        self.update_rotated_triangle();
        self.update_triangle_gradient();
        self.publish_hsv();
        self.update_selector_from_hsv();
    }

    fn update_sv_from_point(&mut self, pos: Vec2) {
        let pos = self.triangle.clamp(pos);
        let w = self.triangle.barycentric(pos);
        let sum = w.a + w.b;
        self.value = sum;
        self.saturation = if sum > 0.0 { w.b / sum } else { 0.0 };
        self.publish_hsv();
        self.selector = Some(pos);
    }

    // Writes the HSV-derived color with the feedback path switched off.
    fn publish_hsv(&mut self) {
        let alpha = self.selected_color().a();
        let color = Color::from_hsv(self.hue, self.saturation, self.value).with_alpha(alpha);
        self.suppress_color_callback = true;
        self.set_selected_color(color);
        self.suppress_color_callback = false;
    }

    // ---- derived geometry ----

    fn update_rotated_triangle(&mut self) {
        self.triangle = self
            .base
            .rotated_about(self.geometry.center, self.hue.to_radians());
    }

    fn update_hue_indicator(&mut self) {
        let dir = Vec2::from_degrees(self.hue);
        let start = self.geometry.center + dir * self.geometry.ring_inner_radius;
        let end = self.geometry.center
            + dir * (self.geometry.ring_inner_radius + self.geometry.indicator_length);
        self.hue_indicator = (start, end);
    }

    fn update_selector_from_hsv(&mut self) {
        let (s, v) = (self.saturation, self.value);
        let w = Barycentric {
            a: v * (1.0 - s),
            b: v * s,
            c: 1.0 - v,
        };
        self.selector = Some(self.triangle.point_at(w));
    }

    fn update_triangle_gradient(&mut self) {
        match render_triangle_gradient(&self.triangle, self.hue) {
            Ok(raster) => self.gradient = Some(raster),
            Err(e) => {
                if !self.gradient_pending {
                    log::debug!("triangle gradient deferred: {e}");
                    self.gradient_pending = true;
                    self.dispatcher.post(|wheel: &mut ColorWheel| {
                        wheel.gradient_pending = false;
                        wheel.update_triangle_gradient();
                    });
                }
            }
        }
    }
}
