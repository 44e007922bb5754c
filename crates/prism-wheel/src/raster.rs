use prism_core::*;

use crate::WheelGeometry;

/// RGBA8 pixel buffer placed at `origin` on the wheel canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub origin: Vec2,
    pixels: Vec<u8>,
}

impl Raster {
    /// Fully transparent raster.
    pub fn new(width: u32, height: u32, origin: Vec2) -> Self {
        Self {
            width,
            height,
            origin,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = self.index(x, y);
        let p = &self.pixels[i..i + 4];
        Color(p[0], p[1], p[2], p[3])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, c: Color) {
        let i = self.index(x, y);
        self.pixels[i..i + 4].copy_from_slice(&[c.0, c.1, c.2, c.3]);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    pub fn opaque_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|p| p[3] != 0).count()
    }
}

/// Hue ring over the whole canvas. Band pixels get their angle's pure hue.
pub fn render_hue_ring(geometry: &WheelGeometry) -> Raster {
    let size = geometry.canvas_size;
    let mut raster = Raster::new(size, size, Vec2::ZERO);
    for y in 0..size {
        for x in 0..size {
            let p = Vec2::new(x as f64, y as f64);
            if geometry.in_ring(p) {
                let degrees = (p - geometry.center).angle_degrees();
                raster.set_pixel(x, y, Color::from_hsv(degrees, 1.0, 1.0));
            }
        }
    }
    raster
}

/// Saturation/value gradient over the triangle's bounding box.
///
/// Vertex A blends in white, B the pure hue, C black. Pixels outside the
/// triangle stay transparent. Fails with [`Error::EmptyBounds`] while the
/// triangle has no extent.
pub fn render_triangle_gradient(triangle: &Triangle, hue: f64) -> Result<Raster, Error> {
    let bounds = triangle.bounds();
    let width = bounds.w.ceil() as i64;
    let height = bounds.h.ceil() as i64;
    if width <= 0 || height <= 0 {
        return Err(Error::EmptyBounds { width, height });
    }

    let pure = Color::from_hsv(hue, 1.0, 1.0);
    let blend = |wa: f64, wb: f64, channel: u8| (wa * 255.0 + wb * channel as f64).clamp(0.0, 255.0) as u8;

    let mut raster = Raster::new(width as u32, height as u32, Vec2::new(bounds.x, bounds.y));
    for y in 0..raster.height {
        for x in 0..raster.width {
            let p = Vec2::new(bounds.x + x as f64, bounds.y + y as f64);
            let w = triangle.barycentric(p);
            if w.is_inside() {
                let c = Color(
                    blend(w.a, w.b, pure.0),
                    blend(w.a, w.b, pure.1),
                    blend(w.a, w.b, pure.2),
                    255,
                );
                raster.set_pixel(x, y, c);
            }
        }
    }
    Ok(raster)
}
