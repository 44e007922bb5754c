use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use prism_core::*;
use prism_inspect::PropertyTree;
use prism_wheel::{ColorWheel, Raster};

mod palette;

use palette::Palette;

fn save_png(raster: &Raster, path: &Path) -> anyhow::Result<()> {
    let image = image::RgbaImage::from_raw(raster.width, raster.height, raster.as_bytes().to_vec())
        .context("raster size does not match its buffer")?;
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn drag(wheel: &mut ColorWheel, from: Vec2, to: Vec2) {
    wheel.handle_pointer(&PointerEvent::down(from));
    wheel.handle_pointer(&PointerEvent::moved(to));
    wheel.handle_pointer(&PointerEvent::up(to));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("showcase-out"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    // Color wheel, driven like the test window's sliders and mouse.
    let mut wheel = ColorWheel::new();
    wheel.on_selected_color_changed(|c| println!("selected {c}"));
    wheel.load();

    let g = *wheel.geometry();
    let band = (g.ring_inner_radius + g.ring_outer_radius) / 2.0;
    drag(
        &mut wheel,
        g.center + Vec2::from_degrees(30.0) * band,
        g.center + Vec2::from_degrees(200.0) * band,
    );

    let t = wheel.triangle();
    let middle = t.point_at(Barycentric {
        a: 0.25,
        b: 0.5,
        c: 0.25,
    });
    drag(&mut wheel, middle, t.c);
    drag(&mut wheel, t.c, middle);

    // Slider-style edits of single channels.
    let c = wheel.selected_color();
    wheel.set_selected_color(c.with_alpha(128));
    wheel.set_selected_color(Color::from_rgba(c.r(), 200, c.b(), 128));
    wheel.pump();

    let hsv = wheel.hsv();
    println!(
        "hex {}  hue {:.1}  saturation {:.3}  value {:.3}",
        wheel.selected_color().to_argb_hex(),
        hsv.h,
        hsv.s,
        hsv.v
    );

    if let Some(ring) = wheel.hue_ring() {
        save_png(ring, &out_dir.join("hue_ring.png"))?;
    }
    if let Some(gradient) = wheel.triangle_gradient() {
        save_png(gradient, &out_dir.join("triangle.png"))?;
    }

    // Inspector over a small object graph.
    let mut palette = Palette::new("showcase", &wheel);
    palette.push(Color::from_hex("#3B82F6"));
    palette.push(wheel.selected_color());
    palette.accent = Some(Color::WHITE);

    let mut tree = PropertyTree::new();
    tree.set_root_object(Some(Arc::new(palette)));
    let timeout = Duration::from_secs(5);
    let root = tree.root_nodes().first().copied().context("no root node")?;
    tree.set_expanded(root, true);
    anyhow::ensure!(tree.settle(timeout), "inspector did not settle");

    for path in [&["Swatches"][..], &["Swatches", "[Items]"][..], &["Wheel"][..]] {
        let mut id = root;
        for name in path {
            id = tree
                .find_child(id, name)
                .with_context(|| format!("no node {name}"))?;
        }
        tree.set_expanded(id, true);
        anyhow::ensure!(tree.settle(timeout), "inspector did not settle");
    }

    print!("{}", tree.render_text());
    Ok(())
}
