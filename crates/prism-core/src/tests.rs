#[cfg(test)]
mod tests {
    use crate::Color;
    use crate::Dispatcher;
    use crate::Error;
    use crate::Rect;
    use crate::Triangle;
    use crate::Vec2;
    use crate::normalize_hue;
    use crate::signal::*;

    fn wheel_triangle() -> Triangle {
        let c = Vec2::new(125.0, 125.0);
        let r = 105.0;
        let s = 3f64.sqrt() / 2.0;
        Triangle::new(
            Vec2::new(c.x - r / 2.0, c.y - r * s),
            Vec2::new(c.x + r, c.y),
            Vec2::new(c.x - r / 2.0, c.y + r * s),
        )
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let called = std::rc::Rc::new(std::cell::RefCell::new(0));

        let called_clone = called.clone();
        let id = sig.subscribe(move |v| {
            *called_clone.borrow_mut() = *v;
        });

        sig.set(42);
        assert_eq!(*called.borrow(), 42);

        sig.unsubscribe(id);
        sig.set(7);
        assert_eq!(*called.borrow(), 42);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_can_read_signal() {
        let sig = signal(1);
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        {
            let sig2 = sig.clone();
            let seen = seen.clone();
            sig.subscribe(move |_| seen.set(sig2.get()));
        }
        sig.set(5);
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn test_from_hex_non_ascii_falls_back() {
        // Six and eight bytes long, but not on character boundaries.
        assert_eq!(Color::from_hex("#aé€"), Color(0, 0, 0, 255));
        assert_eq!(Color::from_hex("€€ab"), Color(0, 0, 0, 255));
        assert!(Color::parse_hex("#aé€").is_err());
        assert!(Color::parse_argb_hex("#aé€").is_err());
    }

    #[test]
    fn test_parse_hex_strict() {
        assert_eq!(Color::parse_hex("00ff00"), Ok(Color(0, 255, 0, 255)));
        assert_eq!(
            Color::parse_hex("#zz0000"),
            Err(Error::InvalidHex("#zz0000".into()))
        );
        assert!(Color::parse_hex("#123").is_err());
    }

    #[test]
    fn test_argb_hex() {
        assert_eq!(Color(0x12, 0x34, 0x56, 0x80).to_argb_hex(), "#80123456");
        assert_eq!(Color::WHITE.to_string(), "#FFFFFFFF");
    }

    #[test]
    fn test_argb_hex_round_trip() {
        for c in [Color(1, 2, 3, 4), Color(0x12, 0x34, 0x56, 0x80), Color::TRANSPARENT] {
            assert_eq!(Color::parse_argb_hex(&c.to_argb_hex()), Ok(c));
        }
        assert_eq!(Color::parse_argb_hex("#04010203"), Ok(Color(1, 2, 3, 4)));
        assert_eq!(Color::parse_argb_hex("010203"), Ok(Color(1, 2, 3, 255)));
        // The RGBA reader sees the same digits differently.
        assert_eq!(Color::parse_hex("#04010203"), Ok(Color(4, 1, 2, 3)));
        assert!(Color::parse_argb_hex("#0102030").is_err());
    }

    #[test]
    fn test_from_hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color(255, 0, 0, 255));
        assert_eq!(Color::from_hsv(120.0, 1.0, 1.0), Color(0, 255, 0, 255));
        assert_eq!(Color::from_hsv(240.0, 1.0, 1.0), Color(0, 0, 255, 255));
        assert_eq!(Color::from_hsv(360.0, 1.0, 1.0), Color(255, 0, 0, 255));
        assert_eq!(Color::from_hsv(0.0, 0.0, 1.0), Color::WHITE);
        assert_eq!(Color::from_hsv(200.0, 0.7, 0.0), Color::BLACK);
    }

    #[test]
    fn test_from_hsv_truncates() {
        // v = 0.5 * 255 = 127.5 -> 127; p = 127 * 0.5 = 63.5 -> 63
        assert_eq!(Color::from_hsv(0.0, 0.5, 0.5), Color(127, 63, 63, 255));
        // sector 0 with f = 0.5: t = 255 * (1 - 0.5) = 127.5 -> 127
        assert_eq!(Color::from_hsv(30.0, 1.0, 1.0), Color(255, 127, 0, 255));
    }

    #[test]
    fn test_from_hsv_negative_hue_wraps() {
        assert_eq!(
            Color::from_hsv(-120.0, 1.0, 1.0),
            Color::from_hsv(240.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_hue_round_trip() {
        let mut h = 0.0;
        while h < 360.0 {
            let back = Color::from_hsv(h, 1.0, 1.0).to_hsv().h;
            let diff = (back - h).abs();
            let diff = diff.min(360.0 - diff);
            assert!(diff <= 1.5, "hue {h} came back as {back}");
            assert!((0.0..360.0).contains(&back));
            h += 0.5;
        }
    }

    #[test]
    fn test_to_hsv_gray_and_black() {
        let gray = Color(128, 128, 128, 255).to_hsv();
        assert_eq!(gray.s, 0.0);
        assert_eq!(gray.h, 0.0);
        assert!((gray.v - 128.0 / 255.0).abs() < 1e-12);

        let black = Color::BLACK.to_hsv();
        assert_eq!((black.h, black.s, black.v), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_to_hsv_magenta_side() {
        // max is red, blue > green: hue wraps below 360
        let hsv = Color(255, 0, 128, 255).to_hsv();
        assert!(hsv.h > 300.0 && hsv.h < 360.0);
        assert_eq!(hsv.s, 1.0);
    }

    #[test]
    fn test_normalize_hue() {
        assert_eq!(normalize_hue(370.0), 10.0);
        assert_eq!(normalize_hue(-90.0), 270.0);
        assert_eq!(normalize_hue(360.0), 0.0);
    }

    #[test]
    fn test_barycentric_vertices() {
        let t = wheel_triangle();
        for (p, expected) in [
            (t.a, (1.0, 0.0, 0.0)),
            (t.b, (0.0, 1.0, 0.0)),
            (t.c, (0.0, 0.0, 1.0)),
        ] {
            let w = t.barycentric(p);
            assert!((w.a - expected.0).abs() < 1e-9);
            assert!((w.b - expected.1).abs() < 1e-9);
            assert!((w.c - expected.2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_barycentric_vertices_rotated() {
        let t = wheel_triangle().rotated_about(Vec2::new(125.0, 125.0), 1.234);
        let w = t.barycentric(t.b);
        assert!((w.b - 1.0).abs() < 1e-9);
        assert!(w.a.abs() < 1e-9 && w.c.abs() < 1e-9);
    }

    #[test]
    fn test_clamp_yields_valid_weights() {
        let t = wheel_triangle();
        let probes = [
            Vec2::new(0.0, 0.0),
            Vec2::new(250.0, 125.0),
            Vec2::new(125.0, 250.0),
            Vec2::new(-40.0, 130.0),
            Vec2::new(240.0, 10.0),
            Vec2::new(125.0, 125.0),
        ];
        for p in probes {
            let w = t.barycentric(t.clamp(p));
            assert!(w.a >= -1e-9 && w.b >= -1e-9 && w.c >= -1e-9, "{p:?} -> {w:?}");
            assert!((w.a + w.b + w.c - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_clamp_inside_is_identity() {
        let t = wheel_triangle();
        let p = Vec2::new(120.0, 125.0);
        assert_eq!(t.clamp(p), p);
    }

    #[test]
    fn test_clamp_beyond_vertex_snaps_to_vertex() {
        let t = wheel_triangle();
        let clamped = t.clamp(Vec2::new(300.0, 125.0));
        assert!((clamped - t.b).length() < 1e-9);
    }

    #[test]
    fn test_degenerate_triangle() {
        let p = Vec2::new(1.0, 1.0);
        let t = Triangle::new(p, p, p);
        assert_eq!(t.try_barycentric(p), Err(Error::DegenerateTriangle));
        assert!(t.bounds().is_empty());
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_angle_degrees() {
        assert_eq!(Vec2::new(1.0, 0.0).angle_degrees(), 0.0);
        assert!((Vec2::new(0.0, 1.0).angle_degrees() - 90.0).abs() < 1e-9);
        assert!((Vec2::new(0.0, -1.0).angle_degrees() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_dispatcher_defers_jobs_posted_while_pumping() {
        let dispatcher = Dispatcher::<Vec<&'static str>>::new();
        let handle = dispatcher.handle();
        dispatcher.post(move |log| {
            log.push("first");
            handle.post(|log| log.push("second"));
        });

        let mut log = Vec::new();
        assert_eq!(dispatcher.pump(&mut log), 1);
        assert_eq!(log, vec!["first"]);
        assert_eq!(dispatcher.pending(), 1);

        assert_eq!(dispatcher.pump(&mut log), 1);
        assert_eq!(log, vec!["first", "second"]);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_dispatcher_from_worker_threads() {
        let dispatcher = Dispatcher::<u32>::new();
        let workers: Vec<_> = (0..4)
            .map(|i| {
                let handle = dispatcher.handle();
                std::thread::spawn(move || handle.post(move |sum| *sum += i))
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }
        let mut sum = 0;
        assert_eq!(dispatcher.pump(&mut sum), 4);
        assert_eq!(sum, 6);
    }
}
