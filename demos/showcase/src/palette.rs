use prism_core::{Color, Rect, Vec2};
use prism_inspect::*;
use prism_wheel::ColorWheel;

/// What the showcase window exposes to its inspector.
#[derive(Clone)]
pub struct Palette {
    pub name: String,
    pub swatches: Vec<Color>,
    pub accent: Option<Color>,
    pub wheel: WheelSnapshot,
    revision: u32,
}

impl Palette {
    pub fn new(name: &str, wheel: &ColorWheel) -> Self {
        Self {
            name: name.to_string(),
            swatches: Vec::new(),
            accent: None,
            wheel: WheelSnapshot::of(wheel),
            revision: 0,
        }
    }

    pub fn push(&mut self, color: Color) {
        self.swatches.push(color);
        self.revision += 1;
    }
}

impl Inspect for Palette {
    fn type_name(&self) -> String {
        "Palette".to_string()
    }
    fn display_value(&self) -> String {
        format!("{} ({} swatches)", self.name, self.swatches.len())
    }
    fn members(&self) -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::property("Name", "String"),
            MemberDescriptor::property("Swatches", "Vec<Color>"),
            MemberDescriptor::property("Accent", "Option<Color>"),
            MemberDescriptor::property("Wheel", "WheelSnapshot"),
            MemberDescriptor::field("revision", "u32").with_visibility(Visibility::Protected),
        ]
    }
    fn get_member(&self, name: &str) -> Result<Option<Value>, InspectError> {
        match name {
            "Name" => Ok(value_of(&self.name)),
            "Swatches" => Ok(value_of(&self.swatches)),
            "Accent" => Ok(optional(&self.accent)),
            "Wheel" => Ok(value_of(&self.wheel)),
            "revision" => Ok(value_of(&self.revision)),
            _ => Err(InspectError::UnknownMember(name.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct WheelSnapshot {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
    pub selector: Option<Vec2>,
    pub gradient_bounds: Option<Rect>,
}

impl WheelSnapshot {
    pub fn of(wheel: &ColorWheel) -> Self {
        Self {
            hue: wheel.hue(),
            saturation: wheel.saturation(),
            value: wheel.value(),
            selector: wheel.selector_position(),
            gradient_bounds: wheel.triangle_gradient().map(|_| wheel.triangle().bounds()),
        }
    }
}

impl Inspect for WheelSnapshot {
    fn type_name(&self) -> String {
        "WheelSnapshot".to_string()
    }
    fn display_value(&self) -> String {
        format!("hue {:.1}", self.hue)
    }
    fn members(&self) -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::field("hue", "f64"),
            MemberDescriptor::field("saturation", "f64"),
            MemberDescriptor::field("value", "f64"),
            MemberDescriptor::field("selector", "Option<Vec2>"),
            MemberDescriptor::field("gradient_bounds", "Option<Rect>"),
        ]
    }
    fn get_member(&self, name: &str) -> Result<Option<Value>, InspectError> {
        match name {
            "hue" => Ok(value_of(&self.hue)),
            "saturation" => Ok(value_of(&self.saturation)),
            "value" => Ok(value_of(&self.value)),
            "selector" => Ok(optional(&self.selector)),
            "gradient_bounds" => Ok(optional(&self.gradient_bounds)),
            _ => Err(InspectError::UnknownMember(name.to_string())),
        }
    }
}
