use std::sync::Arc;

use prism_core::{Color, Hsv, Rect, Vec2};
use thiserror::Error;

/// Shared handle to an inspectable value. `None` in a member slot means null.
pub type Value = Arc<dyn Inspect>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InspectError {
    #[error("no member named {0:?}")]
    UnknownMember(String),
    #[error("member {0:?} cannot be read")]
    NotReadable(String),
    #[error("reading {member:?} failed: {message}")]
    Getter { member: String, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Property,
    Field,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

/// Static description of one member of an inspectable value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    pub kind: MemberKind,
    /// For properties, the getter's visibility.
    pub visibility: Visibility,
    /// Properties without a getter are not readable. Fields always are.
    pub readable: bool,
    /// Declared type, shown even when the runtime value is something else.
    pub declared_type: String,
}

impl MemberDescriptor {
    pub fn property(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property,
            visibility: Visibility::Public,
            readable: true,
            declared_type: declared_type.into(),
        }
    }

    pub fn field(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            visibility: Visibility::Public,
            readable: true,
            declared_type: declared_type.into(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// Runtime introspection for the property tree.
///
/// Values are read on a worker thread, hence `Send + Sync`. Member values
/// are returned as fresh handles, so a node shows the value at the moment
/// its parent was expanded.
pub trait Inspect: Send + Sync + 'static {
    fn type_name(&self) -> String;

    fn display_value(&self) -> String;

    fn members(&self) -> Vec<MemberDescriptor> {
        Vec::new()
    }

    fn get_member(&self, name: &str) -> Result<Option<Value>, InspectError> {
        Err(InspectError::UnknownMember(name.to_string()))
    }

    /// Whether [`Inspect::elements`] returns a list. Must not build it.
    fn is_enumerable(&self) -> bool {
        false
    }

    /// Elements in enumeration order, for values that can be enumerated.
    fn elements(&self) -> Option<Vec<Option<Value>>> {
        None
    }

    /// Text values are never shown as element lists even when enumerable.
    fn is_text(&self) -> bool {
        false
    }
}

pub fn value_of<T: Inspect + Clone>(v: &T) -> Option<Value> {
    Some(Arc::new(v.clone()))
}

pub fn optional<T: Inspect + Clone>(v: &Option<T>) -> Option<Value> {
    v.as_ref().and_then(value_of)
}

/// `std::any::type_name` without module paths, `Vec<String>` rather than
/// `alloc::vec::Vec<alloc::string::String>`.
pub fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or_default());
            segment.clear();
            out.push(ch);
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or_default());
    out
}

macro_rules! inspect_primitive {
    ($($t:ty),* $(,)?) => {
        $(
            impl Inspect for $t {
                fn type_name(&self) -> String {
                    stringify!($t).to_string()
                }
                fn display_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

inspect_primitive!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Inspect for String {
    fn type_name(&self) -> String {
        "String".to_string()
    }
    fn display_value(&self) -> String {
        self.clone()
    }
    fn members(&self) -> Vec<MemberDescriptor> {
        vec![MemberDescriptor::property("len", "usize")]
    }
    fn get_member(&self, name: &str) -> Result<Option<Value>, InspectError> {
        match name {
            "len" => Ok(value_of(&self.len())),
            _ => Err(InspectError::UnknownMember(name.to_string())),
        }
    }
    fn is_enumerable(&self) -> bool {
        true
    }
    fn elements(&self) -> Option<Vec<Option<Value>>> {
        Some(self.chars().map(|c| value_of(&c)).collect())
    }
    fn is_text(&self) -> bool {
        true
    }
}

impl Inspect for &'static str {
    fn type_name(&self) -> String {
        "&str".to_string()
    }
    fn display_value(&self) -> String {
        self.to_string()
    }
    fn is_text(&self) -> bool {
        true
    }
}

impl<T: Inspect + Clone> Inspect for Vec<T> {
    fn type_name(&self) -> String {
        short_type_name::<Vec<T>>()
    }
    fn display_value(&self) -> String {
        format!("[{} items]", self.len())
    }
    fn members(&self) -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::property("len", "usize"),
            MemberDescriptor::property("capacity", "usize"),
        ]
    }
    fn get_member(&self, name: &str) -> Result<Option<Value>, InspectError> {
        match name {
            "len" => Ok(value_of(&self.len())),
            "capacity" => Ok(value_of(&self.capacity())),
            _ => Err(InspectError::UnknownMember(name.to_string())),
        }
    }
    fn is_enumerable(&self) -> bool {
        true
    }
    fn elements(&self) -> Option<Vec<Option<Value>>> {
        Some(self.iter().map(value_of).collect())
    }
}

impl<T: Inspect + Clone> Inspect for Option<T> {
    fn type_name(&self) -> String {
        short_type_name::<Option<T>>()
    }
    fn display_value(&self) -> String {
        match self {
            Some(v) => v.display_value(),
            None => "null".to_string(),
        }
    }
    fn members(&self) -> Vec<MemberDescriptor> {
        self.as_ref().map(Inspect::members).unwrap_or_default()
    }
    fn get_member(&self, name: &str) -> Result<Option<Value>, InspectError> {
        match self {
            Some(v) => v.get_member(name),
            None => Err(InspectError::UnknownMember(name.to_string())),
        }
    }
    fn is_enumerable(&self) -> bool {
        self.as_ref().is_some_and(Inspect::is_enumerable)
    }
    fn elements(&self) -> Option<Vec<Option<Value>>> {
        self.as_ref().and_then(Inspect::elements)
    }
    fn is_text(&self) -> bool {
        self.as_ref().is_some_and(Inspect::is_text)
    }
}

impl Inspect for Color {
    fn type_name(&self) -> String {
        "Color".to_string()
    }
    fn display_value(&self) -> String {
        self.to_argb_hex()
    }
    fn members(&self) -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::property("r", "u8"),
            MemberDescriptor::property("g", "u8"),
            MemberDescriptor::property("b", "u8"),
            MemberDescriptor::property("a", "u8"),
            MemberDescriptor::property("hsv", "Hsv"),
        ]
    }
    fn get_member(&self, name: &str) -> Result<Option<Value>, InspectError> {
        match name {
            "r" => Ok(value_of(&self.r())),
            "g" => Ok(value_of(&self.g())),
            "b" => Ok(value_of(&self.b())),
            "a" => Ok(value_of(&self.a())),
            "hsv" => Ok(value_of(&self.to_hsv())),
            _ => Err(InspectError::UnknownMember(name.to_string())),
        }
    }
}

impl Inspect for Hsv {
    fn type_name(&self) -> String {
        "Hsv".to_string()
    }
    fn display_value(&self) -> String {
        format!("({:.1}, {:.3}, {:.3})", self.h, self.s, self.v)
    }
    fn members(&self) -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::field("h", "f64"),
            MemberDescriptor::field("s", "f64"),
            MemberDescriptor::field("v", "f64"),
        ]
    }
    fn get_member(&self, name: &str) -> Result<Option<Value>, InspectError> {
        match name {
            "h" => Ok(value_of(&self.h)),
            "s" => Ok(value_of(&self.s)),
            "v" => Ok(value_of(&self.v)),
            _ => Err(InspectError::UnknownMember(name.to_string())),
        }
    }
}

impl Inspect for Vec2 {
    fn type_name(&self) -> String {
        "Vec2".to_string()
    }
    fn display_value(&self) -> String {
        format!("({}, {})", self.x, self.y)
    }
    fn members(&self) -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::field("x", "f64"),
            MemberDescriptor::field("y", "f64"),
        ]
    }
    fn get_member(&self, name: &str) -> Result<Option<Value>, InspectError> {
        match name {
            "x" => Ok(value_of(&self.x)),
            "y" => Ok(value_of(&self.y)),
            _ => Err(InspectError::UnknownMember(name.to_string())),
        }
    }
}

impl Inspect for Rect {
    fn type_name(&self) -> String {
        "Rect".to_string()
    }
    fn display_value(&self) -> String {
        format!("{}x{} at ({}, {})", self.w, self.h, self.x, self.y)
    }
    fn members(&self) -> Vec<MemberDescriptor> {
        ["x", "y", "w", "h"]
            .into_iter()
            .map(|n| MemberDescriptor::field(n, "f64"))
            .collect()
    }
    fn get_member(&self, name: &str) -> Result<Option<Value>, InspectError> {
        match name {
            "x" => Ok(value_of(&self.x)),
            "y" => Ok(value_of(&self.y)),
            "w" => Ok(value_of(&self.w)),
            "h" => Ok(value_of(&self.h)),
            _ => Err(InspectError::UnknownMember(name.to_string())),
        }
    }
}
