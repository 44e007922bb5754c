use std::panic::{AssertUnwindSafe, catch_unwind};

use bitflags::bitflags;

use crate::inspect::{Inspect, MemberDescriptor, MemberKind, Value, Visibility};

bitflags! {
    /// Which kinds of children member discovery produces.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DiscoveryFlags: u8 {
        const PROPERTIES = 1 << 0;
        const FIELDS     = 1 << 1;
        /// The synthetic element list of enumerable values.
        const ELEMENTS   = 1 << 2;
        /// Internal and protected members. Private ones are never shown.
        const NON_PUBLIC = 1 << 3;
    }
}

impl Default for DiscoveryFlags {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MemberIcon {
    #[default]
    None,
    PublicProperty,
    NonPublicProperty,
    PublicField,
    NonPublicField,
}

impl MemberIcon {
    pub fn for_member(member: &MemberDescriptor) -> Self {
        match (member.kind, member.is_public()) {
            (MemberKind::Property, true) => MemberIcon::PublicProperty,
            (MemberKind::Property, false) => MemberIcon::NonPublicProperty,
            (MemberKind::Field, true) => MemberIcon::PublicField,
            (MemberKind::Field, false) => MemberIcon::NonPublicField,
        }
    }
}

/// A child node as computed off the UI thread, before it gets an id.
#[derive(Clone)]
pub struct ChildSpec {
    pub name: String,
    pub value: String,
    pub display_type: String,
    pub icon: MemberIcon,
    pub object: Option<Value>,
    pub can_expand: bool,
    /// Children known up front. Element lists are built this way.
    pub eager_children: Option<Vec<ChildSpec>>,
}

impl std::fmt::Debug for ChildSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildSpec")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("display_type", &self.display_type)
            .field("icon", &self.icon)
            .field("can_expand", &self.can_expand)
            .finish_non_exhaustive()
    }
}

impl ChildSpec {
    /// Node for a value shown under its runtime type name.
    pub fn for_value(name: impl Into<String>, object: Option<Value>, flags: DiscoveryFlags) -> Self {
        let described = describe(object, flags);
        Self::new(name.into(), described.type_name.clone(), MemberIcon::None, described)
    }

    fn new(name: String, display_type: String, icon: MemberIcon, described: Described) -> Self {
        Self {
            name,
            value: described.text,
            display_type,
            icon,
            object: described.object,
            can_expand: described.can_expand,
            eager_children: None,
        }
    }
}

struct Described {
    object: Option<Value>,
    text: String,
    type_name: String,
    can_expand: bool,
}

impl Described {
    fn null() -> Self {
        Self {
            object: None,
            text: "null".to_string(),
            type_name: String::new(),
            can_expand: false,
        }
    }
}

// Text, type and expandability of a value. A value that panics while being
// described reads as null.
fn describe(object: Option<Value>, flags: DiscoveryFlags) -> Described {
    let Some(object) = object else {
        return Described::null();
    };
    let described = catch_unwind(AssertUnwindSafe(|| {
        (
            object.display_value(),
            object.type_name(),
            is_expandable(&*object, flags),
        )
    }));
    match described {
        Ok((text, type_name, can_expand)) => Described {
            object: Some(object),
            text,
            type_name,
            can_expand,
        },
        Err(_) => {
            log::debug!("value panicked while being described");
            Described::null()
        }
    }
}

fn is_accessible(member: &MemberDescriptor, flags: DiscoveryFlags) -> bool {
    let kind_enabled = match member.kind {
        MemberKind::Property => flags.contains(DiscoveryFlags::PROPERTIES) && member.readable,
        MemberKind::Field => flags.contains(DiscoveryFlags::FIELDS),
    };
    let visible = match member.visibility {
        Visibility::Public => true,
        Visibility::Internal | Visibility::Protected => flags.contains(DiscoveryFlags::NON_PUBLIC),
        Visibility::Private => false,
    };
    kind_enabled && visible
}

fn has_element_list(object: &dyn Inspect, flags: DiscoveryFlags) -> bool {
    flags.contains(DiscoveryFlags::ELEMENTS) && !object.is_text()
}

/// Accessible members: properties first, then fields, each group sorted by
/// upper-cased name.
pub fn accessible_members(object: &dyn Inspect, flags: DiscoveryFlags) -> Vec<MemberDescriptor> {
    let (mut properties, mut fields): (Vec<_>, Vec<_>) = object
        .members()
        .into_iter()
        .filter(|m| is_accessible(m, flags))
        .partition(|m| m.kind == MemberKind::Property);
    properties.sort_by_cached_key(|m| m.name.to_uppercase());
    fields.sort_by_cached_key(|m| m.name.to_uppercase());
    properties.extend(fields);
    properties
}

pub fn is_expandable(object: &dyn Inspect, flags: DiscoveryFlags) -> bool {
    if object.members().iter().any(|m| is_accessible(m, flags)) {
        return true;
    }
    has_element_list(object, flags) && object.is_enumerable()
}

// A getter that errors or panics reads as null.
fn read_member(object: &dyn Inspect, member: &MemberDescriptor) -> Option<Value> {
    match catch_unwind(AssertUnwindSafe(|| object.get_member(&member.name))) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            log::debug!("{}: {e}", member.name);
            None
        }
        Err(_) => {
            log::debug!("{}: getter panicked", member.name);
            None
        }
    }
}

/// Children of `object`: one node per accessible member, plus the element
/// list for non-text enumerables.
pub fn discover_children(
    object: &dyn Inspect,
    flags: DiscoveryFlags,
    items_label: &str,
) -> Vec<ChildSpec> {
    let mut children: Vec<ChildSpec> = accessible_members(object, flags)
        .into_iter()
        .map(|m| {
            let described = describe(read_member(object, &m), flags);
            let icon = MemberIcon::for_member(&m);
            ChildSpec::new(m.name, m.declared_type, icon, described)
        })
        .collect();

    if has_element_list(object, flags)
        && let Some(elements) = object.elements()
    {
        let items: Vec<ChildSpec> = elements
            .into_iter()
            .enumerate()
            .map(|(i, e)| ChildSpec::for_value(format!("[{i}]"), e, flags))
            .collect();
        children.push(ChildSpec {
            name: items_label.to_string(),
            value: format!("Count = {}", items.len()),
            display_type: String::new(),
            icon: MemberIcon::None,
            object: None,
            can_expand: !items.is_empty(),
            eager_children: Some(items),
        });
    }
    children
}
