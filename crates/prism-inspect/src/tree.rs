use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use prism_core::{Dispatcher, Signal, SubId, signal};
use scheduled_thread_pool::ScheduledThreadPool;
use slotmap::{SlotMap, new_key_type};
use web_time::Instant;

use crate::discover::{ChildSpec, DiscoveryFlags, MemberIcon, discover_children};
use crate::inspect::Value;

new_key_type! {
    pub struct NodeId;
}

#[derive(Clone, Debug)]
pub struct TreeConfig {
    pub worker_threads: usize,
    pub loading_label: String,
    pub items_label: String,
    pub discovery: DiscoveryFlags,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            worker_threads: 1,
            loading_label: "Loading...".to_string(),
            items_label: "[Items]".to_string(),
            discovery: DiscoveryFlags::default(),
        }
    }
}

/// One row of the tree.
pub struct PropertyNode {
    name: String,
    value: String,
    display_type: String,
    icon: MemberIcon,
    can_expand: bool,
    is_loading: bool,
    is_expanded: bool,
    children_loaded: bool,
    /// `None` is the placeholder shown before first expansion.
    children: Vec<Option<NodeId>>,
    object: Option<Value>,
    parent: Option<NodeId>,
}

impl PropertyNode {
    fn from_spec(spec: &ChildSpec, parent: Option<NodeId>) -> Self {
        Self {
            name: spec.name.clone(),
            value: spec.value.clone(),
            display_type: spec.display_type.clone(),
            icon: spec.icon,
            can_expand: spec.can_expand,
            is_loading: false,
            is_expanded: false,
            children_loaded: false,
            children: Vec::new(),
            object: spec.object.clone(),
            parent,
        }
    }

    fn loading_marker(label: &str, parent: NodeId) -> Self {
        Self {
            name: label.to_string(),
            value: String::new(),
            display_type: String::new(),
            icon: MemberIcon::None,
            can_expand: false,
            is_loading: true,
            is_expanded: false,
            children_loaded: false,
            children: Vec::new(),
            object: None,
            parent: Some(parent),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn value(&self) -> &str {
        &self.value
    }
    pub fn display_type(&self) -> &str {
        &self.display_type
    }
    pub fn icon(&self) -> MemberIcon {
        self.icon
    }
    pub fn can_expand(&self) -> bool {
        self.can_expand
    }
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }
    pub fn children_loaded(&self) -> bool {
        self.children_loaded
    }
    pub fn children(&self) -> &[Option<NodeId>] {
        &self.children
    }
    pub fn object(&self) -> Option<&Value> {
        self.object.as_ref()
    }
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Property inspector over an [`Inspect`](crate::Inspect) object graph.
///
/// Children are discovered on first expansion, on a worker thread. Results
/// come back through the tree's dispatcher and are applied by [`pump`].
/// The tree itself stays on the thread that owns it.
///
/// [`pump`]: PropertyTree::pump
pub struct PropertyTree {
    config: TreeConfig,
    nodes: SlotMap<NodeId, PropertyNode>,
    roots: Vec<NodeId>,
    pool: ScheduledThreadPool,
    dispatcher: Dispatcher<PropertyTree>,
    in_flight: Arc<AtomicUsize>,
    revision: Signal<u64>,
    discoveries: usize,
}

impl Default for PropertyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyTree {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        let pool = ScheduledThreadPool::with_name("prism-inspect-{}", config.worker_threads.max(1));
        Self {
            config,
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            pool,
            dispatcher: Dispatcher::new(),
            in_flight: Arc::new(AtomicUsize::new(0)),
            revision: signal(0),
            discoveries: 0,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Replace the whole tree. The root is named after the object's type.
    /// Discoveries still running for the old tree are dropped on arrival.
    pub fn set_root_object(&mut self, object: Option<Value>) {
        self.nodes.clear();
        self.roots.clear();
        if let Some(object) = object {
            let mut spec = ChildSpec::for_value(String::new(), Some(object), self.config.discovery);
            spec.name = spec.display_type.clone();
            let id = self.insert(spec, None);
            self.roots.push(id);
            log::debug!("inspecting {}", self.nodes[id].name);
        }
        self.bump();
    }

    pub fn root_nodes(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&PropertyNode> {
        self.nodes.get(id)
    }

    /// Materialised children. Empty for unknown ids and placeholders.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|n| n.children.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// First child named `name`, for hosts that navigate by path.
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .into_iter()
            .find(|c| self.nodes.get(*c).is_some_and(|n| n.name == name))
    }

    /// Number of discoveries started since construction.
    pub fn discoveries_started(&self) -> usize {
        self.discoveries
    }

    pub fn on_changed(&self, f: impl Fn(&u64) + 'static) -> SubId {
        self.revision.subscribe(f)
    }

    pub fn remove_listener(&self, id: SubId) {
        self.revision.unsubscribe(id);
    }

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.is_expanded == expanded {
            return;
        }
        node.is_expanded = expanded;
        let needs_discovery =
            expanded && node.can_expand && !node.children_loaded && !node.is_loading;
        if needs_discovery {
            self.start_discovery(id);
        }
        self.bump();
    }

    fn start_discovery(&mut self, id: NodeId) {
        let Some((object, name)) = self
            .nodes
            .get(id)
            .and_then(|n| Some((n.object.clone()?, n.name.clone())))
        else {
            return;
        };
        let marker = PropertyNode::loading_marker(&self.config.loading_label, id);
        let marker = self.nodes.insert(marker);
        let node = &mut self.nodes[id];
        node.is_loading = true;
        node.children = vec![Some(marker)];

        self.discoveries += 1;
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let handle = self.dispatcher.handle();
        let in_flight = self.in_flight.clone();
        let flags = self.config.discovery;
        let items_label = self.config.items_label.clone();
        log::trace!("discovering children of {name}");

        self.pool.execute(move || {
            let started = Instant::now();
            let discovered = catch_unwind(AssertUnwindSafe(|| {
                discover_children(&*object, flags, &items_label)
            }));
            // A value that panics outside its getters still finishes loading, empty.
            let children = discovered.unwrap_or_else(|_| {
                log::warn!("{name}: discovery panicked");
                Vec::new()
            });
            log::debug!(
                "{name}: {} children in {:?}",
                children.len(),
                started.elapsed()
            );
            handle.post(move |tree: &mut PropertyTree| tree.apply_children(id, children));
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    fn apply_children(&mut self, id: NodeId, specs: Vec<ChildSpec>) {
        let Some(node) = self.nodes.get_mut(id) else {
            log::warn!("dropping {} children for a node that is gone", specs.len());
            return;
        };
        let old = std::mem::take(&mut node.children);
        for child in old.into_iter().flatten() {
            self.remove_subtree(child);
        }
        let children: Vec<Option<NodeId>> = specs
            .into_iter()
            .map(|spec| Some(self.insert(spec, Some(id))))
            .collect();
        if let Some(node) = self.nodes.get_mut(id) {
            node.children = children;
            node.is_loading = false;
            node.children_loaded = true;
        }
        self.bump();
    }

    fn insert(&mut self, mut spec: ChildSpec, parent: Option<NodeId>) -> NodeId {
        let eager = spec.eager_children.take();
        let id = self.nodes.insert(PropertyNode::from_spec(&spec, parent));
        match eager {
            Some(specs) => {
                let children = specs
                    .into_iter()
                    .map(|s| Some(self.insert(s, Some(id))))
                    .collect();
                let node = &mut self.nodes[id];
                node.children = children;
                node.children_loaded = true;
            }
            None if spec.can_expand => self.nodes[id].children = vec![None],
            None => {}
        }
        id
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(id) {
            for child in node.children.into_iter().flatten() {
                self.remove_subtree(child);
            }
        }
    }

    fn bump(&self) {
        self.revision.update(|r| *r += 1);
    }

    /// Apply finished discoveries. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let jobs = self.dispatcher.drain();
        let n = jobs.len();
        for job in jobs {
            job(self);
        }
        n
    }

    /// No discovery running and nothing left to apply.
    pub fn is_idle(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) == 0 && self.dispatcher.is_empty()
    }

    /// Pump until idle. Returns `false` if `timeout` ran out first.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.pump();
            if self.is_idle() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    /// Indented dump of the visible rows. `+` marks a collapsed expandable
    /// node, `-` an expanded one.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for &root in &self.roots {
            self.render_node(root, 0, &mut out);
        }
        out
    }

    fn render_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let marker = match (node.can_expand, node.is_expanded) {
            (true, true) => '-',
            (true, false) => '+',
            (false, _) => '*',
        };
        let mut line = format!("{:indent$}{marker} {}", "", node.name, indent = depth * 2);
        if !node.value.is_empty() {
            line.push_str(" = ");
            line.push_str(&node.value);
        }
        if !node.display_type.is_empty() {
            line.push_str(" : ");
            line.push_str(&node.display_type);
        }
        out.push_str(&line);
        out.push('\n');
        if node.is_expanded {
            for child in node.children.iter().flatten() {
                self.render_node(*child, depth + 1, out);
            }
        }
    }
}
