//! Node roster: the ordered set of cluster nodes and their identities.

/// A single cluster node.
///
/// The index is assigned from roster position at construction and is the
/// node's identity everywhere: ensemble member id, `broker.id`, `myid`
/// marker. It never changes for the lifetime of a bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub hostname: String,
    pub index: u32,
}

/// Ordered, immutable roster of cluster nodes.
///
/// Iteration order is the single source of truth: configuration rendering
/// and per-node dispatch both walk the roster in the same order, so the
/// membership lines in the ensemble config always line up with the `myid`
/// markers written during startup.
#[derive(Debug, Clone)]
pub struct NodeRoster {
    nodes: Vec<Node>,
}

impl NodeRoster {
    pub fn new<I, S>(hostnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes = hostnames
            .into_iter()
            .enumerate()
            .map(|(index, hostname)| Node {
                hostname: hostname.into(),
                index: index as u32,
            })
            .collect();
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The designated observation node for cluster-wide gates.
    pub fn first(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a NodeRoster {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
